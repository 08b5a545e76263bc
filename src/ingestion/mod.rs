pub mod gltf_loader;
pub mod json_loader;
pub mod obj_loader;
pub mod ply_loader;

use std::path::Path;

use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::{Result, StripError};
use crate::types::IndexedMesh;

/// Result of the ingestion stage.
#[derive(Debug)]
pub struct IngestionResult {
    pub meshes: Vec<IndexedMesh>,
    pub stats: IngestionStats,
}

/// Statistics about the ingested data.
#[derive(Debug)]
pub struct IngestionStats {
    pub total_vertices: usize,
    pub total_triangles: usize,
    pub total_meshes: usize,
    pub input_format: String,
}

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Obj,
    Gltf,
    Glb,
    Ply,
    Json,
}

impl InputFormat {
    /// Detect format from file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "obj" => Ok(InputFormat::Obj),
            "gltf" => Ok(InputFormat::Gltf),
            "glb" => Ok(InputFormat::Glb),
            "ply" => Ok(InputFormat::Ply),
            "json" => Ok(InputFormat::Json),
            _ => Err(StripError::Input(format!(
                "Unsupported file format: .{ext}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Obj => "OBJ",
            InputFormat::Gltf => "glTF",
            InputFormat::Glb => "GLB",
            InputFormat::Ply => "PLY",
            InputFormat::Json => "JSON",
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run the full ingestion stage.
pub fn ingest(config: &PipelineConfig) -> Result<IngestionResult> {
    if !config.input.exists() {
        return Err(StripError::Input(format!(
            "Input file not found: {}",
            config.input.display()
        )));
    }

    let format = InputFormat::from_path(&config.input)?;
    info!(format = %format, path = %config.input.display(), "Detected input format");

    let meshes = match format {
        InputFormat::Obj => obj_loader::load_obj(&config.input)?,
        InputFormat::Gltf | InputFormat::Glb => gltf_loader::load_gltf(&config.input)?,
        InputFormat::Ply => vec![ply_loader::load_ply(&config.input)?],
        InputFormat::Json => json_loader::load_json(&config.input)?,
    };

    let stats = compute_stats(&meshes, format);
    debug!(
        vertices = stats.total_vertices,
        triangles = stats.total_triangles,
        meshes = stats.total_meshes,
        "Ingestion stats"
    );

    Ok(IngestionResult { meshes, stats })
}

/// Compute summary statistics from the ingested meshes.
pub fn compute_stats(meshes: &[IndexedMesh], format: InputFormat) -> IngestionStats {
    IngestionStats {
        total_vertices: meshes.iter().map(|m| m.vertex_count).sum(),
        total_triangles: meshes.iter().map(|m| m.triangle_count()).sum(),
        total_meshes: meshes.len(),
        input_format: format.to_string(),
    }
}

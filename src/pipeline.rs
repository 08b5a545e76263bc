use std::borrow::Cow;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{PipelineConfig, StripConfig};
use crate::error::Result;
use crate::graph::builder::validate_indices;
use crate::ingestion;
use crate::output;
use crate::strip::Stripifier;
use crate::types::{IndexedMesh, StripOutput, StripStats};

/// Strips produced for one ingested mesh.
#[derive(Debug, Clone, Serialize)]
pub struct MeshStrips {
    pub name: String,
    pub vertex_count: usize,
    pub stats: StripStats,
    pub strips: StripOutput,
}

/// Summary of a completed pipeline run.
#[derive(Debug)]
pub struct ProcessingResult {
    pub meshes: Vec<MeshStrips>,
    pub totals: StripStats,
    pub duration: Duration,
}

/// Pipeline orchestrator: ingestion, stripification and report output.
pub struct Pipeline;

impl Pipeline {
    /// Run the full pipeline.
    pub fn run(config: &PipelineConfig) -> Result<ProcessingResult> {
        let start = Instant::now();

        info!(input = %config.input.display(), "Starting pipeline");

        info!("Stage 1/3: Ingestion");
        let ingestion_result = ingestion::ingest(config)?;

        info!("Stage 2/3: Stripification");
        let meshes = Self::stripify_meshes(&ingestion_result.meshes, config)?;
        let totals = total_stats(&meshes);

        info!("Stage 3/3: Output");
        output::write_report(&ingestion_result.stats.input_format, &meshes, &totals, config)?;

        let duration = start.elapsed();
        info!(
            meshes = meshes.len(),
            strips = totals.strips,
            indices = totals.indices,
            elapsed = ?duration,
            "Pipeline complete"
        );

        Ok(ProcessingResult {
            meshes,
            totals,
            duration,
        })
    }

    /// Stripify every mesh in parallel. The first failing mesh fails the
    /// whole batch.
    pub fn stripify_meshes(
        meshes: &[IndexedMesh],
        config: &PipelineConfig,
    ) -> Result<Vec<MeshStrips>> {
        meshes
            .par_iter()
            .map(|mesh| stripify_mesh(mesh, config))
            .collect()
    }
}

/// Stripify one mesh, optionally reordering its triangles for the vertex
/// cache first.
pub fn stripify_mesh(mesh: &IndexedMesh, config: &PipelineConfig) -> Result<MeshStrips> {
    let strip_config = StripConfig {
        vertex_count: Some(mesh.vertex_count),
        ..config.strip.clone()
    };

    let indices: Cow<'_, [u32]> = if config.optimize_cache && !mesh.is_empty() {
        // meshopt asserts on malformed buffers, so validate up front
        validate_indices(&mesh.indices, strip_config.vertex_count)?;
        Cow::Owned(meshopt::optimize_vertex_cache(&mesh.indices, mesh.vertex_count))
    } else {
        Cow::Borrowed(mesh.indices.as_slice())
    };

    let result = Stripifier::run(&indices, &strip_config)
        .inspect_err(|e| warn!(mesh = %mesh.name, "Stripification failed: {e}"))?;

    debug!(
        mesh = %mesh.name,
        triangles = result.stats.triangles,
        strips = result.stats.strips,
        indices_per_triangle = result.stats.indices_per_triangle(),
        "Stripified mesh"
    );

    Ok(MeshStrips {
        name: mesh.name.clone(),
        vertex_count: mesh.vertex_count,
        stats: result.stats,
        strips: result.output,
    })
}

/// Sum of the per-mesh counters.
pub fn total_stats(meshes: &[MeshStrips]) -> StripStats {
    meshes.iter().fold(StripStats::default(), |mut acc, m| {
        acc.accumulate(&m.stats);
        acc
    })
}

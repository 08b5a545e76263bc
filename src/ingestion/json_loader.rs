use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, StripError};
use crate::types::IndexedMesh;

/// Accepted JSON layouts: one bare index array, or a list of named buffers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonInput {
    Bare(Vec<u32>),
    Named(Vec<NamedBuffer>),
}

#[derive(Debug, Deserialize)]
struct NamedBuffer {
    #[serde(default)]
    name: Option<String>,
    indices: Vec<u32>,
    #[serde(default)]
    vertex_count: Option<usize>,
}

/// Load raw index buffers from a JSON file.
pub fn load_json(path: &Path) -> Result<Vec<IndexedMesh>> {
    let text = fs::read_to_string(path)
        .map_err(|e| StripError::Input(format!("Failed to read {}: {e}", path.display())))?;
    let meshes = parse_json(&text)?;
    debug!(buffers = meshes.len(), "Loaded JSON index buffers");
    Ok(meshes)
}

/// Parse the JSON text of an index buffer file.
///
/// Without an explicit `vertex_count` the slot count is inferred from the
/// largest index.
pub fn parse_json(text: &str) -> Result<Vec<IndexedMesh>> {
    let input: JsonInput = serde_json::from_str(text)
        .map_err(|e| StripError::Input(format!("Failed to parse JSON indices: {e}")))?;

    let buffers = match input {
        JsonInput::Bare(indices) => vec![NamedBuffer {
            name: None,
            indices,
            vertex_count: None,
        }],
        JsonInput::Named(buffers) => buffers,
    };

    Ok(buffers
        .into_iter()
        .enumerate()
        .map(|(i, buffer)| {
            let inferred = buffer
                .indices
                .iter()
                .max()
                .map_or(0, |&max| max as usize + 1);
            IndexedMesh {
                name: buffer.name.unwrap_or_else(|| format!("buffer_{i}")),
                vertex_count: buffer.vertex_count.unwrap_or(inferred),
                indices: buffer.indices,
            }
        })
        .collect())
}

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, StripError};
use crate::types::IndexedMesh;

/// Load every triangle-list primitive of a glTF or GLB file.
///
/// Primitives that are not indexed triangle lists are skipped with a warning.
pub fn load_gltf(path: &Path) -> Result<Vec<IndexedMesh>> {
    let (document, buffers, _images) = gltf::import(path)
        .map_err(|e| StripError::Input(format!("Failed to load glTF: {e}")))?;

    debug!(meshes = document.meshes().len(), "Loaded glTF document");

    let mut meshes = Vec::new();

    for mesh in document.meshes() {
        let mesh_name = mesh
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("mesh_{}", mesh.index()));

        for primitive in mesh.primitives() {
            let name = format!("{mesh_name}/{}", primitive.index());
            match extract_primitive(&primitive, &buffers, name) {
                Ok(indexed) => meshes.push(indexed),
                Err(e) => {
                    warn!(mesh = %mesh_name, "Skipping primitive: {e}");
                }
            }
        }
    }

    Ok(meshes)
}

/// Extract the index buffer of a single glTF primitive.
fn extract_primitive(
    primitive: &gltf::Primitive<'_>,
    buffers: &[gltf::buffer::Data],
    name: String,
) -> Result<IndexedMesh> {
    if primitive.mode() != gltf::mesh::Mode::Triangles {
        return Err(StripError::Input(format!(
            "Primitive mode {:?} is not a triangle list",
            primitive.mode()
        )));
    }

    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    let vertex_count = reader
        .read_positions()
        .ok_or_else(|| StripError::Input("Primitive missing positions".into()))?
        .count();

    let indices: Vec<u32> = reader
        .read_indices()
        .ok_or_else(|| StripError::Input("Primitive missing indices".into()))?
        .into_u32()
        .collect();

    Ok(IndexedMesh {
        name,
        indices,
        vertex_count,
    })
}

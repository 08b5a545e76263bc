use std::path::Path;

use tracing::debug;

use crate::error::{Result, StripError};
use crate::types::IndexedMesh;

/// Load every object of an OBJ file as its own index buffer.
///
/// Materials are not needed for stripping; a missing MTL file is ignored.
pub fn load_obj(path: &Path) -> Result<Vec<IndexedMesh>> {
    let (models, _materials) = tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS)
        .map_err(|e| StripError::Input(format!("Failed to load OBJ: {e}")))?;

    debug!(model_count = models.len(), "Loaded OBJ models");

    Ok(models
        .into_iter()
        .map(|model| convert_mesh(model.name, model.mesh))
        .collect())
}

/// Convert a `tobj::Mesh` into an `IndexedMesh`, keeping only connectivity.
fn convert_mesh(name: String, mesh: tobj::Mesh) -> IndexedMesh {
    IndexedMesh {
        name,
        vertex_count: mesh.positions.len() / 3,
        indices: mesh.indices,
    }
}

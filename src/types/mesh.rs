/// An index buffer extracted from an input file.
///
/// Only connectivity is kept; vertex attributes stay with the exporter that
/// resolves slot indices back into vertex data.
#[derive(Debug, Clone, Default)]
pub struct IndexedMesh {
    /// Source object / primitive name, if the format has one
    pub name: String,
    /// Triangle list: every run of 3 indices is one triangle
    pub indices: Vec<u32>,
    /// Number of vertex slots the indices refer to
    pub vertex_count: usize,
}

impl IndexedMesh {
    /// Number of triangles (indices / 3).
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the mesh contains no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mesh() {
        let mesh = IndexedMesh::default();
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
        assert_eq!(mesh.vertex_count, 0);
    }

    #[test]
    fn quad_two_triangles() {
        let mesh = IndexedMesh {
            name: "quad".into(),
            indices: vec![0, 1, 2, 0, 2, 3],
            vertex_count: 4,
        };

        assert!(!mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 2);
    }
}

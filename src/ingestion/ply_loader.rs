use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};
use tracing::debug;

use crate::error::{Result, StripError};
use crate::types::IndexedMesh;

/// Load the face list of a PLY file as one index buffer.
pub fn load_ply(path: &Path) -> Result<IndexedMesh> {
    let file =
        File::open(path).map_err(|e| StripError::Input(format!("Failed to open PLY: {e}")))?;
    let mut reader = BufReader::new(file);

    let parser = Parser::<DefaultElement>::new();
    let ply = parser
        .read_ply(&mut reader)
        .map_err(|e| StripError::Input(format!("Failed to parse PLY: {e}")))?;

    let vertex_count = ply
        .payload
        .get("vertex")
        .map(Vec::len)
        .ok_or_else(|| StripError::Input("PLY file missing 'vertex' element".into()))?;

    let mut indices = Vec::new();
    if let Some(faces) = ply.payload.get("face") {
        debug!(face_count = faces.len(), vertex_count, "Parsing PLY faces");
        for face in faces {
            triangulate_fan(&get_index_list(face)?, &mut indices);
        }
    }

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    Ok(IndexedMesh {
        name,
        indices,
        vertex_count,
    })
}

/// Fan-triangulate one polygon; faces with fewer than 3 corners are dropped.
fn triangulate_fan(polygon: &[u32], out: &mut Vec<u32>) {
    if polygon.len() < 3 {
        return;
    }
    for i in 1..polygon.len() - 1 {
        out.extend_from_slice(&[polygon[0], polygon[i], polygon[i + 1]]);
    }
}

/// Extract the index list from a face element.
fn get_index_list(face: &DefaultElement) -> Result<Vec<u32>> {
    // Try "vertex_indices" first, then "vertex_index"
    let key = if face.contains_key("vertex_indices") {
        "vertex_indices"
    } else {
        "vertex_index"
    };

    let prop = face
        .get(key)
        .ok_or_else(|| StripError::Input("PLY face missing vertex_indices property".into()))?;

    let negative = || StripError::Input("PLY face has a negative vertex index".into());
    match prop {
        Property::ListInt(v) => v
            .iter()
            .map(|&i| u32::try_from(i).map_err(|_| negative()))
            .collect(),
        Property::ListShort(v) => v
            .iter()
            .map(|&i| u32::try_from(i).map_err(|_| negative()))
            .collect(),
        Property::ListChar(v) => v
            .iter()
            .map(|&i| u32::try_from(i).map_err(|_| negative()))
            .collect(),
        Property::ListUInt(v) => Ok(v.clone()),
        Property::ListUShort(v) => Ok(v.iter().map(|&i| u32::from(i)).collect()),
        Property::ListUChar(v) => Ok(v.iter().map(|&i| u32::from(i)).collect()),
        _ => Err(StripError::Input(
            "PLY face vertex_indices has unsupported type".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_ascii_ply(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn load_ascii_ply_basic() {
        let ply_content = "\
ply
format ascii 1.0
element vertex 3
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0.0 0.0 0.0
1.0 0.0 0.0
0.0 1.0 0.0
3 0 1 2
";
        let file = write_ascii_ply(ply_content);
        let mesh = load_ply(file.path()).unwrap();

        assert_eq!(mesh.vertex_count, 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn polygon_triangulation() {
        let ply_content = "\
ply
format ascii 1.0
element vertex 4
property float x
property float y
property float z
element face 1
property list uchar int vertex_indices
end_header
0.0 0.0 0.0
1.0 0.0 0.0
1.0 1.0 0.0
0.0 1.0 0.0
4 0 1 2 3
";
        let file = write_ascii_ply(ply_content);
        let mesh = load_ply(file.path()).unwrap();

        // Quad -> 2 triangles
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn point_cloud_has_no_triangles() {
        let ply_content = "\
ply
format ascii 1.0
element vertex 2
property float x
property float y
property float z
end_header
0.0 0.0 0.0
1.0 0.0 0.0
";
        let file = write_ascii_ply(ply_content);
        let mesh = load_ply(file.path()).unwrap();
        assert_eq!(mesh.vertex_count, 2);
        assert!(mesh.is_empty());
    }

    #[test]
    fn fan_skips_short_faces() {
        let mut out = Vec::new();
        triangulate_fan(&[0, 1], &mut out);
        assert!(out.is_empty());
        triangulate_fan(&[0, 1, 2, 3, 4], &mut out);
        assert_eq!(out, vec![0, 1, 2, 0, 2, 3, 0, 3, 4]);
    }

    #[test]
    fn negative_index_rejected() {
        let mut face = DefaultElement::new();
        face.insert("vertex_indices".to_string(), Property::ListInt(vec![0, -1, 2]));
        assert!(get_index_list(&face).is_err());
    }
}

use super::growth::StripWalk;
use crate::graph::{MeshGraph, TriangleId};
use crate::types::StripOutput;

/// Final index sequence for one walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledStrip {
    pub indices: Vec<u32>,
    /// The walk came out inverted and had to be fixed
    pub winding_corrected: bool,
}

/// Rotate a triangle so its smallest slot comes first, keeping the winding.
pub fn canonical_triangle(tri: [u32; 3]) -> [u32; 3] {
    let [a, b, c] = tri;
    if a <= b && a <= c {
        [a, b, c]
    } else if b <= a && b <= c {
        [b, c, a]
    } else {
        [c, a, b]
    }
}

/// Whether two triangles have the same corners and the same winding.
pub fn same_winding(a: [u32; 3], b: [u32; 3]) -> bool {
    canonical_triangle(a) == canonical_triangle(b)
}

fn is_degenerate(tri: [u32; 3]) -> bool {
    tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2]
}

/// Triangles encoded by one strip, degenerate ones skipped.
///
/// Triangle `i` is `(S[i], S[i+1], S[i+2])` for even `i` and
/// `(S[i+1], S[i], S[i+2])` for odd `i`.
pub fn decode_strip(strip: &[u32]) -> Vec<[u32; 3]> {
    strip
        .windows(3)
        .enumerate()
        .filter_map(|(i, w)| {
            let tri = if i % 2 == 0 {
                [w[0], w[1], w[2]]
            } else {
                [w[1], w[0], w[2]]
            };
            (!is_degenerate(tri)).then_some(tri)
        })
        .collect()
}

/// Triangles encoded by a stripifier output, in emission order.
pub fn decode_output(output: &StripOutput) -> Vec<[u32; 3]> {
    output
        .as_strips()
        .into_iter()
        .flat_map(decode_strip)
        .collect()
}

/// Flatten decoded triangles back into a triangle-list index buffer.
pub fn decode_triangle_list(output: &StripOutput) -> Vec<u32> {
    decode_output(output).into_iter().flatten().collect()
}

/// A lone triangle, in its input corner order.
pub fn z_triangle(graph: &MeshGraph, t: TriangleId) -> Vec<u32> {
    graph.triangle_slots(t).to_vec()
}

/// Convert a walk into its index sequence with the input winding.
///
/// Consecutive walk triangles cross their shared edge in opposite
/// directions, so either every triangle decodes with its input winding or
/// every one decodes inverted. Inversion is detected on the first triangle
/// and fixed by reversing an odd-length strip (which flips all of them) or
/// by repeating the first index of an even-length one.
pub fn assemble(graph: &MeshGraph, walk: &StripWalk) -> AssembledStrip {
    let mut indices: Vec<u32> = walk.seq.iter().map(|&v| graph.slot(v)).collect();

    let Some(&first) = walk.triangles.first() else {
        return AssembledStrip {
            indices,
            winding_corrected: false,
        };
    };

    let leading = [indices[0], indices[1], indices[2]];
    let winding_corrected = !same_winding(leading, graph.triangle_slots(first));
    if winding_corrected {
        if indices.len() % 2 == 1 {
            indices.reverse();
        } else {
            indices.insert(0, indices[0]);
        }
    }

    AssembledStrip {
        indices,
        winding_corrected,
    }
}

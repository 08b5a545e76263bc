use crate::graph::{EdgeId, MeshGraph, TriangleId};

/// A triangle the strip could move into next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub triangle: TriangleId,
    /// Edge shared with the current triangle
    pub edge: EdgeId,
    /// Reaching it means leaving through the non-leading edge
    pub swap: bool,
}

/// Number of unused triangles, other than `candidate`, touching either end
/// of `edge`.
pub fn connectivity(graph: &MeshGraph, edge: EdgeId, candidate: TriangleId) -> usize {
    let [a, b] = graph.edge(edge).vertices;
    let around_a = graph
        .vertex(a)
        .triangles
        .iter()
        .filter(|&&t| t != candidate && !graph.is_used(t))
        .count();
    let around_b_only = graph
        .vertex(b)
        .triangles
        .iter()
        .filter(|&&t| t != candidate && !graph.is_used(t) && !graph.triangle(t).contains(a))
        .count();
    around_a + around_b_only
}

/// Final weight of every candidate, lower is better.
///
/// `has_context` is true once the strip has a previous vertex, which is
/// when swapping starts to cost something.
pub fn weights(graph: &MeshGraph, candidates: &[Candidate], has_context: bool) -> Vec<i64> {
    let connectivities: Vec<usize> = candidates
        .iter()
        .map(|c| connectivity(graph, c.edge, c.triangle))
        .collect();
    let max_connectivity = connectivities.iter().copied().max().unwrap_or(0);

    candidates
        .iter()
        .zip(&connectivities)
        .map(|(c, &conn)| {
            let mut weight = graph.available_neighbors(c.triangle) as i64;
            if has_context {
                weight += if c.swap { 1 } else { -1 };
            }
            if conn < max_connectivity {
                weight += 1;
            }
            weight
        })
        .collect()
}

/// Pick the best candidate.
///
/// Lowest weight wins; ties go to the candidate that needs no swap, then to
/// the earliest input triangle.
pub fn choose(graph: &MeshGraph, candidates: &[Candidate], has_context: bool) -> Option<Candidate> {
    match candidates {
        [] => None,
        [only] => Some(*only),
        _ => {
            let weights = weights(graph, candidates, has_context);
            candidates
                .iter()
                .zip(weights)
                .min_by_key(|(c, w)| (*w, c.swap, c.triangle))
                .map(|(c, _)| *c)
        }
    }
}

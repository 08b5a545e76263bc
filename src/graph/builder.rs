use std::collections::HashMap;

use tracing::{debug, warn};

use super::{Edge, EdgeId, MeshGraph, Triangle, TriangleId, Vertex, VertexId};
use crate::config::ManifoldPolicy;
use crate::error::{Result, StripError, TopologyError};

/// Check an index buffer before any graph is built.
///
/// Rejects a length that is not a multiple of 3 and (when `vertex_count` is
/// given) out-of-range slots.
pub fn validate_indices(indices: &[u32], vertex_count: Option<usize>) -> Result<()> {
    if indices.len() % 3 != 0 {
        return Err(StripError::InvalidInput(format!(
            "length {} is not a multiple of 3",
            indices.len()
        )));
    }

    if let Some(count) = vertex_count {
        for (tri, corners) in indices.chunks_exact(3).enumerate() {
            if let Some(&slot) = corners.iter().find(|&&s| s as usize >= count) {
                return Err(StripError::InvalidInput(format!(
                    "triangle {tri} references vertex {slot}, but only {count} vertices exist"
                )));
            }
        }
    }

    Ok(())
}

fn is_degenerate(corners: &[u32]) -> bool {
    corners[0] == corners[1] || corners[1] == corners[2] || corners[0] == corners[2]
}

impl MeshGraph {
    /// Build the adjacency graph for a triangle list that has passed
    /// [`validate_indices`].
    ///
    /// Triangles keep their input order and winding. Triangles naming one
    /// slot twice cover no area and are left out of the graph; their count is
    /// kept in [`MeshGraph::degenerate_count`]. Under
    /// [`ManifoldPolicy::Fatal`] the first edge claimed by a third triangle
    /// aborts construction; under [`ManifoldPolicy::Tolerant`] the violation
    /// is recorded in [`MeshGraph::violations`] and the triangle is linked
    /// anyway.
    pub fn build(indices: &[u32], policy: ManifoldPolicy) -> Result<Self> {
        let triangle_count = indices.len() / 3;
        let mut graph = MeshGraph {
            vertices: Vec::new(),
            edges: Vec::with_capacity(triangle_count * 3 / 2 + 1),
            triangles: Vec::with_capacity(triangle_count),
            violations: Vec::new(),
            degenerate: 0,
        };

        let mut slot_map: HashMap<u32, VertexId> = HashMap::new();
        let mut edge_map: HashMap<(VertexId, VertexId), EdgeId> = HashMap::new();

        for (tri_index, corners) in indices.chunks_exact(3).enumerate() {
            if is_degenerate(corners) {
                graph.degenerate += 1;
                continue;
            }

            let tri_id = TriangleId(graph.triangles.len());
            let vertices = [
                graph.vertex_for_slot(&mut slot_map, corners[0]),
                graph.vertex_for_slot(&mut slot_map, corners[1]),
                graph.vertex_for_slot(&mut slot_map, corners[2]),
            ];

            let mut edges = [EdgeId(0); 3];
            for i in 0..3 {
                let edge = graph.edge_for(&mut edge_map, vertices[i], vertices[(i + 1) % 3]);
                graph.register_on_edge(edge, tri_id, tri_index, policy)?;
                edges[i] = edge;
            }

            for &v in &vertices {
                graph.vertices[v.0].triangles.push(tri_id);
            }

            graph.triangles.push(Triangle {
                index: tri_index,
                vertices,
                edges,
                neighbors: Vec::new(),
                used: false,
                in_search_set: false,
            });
        }

        graph.link_neighbors();

        debug!(
            vertices = graph.num_vertices(),
            edges = graph.num_edges(),
            triangles = graph.num_triangles(),
            violations = graph.violations.len(),
            degenerate = graph.degenerate,
            "Built mesh graph"
        );

        Ok(graph)
    }

    fn vertex_for_slot(&mut self, slot_map: &mut HashMap<u32, VertexId>, slot: u32) -> VertexId {
        *slot_map.entry(slot).or_insert_with(|| {
            self.vertices.push(Vertex {
                slot,
                edges: Vec::new(),
                triangles: Vec::new(),
            });
            VertexId(self.vertices.len() - 1)
        })
    }

    fn edge_for(
        &mut self,
        edge_map: &mut HashMap<(VertexId, VertexId), EdgeId>,
        a: VertexId,
        b: VertexId,
    ) -> EdgeId {
        let key = if a < b { (a, b) } else { (b, a) };
        if let Some(&edge) = edge_map.get(&key) {
            return edge;
        }

        let edge = EdgeId(self.edges.len());
        self.edges.push(Edge {
            vertices: [key.0, key.1],
            triangles: Vec::with_capacity(2),
        });
        self.vertices[a.0].edges.push(edge);
        self.vertices[b.0].edges.push(edge);
        edge_map.insert(key, edge);
        edge
    }

    fn register_on_edge(
        &mut self,
        edge: EdgeId,
        tri: TriangleId,
        input_index: usize,
        policy: ManifoldPolicy,
    ) -> Result<()> {
        let e = &self.edges[edge.0];
        if e.triangles.len() >= 2 {
            let [a, b] = e.vertices;
            let (sa, sb) = (self.slot(a), self.slot(b));
            let violation = TopologyError {
                edge: (sa.min(sb), sa.max(sb)),
                attached: e.triangles.iter().map(|t| self.triangles[t.0].index).collect(),
                triangle: input_index,
            };

            match policy {
                ManifoldPolicy::Fatal => return Err(violation.into()),
                ManifoldPolicy::Tolerant => {
                    warn!(
                        edge = ?violation.edge,
                        attached = ?violation.attached,
                        triangle = violation.triangle,
                        "Tolerating non-manifold edge"
                    );
                    self.violations.push(violation);
                }
            }
        }

        self.edges[edge.0].triangles.push(tri);
        Ok(())
    }

    /// Fill every triangle's neighbor list from the edge registrations.
    fn link_neighbors(&mut self) {
        for t in 0..self.triangles.len() {
            let mut neighbors = Vec::with_capacity(3);
            for edge in self.triangles[t].edges {
                for &other in &self.edges[edge.0].triangles {
                    if other.0 != t && !neighbors.contains(&other) {
                        neighbors.push(other);
                    }
                }
            }
            self.triangles[t].neighbors = neighbors;
        }
    }
}

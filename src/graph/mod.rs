pub mod builder;

use crate::error::TopologyError;

/// Position of a [`Vertex`] in the graph's vertex arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub(crate) usize);

/// Position of an [`Edge`] in the graph's edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub(crate) usize);

/// Position of a [`Triangle`] in the graph's triangle arena.
///
/// Triangles are stored in input order, minus any degenerate ones, so this
/// is the input triangle number only when the input had none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriangleId(pub(crate) usize);

impl VertexId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl TriangleId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One distinct vertex slot referenced by the index buffer.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// The slot number as it appears in the index buffer
    pub slot: u32,
    pub edges: Vec<EdgeId>,
    pub triangles: Vec<TriangleId>,
}

/// Undirected adjacency between two vertices.
#[derive(Debug, Clone)]
pub struct Edge {
    pub vertices: [VertexId; 2],
    /// Triangles using this edge; more than two only in tolerant mode
    pub triangles: Vec<TriangleId>,
}

impl Edge {
    pub fn contains(&self, v: VertexId) -> bool {
        self.vertices[0] == v || self.vertices[1] == v
    }
}

/// One input triangle.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Input triangle number
    pub index: usize,
    /// Corners in input order; the order is the winding
    pub vertices: [VertexId; 3],
    /// `edges[i]` joins `vertices[i]` and `vertices[(i + 1) % 3]`
    pub edges: [EdgeId; 3],
    /// Triangles sharing at least one edge, without duplicates
    pub neighbors: Vec<TriangleId>,
    /// Already emitted into a strip
    pub used: bool,
    /// Currently queued for seed selection
    pub in_search_set: bool,
}

impl Triangle {
    pub fn contains(&self, v: VertexId) -> bool {
        self.vertices.contains(&v)
    }

    /// Whether walking the corners in winding order steps from `from` to `to`.
    pub fn has_directed_edge(&self, from: VertexId, to: VertexId) -> bool {
        (0..3).any(|i| self.vertices[i] == from && self.vertices[(i + 1) % 3] == to)
    }
}

/// Arena-backed adjacency graph.
#[derive(Debug, Clone, Default)]
pub struct MeshGraph {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) triangles: Vec<Triangle>,
    pub(crate) violations: Vec<TopologyError>,
    pub(crate) degenerate: usize,
}

impl MeshGraph {
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn triangle(&self, id: TriangleId) -> &Triangle {
        &self.triangles[id.0]
    }

    pub(crate) fn triangle_mut(&mut self, id: TriangleId) -> &mut Triangle {
        &mut self.triangles[id.0]
    }

    pub fn triangle_ids(&self) -> impl Iterator<Item = TriangleId> + '_ {
        (0..self.triangles.len()).map(TriangleId)
    }

    /// Non-manifold edges tolerated during construction.
    pub fn violations(&self) -> &[TopologyError] {
        &self.violations
    }

    /// Input triangles left out for naming one slot twice.
    pub fn degenerate_count(&self) -> usize {
        self.degenerate
    }

    /// Slot number of a vertex.
    pub fn slot(&self, v: VertexId) -> u32 {
        self.vertices[v.0].slot
    }

    /// Slot numbers of a triangle's corners, in winding order.
    pub fn triangle_slots(&self, t: TriangleId) -> [u32; 3] {
        self.triangle(t).vertices.map(|v| self.slot(v))
    }

    pub fn is_used(&self, t: TriangleId) -> bool {
        self.triangles[t.0].used
    }

    pub fn unused_count(&self) -> usize {
        self.triangles.iter().filter(|t| !t.used).count()
    }

    /// Number of neighbors of `t` not yet emitted.
    pub fn available_neighbors(&self, t: TriangleId) -> usize {
        self.triangle(t)
            .neighbors
            .iter()
            .filter(|&&n| !self.is_used(n))
            .count()
    }

    /// The edge of `t` joining `a` and `b`, if any.
    pub fn edge_of(&self, t: TriangleId, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.triangle(t).edges.iter().copied().find(|&e| {
            let edge = self.edge(e);
            edge.contains(a) && edge.contains(b)
        })
    }

    /// The corner of `t` that is not an endpoint of `edge`.
    pub fn opposite_vertex(&self, t: TriangleId, edge: EdgeId) -> Option<VertexId> {
        let e = self.edge(edge);
        self.triangle(t)
            .vertices
            .iter()
            .copied()
            .find(|&v| !e.contains(v))
    }

    /// Whether `to` may directly follow `from` in a strip across `edge`.
    ///
    /// Consecutive strip triangles always traverse their shared edge in
    /// opposite directions, so the two input triangles must as well.
    pub fn preserves_cull_flow(&self, from: TriangleId, to: TriangleId, edge: EdgeId) -> bool {
        let [a, b] = self.edge(edge).vertices;
        let from_tri = self.triangle(from);
        let to_tri = self.triangle(to);
        if from_tri.has_directed_edge(a, b) {
            to_tri.has_directed_edge(b, a)
        } else {
            to_tri.has_directed_edge(a, b)
        }
    }
}

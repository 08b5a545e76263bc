use serde::Serialize;

/// Result of stripifying one index buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "indices")]
pub enum StripOutput {
    /// Independent strips, each at least 3 indices long.
    Strips(Vec<Vec<u32>>),
    /// All strips joined into one with degenerate seams.
    Concatenated(Vec<u32>),
}

impl StripOutput {
    /// Number of strips (1 for a non-empty concatenated strip).
    pub fn strip_count(&self) -> usize {
        match self {
            StripOutput::Strips(strips) => strips.len(),
            StripOutput::Concatenated(strip) => usize::from(!strip.is_empty()),
        }
    }

    /// Total number of indices emitted.
    pub fn index_count(&self) -> usize {
        match self {
            StripOutput::Strips(strips) => strips.iter().map(Vec::len).sum(),
            StripOutput::Concatenated(strip) => strip.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.index_count() == 0
    }

    /// View the output as a list of strips.
    pub fn as_strips(&self) -> Vec<&[u32]> {
        match self {
            StripOutput::Strips(strips) => strips.iter().map(Vec::as_slice).collect(),
            StripOutput::Concatenated(strip) if strip.is_empty() => Vec::new(),
            StripOutput::Concatenated(strip) => vec![strip.as_slice()],
        }
    }
}

/// Counters collected while building strips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StripStats {
    pub triangles: usize,
    pub strips: usize,
    /// Strips holding a single isolated triangle
    pub z_triangles: usize,
    /// Mid-strip swaps paid for with a repeated index
    pub swaps: usize,
    /// Strips whose first triangle needed a winding fix
    pub winding_corrections: usize,
    /// Strips grown from both ends
    pub backward_extensions: usize,
    /// Edges found with more than two triangles (tolerant mode only)
    pub non_manifold_edges: usize,
    /// Input triangles naming one slot twice, dropped before stripping
    pub degenerate_triangles: usize,
    pub indices: usize,
}

impl StripStats {
    /// Add another mesh's counters to these.
    pub fn accumulate(&mut self, other: &StripStats) {
        self.triangles += other.triangles;
        self.strips += other.strips;
        self.z_triangles += other.z_triangles;
        self.swaps += other.swaps;
        self.winding_corrections += other.winding_corrections;
        self.backward_extensions += other.backward_extensions;
        self.non_manifold_edges += other.non_manifold_edges;
        self.degenerate_triangles += other.degenerate_triangles;
        self.indices += other.indices;
    }

    /// Emitted indices per input triangle (3.0 for a plain triangle list).
    pub fn indices_per_triangle(&self) -> f64 {
        if self.triangles == 0 {
            0.0
        } else {
            self.indices as f64 / self.triangles as f64
        }
    }
}

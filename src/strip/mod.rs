pub mod assembler;
pub mod concat;
pub mod growth;
pub mod heuristic;

use tracing::{debug, warn};

use crate::config::StripConfig;
use crate::error::Result;
use crate::graph::MeshGraph;
use crate::graph::builder::validate_indices;
use crate::types::{StripOutput, StripStats};

pub use assembler::{
    canonical_triangle, decode_output, decode_strip, decode_triangle_list, same_winding,
};
pub use concat::{concatenate, split};
pub use growth::{Growth, GrowthEngine, StripWalk};

/// Strips for one index buffer plus the counters gathered on the way.
#[derive(Debug, Clone)]
pub struct StripResult {
    pub output: StripOutput,
    pub stats: StripStats,
}

/// Entry point of the strip compiler.
pub struct Stripifier;

impl Stripifier {
    /// Stripify a triangle list.
    ///
    /// Input triangles naming one slot twice render nothing and are dropped.
    /// Fails with `InvalidInput` on malformed buffers and with `Topology`
    /// when `config.fatal_on_non_manifold` is set and an edge carries more
    /// than two triangles. Nothing is emitted on failure.
    pub fn run(indices: &[u32], config: &StripConfig) -> Result<StripResult> {
        validate_indices(indices, config.vertex_count)?;
        let mut graph = MeshGraph::build(indices, config.manifold_policy())?;

        let mut stats = StripStats {
            triangles: graph.num_triangles(),
            non_manifold_edges: graph.violations().len(),
            degenerate_triangles: graph.degenerate_count(),
            ..Default::default()
        };
        if stats.degenerate_triangles > 0 {
            warn!(
                count = stats.degenerate_triangles,
                "Dropped degenerate input triangles"
            );
        }

        let mut strips: Vec<Vec<u32>> = Vec::new();
        let mut engine = GrowthEngine::new(&mut graph, config.allow_swaps);
        while let Some(growth) = engine.next() {
            match growth {
                Growth::Isolated(t) => {
                    stats.z_triangles += 1;
                    strips.push(assembler::z_triangle(engine.graph(), t));
                }
                Growth::Strip(walk) => {
                    stats.swaps += walk.swaps;
                    stats.backward_extensions += usize::from(walk.extended_backward);
                    let strip = assembler::assemble(engine.graph(), &walk);
                    stats.winding_corrections += usize::from(strip.winding_corrected);
                    strips.push(strip.indices);
                }
            }
        }
        debug_assert_eq!(engine.graph().unused_count(), 0);

        stats.strips = strips.len();
        let output = if config.concatenate {
            StripOutput::Concatenated(concat::concatenate(&strips))
        } else {
            StripOutput::Strips(strips)
        };
        stats.indices = output.index_count();

        debug!(
            triangles = stats.triangles,
            strips = stats.strips,
            z_triangles = stats.z_triangles,
            swaps = stats.swaps,
            indices = stats.indices,
            "Stripified index buffer"
        );

        Ok(StripResult { output, stats })
    }
}

/// Stripify a triangle list, discarding the statistics.
pub fn stripify(indices: &[u32], config: &StripConfig) -> Result<StripOutput> {
    Stripifier::run(indices, config).map(|result| result.output)
}

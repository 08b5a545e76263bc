use std::collections::BTreeSet;

use tracing::trace;

use super::heuristic::{self, Candidate};
use crate::graph::{MeshGraph, TriangleId, VertexId};

/// The triangle walk behind one strip.
///
/// `seq` always ends with the corners of the last triangle in `triangles`;
/// consecutive triangles share the edge formed by the two vertices between
/// them in `seq`.
#[derive(Debug, Clone, Default)]
pub struct StripWalk {
    pub seq: Vec<VertexId>,
    pub triangles: Vec<TriangleId>,
    /// Mid-strip swaps, each paid with one repeated vertex in `seq`
    pub swaps: usize,
    pub extended_backward: bool,
}

/// One unit of work produced by the engine.
#[derive(Debug, Clone)]
pub enum Growth {
    /// A triangle with no usable neighbor, emitted on its own.
    Isolated(TriangleId),
    Strip(StripWalk),
}

/// Seed selection plus forward/backward growth.
pub struct GrowthEngine<'g> {
    graph: &'g mut MeshGraph,
    allow_swaps: bool,
    /// Unused triangles keyed by (available neighbors, input order)
    search: BTreeSet<(usize, TriangleId)>,
}

impl<'g> GrowthEngine<'g> {
    pub fn new(graph: &'g mut MeshGraph, allow_swaps: bool) -> Self {
        let mut search = BTreeSet::new();
        for t in graph.triangle_ids().collect::<Vec<_>>() {
            if graph.is_used(t) {
                continue;
            }
            search.insert((graph.available_neighbors(t), t));
            graph.triangle_mut(t).in_search_set = true;
        }

        Self {
            graph,
            allow_swaps,
            search,
        }
    }

    pub fn graph(&self) -> &MeshGraph {
        &*self.graph
    }

    /// Mark `t` used and keep the search keys of its neighbors current.
    fn mark_used(&mut self, t: TriangleId) {
        if self.graph.triangle(t).in_search_set {
            let key = (self.graph.available_neighbors(t), t);
            self.search.remove(&key);
            self.graph.triangle_mut(t).in_search_set = false;
        }

        let requeue: Vec<TriangleId> = self
            .graph
            .triangle(t)
            .neighbors
            .iter()
            .copied()
            .filter(|&n| self.graph.triangle(n).in_search_set)
            .collect();
        for &n in &requeue {
            let key = (self.graph.available_neighbors(n), n);
            self.search.remove(&key);
        }

        self.graph.triangle_mut(t).used = true;

        for n in requeue {
            self.search.insert((self.graph.available_neighbors(n), n));
        }
    }

    /// Unused triangles across the edge `a`-`b` of `current` that keep the
    /// cull flow.
    fn candidates_across(
        &self,
        current: TriangleId,
        a: VertexId,
        b: VertexId,
        swap: bool,
    ) -> Vec<Candidate> {
        let Some(edge) = self.graph.edge_of(current, a, b) else {
            return Vec::new();
        };
        self.graph
            .edge(edge)
            .triangles
            .iter()
            .copied()
            .filter(|&t| {
                t != current
                    && !self.graph.is_used(t)
                    && self.graph.preserves_cull_flow(current, t, edge)
            })
            .map(|triangle| Candidate {
                triangle,
                edge,
                swap,
            })
            .collect()
    }

    /// Candidates across every edge of a seed triangle.
    fn seed_candidates(&self, seed: TriangleId) -> Vec<Candidate> {
        let [v0, v1, v2] = self.graph.triangle(seed).vertices;
        let mut candidates = self.candidates_across(seed, v0, v1, false);
        candidates.extend(self.candidates_across(seed, v1, v2, false));
        candidates.extend(self.candidates_across(seed, v2, v0, false));
        candidates
    }

    fn grow_from(&mut self, seed: TriangleId) -> Growth {
        self.mark_used(seed);

        let candidates = self.seed_candidates(seed);
        let Some(first) = heuristic::choose(&*self.graph, &candidates, false) else {
            return Growth::Isolated(seed);
        };
        self.mark_used(first.triangle);

        // Lay the seed out from its corner opposite the shared edge, in input
        // winding order, so a two-triangle strip needs no correction.
        let corners = self.graph.triangle(seed).vertices;
        let edge = self.graph.edge(first.edge);
        let p = corners
            .iter()
            .position(|&v| !edge.contains(v))
            .unwrap_or(0);
        let seq_start = [corners[p], corners[(p + 1) % 3], corners[(p + 2) % 3]];
        let Some(r) = self.graph.opposite_vertex(first.triangle, first.edge) else {
            return Growth::Isolated(seed);
        };

        let mut walk = StripWalk {
            seq: vec![seq_start[0], seq_start[1], seq_start[2], r],
            triangles: vec![seed, first.triangle],
            ..Default::default()
        };

        self.grow_forward(&mut walk);

        if !self.allow_swaps && self.graph.available_neighbors(seed) > 0 {
            self.extend_backward(&mut walk);
        }

        trace!(
            seed = seed.index(),
            triangles = walk.triangles.len(),
            swaps = walk.swaps,
            backward = walk.extended_backward,
            "Grew strip"
        );

        Growth::Strip(walk)
    }

    /// Extend the walk from its tail until no candidate remains.
    fn grow_forward(&mut self, walk: &mut StripWalk) {
        while let Some(&current) = walk.triangles.last() {
            let n = walk.seq.len();
            let (older, lead, newest) = (walk.seq[n - 3], walk.seq[n - 2], walk.seq[n - 1]);

            let mut candidates = self.candidates_across(current, lead, newest, false);
            if self.allow_swaps {
                candidates.extend(self.candidates_across(current, older, newest, true));
            }

            let Some(next) = heuristic::choose(&*self.graph, &candidates, true) else {
                break;
            };
            let Some(r) = self.graph.opposite_vertex(next.triangle, next.edge) else {
                break;
            };

            if next.swap {
                if n == 4 {
                    // Nothing has been committed yet: reorder the seed instead
                    // of paying for a repeated vertex.
                    walk.seq.swap(1, 2);
                } else {
                    walk.seq.insert(n - 1, older);
                    walk.swaps += 1;
                }
            }

            walk.seq.push(r);
            walk.triangles.push(next.triangle);
            self.mark_used(next.triangle);
        }
    }

    /// Grow the other end of the walk, starting at the seed.
    ///
    /// Only the edge formed by the first two vertices is tried; each step
    /// takes whatever unused triangle lies across the current leading edge.
    fn extend_backward(&mut self, walk: &mut StripWalk) {
        let Some(&seed) = walk.triangles.first() else {
            return;
        };
        if self.next_across(seed, walk.seq[1], walk.seq[0]).is_none() {
            return;
        }

        walk.seq.reverse();
        walk.triangles.reverse();
        walk.extended_backward = true;

        while let Some(&current) = walk.triangles.last() {
            let n = walk.seq.len();
            let Some(next) = self.next_across(current, walk.seq[n - 2], walk.seq[n - 1]) else {
                break;
            };
            let Some(r) = self.graph.opposite_vertex(next.triangle, next.edge) else {
                break;
            };
            walk.seq.push(r);
            walk.triangles.push(next.triangle);
            self.mark_used(next.triangle);
        }
    }

    /// The first usable triangle across edge `a`-`b` of `current`, no weighing.
    fn next_across(&self, current: TriangleId, a: VertexId, b: VertexId) -> Option<Candidate> {
        self.candidates_across(current, a, b, false).into_iter().next()
    }
}

impl Iterator for GrowthEngine<'_> {
    type Item = Growth;

    fn next(&mut self) -> Option<Growth> {
        let (available, seed) = self.search.pop_first()?;
        self.graph.triangle_mut(seed).in_search_set = false;

        if available == 0 {
            self.mark_used(seed);
            return Some(Growth::Isolated(seed));
        }
        Some(self.grow_from(seed))
    }
}

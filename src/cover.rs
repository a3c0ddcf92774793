use std::fmt::Write;

use bitvec::prelude::*;
use tracing::debug;

use crate::{Graph, Matching};

/// Edge cover: matching pairs first, then one edge per vertex the matching left free.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cover {
    edges: Vec<(u32, u32)>,
}

impl Cover {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<(u32, u32)> {
        self.edges
    }

    pub fn iter(&self) -> impl Iterator<Item = &(u32, u32)> + '_ {
        self.edges.iter()
    }

    /// Size, then one `u v` line per edge.
    pub fn format(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(&mut output, "{}", self.edges.len());
        for (start, end) in &self.edges {
            let _ = writeln!(&mut output, "{start} {end}");
        }
        output
    }
}

impl From<Vec<(u32, u32)>> for Cover {
    fn from(edges: Vec<(u32, u32)>) -> Self {
        Cover { edges }
    }
}

impl<'a> IntoIterator for &'a Cover {
    type Item = &'a (u32, u32);
    type IntoIter = std::slice::Iter<'a, (u32, u32)>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

impl Graph {
    /// Extends `matching` to an edge cover. When no edge joins two unmatched vertices
    /// the cover has `n - matching.len()` edges.
    ///
    /// Vertices are visited in ascending order; an uncovered vertex takes the edge to
    /// its first neighbour in adjacency order.
    pub fn complete_cover(&self, matching: &Matching) -> Cover {
        let n = self.vertices() as usize;
        let mut edges = matching.edges();
        let mut covered = bitvec![0; n];
        for &(start, end) in &edges {
            covered.set(start as usize, true);
            covered.set(end as usize, true);
        }

        let matched = edges.len();
        for v in 0..self.vertices() {
            if covered[v as usize] {
                continue;
            }
            // Construction guarantees a neighbour. `v` was uncovered, so the edge is new.
            let Some(&neighbour) = self.neighbours(v).first() else {
                continue;
            };
            edges.push((v.min(neighbour), v.max(neighbour)));
            covered.set(v as usize, true);
            covered.set(neighbour as usize, true);
        }
        debug!(
            matched,
            completed = edges.len() - matched,
            "completed edge cover"
        );
        Cover { edges }
    }
}

/// Whether every vertex in `0..vertices` is an endpoint of some edge in `edges`.
///
/// Endpoints outside the range cover nothing.
pub fn is_edge_cover(vertices: u32, edges: &[(u32, u32)]) -> bool {
    let n = vertices as usize;
    let mut covered = bitvec![0; n];
    for &(start, end) in edges {
        if (start as usize) < n {
            covered.set(start as usize, true);
        }
        if (end as usize) < n {
            covered.set(end as usize, true);
        }
    }
    covered.all()
}

//! Minimum edge cover of undirected, unweighted graphs.
//!
//! A maximum matching is grown from a greedy seed by augmenting paths, then every
//! vertex the matching leaves uncovered gets its first incident edge. The result
//! has `n - ν` edges, where `ν` is the size of the matching.

use bitvec::prelude::*;
use tracing::debug;

pub mod cover;
pub mod error;
pub mod generate;
pub mod io;
pub mod matching;

pub use cover::{is_edge_cover, Cover};
pub use error::{InvalidArgument, ParseError};
pub use io::{parse_graph, parse_solution, write_solution, Solution};
pub use matching::{Matching, MatchingStrategy};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveOptions {
    pub strategy: MatchingStrategy,
}

impl SolveOptions {
    pub fn with_strategy(strategy: MatchingStrategy) -> Self {
        SolveOptions { strategy }
    }
}

/// Undirected graph on the vertices `0..vertices`. Immutable once built.
#[derive(Debug, Clone)]
pub struct Graph {
    edges: Vec<(u32, u32)>,
    neighbours: Vec<u32>,
    neighbour_indices: Vec<u32>,
    vertices: u32,
}

impl Graph {
    /// Builds the adjacency table and checks that an edge cover can exist.
    ///
    /// Fails on a zero vertex count, an endpoint outside `0..vertices`, a self-loop,
    /// or a vertex no edge touches.
    pub fn new(vertices: u32, edges: Vec<(u32, u32)>) -> Result<Graph, InvalidArgument> {
        if vertices == 0 {
            return Err(InvalidArgument::NoVertices);
        }
        for &(start, end) in &edges {
            if start >= vertices || end >= vertices {
                return Err(InvalidArgument::VertexOutOfRange {
                    start,
                    end,
                    vertices,
                });
            }
            if start == end {
                return Err(InvalidArgument::SelfLoop { vertex: start });
            }
        }

        // At most `2m` vertices are touched, so a larger count has an isolated
        // vertex among `0..=2m`.
        if edges.len().saturating_mul(2) < vertices as usize {
            let mut touched = bitvec![0; 2 * edges.len() + 1];
            for &(start, end) in &edges {
                for v in [start as usize, end as usize] {
                    if v < touched.len() {
                        touched.set(v, true);
                    }
                }
            }
            let vertex = touched.first_zero().unwrap_or(2 * edges.len()) as u32;
            return Err(InvalidArgument::IsolatedVertex { vertex });
        }

        let mut graph = Graph {
            edges,
            neighbours: Vec::new(),
            neighbour_indices: Vec::new(),
            vertices,
        };
        graph.populate_neighbours();

        if let Some(vertex) = (0..vertices).find(|&v| graph.degree(v) == 0) {
            return Err(InvalidArgument::IsolatedVertex { vertex });
        }
        debug!(
            vertices,
            edges = graph.edges.len(),
            "built graph adjacency"
        );
        Ok(graph)
    }

    // Neighbours of each vertex appear in edge-list order.
    fn populate_neighbours(&mut self) {
        let n = self.vertices as usize;
        let mut degree = vec![0u32; n];
        for &(start, end) in &self.edges {
            degree[start as usize] += 1;
            degree[end as usize] += 1;
        }

        self.neighbour_indices.clear();
        self.neighbour_indices.reserve(n + 1);
        let mut offset = 0;
        for d in &degree {
            self.neighbour_indices.push(offset);
            offset += d;
        }
        self.neighbour_indices.push(offset);

        let mut fill: Vec<u32> = self.neighbour_indices[..n].to_vec();
        self.neighbours = vec![0; offset as usize];
        for &(start, end) in &self.edges {
            self.neighbours[fill[start as usize] as usize] = end;
            fill[start as usize] += 1;
            self.neighbours[fill[end as usize] as usize] = start;
            fill[end as usize] += 1;
        }
    }

    pub fn vertices(&self) -> u32 {
        self.vertices
    }

    /// The edge list in construction order.
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn neighbours(&self, vertex: u32) -> &[u32] {
        let start = self.neighbour_indices[vertex as usize] as usize;
        let end = self.neighbour_indices[vertex as usize + 1] as usize;
        &self.neighbours[start..end]
    }

    pub fn degree(&self, vertex: u32) -> usize {
        self.neighbours(vertex).len()
    }

    pub fn has_edge(&self, a: u32, b: u32) -> bool {
        a < self.vertices && b < self.vertices && self.neighbours(a).contains(&b)
    }

    pub fn maximum_matching(&self, strategy: MatchingStrategy) -> Matching {
        matching::maximum_matching(self, strategy)
    }

    /// Minimum edge cover using the default matching strategy.
    pub fn solve(&self) -> Cover {
        self.solve_with(&SolveOptions::default())
    }

    pub fn solve_with(&self, options: &SolveOptions) -> Cover {
        let matching = self.maximum_matching(options.strategy);
        let cover = self.complete_cover(&matching);
        debug_assert_eq!(cover.len(), self.vertices as usize - matching.len());
        debug_assert!(self.validate_cover(&cover));
        cover
    }

    /// Checks that every cover edge belongs to this graph and that every vertex is touched.
    pub fn validate_cover(&self, cover: &Cover) -> bool {
        if let Some(&(start, end)) = cover.iter().find(|&&(a, b)| !self.has_edge(a, b)) {
            debug!(start, end, "cover edge is not an edge of the graph");
            return false;
        }
        if !is_edge_cover(self.vertices, cover.edges()) {
            debug!(size = cover.len(), "cover leaves a vertex untouched");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn graph(n: u32, edges: &[(u32, u32)]) -> Graph {
        Graph::new(n, edges.to_vec()).unwrap()
    }

    #[test]
    fn test_adjacency_keeps_edge_order() {
        let g = graph(4, &[(2, 0), (0, 1), (3, 0), (1, 2)]);
        assert_eq!(g.neighbours(0), &[2, 1, 3]);
        assert_eq!(g.neighbours(1), &[0, 2]);
        assert_eq!(g.neighbours(2), &[0, 1]);
        assert_eq!(g.neighbours(3), &[0]);
        assert_eq!(g.degree(0), 3);
        assert!(g.has_edge(1, 2));
        assert!(g.has_edge(2, 1));
        assert!(!g.has_edge(1, 3));
        assert!(!g.has_edge(1, 9));
    }

    #[test]
    fn test_rejects_zero_vertices() {
        assert_eq!(
            Graph::new(0, vec![]).unwrap_err(),
            InvalidArgument::NoVertices
        );
    }

    #[test]
    fn test_rejects_isolated_vertex() {
        assert_eq!(
            Graph::new(3, vec![(0, 1)]).unwrap_err(),
            InvalidArgument::IsolatedVertex { vertex: 2 }
        );
        assert_eq!(
            Graph::new(1, vec![]).unwrap_err(),
            InvalidArgument::IsolatedVertex { vertex: 0 }
        );
    }

    #[test]
    fn test_rejects_huge_vertex_count_before_allocating() {
        assert_eq!(
            Graph::new(4_000_000_000, vec![(0, 1)]).unwrap_err(),
            InvalidArgument::IsolatedVertex { vertex: 2 }
        );
        assert_eq!(
            Graph::new(u32::MAX, vec![(1, 2), (0, 4)]).unwrap_err(),
            InvalidArgument::IsolatedVertex { vertex: 3 }
        );
        assert_eq!(
            Graph::new(5, vec![(0, 1), (2, 3)]).unwrap_err(),
            InvalidArgument::IsolatedVertex { vertex: 4 }
        );
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(
            Graph::new(3, vec![(0, 5)]).unwrap_err(),
            InvalidArgument::VertexOutOfRange {
                start: 0,
                end: 5,
                vertices: 3
            }
        );
    }

    #[test]
    fn test_rejects_self_loop() {
        assert_eq!(
            Graph::new(2, vec![(0, 1), (1, 1)]).unwrap_err(),
            InvalidArgument::SelfLoop { vertex: 1 }
        );
    }

    #[test]
    fn test_parallel_edges_are_tolerated() {
        let g = graph(2, &[(0, 1), (1, 0)]);
        assert_eq!(g.solve().edges(), &[(0, 1)]);
    }

    #[test]
    fn test_triangle() {
        let g = graph(3, &[(0, 1), (1, 2), (2, 0)]);
        let cover = g.solve();
        assert_eq!(cover.len(), 2);
        assert!(g.validate_cover(&cover));
    }

    #[test]
    fn test_complete_k4() {
        let g = graph(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        let cover = g.solve();
        assert_eq!(cover.edges(), &[(0, 1), (2, 3)]);
    }

    #[test]
    fn test_path() {
        let g = graph(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
        let cover = g.solve();
        assert_eq!(cover.len(), 3);
        assert!(g.validate_cover(&cover));
    }

    #[test]
    fn test_binary_tree() {
        let g = graph(7, &[(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (2, 6)]);
        // Four leaves need four distinct edges, and the root needs one more.
        assert_eq!(matching::test::brute_force_matching(&g), 2);
        for strategy in [MatchingStrategy::Augmenting, MatchingStrategy::Blossom] {
            let cover = g.solve_with(&SolveOptions::with_strategy(strategy));
            assert_eq!(cover.len(), 5);
            assert_eq!(cover.edges(), &[(0, 1), (2, 5), (1, 3), (1, 4), (2, 6)]);
            assert!(g.validate_cover(&cover));
        }
    }

    #[test]
    fn test_solve_is_deterministic() {
        let g = graph(6, &[(0, 1), (0, 2), (1, 3), (2, 3), (2, 4), (3, 5), (4, 5)]);
        let first = g.solve();
        for _ in 0..5 {
            assert_eq!(g.solve(), first);
        }
    }

    #[test]
    fn test_validate_cover_rejects_foreign_edges() {
        let g = graph(4, &[(0, 1), (2, 3), (1, 2)]);
        assert!(g.validate_cover(&Cover::from(vec![(0, 1), (2, 3)])));
        assert!(!g.validate_cover(&Cover::from(vec![(0, 2), (1, 3)])));
        assert!(!g.validate_cover(&Cover::from(vec![(0, 1)])));
        assert!(!g.validate_cover(&Cover::default()));
    }
}

//! Graph generators used by the demo, the benchmarks and the tests.
//!
//! Every generator returns `(vertices, edges)` without isolated vertices, so the
//! result can go straight into [`Graph::new`](crate::Graph::new).

use rand::Rng;

pub type EdgeList = (u32, Vec<(u32, u32)>);

/// # Panics
///
/// Panics if `n < 2`.
pub fn path(n: u32) -> EdgeList {
    assert!(n >= 2, "a path needs at least two vertices");
    (n, (1..n).map(|v| (v - 1, v)).collect())
}

/// # Panics
///
/// Panics if `n < 3`.
pub fn cycle(n: u32) -> EdgeList {
    assert!(n >= 3, "a cycle needs at least three vertices");
    (n, (0..n).map(|v| (v, (v + 1) % n)).collect())
}

/// # Panics
///
/// Panics if `n < 2`.
pub fn complete(n: u32) -> EdgeList {
    assert!(n >= 2, "a complete graph needs at least two vertices");
    let edges = (0..n)
        .flat_map(|a| (a + 1..n).map(move |b| (a, b)))
        .collect();
    (n, edges)
}

/// Vertex 0 joined to every other vertex.
///
/// # Panics
///
/// Panics if `n < 2`.
pub fn star(n: u32) -> EdgeList {
    assert!(n >= 2, "a star needs at least two vertices");
    (n, (1..n).map(|v| (0, v)).collect())
}

/// Heap-ordered binary tree: vertex `v` has children `2v + 1` and `2v + 2`.
///
/// # Panics
///
/// Panics if `n < 2`.
pub fn binary_tree(n: u32) -> EdgeList {
    assert!(n >= 2, "a tree needs at least two vertices");
    (n, (1..n).map(|v| ((v - 1) / 2, v)).collect())
}

/// # Panics
///
/// Panics if the grid has fewer than two vertices.
pub fn grid(rows: u32, cols: u32) -> EdgeList {
    assert!(rows * cols >= 2, "a grid needs at least two vertices");
    let mut edges = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            let v = r * cols + c;
            if c + 1 < cols {
                edges.push((v, v + 1));
            }
            if r + 1 < rows {
                edges.push((v, v + cols));
            }
        }
    }
    (rows * cols, edges)
}

/// Random spanning tree, then every other pair with probability `p`.
///
/// # Panics
///
/// Panics if `n < 2` or `p` is outside `0.0..=1.0`.
pub fn random_connected(n: u32, p: f64, rng: &mut impl Rng) -> EdgeList {
    assert!(n >= 2, "a connected graph needs at least two vertices");
    let mut edges: Vec<(u32, u32)> = (1..n).map(|v| (rng.gen_range(0..v), v)).collect();
    for a in 0..n {
        for b in a + 1..n {
            // Tree edge of `b` sits at index `b - 1`.
            let in_tree = edges[b as usize - 1].0 == a;
            if !in_tree && rng.gen_bool(p) {
                edges.push((a, b));
            }
        }
    }
    (n, edges)
}

/// Vertices `0..left` on one side, `left..left + right` on the other.
///
/// Every vertex gets at least one cross edge; duplicates are dropped.
///
/// # Panics
///
/// Panics if either side is empty or `p` is outside `0.0..=1.0`.
pub fn random_bipartite(left: u32, right: u32, p: f64, rng: &mut impl Rng) -> EdgeList {
    assert!(left >= 1 && right >= 1, "both sides need a vertex");
    let mut edges = Vec::new();
    for a in 0..left {
        edges.push((a, left + rng.gen_range(0..right)));
    }
    for b in 0..right {
        edges.push((rng.gen_range(0..left), left + b));
    }
    for a in 0..left {
        for b in 0..right {
            if rng.gen_bool(p) {
                edges.push((a, left + b));
            }
        }
    }
    let mut seen = std::collections::HashSet::new();
    edges.retain(|&e| seen.insert(e));
    (left + right, edges)
}

/// Cycle on `n` vertices plus up to `chords` random non-adjacent pairs.
///
/// # Panics
///
/// Panics if `n < 3`.
pub fn cycle_with_chords(n: u32, chords: usize, rng: &mut impl Rng) -> EdgeList {
    let (n, mut edges) = cycle(n);
    let mut attempts = 0;
    let mut added = 0;
    while added < chords && attempts < chords * 10 {
        attempts += 1;
        let a = rng.gen_range(0..n);
        let b = rng.gen_range(0..n);
        let (a, b) = (a.min(b), a.max(b));
        if a == b || edges.iter().any(|&(s, e)| (s.min(e), s.max(e)) == (a, b)) {
            continue;
        }
        edges.push((a, b));
        added += 1;
    }
    (n, edges)
}

/// Named graphs the demo solves and writes out.
pub fn demo_graphs() -> Vec<(&'static str, EdgeList)> {
    vec![
        (
            "Simple graph",
            (5, vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (1, 3)]),
        ),
        ("Complete graph K4", complete(4)),
        ("Tree", binary_tree(7)),
        ("Triangle", cycle(3)),
        ("Path", path(5)),
    ]
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Graph;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_fixed_shapes() {
        assert_eq!(path(3), (3, vec![(0, 1), (1, 2)]));
        assert_eq!(cycle(3), (3, vec![(0, 1), (1, 2), (2, 0)]));
        assert_eq!(complete(4).1.len(), 6);
        assert_eq!(star(4), (4, vec![(0, 1), (0, 2), (0, 3)]));
        assert_eq!(
            binary_tree(7),
            (7, vec![(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (2, 6)])
        );
        assert_eq!(grid(2, 3).1.len(), 7);
    }

    #[test]
    fn test_generated_graphs_are_valid() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut graphs = vec![path(6), cycle(5), complete(5), star(6), binary_tree(9), grid(3, 4)];
        for _ in 0..10 {
            graphs.push(random_connected(15, 0.1, &mut rng));
            graphs.push(random_bipartite(4, 6, 0.3, &mut rng));
            graphs.push(cycle_with_chords(10, 4, &mut rng));
        }
        graphs.extend(demo_graphs().into_iter().map(|(_, g)| g));
        for (n, edges) in graphs {
            let graph = Graph::new(n, edges).unwrap();
            assert!(graph.validate_cover(&graph.solve()));
        }
    }

    #[test]
    fn test_random_bipartite_has_no_inner_edges() {
        let mut rng = StdRng::seed_from_u64(2);
        let (n, edges) = random_bipartite(3, 5, 0.5, &mut rng);
        assert_eq!(n, 8);
        assert!(edges.iter().all(|&(a, b)| a < 3 && b >= 3));
        let mut sorted = edges.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), edges.len());
    }

    #[test]
    fn test_seeded_generators_are_reproducible() {
        let a = random_connected(20, 0.2, &mut StdRng::seed_from_u64(9));
        let b = random_connected(20, 0.2, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}

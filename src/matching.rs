//! Maximum matching: greedy seeding followed by augmenting-path search.
//!
//! [`MatchingStrategy::Augmenting`] grows an alternating forest from every free vertex
//! at once and never shrinks odd cycles. That is exact on bipartite graphs and may stop
//! one or more pairs short on graphs whose augmenting paths run through a blossom.
//! [`MatchingStrategy::Blossom`] runs Edmonds' search and is exact on every graph.

use std::collections::VecDeque;
use std::str::FromStr;

use bitvec::prelude::*;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::Graph;

const UNMATCHED: u32 = u32::MAX;
const NONE: u32 = u32::MAX;

type Path = SmallVec<[u32; 16]>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchingStrategy {
    /// Alternating breadth-first search without blossom contraction.
    #[default]
    Augmenting,
    /// Edmonds' blossom algorithm.
    Blossom,
}

impl FromStr for MatchingStrategy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "augmenting" | "bfs" => Ok(Self::Augmenting),
            "blossom" | "edmonds" => Ok(Self::Blossom),
            _ => Err(()),
        }
    }
}

/// Symmetric partner table; each vertex is in at most one pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    mate: Vec<u32>,
    size: usize,
}

impl Matching {
    pub fn empty(vertices: u32) -> Matching {
        Matching {
            mate: vec![UNMATCHED; vertices as usize],
            size: 0,
        }
    }

    /// Number of matched pairs.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn vertices(&self) -> u32 {
        self.mate.len() as u32
    }

    pub fn partner(&self, vertex: u32) -> Option<u32> {
        match self.mate[vertex as usize] {
            UNMATCHED => None,
            partner => Some(partner),
        }
    }

    pub fn is_matched(&self, vertex: u32) -> bool {
        self.mate[vertex as usize] != UNMATCHED
    }

    /// Each pair once as `(smaller, larger)`, ordered by the smaller endpoint.
    pub fn edges(&self) -> Vec<(u32, u32)> {
        self.mate
            .iter()
            .enumerate()
            .filter_map(|(v, &partner)| {
                let v = v as u32;
                (partner != UNMATCHED && v < partner).then_some((v, partner))
            })
            .collect()
    }

    /// Symmetric, consistent with its size, and built only from edges of `graph`.
    pub fn is_valid_for(&self, graph: &Graph) -> bool {
        if self.vertices() != graph.vertices() {
            return false;
        }
        let mut pairs = 0;
        for v in 0..self.vertices() {
            let Some(partner) = self.partner(v) else {
                continue;
            };
            if partner >= self.vertices()
                || self.mate[partner as usize] != v
                || !graph.has_edge(v, partner)
            {
                return false;
            }
            pairs += 1;
        }
        pairs == 2 * self.size
    }

    fn pair(&mut self, a: u32, b: u32) {
        self.mate[a as usize] = b;
        self.mate[b as usize] = a;
    }
}

/// Matches every edge, in edge-list order, whose endpoints are both still free.
pub fn greedy(graph: &Graph) -> Matching {
    let mut matching = Matching::empty(graph.vertices());
    for &(start, end) in graph.edges() {
        if !matching.is_matched(start) && !matching.is_matched(end) {
            matching.pair(start, end);
            matching.size += 1;
        }
    }
    matching
}

pub fn maximum_matching(graph: &Graph, strategy: MatchingStrategy) -> Matching {
    let mut matching = greedy(graph);
    let seeded = matching.len();
    let augmentations = match strategy {
        MatchingStrategy::Augmenting => augment_along_forest(graph, &mut matching),
        MatchingStrategy::Blossom => augment_through_blossoms(graph, &mut matching),
    };
    debug!(
        ?strategy,
        seeded,
        augmentations,
        size = matching.len(),
        "maximum matching"
    );
    debug_assert!(matching.is_valid_for(graph));
    matching
}

fn augment_along_forest(graph: &Graph, matching: &mut Matching) -> usize {
    let mut forest = Forest::new(graph.vertices());
    let mut rounds = 0;
    while let Some(path) = forest.find_augmenting_path(graph, matching) {
        trace!(length = path.len() - 1, "augmenting path");
        debug_assert_eq!(path.len() % 2, 0);
        // Edges at even positions are unmatched and become the new pairs.
        for pair in path.chunks_exact(2) {
            matching.pair(pair[0], pair[1]);
        }
        matching.size += 1;
        rounds += 1;
    }
    rounds
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Label {
    Unreached,
    Outer,
    Inner,
}

/// Alternating forest rooted at every free vertex.
struct Forest {
    label: Vec<Label>,
    root: Vec<u32>,
    parent: Vec<u32>,
    queue: VecDeque<u32>,
}

impl Forest {
    fn new(vertices: u32) -> Forest {
        let n = vertices as usize;
        Forest {
            label: vec![Label::Unreached; n],
            root: vec![NONE; n],
            parent: vec![NONE; n],
            queue: VecDeque::with_capacity(n),
        }
    }

    fn reset(&mut self, matching: &Matching) {
        self.label.fill(Label::Unreached);
        self.root.fill(NONE);
        self.parent.fill(NONE);
        self.queue.clear();
        for v in 0..matching.vertices() {
            if !matching.is_matched(v) {
                self.label[v as usize] = Label::Outer;
                self.root[v as usize] = v;
                self.queue.push_back(v);
            }
        }
    }

    /// Returns a path from one free vertex to another, alternating unmatched and matched edges.
    fn find_augmenting_path(&mut self, graph: &Graph, matching: &Matching) -> Option<Path> {
        self.reset(matching);
        while let Some(u) = self.queue.pop_front() {
            for &v in graph.neighbours(u) {
                match self.label[v as usize] {
                    Label::Inner => {}
                    Label::Outer => {
                        // Same root means an odd cycle; it is not contracted here.
                        if self.root[v as usize] != self.root[u as usize] {
                            return Some(self.join(u, v));
                        }
                    }
                    Label::Unreached => {
                        // Every free vertex is a root, so `v` is matched.
                        let w = matching.mate[v as usize];
                        debug_assert_ne!(w, UNMATCHED);
                        self.label[v as usize] = Label::Inner;
                        self.parent[v as usize] = u;
                        self.label[w as usize] = Label::Outer;
                        self.parent[w as usize] = v;
                        self.root[w as usize] = self.root[u as usize];
                        self.queue.push_back(w);
                    }
                }
            }
        }
        None
    }

    /// Root of `u` .. `u`, `v` .. root of `v`.
    fn join(&self, u: u32, v: u32) -> Path {
        let mut path = Path::new();
        self.trace_to_root(u, &mut path);
        path.reverse();
        self.trace_to_root(v, &mut path);
        path
    }

    fn trace_to_root(&self, mut vertex: u32, path: &mut Path) {
        path.push(vertex);
        while self.parent[vertex as usize] != NONE {
            vertex = self.parent[vertex as usize];
            path.push(vertex);
        }
    }
}

fn augment_through_blossoms(graph: &Graph, matching: &mut Matching) -> usize {
    let mut search = BlossomSearch::new(graph.vertices());
    let mut rounds = 0;
    // A root with no augmenting path now never gains one after later augmentations.
    for root in 0..graph.vertices() {
        if matching.is_matched(root) {
            continue;
        }
        let Some(end) = search.find_path(graph, &matching.mate, root) else {
            continue;
        };
        let mut v = end;
        while v != UNMATCHED {
            let parent = search.parent[v as usize];
            let next = matching.mate[parent as usize];
            matching.pair(v, parent);
            v = next;
        }
        matching.size += 1;
        rounds += 1;
        trace!(root, end, "augmented through blossom search");
    }
    rounds
}

struct BlossomSearch {
    parent: Vec<u32>,
    base: Vec<u32>,
    used: BitVec,
    in_blossom: BitVec,
    on_path: BitVec,
    queue: VecDeque<u32>,
}

impl BlossomSearch {
    fn new(vertices: u32) -> BlossomSearch {
        let n = vertices as usize;
        BlossomSearch {
            parent: vec![NONE; n],
            base: (0..vertices).collect(),
            used: bitvec![0; n],
            in_blossom: bitvec![0; n],
            on_path: bitvec![0; n],
            queue: VecDeque::with_capacity(n),
        }
    }

    /// Free vertex at the far end of an augmenting path from `root`; the path is
    /// recovered through `parent` and `mate`.
    fn find_path(&mut self, graph: &Graph, mate: &[u32], root: u32) -> Option<u32> {
        self.used.fill(false);
        self.parent.fill(NONE);
        for (v, base) in self.base.iter_mut().enumerate() {
            *base = v as u32;
        }
        self.queue.clear();
        self.used.set(root as usize, true);
        self.queue.push_back(root);

        while let Some(v) = self.queue.pop_front() {
            for &to in graph.neighbours(v) {
                if self.base[v as usize] == self.base[to as usize] || mate[v as usize] == to {
                    continue;
                }
                let to_is_outer = to == root
                    || (mate[to as usize] != UNMATCHED
                        && self.parent[mate[to as usize] as usize] != NONE);
                if to_is_outer {
                    let base = self.lowest_common_ancestor(mate, v, to);
                    self.in_blossom.fill(false);
                    self.mark_path(mate, v, base, to);
                    self.mark_path(mate, to, base, v);
                    for i in 0..self.base.len() {
                        if self.in_blossom[self.base[i] as usize] {
                            self.base[i] = base;
                            if !self.used[i] {
                                self.used.set(i, true);
                                self.queue.push_back(i as u32);
                            }
                        }
                    }
                } else if self.parent[to as usize] == NONE {
                    self.parent[to as usize] = v;
                    let next = mate[to as usize];
                    if next == UNMATCHED {
                        return Some(to);
                    }
                    self.used.set(next as usize, true);
                    self.queue.push_back(next);
                }
            }
        }
        None
    }

    fn lowest_common_ancestor(&mut self, mate: &[u32], mut a: u32, mut b: u32) -> u32 {
        self.on_path.fill(false);
        loop {
            a = self.base[a as usize];
            self.on_path.set(a as usize, true);
            if mate[a as usize] == UNMATCHED {
                break;
            }
            a = self.parent[mate[a as usize] as usize];
        }
        loop {
            b = self.base[b as usize];
            if self.on_path[b as usize] {
                return b;
            }
            b = self.parent[mate[b as usize] as usize];
        }
    }

    fn mark_path(&mut self, mate: &[u32], mut v: u32, base: u32, mut child: u32) {
        while self.base[v as usize] != base {
            let m = mate[v as usize];
            self.in_blossom.set(self.base[v as usize] as usize, true);
            self.in_blossom.set(self.base[m as usize] as usize, true);
            self.parent[v as usize] = child;
            child = m;
            v = self.parent[m as usize];
        }
    }
}

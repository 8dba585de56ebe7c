//! Minimum spanning trees of undirected graphs.
//!
//! Both constructions return a fresh [`UnGraph`] holding every vertex of the
//! input, in the same index order, and the `vertex_count - 1` chosen edges.

use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BinaryHeap};

use bitvec::prelude::*;
use itertools::{Itertools, MinMaxResult};
use tracing::{debug, trace};

use crate::error::GraphError;
use crate::graph::{Direction, Graph, UnGraph, VertexId};
use crate::index::VertexIndex;
use crate::union_find::UnionFind;

/// Absolute slack allowed between two floating point weight sums.
pub const MST_TOLERANCE: f64 = 1e-10;

/// How two spanning trees of the same graph differ.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MstComparison {
    /// `|weight(a) - weight(b)|`.
    pub total_weight_diff: f64,
    /// Edges present in both trees, endpoints compared unordered.
    pub common_edges: usize,
    /// Mean of `|w_a - w_b|` over the common edges, zero if there are none.
    pub mean_common_weight_diff: f64,
}

/// Summary of the edge weights of a graph. All zero for an edgeless graph.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub total: f64,
    pub count: usize,
}

/// Kruskal's algorithm.
///
/// Edges are scanned by ascending weight; equal weights keep the index order
/// of [`Graph::edges`], so the tree is determined by the order the graph was
/// built in. Self-loops never join two sets and are skipped.
pub fn kruskal<V: VertexId>(graph: &UnGraph<V>) -> Result<UnGraph<V>, GraphError<V>> {
    if !graph.is_connected() {
        return Err(GraphError::DisconnectedGraph);
    }

    let mut edges: Vec<_> = graph.edges().filter(|(i, j, _)| i != j).collect();
    edges.sort_by(|a, b| a.2.total_cmp(&b.2));

    let mut sets = UnionFind::new(graph.vertex_count());
    let mut tree = graph.edgeless();

    for (i, j, weight) in edges {
        if sets.n_sets() <= 1 {
            break;
        }
        if sets.union(i, j).is_some() {
            trace!(from = ?graph[i], to = ?graph[j], weight, "accepted edge");
            tree.update_edge(graph[i].clone(), graph[j].clone(), weight);
        }
    }

    debug!(
        edges = tree.edge_count(),
        weight = tree.total_weight(),
        "kruskal spanning tree"
    );
    Ok(tree)
}

/// A frontier edge of Prim's tree. Equal weights are ordered by the
/// identities of the tail, then the head.
#[derive(Debug)]
struct Candidate<'g, V> {
    weight: f64,
    tail: &'g V,
    head: &'g V,
    from: VertexIndex,
    to: VertexIndex,
}

impl<V: Ord> Ord for Candidate<'_, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.tail.cmp(other.tail))
            .then_with(|| self.head.cmp(other.head))
    }
}

impl<V: Ord> PartialOrd for Candidate<'_, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: Ord> PartialEq for Candidate<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<V: Ord> Eq for Candidate<'_, V> {}

fn push_frontier<'g, V: VertexId>(
    graph: &'g UnGraph<V>,
    v: VertexIndex,
    visited: &BitVec,
    heap: &mut BinaryHeap<Reverse<Candidate<'g, V>>>,
) {
    for to in graph.successors(v).filter(|to| !visited[to.0]) {
        if let Some(weight) = graph.weight_at(v, to) {
            heap.push(Reverse(Candidate {
                weight,
                tail: &graph[v],
                head: &graph[to],
                from: v,
                to,
            }));
        }
    }
}

/// Prim's algorithm, grown from `start` or from the first vertex.
pub fn prim<V: VertexId>(
    graph: &UnGraph<V>,
    start: Option<&V>,
) -> Result<UnGraph<V>, GraphError<V>> {
    if !graph.is_connected() {
        return Err(GraphError::DisconnectedGraph);
    }
    let root = match start {
        Some(v) => graph.require(v)?,
        None if graph.is_empty() => return Ok(graph.edgeless()),
        None => VertexIndex(0),
    };

    let n = graph.vertex_count();
    let mut visited = bitvec![0; n];
    let mut heap = BinaryHeap::new();
    let mut tree = graph.edgeless();

    visited.set(root.0, true);
    let mut reached = 1;
    push_frontier(graph, root, &visited, &mut heap);

    while let Some(Reverse(Candidate { weight, from, to, .. })) = heap.pop() {
        if visited[to.0] {
            continue;
        }
        visited.set(to.0, true);
        reached += 1;
        trace!(from = ?graph[from], to = ?graph[to], weight, "accepted edge");
        tree.update_edge(graph[from].clone(), graph[to].clone(), weight);

        if reached == n {
            break;
        }
        push_frontier(graph, to, &visited, &mut heap);
    }

    debug!(
        root = ?graph[root],
        weight = tree.total_weight(),
        "prim spanning tree"
    );
    Ok(tree)
}

/// Is `candidate` a minimum spanning tree of `graph`?
///
/// It has to span exactly the vertices of `graph` with `vertex_count - 1`
/// edges of `graph`, carrying the same weights, and weigh as much as the tree
/// [`kruskal`] builds. Always false when `graph` is disconnected.
pub fn verify_mst<V: VertexId>(graph: &UnGraph<V>, candidate: &UnGraph<V>) -> bool {
    if !candidate.is_connected() {
        return false;
    }
    if candidate.vertex_count() != graph.vertex_count()
        || !candidate.vertices().all(|v| graph.has_vertex(v))
    {
        return false;
    }
    if candidate.edge_count() != candidate.vertex_count().saturating_sub(1) {
        return false;
    }

    let borrowed = candidate.edges().all(|(i, j, w)| {
        graph
            .get_edge_weight(&candidate[i], &candidate[j])
            .is_ok_and(|original| (original - w).abs() <= MST_TOLERANCE)
    });
    if !borrowed {
        return false;
    }

    match kruskal(graph) {
        Ok(reference) => (reference.total_weight() - candidate.total_weight()).abs() <= MST_TOLERANCE,
        Err(_) => false,
    }
}

fn canonical_edges<V: VertexId>(tree: &UnGraph<V>) -> BTreeMap<(V, V), f64> {
    tree.edges()
        .map(|(i, j, w)| {
            let (u, v) = (tree[i].clone(), tree[j].clone());
            if u <= v {
                ((u, v), w)
            } else {
                ((v, u), w)
            }
        })
        .collect()
}

pub fn compare_msts<V: VertexId>(a: &UnGraph<V>, b: &UnGraph<V>) -> MstComparison {
    let (edges_a, edges_b) = (canonical_edges(a), canonical_edges(b));
    let diffs: Vec<f64> = edges_a
        .iter()
        .filter_map(|(edge, wa)| edges_b.get(edge).map(|wb| (wa - wb).abs()))
        .collect();

    let mean_common_weight_diff = if diffs.is_empty() {
        0.0
    } else {
        diffs.iter().sum::<f64>() / diffs.len() as f64
    };

    MstComparison {
        total_weight_diff: (a.total_weight() - b.total_weight()).abs(),
        common_edges: diffs.len(),
        mean_common_weight_diff,
    }
}

pub fn analyze_edge_weights<V: VertexId, D: Direction>(graph: &Graph<V, D>) -> WeightStats {
    let (min, max) = match graph.edges().map(|(_, _, w)| w).minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => return WeightStats::default(),
        MinMaxResult::OneElement(w) => (w, w),
        MinMaxResult::MinMax(lo, hi) => (lo, hi),
    };
    let count = graph.edge_count();
    let total = graph.total_weight();

    WeightStats {
        min,
        max,
        mean: total / count as f64,
        total,
        count,
    }
}

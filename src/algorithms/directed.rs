use std::collections::{BTreeSet, VecDeque};
use std::ops::ControlFlow;

use bitvec::prelude::*;
use tracing::debug;

use crate::error::GraphError;
use crate::graph::traversal::{DfsEvent, Neighbours};
use crate::graph::{DiGraph, VertexId, DEFAULT_WEIGHT};
use crate::index::{VertexIndex, VertexVec};

/// Algorithms on directed graphs.
pub trait DirectedOps {
    type Vertex: VertexId;

    /// Number of edges entering `v`. A self-loop counts once here and once in
    /// [`out_degree`](Self::out_degree).
    fn in_degree(&self, v: &Self::Vertex) -> Result<usize, GraphError<Self::Vertex>>;

    fn out_degree(&self, v: &Self::Vertex) -> Result<usize, GraphError<Self::Vertex>>;

    /// Vertices with in-degree zero, in index order.
    fn sources(&self) -> Vec<Self::Vertex>;

    /// Vertices with out-degree zero, in index order.
    fn sinks(&self) -> Vec<Self::Vertex>;

    /// An order in which every edge points forward.
    ///
    /// Kahn's algorithm, with ready vertices taken first in, first out and
    /// seeded in index order, so the result is deterministic.
    fn topological_sort(&self) -> Result<Vec<Self::Vertex>, GraphError<Self::Vertex>>;

    /// Strongly connected components, each one as a sorted set.
    fn strongly_connected_components(&self) -> Vec<BTreeSet<Self::Vertex>>;

    /// A path from `start` to `end` with the fewest edges, weights ignored.
    /// `Ok(None)` if `end` is unreachable.
    fn find_path(
        &self,
        start: &Self::Vertex,
        end: &Self::Vertex,
    ) -> Result<Option<Vec<Self::Vertex>>, GraphError<Self::Vertex>>;

    /// Does every vertex reach every other one? True for the empty graph.
    fn is_strongly_connected(&self) -> bool;

    /// The graph of strongly connected components.
    ///
    /// Vertex `k` stands for the `k`-th component of
    /// [`strongly_connected_components`](Self::strongly_connected_components).
    /// There is an edge of weight [`DEFAULT_WEIGHT`] between two components
    /// whenever some edge of the graph crosses from one to the other.
    fn condensation(&self) -> DiGraph<usize>;
}

/// Kosaraju's algorithm over indices.
///
/// The first pass records finishing order along edges, the second walks
/// against edges in reverse finishing order. Each tree of the second pass is
/// one component.
fn kosaraju<V: VertexId>(graph: &DiGraph<V>) -> Vec<Vec<VertexIndex>> {
    let mut finished = Vec::with_capacity(graph.vertex_count());
    let _ = graph.depth_first(graph.indices(), Neighbours::Outgoing, |event| {
        if let DfsEvent::Finish(v) = event {
            finished.push(v);
        }
        ControlFlow::Continue(())
    });

    let mut components: Vec<Vec<VertexIndex>> = Vec::new();
    let _ = graph.depth_first(finished.into_iter().rev(), Neighbours::Incoming, |event| {
        match event {
            DfsEvent::Discover {
                vertex,
                parent: None,
            } => components.push(vec![vertex]),
            DfsEvent::Discover { vertex, .. } => {
                if let Some(current) = components.last_mut() {
                    current.push(vertex);
                }
            }
            _ => {}
        }
        ControlFlow::Continue(())
    });
    components
}

impl<V: VertexId> DirectedOps for DiGraph<V> {
    type Vertex = V;

    fn in_degree(&self, v: &V) -> Result<usize, GraphError<V>> {
        let i = self.require(v)?;
        Ok(self.predecessors(i).count())
    }

    fn out_degree(&self, v: &V) -> Result<usize, GraphError<V>> {
        let i = self.require(v)?;
        Ok(self.successors(i).count())
    }

    fn sources(&self) -> Vec<V> {
        self.indices()
            .filter(|&i| self.predecessors(i).next().is_none())
            .map(|i| self[i].clone())
            .collect()
    }

    fn sinks(&self) -> Vec<V> {
        self.indices()
            .filter(|&i| self.successors(i).next().is_none())
            .map(|i| self[i].clone())
            .collect()
    }

    fn topological_sort(&self) -> Result<Vec<V>, GraphError<V>> {
        if self.has_cycle() {
            return Err(GraphError::CyclicGraph);
        }

        let mut indeg: VertexVec<usize> = self
            .indices()
            .map(|i| self.predecessors(i).count())
            .collect();

        let mut q = VecDeque::new();
        for (i, d) in indeg.iter() {
            if *d == 0 {
                q.push_back(i);
            }
        }

        let mut order = Vec::with_capacity(indeg.len());
        while let Some(v) = q.pop_front() {
            order.push(v);
            for u in self.successors(v) {
                indeg[u] -= 1;
                if indeg[u] == 0 {
                    q.push_back(u);
                }
            }
        }

        if order.len() != indeg.len() {
            debug!(
                processed = order.len(),
                total = indeg.len(),
                "topological sort stalled"
            );
            return Err(GraphError::CyclicGraph);
        }
        Ok(order.into_iter().map(|i| self[i].clone()).collect())
    }

    fn strongly_connected_components(&self) -> Vec<BTreeSet<V>> {
        let components: Vec<BTreeSet<V>> = kosaraju(self)
            .into_iter()
            .map(|c| c.into_iter().map(|i| self[i].clone()).collect())
            .collect();
        debug!(count = components.len(), "strongly connected components");
        components
    }

    fn find_path(&self, start: &V, end: &V) -> Result<Option<Vec<V>>, GraphError<V>> {
        let (s, t) = (self.require(start)?, self.require(end)?);
        if s == t {
            return Ok(Some(vec![start.clone()]));
        }

        let mut parent: VertexVec<Option<VertexIndex>> = VertexVec::filled(self.vertex_count(), None);
        let mut seen = bitvec![0; self.vertex_count()];
        let mut q = VecDeque::from([s]);
        seen.set(s.0, true);

        while let Some(v) = q.pop_front() {
            for w in self.successors(v) {
                if seen[w.0] {
                    continue;
                }
                seen.set(w.0, true);
                parent[w] = Some(v);
                if w == t {
                    let mut path = vec![self[t].clone()];
                    let mut current = t;
                    while let Some(p) = parent[current] {
                        path.push(self[p].clone());
                        current = p;
                    }
                    path.reverse();
                    return Ok(Some(path));
                }
                q.push_back(w);
            }
        }
        Ok(None)
    }

    fn is_strongly_connected(&self) -> bool {
        self.is_empty()
            || (self.reaches_all(VertexIndex(0), Neighbours::Outgoing)
                && self.reaches_all(VertexIndex(0), Neighbours::Incoming))
    }

    fn condensation(&self) -> DiGraph<usize> {
        let components = kosaraju(self);
        let mut component_of = VertexVec::filled(self.vertex_count(), 0usize);
        for (k, members) in components.iter().enumerate() {
            for &i in members {
                component_of[i] = k;
            }
        }

        let mut condensed = DiGraph::from_vertices(0..components.len());
        for (i, j, _) in self.edges() {
            let (a, b) = (component_of[i], component_of[j]);
            if a != b {
                condensed.update_edge(a, b, DEFAULT_WEIGHT);
            }
        }
        condensed
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::DirectedOps;
    use crate::error::GraphError;
    use crate::graph::DiGraph;

    fn digraph(edges: &[(u32, u32)]) -> DiGraph<u32> {
        DiGraph::from_edges(edges.iter().map(|&(u, v)| (u, v, 1.0))).unwrap()
    }

    fn set(vertices: &[u32]) -> BTreeSet<u32> {
        vertices.iter().copied().collect()
    }

    #[test]
    fn topo_sort_valid_dag() {
        let graph = digraph(&[(0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (3, 5)]);
        let order = graph.topological_sort().unwrap();
        insta::assert_compact_debug_snapshot!(order, @"[0, 1, 2, 3, 4, 5]");

        assert_eq!(graph.sources(), vec![0]);
        assert_eq!(graph.sinks(), vec![4, 5]);
        assert_eq!(graph.in_degree(&3), Ok(2));
        assert_eq!(graph.out_degree(&3), Ok(2));
        assert_eq!(graph.out_degree(&9), Err(GraphError::UnknownVertex(9)));
    }

    #[test]
    fn topo_sort_with_cycle() {
        let graph = digraph(&[(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert_eq!(graph.topological_sort(), Err(GraphError::CyclicGraph));

        let looped = digraph(&[(0, 1), (1, 1)]);
        assert_eq!(looped.topological_sort(), Err(GraphError::CyclicGraph));
    }

    #[test]
    fn weighted_cycle_has_no_order() {
        let graph: DiGraph<u32> = DiGraph::from_edges([
            (0, 1, 2.0),
            (1, 2, 3.0),
            (2, 3, 4.0),
            (3, 4, 5.0),
            (4, 0, 1.0),
        ])
        .unwrap();
        assert!(graph.has_cycle());
        assert_eq!(graph.topological_sort(), Err(GraphError::CyclicGraph));
        assert!(graph.sources().is_empty());
    }

    #[test]
    fn single_cycle_is_one_component() {
        let graph = digraph(&[(0, 1), (1, 2), (2, 3), (3, 0), (1, 3)]);

        assert!(graph.has_cycle());
        assert!(graph.is_strongly_connected());
        assert_eq!(graph.strongly_connected_components(), vec![set(&[0, 1, 2, 3])]);

        let condensed = graph.condensation();
        assert_eq!(condensed.vertex_count(), 1);
        assert_eq!(condensed.edge_count(), 0);
    }

    #[test]
    fn components_in_discovery_order() {
        let mut graph = digraph(&[(0, 1), (1, 0), (1, 2), (2, 3), (3, 2)]);
        graph.add_vertex(4).unwrap();

        assert!(!graph.is_strongly_connected());
        assert_eq!(
            graph.strongly_connected_components(),
            vec![set(&[4]), set(&[0, 1]), set(&[2, 3])]
        );

        let condensed = graph.condensation();
        assert_eq!(condensed.vertex_count(), 3);
        assert!(condensed.has_edge(&1, &2));
        assert_eq!(condensed.edge_count(), 1);
        assert_eq!(condensed.topological_sort(), Ok(vec![0, 1, 2]));
    }

    #[test]
    fn shortest_paths() {
        let graph = digraph(&[(0, 1), (1, 2), (2, 3), (0, 3), (3, 4)]);

        assert_eq!(graph.find_path(&0, &4), Ok(Some(vec![0, 3, 4])));
        assert_eq!(graph.find_path(&2, &2), Ok(Some(vec![2])));
        assert_eq!(graph.find_path(&4, &0), Ok(None));
        assert_eq!(graph.find_path(&0, &7), Err(GraphError::UnknownVertex(7)));
    }

    #[test]
    fn empty_graph() {
        let graph: DiGraph<u32> = DiGraph::new();
        assert!(graph.is_strongly_connected());
        assert_eq!(graph.topological_sort(), Ok(vec![]));
        assert!(graph.strongly_connected_components().is_empty());
        assert!(graph.condensation().is_empty());
    }

    fn arbitrary_digraph() -> impl Strategy<Value = DiGraph<u8>> {
        prop::collection::vec((0u8..10, 0u8..10), 0..30).prop_map(|edges| {
            let mut graph = DiGraph::new();
            for (u, v) in edges {
                graph.update_edge(u, v, 1.0);
            }
            graph
        })
    }

    proptest! {
        #[test]
        fn topological_order_exists_iff_acyclic(graph in arbitrary_digraph()) {
            match graph.topological_sort() {
                Ok(order) => {
                    prop_assert!(!graph.has_cycle());
                    prop_assert_eq!(order.len(), graph.vertex_count());
                    let position = |v: &u8| order.iter().position(|w| w == v);
                    for (i, j, _) in graph.edges() {
                        prop_assert!(position(&graph[i]) < position(&graph[j]));
                    }
                }
                Err(err) => {
                    prop_assert_eq!(err, GraphError::CyclicGraph);
                    prop_assert!(graph.has_cycle());
                }
            }
        }

        #[test]
        fn components_partition_and_condense_acyclic(graph in arbitrary_digraph()) {
            let components = graph.strongly_connected_components();
            let total: usize = components.iter().map(BTreeSet::len).sum();
            prop_assert_eq!(total, graph.vertex_count());

            let condensed = graph.condensation();
            prop_assert_eq!(condensed.vertex_count(), components.len());
            prop_assert!(!condensed.has_cycle());
        }
    }
}

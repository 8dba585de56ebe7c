use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::ops::ControlFlow;

use ahash::AHashSet;
use itertools::Itertools;
use tracing::debug;

use super::spanning;
use crate::error::GraphError;
use crate::graph::traversal::{DfsEvent, Neighbours};
use crate::graph::{UnGraph, VertexId};
use crate::index::{VertexIndex, VertexVec};

/// The two sides of a bipartite graph.
pub type Bipartition<V> = (BTreeSet<V>, BTreeSet<V>);

/// Algorithms on undirected graphs.
pub trait UndirectedOps {
    type Vertex: VertexId;

    /// Number of edges at `v`. A self-loop counts once.
    fn degree(&self, v: &Self::Vertex) -> Result<usize, GraphError<Self::Vertex>>;

    /// Connected components in discovery order, scanning roots by index.
    fn connected_components(&self) -> Vec<BTreeSet<Self::Vertex>>;

    /// Two colour classes such that every edge joins both, if they exist.
    ///
    /// Every component is two-coloured from its lowest-indexed vertex, which
    /// goes on the first side.
    fn bipartition(&self) -> Option<Bipartition<Self::Vertex>>;

    fn is_bipartite(&self) -> bool {
        self.bipartition().is_some()
    }

    /// Connected, and every degree even.
    fn has_eulerian_circuit(&self) -> bool;

    /// Connected, and zero or two vertices of odd degree.
    fn has_eulerian_path(&self) -> bool;

    /// Greedy colouring in ascending vertex order. Each vertex gets the
    /// smallest colour none of its coloured neighbours has.
    fn vertex_coloring(&self) -> BTreeMap<Self::Vertex, usize>;

    /// Number of colours [`vertex_coloring`](Self::vertex_coloring) uses.
    fn chromatic_upper_bound(&self) -> usize {
        self.vertex_coloring()
            .values()
            .max()
            .map_or(0, |&top| top + 1)
    }

    /// See [`spanning::kruskal`].
    fn minimum_spanning_tree(&self) -> Result<UnGraph<Self::Vertex>, GraphError<Self::Vertex>>;
}

impl<V: VertexId> UnGraph<V> {
    fn degrees(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices().map(|i| self.successors(i).count())
    }

    fn odd_degree_count(&self) -> usize {
        self.degrees().filter(|d| d % 2 == 1).count()
    }
}

impl<V: VertexId> UndirectedOps for UnGraph<V> {
    type Vertex = V;

    fn degree(&self, v: &V) -> Result<usize, GraphError<V>> {
        let i = self.require(v)?;
        Ok(self.successors(i).count())
    }

    fn connected_components(&self) -> Vec<BTreeSet<V>> {
        let mut components: Vec<BTreeSet<V>> = Vec::new();
        let _ = self.depth_first(self.indices(), Neighbours::Outgoing, |event| {
            if let DfsEvent::Discover { vertex, parent } = event {
                if parent.is_none() {
                    components.push(BTreeSet::new());
                }
                if let Some(current) = components.last_mut() {
                    current.insert(self[vertex].clone());
                }
            }
            ControlFlow::Continue(())
        });
        debug!(count = components.len(), "connected components");
        components
    }

    fn bipartition(&self) -> Option<Bipartition<V>> {
        let mut side: VertexVec<Option<bool>> = VertexVec::filled(self.vertex_count(), None);

        for root in self.indices() {
            if side[root].is_some() {
                continue;
            }
            side[root] = Some(false);
            let mut q = VecDeque::from([root]);

            while let Some(v) = q.pop_front() {
                let here = side[v];
                for w in self.successors(v) {
                    match side[w] {
                        None => {
                            side[w] = here.map(|s| !s);
                            q.push_back(w);
                        }
                        Some(there) if Some(there) == here => {
                            debug!(from = ?self[v], to = ?self[w], "odd cycle");
                            return None;
                        }
                        Some(_) => {}
                    }
                }
            }
        }

        let (first, second): (Vec<_>, Vec<_>) = side
            .into_iter()
            .partition(|(_, s)| *s == Some(false));
        let collect = |part: Vec<(VertexIndex, Option<bool>)>| -> BTreeSet<V> {
            part.into_iter().map(|(i, _)| self[i].clone()).collect()
        };
        Some((collect(first), collect(second)))
    }

    fn has_eulerian_circuit(&self) -> bool {
        self.is_connected() && self.odd_degree_count() == 0
    }

    fn has_eulerian_path(&self) -> bool {
        self.is_connected() && matches!(self.odd_degree_count(), 0 | 2)
    }

    fn vertex_coloring(&self) -> BTreeMap<V, usize> {
        let mut colour: VertexVec<Option<usize>> = VertexVec::filled(self.vertex_count(), None);

        for v in self.indices().sorted_by(|a, b| self[*a].cmp(&self[*b])) {
            let used: AHashSet<usize> = self.successors(v).filter_map(|w| colour[w]).collect();
            colour[v] = (0..).find(|c| !used.contains(c));
        }

        colour
            .into_iter()
            .filter_map(|(i, c)| c.map(|c| (self[i].clone(), c)))
            .collect()
    }

    fn minimum_spanning_tree(&self) -> Result<UnGraph<V>, GraphError<V>> {
        spanning::kruskal(self)
    }
}

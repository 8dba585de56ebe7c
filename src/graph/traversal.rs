//! Breadth-first and depth-first walks over a [`Graph`].
//!
//! Depth-first search never recurses: the work stack holds
//! `(vertex, next column)` pairs, so the call stack stays flat however deep
//! the search tree is.

use std::collections::VecDeque;
use std::ops::ControlFlow;

use bitvec::prelude::*;

use super::{Direction, Graph, VertexId};
use crate::error::GraphError;
use crate::index::{VertexIndex, VertexVec};

/// Which edges a walk follows out of a vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Neighbours {
    /// Along edges, tail to head.
    Outgoing,
    /// Against edges, head to tail: a walk over the transpose.
    Incoming,
    /// Both ways: a walk over the underlying undirected graph.
    Either,
}

/// Mark of a vertex during depth-first search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Colour {
    Unvisited,
    InProgress,
    Done,
}

/// What [`Graph::depth_first`] reports to its visitor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DfsEvent {
    /// First time `vertex` is reached. Roots have no parent.
    Discover {
        vertex: VertexIndex,
        parent: Option<VertexIndex>,
    },
    /// An edge to an already discovered vertex. `parent` is the tree parent
    /// of `from`.
    Revisit {
        from: VertexIndex,
        to: VertexIndex,
        colour: Colour,
        parent: Option<VertexIndex>,
    },
    /// Every neighbour of `vertex` has been explored.
    Finish(VertexIndex),
}

impl<V: VertexId, D: Direction> Graph<V, D> {
    /// Is there an edge between `i` and `j` in the sense of `neighbours`?
    pub fn adjacent(&self, i: VertexIndex, j: VertexIndex, neighbours: Neighbours) -> bool {
        match neighbours {
            Neighbours::Outgoing => self.weight_at(i, j).is_some(),
            Neighbours::Incoming => self.weight_at(j, i).is_some(),
            Neighbours::Either => self.weight_at(i, j).is_some() || self.weight_at(j, i).is_some(),
        }
    }

    fn next_adjacent(
        &self,
        i: VertexIndex,
        from_column: usize,
        neighbours: Neighbours,
    ) -> Option<VertexIndex> {
        (from_column..self.vertex_count())
            .map(VertexIndex)
            .find(|&j| self.adjacent(i, j, neighbours))
    }

    /// Depth-first search from each of `roots` that is still unvisited, with
    /// one colour map shared by all of them.
    ///
    /// Neighbours are explored in index order. The visitor can stop the search
    /// by returning [`ControlFlow::Break`], which is then returned.
    pub fn depth_first<I, F>(&self, roots: I, neighbours: Neighbours, mut visit: F) -> ControlFlow<()>
    where
        I: IntoIterator<Item = VertexIndex>,
        F: FnMut(DfsEvent) -> ControlFlow<()>,
    {
        let n = self.vertex_count();
        let mut colour = VertexVec::filled(n, Colour::Unvisited);
        let mut parent: VertexVec<Option<VertexIndex>> = VertexVec::filled(n, None);
        let mut stack: Vec<(VertexIndex, usize)> = Vec::new();

        for root in roots {
            if colour[root] != Colour::Unvisited {
                continue;
            }
            colour[root] = Colour::InProgress;
            if visit(DfsEvent::Discover {
                vertex: root,
                parent: None,
            })
            .is_break()
            {
                return ControlFlow::Break(());
            }
            stack.push((root, 0));

            while let Some((v, next)) = stack.pop() {
                let event = match self.next_adjacent(v, next, neighbours) {
                    Some(w) => {
                        stack.push((v, w.0 + 1));
                        if colour[w] == Colour::Unvisited {
                            colour[w] = Colour::InProgress;
                            parent[w] = Some(v);
                            stack.push((w, 0));
                            DfsEvent::Discover {
                                vertex: w,
                                parent: Some(v),
                            }
                        } else {
                            DfsEvent::Revisit {
                                from: v,
                                to: w,
                                colour: colour[w],
                                parent: parent[v],
                            }
                        }
                    }
                    None => {
                        colour[v] = Colour::Done;
                        DfsEvent::Finish(v)
                    }
                };
                if visit(event).is_break() {
                    return ControlFlow::Break(());
                }
            }
        }
        ControlFlow::Continue(())
    }

    /// Breadth-first order of the vertices reachable from `start`.
    pub fn breadth_first(&self, start: VertexIndex, neighbours: Neighbours) -> Vec<VertexIndex> {
        let mut seen = bitvec![0; self.vertex_count()];
        let mut queue = VecDeque::from([start]);
        let mut order = Vec::new();
        seen.set(start.0, true);

        while let Some(v) = queue.pop_front() {
            order.push(v);
            for w in self.indices() {
                if !seen[w.0] && self.adjacent(v, w, neighbours) {
                    seen.set(w.0, true);
                    queue.push_back(w);
                }
            }
        }
        order
    }

    /// Does a walk from `start` reach every vertex?
    pub fn reaches_all(&self, start: VertexIndex, neighbours: Neighbours) -> bool {
        self.breadth_first(start, neighbours).len() == self.vertex_count()
    }

    /// Is every vertex reachable from the first one, ignoring direction?
    ///
    /// For directed graphs this is weak connectivity. The empty graph is
    /// connected.
    pub fn is_connected(&self) -> bool {
        self.is_empty() || self.reaches_all(VertexIndex(0), Neighbours::Either)
    }

    /// Does the graph contain a cycle?
    ///
    /// Directed: any edge into a vertex that is still in progress. Undirected:
    /// the same, except the edge leading back to the tree parent, which is the
    /// edge the search arrived by. Self-loops are cycles in both.
    pub fn has_cycle(&self) -> bool {
        self.depth_first(self.indices(), Neighbours::Outgoing, |event| match event {
            DfsEvent::Revisit {
                to,
                colour: Colour::InProgress,
                parent,
                ..
            } if D::DIRECTED || parent != Some(to) => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        })
        .is_break()
    }

    /// Vertices reachable from `start` along edges, in breadth-first order.
    pub fn bfs(&self, start: &V) -> Result<Vec<V>, GraphError<V>> {
        let start = self.require(start)?;
        Ok(self
            .breadth_first(start, Neighbours::Outgoing)
            .into_iter()
            .map(|i| self[i].clone())
            .collect())
    }

    /// Vertices reachable from `start` along edges, in depth-first preorder.
    pub fn dfs(&self, start: &V) -> Result<Vec<V>, GraphError<V>> {
        let start = self.require(start)?;
        let mut order = Vec::new();
        let _ = self.depth_first([start], Neighbours::Outgoing, |event| {
            if let DfsEvent::Discover { vertex, .. } = event {
                order.push(self[vertex].clone());
            }
            ControlFlow::Continue(())
        });
        Ok(order)
    }
}

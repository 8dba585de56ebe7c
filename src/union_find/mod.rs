use std::cell::Cell;

use crate::index::VertexIndex;

/// A node of the union–find forest.
///
/// - `Root { rank }` is the representative of its set and stores the
///   union–by–rank value.
/// - `Child(parent)` points towards the representative.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UFNode {
    Root { rank: usize },
    Child(VertexIndex),
}

/// Disjoint sets over the vertex indices `0..n`.
///
/// The parent–pointer forest is a `Vec<Cell<UFNode>>` so that `find` (with
/// path compression) can rewrite parent pointers through a shared reference.
#[derive(Debug)]
pub struct UnionFind {
    nodes: Vec<Cell<UFNode>>,
    n_sets: usize,
}

impl UnionFind {
    /// One singleton set per vertex index in `0..n`.
    pub fn new(n: usize) -> Self {
        Self {
            nodes: (0..n).map(|_| Cell::new(UFNode::Root { rank: 0 })).collect(),
            n_sets: n,
        }
    }

    /// Number of disjoint sets currently in the structure.
    pub fn n_sets(&self) -> usize {
        self.n_sets
    }

    /// Finds the representative of the set containing `x` and compresses the
    /// path behind it.
    ///
    /// Runs in two passes over the path instead of recursing, so deep chains
    /// cost no stack.
    pub fn find(&self, x: VertexIndex) -> VertexIndex {
        let mut root = x;
        while let UFNode::Child(parent) = self.nodes[root.0].get() {
            root = parent;
        }

        let mut current = x;
        while let UFNode::Child(parent) = self.nodes[current.0].get() {
            self.nodes[current.0].set(UFNode::Child(root));
            current = parent;
        }
        root
    }

    /// Merges the sets containing `x` and `y`.
    ///
    /// Returns the new representative, or `None` when both already belong to
    /// the same set. The root of higher rank wins; on equal ranks the root of
    /// `x` wins and its rank grows by one.
    pub fn union(&mut self, x: VertexIndex, y: VertexIndex) -> Option<VertexIndex> {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return None;
        }

        let rank_x = self.rank(root_x);
        let rank_y = self.rank(root_y);

        let (winner, loser) = if rank_x < rank_y {
            (root_y, root_x)
        } else {
            (root_x, root_y)
        };

        if rank_x == rank_y {
            self.nodes[winner.0].set(UFNode::Root { rank: rank_x + 1 });
        }
        self.nodes[loser.0].set(UFNode::Child(winner));
        self.n_sets -= 1;

        Some(winner)
    }

    fn rank(&self, root: VertexIndex) -> usize {
        match self.nodes[root.0].get() {
            UFNode::Root { rank } => rank,
            UFNode::Child(_) => unreachable!("rank is only asked of roots"),
        }
    }
}

#[cfg(test)]
mod test;

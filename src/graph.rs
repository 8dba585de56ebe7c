//! # Dense weighted graphs
//!
//! [`Graph`] stores its vertices in an insertion-ordered index set and its
//! edges in a square [`WeightMatrix`](matrix::WeightMatrix). The position of
//! a vertex in the set is its [`VertexIndex`] and also its row and column in
//! the matrix.
//!
//! The direction of a graph is part of its type: [`DiGraph`] writes one cell
//! per edge, [`UnGraph`] writes the cell and its mirror in the same call.
//!
//! ## Invariants
//!
//! After every public operation:
//! - the matrix dimension equals the vertex count,
//! - undirected matrices are symmetric,
//! - vertex indices are exactly `0..vertex_count`.
//!
//! Every mutating operation checks all of its preconditions before writing,
//! so a failed call leaves the graph untouched.

use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::Index;

use ahash::RandomState;
use indexmap::IndexSet;
use tracing::debug;

use crate::error::GraphError;
use crate::index::VertexIndex;
use matrix::WeightMatrix;

pub mod display;
pub mod matrix;
pub mod traversal;

/// Weight of an edge added with [`Graph::add_unit_edge`].
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// What a vertex identity has to support: hashing for the index lookup and a
/// total order for the algorithms that process vertices by identity.
pub trait VertexId: Clone + Eq + Hash + Ord + Debug {}

impl<T: Clone + Eq + Hash + Ord + Debug> VertexId for T {}

/// Directedness of a graph, fixed by its type.
pub trait Direction: Copy + Clone + Default + Debug + 'static {
    const DIRECTED: bool;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Directed;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Undirected;

impl Direction for Directed {
    const DIRECTED: bool = true;
}

impl Direction for Undirected {
    const DIRECTED: bool = false;
}

#[derive(Clone, Debug)]
pub struct Graph<V, D = Undirected> {
    vertices: IndexSet<V, RandomState>,
    matrix: WeightMatrix,
    direction: PhantomData<D>,
}

pub type DiGraph<V> = Graph<V, Directed>;
pub type UnGraph<V> = Graph<V, Undirected>;

impl<V: VertexId, D: Direction> Default for Graph<V, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: VertexId, D: Direction> Index<VertexIndex> for Graph<V, D> {
    type Output = V;

    /// Panics if `index` is out of range, as slice indexing does.
    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index.0]
    }
}

impl<V: VertexId, D: Direction> Graph<V, D> {
    pub fn new() -> Self {
        Graph {
            vertices: IndexSet::with_hasher(RandomState::new()),
            matrix: WeightMatrix::new(),
            direction: PhantomData,
        }
    }

    /// Builds a graph from weighted edges, adding endpoints as they first
    /// appear.
    pub fn from_edges<I>(edges: I) -> Result<Self, GraphError<V>>
    where
        I: IntoIterator<Item = (V, V, f64)>,
    {
        let mut graph = Self::new();
        for (u, v, weight) in edges {
            graph.ensure_vertex(u.clone());
            graph.ensure_vertex(v.clone());
            graph.add_edge(&u, &v, weight)?;
        }
        Ok(graph)
    }

    /// An edgeless graph on `vertices`; repeated vertices are added once.
    pub fn from_vertices<I>(vertices: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        let mut graph = Self::new();
        for v in vertices {
            graph.ensure_vertex(v);
        }
        graph
    }

    /// A graph with the same vertices, in the same index order, and no edges.
    pub fn edgeless(&self) -> Self {
        Self::from_vertices(self.vertices.iter().cloned())
    }

    pub fn is_directed(&self) -> bool {
        D::DIRECTED
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of edges. An undirected edge is counted once.
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    pub fn has_vertex(&self, v: &V) -> bool {
        self.vertices.contains(v)
    }

    pub fn index_of(&self, v: &V) -> Option<VertexIndex> {
        self.vertices.get_index_of(v).map(VertexIndex)
    }

    pub fn vertex_at(&self, index: VertexIndex) -> Option<&V> {
        self.vertices.get_index(index.0)
    }

    /// Vertices in index order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.vertices.iter()
    }

    pub fn indices(&self) -> impl Iterator<Item = VertexIndex> {
        (0..self.vertex_count()).map(VertexIndex)
    }

    pub(crate) fn require(&self, v: &V) -> Result<VertexIndex, GraphError<V>> {
        self.index_of(v)
            .ok_or_else(|| GraphError::UnknownVertex(v.clone()))
    }

    fn ensure_vertex(&mut self, v: V) -> VertexIndex {
        match self.index_of(&v) {
            Some(i) => i,
            None => {
                let (i, _) = self.vertices.insert_full(v);
                self.matrix.grow();
                VertexIndex(i)
            }
        }
    }

    /// Adds `v` with the next free index.
    pub fn add_vertex(&mut self, v: V) -> Result<VertexIndex, GraphError<V>> {
        if self.has_vertex(&v) {
            return Err(GraphError::DuplicateVertex(v));
        }
        Ok(self.ensure_vertex(v))
    }

    /// Removes `v` and every edge touching it.
    ///
    /// All vertices with a higher index move down by one, so indices obtained
    /// before the call are stale afterwards.
    pub fn remove_vertex(&mut self, v: &V) -> Result<V, GraphError<V>> {
        let index = self.require(v)?;
        let mut incident = self.matrix.row(index).count();
        if D::DIRECTED {
            incident += self.predecessors(index).filter(|i| *i != index).count();
        }
        let shifted = self.vertex_count() - index.0 - 1;

        let removed = self
            .vertices
            .shift_remove_index(index.0)
            .ok_or_else(|| GraphError::UnknownVertex(v.clone()))?;
        self.matrix.excise(index);

        debug!(
            vertex = ?removed,
            incident_cells = incident,
            reindexed = shifted,
            "removed vertex"
        );
        Ok(removed)
    }

    /// Adds the edge `(u, v)`. For undirected graphs `(v, u)` is written by the
    /// same call.
    pub fn add_edge(&mut self, u: &V, v: &V, weight: f64) -> Result<(), GraphError<V>> {
        let (i, j) = (self.require(u)?, self.require(v)?);
        if self.matrix.get(i, j).is_some() {
            return Err(GraphError::DuplicateEdge(u.clone(), v.clone()));
        }
        self.write(i, j, Some(weight));
        Ok(())
    }

    /// Adds `(u, v)` with [`DEFAULT_WEIGHT`].
    pub fn add_unit_edge(&mut self, u: &V, v: &V) -> Result<(), GraphError<V>> {
        self.add_edge(u, v, DEFAULT_WEIGHT)
    }

    /// Sets the weight of `(u, v)`, adding the edge and any missing endpoint
    /// first. Returns the previous weight if the edge existed.
    pub fn update_edge(&mut self, u: V, v: V, weight: f64) -> Option<f64> {
        let i = self.ensure_vertex(u);
        let j = self.ensure_vertex(v);
        self.write(i, j, Some(weight))
    }

    pub fn remove_edge(&mut self, u: &V, v: &V) -> Result<f64, GraphError<V>> {
        let (i, j) = self.require_edge(u, v)?;
        let weight = self.write(i, j, None);
        weight.ok_or_else(|| GraphError::MissingEdge(u.clone(), v.clone()))
    }

    /// Overwrites the weight of an existing edge and returns the old one.
    pub fn set_edge_weight(&mut self, u: &V, v: &V, weight: f64) -> Result<f64, GraphError<V>> {
        let (i, j) = self.require_edge(u, v)?;
        let old = self.write(i, j, Some(weight));
        old.ok_or_else(|| GraphError::MissingEdge(u.clone(), v.clone()))
    }

    fn require_edge(&self, u: &V, v: &V) -> Result<(VertexIndex, VertexIndex), GraphError<V>> {
        let (i, j) = (self.require(u)?, self.require(v)?);
        if self.matrix.get(i, j).is_none() {
            return Err(GraphError::MissingEdge(u.clone(), v.clone()));
        }
        Ok((i, j))
    }

    /// The only place cells are written; keeps undirected matrices symmetric.
    fn write(&mut self, i: VertexIndex, j: VertexIndex, cell: Option<f64>) -> Option<f64> {
        let old = self.matrix.set(i, j, cell);
        if !D::DIRECTED {
            self.matrix.set(j, i, cell);
        }
        old
    }

    pub fn has_edge(&self, u: &V, v: &V) -> bool {
        match (self.index_of(u), self.index_of(v)) {
            (Some(i), Some(j)) => self.matrix.get(i, j).is_some(),
            _ => false,
        }
    }

    pub fn get_edge_weight(&self, u: &V, v: &V) -> Result<f64, GraphError<V>> {
        let (i, j) = (self.require(u)?, self.require(v)?);
        self.matrix
            .get(i, j)
            .ok_or_else(|| GraphError::MissingEdge(u.clone(), v.clone()))
    }

    /// Vertices `w` with an edge `(v, w)`, in index order.
    pub fn get_neighbors(&self, v: &V) -> Result<Vec<V>, GraphError<V>> {
        let i = self.require(v)?;
        Ok(self.successors(i).map(|j| self[j].clone()).collect())
    }

    pub fn weight_at(&self, i: VertexIndex, j: VertexIndex) -> Option<f64> {
        self.matrix.get(i, j)
    }

    /// Heads of the edges leaving `i`, in index order.
    pub fn successors(&self, i: VertexIndex) -> impl Iterator<Item = VertexIndex> + '_ {
        self.matrix.row(i).map(|(j, _)| j)
    }

    /// Tails of the edges entering `i`, in index order. Equal to
    /// [`successors`](Self::successors) for undirected graphs.
    pub fn predecessors(&self, i: VertexIndex) -> impl Iterator<Item = VertexIndex> + '_ {
        self.matrix.column(i).map(|(j, _)| j)
    }

    /// All edges as `(tail, head, weight)` in row-major order. An undirected
    /// edge is listed once, with `tail <= head`.
    pub fn edges(&self) -> impl Iterator<Item = (VertexIndex, VertexIndex, f64)> + '_ {
        self.indices().flat_map(move |i| {
            self.matrix
                .row(i)
                .filter(move |(j, _)| D::DIRECTED || i <= *j)
                .map(move |(j, w)| (i, j, w))
        })
    }

    /// Sum of all edge weights, each undirected edge counted once.
    pub fn total_weight(&self) -> f64 {
        self.edges().map(|(_, _, w)| w).sum()
    }

    /// The graph with every edge reversed. An undirected graph is its own
    /// transpose, so this is a copy.
    pub fn transpose(&self) -> Self {
        let mut transposed = self.edgeless();
        for (i, j, w) in self.edges() {
            transposed.write(j, i, Some(w));
        }
        transposed
    }

    /// Checks the structural invariants. Used by tests after mutations.
    pub fn check_invariants(&self) -> bool {
        self.matrix.dim() == self.vertices.len() && (D::DIRECTED || self.matrix.is_symmetric())
    }
}

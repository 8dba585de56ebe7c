//! # Graph Algorithms over the Dense Matrix Graph
//!
//! Algorithms that only make sense for one direction are extension traits
//! implemented for that graph type alone, so calling a directed algorithm on an
//! undirected graph does not compile. They are written against the public
//! contract of [`Graph`](crate::graph::Graph), the same one callers use.
//!
//! ## Available Algorithms
//!
//! ### Directed graphs
//! - [`directed::DirectedOps`]: degrees, sources and sinks, topological sort
//!   (Kahn), strongly connected components (Kosaraju), condensation, shortest
//!   unweighted paths.
//!
//! ### Undirected graphs
//! - [`undirected::UndirectedOps`]: degrees, connected components,
//!   bipartiteness, Eulerian circuits and paths, greedy colouring.
//!
//! ### Spanning trees
//! - [`spanning`]: Kruskal, Prim, verification and comparison of minimum
//!   spanning trees, edge weight statistics.

pub mod directed;
pub mod spanning;
pub mod undirected;

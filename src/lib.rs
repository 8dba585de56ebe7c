//! # Densegraph
//!
//! Densegraph is a graph library built on a dense adjacency matrix. Vertices
//! are arbitrary identities mapped onto contiguous indices, edges are weighted
//! cells of a square matrix, and the direction of a graph is part of its type.
//!
//! On top of the core [`Graph`](graph::Graph) it provides topological sorting,
//! strongly connected components and condensation for directed graphs,
//! components, bipartiteness, Eulerian checks and greedy colouring for
//! undirected graphs, and Kruskal's and Prim's minimum spanning trees.
//!
//! ```
//! use densegraph::prelude::*;
//!
//! let mut graph: DiGraph<&str> = DiGraph::new();
//! graph.add_vertex("shirt").unwrap();
//! graph.add_vertex("tie").unwrap();
//! graph.add_vertex("jacket").unwrap();
//! graph.add_unit_edge(&"shirt", &"tie").unwrap();
//! graph.add_unit_edge(&"tie", &"jacket").unwrap();
//!
//! assert_eq!(graph.topological_sort().unwrap(), ["shirt", "tie", "jacket"]);
//! ```

pub mod algorithms;
pub mod error;
pub mod graph;
pub mod index;
pub mod union_find;

pub mod prelude {
    pub use crate::algorithms::directed::DirectedOps;
    pub use crate::algorithms::spanning::{
        analyze_edge_weights, compare_msts, kruskal, prim, verify_mst, MstComparison, WeightStats,
    };
    pub use crate::algorithms::undirected::UndirectedOps;
    pub use crate::error::GraphError;
    pub use crate::graph::{DiGraph, Directed, Direction, Graph, UnGraph, Undirected, VertexId};
    pub use crate::index::VertexIndex;
}

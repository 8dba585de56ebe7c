use thiserror::Error;

/// Every way a graph operation can fail.
///
/// The first four variants are misuse of the structural API and carry the
/// offending vertices. The last two are unmet preconditions of a specific
/// algorithm: a cyclic graph has no topological order, and a disconnected
/// graph has no spanning tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError<V> {
    #[error("vertex {0:?} does not exist")]
    UnknownVertex(V),
    #[error("vertex {0:?} already exists")]
    DuplicateVertex(V),
    #[error("edge ({0:?}, {1:?}) does not exist")]
    MissingEdge(V, V),
    #[error("edge ({0:?}, {1:?}) already exists")]
    DuplicateEdge(V, V),
    #[error("graph contains a cycle, no topological order exists")]
    CyclicGraph,
    #[error("graph must be connected to build a spanning tree")]
    DisconnectedGraph,
}

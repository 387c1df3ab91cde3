/// Structural rejections reported by [`Graph`](crate::Graph) mutations.  A
/// rejected call leaves the graph untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum GraphError {
    /// The node is already registered in the graph.
    #[error("node {0:?} is already in the graph")]
    DuplicateNode(String),
    /// The node is not registered in the graph.
    #[error("node {0:?} is not in the graph")]
    MissingNode(String),
    /// A node cannot be connected to itself.
    #[error("node {0:?} cannot be connected to itself")]
    SelfLoop(String),
    /// The two nodes already share a connection.
    #[error("nodes {0:?} and {1:?} are already connected")]
    AlreadyConnected(String, String),
    /// The two nodes share no connection.
    #[error("nodes {0:?} and {1:?} are not connected")]
    NotConnected(String, String),
}

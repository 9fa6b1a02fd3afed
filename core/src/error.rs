use thiserror::Error;

/// Failures surfaced by graph queries.
///
/// All of these are caller errors (a precondition was not met); nothing here
/// is transient, so there is no retry story.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The vertex (rendered with `Debug`) is not in the graph.
    #[error("vertex {0} not found")]
    VertexNotFound(String),

    /// Average separation over a tree that holds only its root.
    #[error("tree has a single vertex, average separation is undefined")]
    SingleVertexTree,

    /// Following parent arcs revisited a vertex, so the input is not a BFS tree.
    #[error("parent walk from {0} did not terminate at a root")]
    NotATree(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;

use thiserror::Error;

/// The ways a tree operation can be refused. None of these leave the tree
/// in a modified state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The operation needs at least one node but the tree has no root.
    #[error("the tree is empty")]
    EmptyTree,
    /// The key being inserted is already stored in the tree.
    #[error("the item already exists in the tree")]
    DuplicateKey,
    /// The key the operation is about isn't stored in the tree.
    #[error("the item is not present in the tree")]
    KeyNotFound,
}

/// A convenience type alias for the result of tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;

use thiserror::Error;

/// Errors that can occur while building, evaluating or transforming expressions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    // Evaluation errors
    /// A variable was evaluated that the environment does not bind
    #[error("Undefined variable '{0}'")]
    UndefinedVariable(String),

    // Tree description errors
    /// The operation tag is not known for the arity it was used with
    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    /// The description does not have the `[tag, payload]` / `[tag, left, right]` shape
    #[error("Malformed expression tree: {0}")]
    MalformedTree(String),

    // Safety limits
    #[error("Expression nesting depth {depth} exceeds maximum limit {limit}")]
    MaxDepthExceeded { depth: usize, limit: usize },

    #[error("Expression size {nodes} exceeds maximum node count limit {limit}")]
    MaxNodesExceeded { nodes: usize, limit: usize },
}

impl ExprError {
    /// Create MalformedTree from any message
    pub fn malformed(msg: impl Into<String>) -> Self {
        ExprError::MalformedTree(msg.into())
    }
}

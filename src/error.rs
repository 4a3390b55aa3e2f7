use thiserror::Error;

use crate::reference::NodeId;

/// Errors reported at the boundary of the node store and the reachability engine.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum BddError {
    /// A seeded node list does not start with the canonical terminals or is otherwise malformed.
    #[error("invalid construction: {reason}")]
    InvalidConstruction { reason: String },

    /// An argument vector disagrees with the configured size.
    #[error("invalid size of {what}: expected {expected}, got {actual}")]
    InvalidSize {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An identifier does not name a stored node.
    #[error("invalid node identifier {id}: the store holds {size} nodes")]
    InvalidIdentifier { id: NodeId, size: usize },

    /// A reachability engine needs at least one state variable.
    #[error("state size must be at least 1")]
    ZeroStateSize,
}

pub type Result<T, E = BddError> = std::result::Result<T, E>;

//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::node::NodeId;

/// Domain errors represent structural violations detected by the
/// forest manager. Every one is raised before any state is altered, so
/// a failed operation leaves the forest unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("no node with id '{0}'")]
    UnknownNode(NodeId),

    #[error("a node with id '{0}' already exists")]
    DuplicateId(NodeId),

    #[error("node '{0}' cannot be its own parent")]
    SelfParent(NodeId),

    #[error("cycle detected: '{parent}' is a descendant of '{child}'")]
    CycleDetected { parent: NodeId, child: NodeId },

    #[error("the virtual root cannot be deleted")]
    CannotDeleteRoot,

    #[error("corrupt forest: {reason}")]
    CorruptForest { reason: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

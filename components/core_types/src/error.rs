//! Tree engine error types.
//!
//! Every tree and attribute operation reports failure through [`TreeError`].
//! Errors are never retried or suppressed inside the engine.

use thiserror::Error;

use crate::{AttributeId, AttributeType, NodeId};

/// Result alias for tree and attribute operations.
pub type TreeResult<T> = std::result::Result<T, TreeError>;

/// Errors raised by tree and attribute operations.
///
/// # Examples
///
/// ```
/// use core_types::{NodeId, TreeError};
///
/// let error = TreeError::CycleDetected { parent: NodeId(2), child: NodeId(1) };
/// assert_eq!(error.to_string(), "inserting #1 under #2 would create a cycle");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The node id is unknown or its node was destroyed
    #[error("invalid node: {0}")]
    InvalidNode(NodeId),

    /// The attribute id cannot be used as a cursor on this node
    #[error("invalid attribute {attribute} on {node}")]
    InvalidAttribute {
        /// Node that was addressed
        node: NodeId,
        /// Attribute that was addressed
        attribute: AttributeId,
    },

    /// The node has no attribute with this id
    #[error("attribute {attribute} not found on {node}")]
    AttributeNotFound {
        /// Node that was addressed
        node: NodeId,
        /// Missing attribute
        attribute: AttributeId,
    },

    /// The insert would make a node its own ancestor
    #[error("inserting {child} under {parent} would create a cycle")]
    CycleDetected {
        /// Prospective parent
        parent: NodeId,
        /// Prospective child
        child: NodeId,
    },

    /// The child already has a parent and must be removed first
    #[error("{child} is already attached to {parent}")]
    AlreadyAttached {
        /// Node that was to be inserted
        child: NodeId,
        /// Its current parent
        parent: NodeId,
    },

    /// The node is not a child of the given parent
    #[error("{child} is not a child of {parent}")]
    NotAChild {
        /// Parent that was addressed
        parent: NodeId,
        /// Node that was expected under it
        child: NodeId,
    },

    /// An ordinal insert position lies past the end of the child list
    #[error("position {index} out of range for {len} children")]
    PositionOutOfRange {
        /// Requested ordinal
        index: u32,
        /// Current child count
        len: usize,
    },

    /// A typed accessor was used on a value of another type
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Type the accessor reads
        expected: AttributeType,
        /// Type actually stored
        found: AttributeType,
    },

    /// Identifier space or configured capacity is exhausted
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),
}

//! Identifier types for nodes, attributes and streams.
//!
//! Identifiers are plain integers wrapped in newtypes so that a node id can
//! never be passed where an attribute id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a node, unique within one tree.
///
/// Identifiers are assigned at creation and never reused, so a stale id
/// left over from a removed subtree is always reported as invalid.
///
/// # Examples
///
/// ```
/// use core_types::NodeId;
///
/// let id = NodeId(3);
/// assert_eq!(id.0, 3);
/// assert_eq!(id.to_string(), "#3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Identifier of an attribute, unique per owning node only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttributeId(pub u32);

/// Routing key for stream callbacks.
///
/// A stream owns no tree state; it only tells observers apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StreamId(pub u64);

/// Type tag carried by every node. New nodes start with `NodeType(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NodeType(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stream {}", self.0)
    }
}

/// Where a child lands in its new parent's ordered child list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Position {
    /// After the current last child
    #[default]
    Append,
    /// Before the current first child
    Prepend,
    /// At the given ordinal; `0..=len` is valid, `len` appends
    At(u32),
    /// Immediately before an existing child of the same parent
    Before(NodeId),
}

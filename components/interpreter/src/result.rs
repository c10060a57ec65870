//! Step results

use core_types::{AttributeId, AttributeValue, NodeId};

/// Value produced by one successful step
#[derive(Debug, Clone, PartialEq)]
pub enum StepResult {
    /// The opcode produces nothing
    Void,
    /// A node, or `None` when the relation does not exist
    Node(Option<NodeId>),
    /// An attribute, or `None` at the end of an enumeration
    Attribute(Option<AttributeId>),
    /// A boolean
    Boolean(bool),
    /// An integer, count or type tag
    Integer(i64),
    /// A real
    Real(f64),
    /// Text
    Text(String),
    /// A typed attribute value and the attribute it came from
    Value {
        /// Attribute that was read
        attribute: AttributeId,
        /// Its value, carrying the type tag
        value: AttributeValue,
    },
}

impl StepResult {
    /// Node id, if this is a node result
    pub fn node(&self) -> Option<NodeId> {
        match self {
            StepResult::Node(node) => *node,
            _ => None,
        }
    }

    /// Attribute id, if this result names one
    pub fn attribute(&self) -> Option<AttributeId> {
        match self {
            StepResult::Attribute(attribute) => *attribute,
            StepResult::Value { attribute, .. } => Some(*attribute),
            _ => None,
        }
    }

    /// Typed value, if this is a value result
    pub fn value(&self) -> Option<&AttributeValue> {
        match self {
            StepResult::Value { value, .. } => Some(value),
            _ => None,
        }
    }

    /// True for results that deliver nothing to the stream
    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            StepResult::Void | StepResult::Node(None) | StepResult::Attribute(None)
        )
    }
}

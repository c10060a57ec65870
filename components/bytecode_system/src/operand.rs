//! Instruction operands
//!
//! Operands arrive pre-decoded to the types the opcode table names.

use core_types::{AttributeId, AttributeValue, NodeId, NodeType, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of an operand slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperandKind {
    /// Node id
    Node,
    /// Attribute id
    Attribute,
    /// Boolean literal
    Boolean,
    /// Integer literal
    Integer,
    /// Real literal
    Real,
    /// Text literal
    Text,
    /// Node type tag
    NodeType,
    /// Insert position
    Position,
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperandKind::Node => "node",
            OperandKind::Attribute => "attribute",
            OperandKind::Boolean => "boolean",
            OperandKind::Integer => "integer",
            OperandKind::Real => "real",
            OperandKind::Text => "text",
            OperandKind::NodeType => "node type",
            OperandKind::Position => "position",
        };
        f.write_str(name)
    }
}

/// A decoded operand value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    /// Node id
    Node(NodeId),
    /// Attribute id
    Attribute(AttributeId),
    /// Boolean literal
    Boolean(bool),
    /// Integer literal
    Integer(i64),
    /// Real literal
    Real(f64),
    /// Text literal
    Text(String),
    /// Node type tag
    NodeType(NodeType),
    /// Insert position
    Position(Position),
}

impl Operand {
    /// Kind of this operand
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::Node(_) => OperandKind::Node,
            Operand::Attribute(_) => OperandKind::Attribute,
            Operand::Boolean(_) => OperandKind::Boolean,
            Operand::Integer(_) => OperandKind::Integer,
            Operand::Real(_) => OperandKind::Real,
            Operand::Text(_) => OperandKind::Text,
            Operand::NodeType(_) => OperandKind::NodeType,
            Operand::Position(_) => OperandKind::Position,
        }
    }

    /// The literal as an attribute value, for the four value kinds
    pub fn to_attribute_value(&self) -> Option<AttributeValue> {
        match self {
            Operand::Boolean(b) => Some(AttributeValue::Boolean(*b)),
            Operand::Integer(n) => Some(AttributeValue::Integer(*n)),
            Operand::Real(n) => Some(AttributeValue::Real(*n)),
            Operand::Text(s) => Some(AttributeValue::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Node(id) => write!(f, "{}", id),
            Operand::Attribute(id) => write!(f, "{}", id),
            Operand::Boolean(b) => write!(f, "{}", b),
            Operand::Integer(n) => write!(f, "{}", n),
            Operand::Real(n) => write!(f, "{}", n),
            Operand::Text(s) => write!(f, "{:?}", s),
            Operand::NodeType(t) => write!(f, "type:{}", t.0),
            Operand::Position(p) => match p {
                Position::Append => f.write_str("append"),
                Position::Prepend => f.write_str("prepend"),
                Position::At(i) => write!(f, "at:{}", i),
                Position::Before(id) => write!(f, "before:{}", id),
            },
        }
    }
}

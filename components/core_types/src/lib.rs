//! Core tree value types and error handling.
//!
//! This crate provides the foundational types shared by the tree engine,
//! the bytecode system and the interpreter: identifiers, typed attribute
//! values, insert positions and the engine error type.
//!
//! # Overview
//!
//! - [`NodeId`], [`AttributeId`], [`StreamId`] - Identifiers
//! - [`NodeType`] - Per-node type tag
//! - [`AttributeValue`] - Typed attribute value (boolean, integer, real, text)
//! - [`AttributeType`] - Type tag of an attribute value
//! - [`Position`] - Where a child is inserted under its parent
//! - [`TreeError`] - Errors raised by tree and attribute operations
//!
//! # Examples
//!
//! ```
//! use core_types::{AttributeType, AttributeValue, NodeId, TreeError};
//!
//! let value = AttributeValue::Integer(42);
//! assert_eq!(value.attribute_type(), AttributeType::Integer);
//! assert_eq!(value.as_integer(), Ok(42));
//!
//! // Reading through a mismatched accessor is an error, never a coercion
//! assert!(matches!(value.as_boolean(), Err(TreeError::TypeMismatch { .. })));
//!
//! let error = TreeError::InvalidNode(NodeId(7));
//! assert_eq!(error.to_string(), "invalid node: #7");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod ids;
mod value;

pub use error::{TreeError, TreeResult};
pub use ids::{AttributeId, NodeId, NodeType, Position, StreamId};
pub use value::{AttributeType, AttributeValue};

//! Bytecode system for the tree VM
//!
//! This crate provides the instruction set the interpreter executes
//! against a tree backend.
//!
//! # Features
//!
//! - Closed opcode table with one distinct code per operation
//! - Per-opcode operand signature, mutation flag and result shape
//! - Operands that may default to the interpreter's current node/attribute
//! - Binary serialization of whole programs
//!
//! # Example
//!
//! ```
//! use bytecode_system::{Opcode, Operand, Program};
//! use core_types::{AttributeId, NodeId};
//!
//! let mut program = Program::new();
//!
//! // Move to the first child of node #0, then read its attribute @1
//! program.emit_with(Opcode::NodeFirstChild, vec![Operand::Node(NodeId(0))]);
//! program.emit_with(Opcode::NodeAttributeGet, vec![Operand::Attribute(AttributeId(1))]);
//!
//! // Serialize
//! let bytes = program.to_bytes().unwrap();
//! let restored = Program::from_bytes(&bytes).unwrap();
//! assert_eq!(restored, program);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod operand;
pub mod program;

// Re-export main types at crate root
pub use error::{DecodeError, EncodeError};
pub use instruction::Instruction;
pub use opcode::{Opcode, OpcodeFamily, OpcodeInfo, OperandSlot, ResultShape};
pub use operand::{Operand, OperandKind};
pub use program::Program;

//! Bytecode interpreter for the tree VM
//!
//! This crate provides the execution core that replays instruction
//! streams against a tree backend:
//! - Single-step execution with a Ready/Faulted state machine
//! - Current node/attribute tracking so navigation results feed later operands
//! - Incremental result delivery through a [`Sink`] bound to a [`StreamId`](core_types::StreamId)
//!
//! # Example
//!
//! ```
//! use bytecode_system::{Instruction, Opcode, Operand};
//! use core_types::{AttributeId, AttributeValue, NodeId, Position, StreamId};
//! use interpreter::{Event, RecordingSink, StepResult, Stream, Vm};
//! use tree_engine::{ArenaTree, Backend};
//!
//! let mut tree = ArenaTree::new();
//! let root = tree.create_node().unwrap();
//! let child = tree.create_node().unwrap();
//! tree.insert_child(root, child, Position::Append).unwrap();
//! tree.set_attribute(child, AttributeId(1), AttributeValue::from("hi")).unwrap();
//!
//! let mut vm = Vm::new();
//! let mut stream = Stream::new(StreamId(1), RecordingSink::new());
//!
//! let first = Instruction::new(Opcode::NodeFirstChild).operand(Operand::Node(root));
//! assert_eq!(vm.step(&mut tree, &mut stream, &first).unwrap(), StepResult::Node(Some(child)));
//!
//! // The attribute read defaults to the node reached by the previous step
//! let get = Instruction::new(Opcode::NodeAttributeGet).operand(Operand::Attribute(AttributeId(1)));
//! let result = vm.step(&mut tree, &mut stream, &get).unwrap();
//! assert_eq!(result.value(), Some(&AttributeValue::from("hi")));
//!
//! assert_eq!(stream.sink().events()[0], Event::Node(StreamId(1), child));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod dispatch;
pub mod fault;
pub mod result;
pub mod stream;
pub mod vm;

// Re-export main types at crate root
pub use context::{Status, VmState};
pub use fault::{Fault, FaultKind, RunError};
pub use result::StepResult;
pub use stream::{Event, RecordingSink, Sink, SinkStatus, Stream};
pub use vm::Vm;

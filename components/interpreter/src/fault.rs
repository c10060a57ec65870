//! Step faults
//!
//! A fault ends the current step and moves the VM to
//! [`Status::Faulted`](crate::Status::Faulted). Engine errors are wrapped,
//! never retried.

use bytecode_system::Opcode;
use core_types::{StreamId, TreeError};
use thiserror::Error;

/// Why a step failed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Fault {
    /// The opcode byte names no operation
    #[error("unknown opcode 0x{0:02x}")]
    UnknownOpcode(u8),

    /// Operands do not fit the opcode signature
    #[error("operand mismatch for {opcode}: {reason}")]
    OperandMismatch {
        /// Opcode being executed
        opcode: Opcode,
        /// What did not fit
        reason: String,
    },

    /// A sink callback returned a non-zero status
    #[error("{stream} rejected delivery with status {status}")]
    SinkRejected {
        /// Stream whose sink rejected
        stream: StreamId,
        /// Status returned by the callback
        status: u8,
    },

    /// The tree engine reported an error
    #[error("engine error: {0}")]
    Engine(#[from] TreeError),

    /// A step was attempted while the VM is faulted
    #[error("vm is faulted; reset before stepping")]
    Faulted,
}

/// Flat classification of faults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// Unknown or destroyed node
    InvalidNode,
    /// Attribute cursor not present on the node
    InvalidAttribute,
    /// Attribute absent
    AttributeNotFound,
    /// Insert would create a cycle
    CycleDetected,
    /// Child already has a parent
    AlreadyAttached,
    /// Node is not a child of the given parent
    NotAChild,
    /// Ordinal insert past the end
    PositionOutOfRange,
    /// Typed accessor on another type
    TypeMismatch,
    /// Identifier space or capacity exhausted
    ResourceExhausted,
    /// Opcode byte names no operation
    UnknownOpcode,
    /// Operands do not fit the signature
    OperandMismatch,
    /// Sink vetoed delivery
    SinkRejected,
    /// VM was already faulted
    Faulted,
}

impl Fault {
    /// Classify this fault
    pub fn kind(&self) -> FaultKind {
        match self {
            Fault::UnknownOpcode(_) => FaultKind::UnknownOpcode,
            Fault::OperandMismatch { .. } => FaultKind::OperandMismatch,
            Fault::SinkRejected { .. } => FaultKind::SinkRejected,
            Fault::Faulted => FaultKind::Faulted,
            Fault::Engine(error) => match error {
                TreeError::InvalidNode(_) => FaultKind::InvalidNode,
                TreeError::InvalidAttribute { .. } => FaultKind::InvalidAttribute,
                TreeError::AttributeNotFound { .. } => FaultKind::AttributeNotFound,
                TreeError::CycleDetected { .. } => FaultKind::CycleDetected,
                TreeError::AlreadyAttached { .. } => FaultKind::AlreadyAttached,
                TreeError::NotAChild { .. } => FaultKind::NotAChild,
                TreeError::PositionOutOfRange { .. } => FaultKind::PositionOutOfRange,
                TreeError::TypeMismatch { .. } => FaultKind::TypeMismatch,
                TreeError::ResourceExhausted(_) => FaultKind::ResourceExhausted,
            },
        }
    }

    pub(crate) fn operands(opcode: Opcode, reason: impl Into<String>) -> Self {
        Fault::OperandMismatch {
            opcode,
            reason: reason.into(),
        }
    }
}

/// A fault raised while running a whole program
#[derive(Debug, Clone, PartialEq, Error)]
#[error("instruction {index} faulted: {fault}")]
pub struct RunError {
    /// Index of the faulting instruction
    pub index: usize,
    /// The fault it raised
    pub fault: Fault,
}

//! Bytecode instruction representation
//!
//! An instruction pairs an opcode with its decoded operand list.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::opcode::Opcode;
use crate::operand::Operand;

/// A single bytecode instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The opcode for this instruction
    pub opcode: Opcode,
    /// Operands; leading current-node/attribute slots may be left out
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operands: Vec<Operand>,
}

impl Instruction {
    /// Create an instruction without operands
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            operands: Vec::new(),
        }
    }

    /// Create an instruction with operands
    pub fn with_operands(opcode: Opcode, operands: Vec<Operand>) -> Self {
        Self { opcode, operands }
    }

    /// Append one operand
    pub fn operand(mut self, operand: Operand) -> Self {
        self.operands.push(operand);
        self
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        for operand in &self.operands {
            write!(f, " {}", operand)?;
        }
        Ok(())
    }
}

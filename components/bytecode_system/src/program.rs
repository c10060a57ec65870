//! Program - ordered instruction stream
//!
//! Contains the instructions a caller feeds to the interpreter, plus the
//! binary encoding used to exchange programs between tools.

use core_types::{AttributeId, NodeId, NodeType, Position};
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, EncodeError};
use crate::instruction::Instruction;
use crate::opcode::Opcode;
use crate::operand::Operand;

const MAGIC: &[u8; 4] = b"TVMP";
const VERSION: u8 = 1;

const TAG_NODE: u8 = 0;
const TAG_ATTRIBUTE: u8 = 1;
const TAG_BOOLEAN: u8 = 2;
const TAG_INTEGER: u8 = 3;
const TAG_REAL: u8 = 4;
const TAG_TEXT: u8 = 5;
const TAG_NODE_TYPE: u8 = 6;
const TAG_POSITION: u8 = 7;

const POSITION_APPEND: u8 = 0;
const POSITION_PREPEND: u8 = 1;
const POSITION_AT: u8 = 2;
const POSITION_BEFORE: u8 = 3;

/// An ordered list of instructions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    /// Sequence of instructions, executed in order
    pub instructions: Vec<Instruction>,
}

impl Program {
    /// Create a new empty program
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit an instruction without operands
    pub fn emit(&mut self, opcode: Opcode) {
        self.instructions.push(Instruction::new(opcode));
    }

    /// Emit an instruction with operands
    pub fn emit_with(&mut self, opcode: Opcode, operands: Vec<Operand>) {
        self.instructions
            .push(Instruction::with_operands(opcode, operands));
    }

    /// Append a prepared instruction
    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// Get the number of instructions
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True when the program has no instructions
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Iterate over instructions in order
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Clear all instructions
    pub fn clear(&mut self) {
        self.instructions.clear();
    }

    /// Serialize program to binary format
    ///
    /// Layout: magic, version byte, instruction count (u32 LE), then per
    /// instruction the opcode byte, an operand count byte and the tagged
    /// operands.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError` when a count does not fit its field: more than
    /// `u32::MAX` instructions, more than 255 operands on one instruction,
    /// or a text operand longer than `u32::MAX` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let mut bytes = Vec::new();

        let count = u32::try_from(self.instructions.len()).map_err(|_| {
            EncodeError::TooManyInstructions {
                count: self.instructions.len(),
            }
        })?;
        bytes.extend_from_slice(MAGIC);
        bytes.push(VERSION);
        bytes.extend_from_slice(&count.to_le_bytes());

        for (index, inst) in self.instructions.iter().enumerate() {
            let operand_count =
                u8::try_from(inst.operands.len()).map_err(|_| EncodeError::TooManyOperands {
                    index,
                    count: inst.operands.len(),
                })?;
            bytes.push(inst.opcode.code());
            bytes.push(operand_count);
            for operand in &inst.operands {
                encode_operand(operand, index, &mut bytes)?;
            }
        }

        Ok(bytes)
    }

    /// Deserialize program from binary format
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut reader = Reader::new(bytes);

        if reader.take(MAGIC.len())? != MAGIC {
            return Err(DecodeError::BadMagic);
        }
        let version = reader.u8()?;
        if version != VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }

        let count = reader.u32()? as usize;
        let mut instructions = Vec::with_capacity(count.min(bytes.len()));
        for _ in 0..count {
            instructions.push(decode_instruction(&mut reader)?);
        }

        if !reader.is_done() {
            return Err(DecodeError::TrailingBytes { count });
        }

        Ok(Self { instructions })
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self {
            instructions: iter.into_iter().collect(),
        }
    }
}

/// Encode one tagged operand of instruction `index`
fn encode_operand(operand: &Operand, index: usize, bytes: &mut Vec<u8>) -> Result<(), EncodeError> {
    match operand {
        Operand::Node(id) => {
            bytes.push(TAG_NODE);
            bytes.extend_from_slice(&id.0.to_le_bytes());
        }
        Operand::Attribute(id) => {
            bytes.push(TAG_ATTRIBUTE);
            bytes.extend_from_slice(&id.0.to_le_bytes());
        }
        Operand::Boolean(b) => {
            bytes.push(TAG_BOOLEAN);
            bytes.push(if *b { 1 } else { 0 });
        }
        Operand::Integer(n) => {
            bytes.push(TAG_INTEGER);
            bytes.extend_from_slice(&n.to_le_bytes());
        }
        Operand::Real(n) => {
            bytes.push(TAG_REAL);
            bytes.extend_from_slice(&n.to_le_bytes());
        }
        Operand::Text(s) => {
            bytes.push(TAG_TEXT);
            let s_bytes = s.as_bytes();
            let len = u32::try_from(s_bytes.len()).map_err(|_| EncodeError::TextTooLong {
                index,
                len: s_bytes.len(),
            })?;
            bytes.extend_from_slice(&len.to_le_bytes());
            bytes.extend_from_slice(s_bytes);
        }
        Operand::NodeType(t) => {
            bytes.push(TAG_NODE_TYPE);
            bytes.extend_from_slice(&t.0.to_le_bytes());
        }
        Operand::Position(position) => {
            bytes.push(TAG_POSITION);
            match position {
                Position::Append => bytes.push(POSITION_APPEND),
                Position::Prepend => bytes.push(POSITION_PREPEND),
                Position::At(index) => {
                    bytes.push(POSITION_AT);
                    bytes.extend_from_slice(&index.to_le_bytes());
                }
                Position::Before(id) => {
                    bytes.push(POSITION_BEFORE);
                    bytes.extend_from_slice(&id.0.to_le_bytes());
                }
            }
        }
    }
    Ok(())
}

/// Decode one instruction
fn decode_instruction(reader: &mut Reader<'_>) -> Result<Instruction, DecodeError> {
    let offset = reader.offset;
    let code = reader.u8()?;
    let opcode = Opcode::from_code(code).ok_or(DecodeError::UnknownOpcode { code, offset })?;

    let count = reader.u8()? as usize;
    let mut operands = Vec::with_capacity(count);
    for _ in 0..count {
        operands.push(decode_operand(reader)?);
    }

    Ok(Instruction { opcode, operands })
}

/// Decode one tagged operand
fn decode_operand(reader: &mut Reader<'_>) -> Result<Operand, DecodeError> {
    let offset = reader.offset;
    let tag = reader.u8()?;

    let operand = match tag {
        TAG_NODE => Operand::Node(NodeId(reader.u32()?)),
        TAG_ATTRIBUTE => Operand::Attribute(AttributeId(reader.u32()?)),
        TAG_BOOLEAN => Operand::Boolean(reader.u8()? != 0),
        TAG_INTEGER => Operand::Integer(i64::from_le_bytes(reader.array()?)),
        TAG_REAL => Operand::Real(f64::from_le_bytes(reader.array()?)),
        TAG_TEXT => {
            let len = reader.u32()? as usize;
            let text_offset = reader.offset;
            let raw = reader.take(len)?;
            let text = std::str::from_utf8(raw)
                .map_err(|_| DecodeError::InvalidText {
                    offset: text_offset,
                })?
                .to_string();
            Operand::Text(text)
        }
        TAG_NODE_TYPE => Operand::NodeType(NodeType(reader.u32()?)),
        TAG_POSITION => {
            let position_offset = reader.offset;
            let position = match reader.u8()? {
                POSITION_APPEND => Position::Append,
                POSITION_PREPEND => Position::Prepend,
                POSITION_AT => Position::At(reader.u32()?),
                POSITION_BEFORE => Position::Before(NodeId(reader.u32()?)),
                other => {
                    return Err(DecodeError::UnknownPositionTag {
                        tag: other,
                        offset: position_offset,
                    })
                }
            };
            Operand::Position(position)
        }
        _ => return Err(DecodeError::UnknownOperandTag { tag, offset }),
    };

    Ok(operand)
}

/// Cursor over the input bytes
struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn is_done(&self) -> bool {
        self.offset == self.bytes.len()
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(DecodeError::Truncated {
                offset: self.offset,
            })?;
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let offset = self.offset;
        self.take(N)?
            .try_into()
            .map_err(|_| DecodeError::Truncated { offset })
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.array::<1>()?[0])
    }

    fn u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.array()?))
    }
}

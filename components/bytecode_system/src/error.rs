//! Program encoding and decoding errors

use thiserror::Error;

/// Errors raised while decoding a binary program
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input does not start with the program magic
    #[error("invalid magic number")]
    BadMagic,

    /// Format version is not understood
    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    /// Input ended in the middle of a field
    #[error("unexpected end of input at byte {offset}")]
    Truncated {
        /// Offset where more bytes were expected
        offset: usize,
    },

    /// Opcode byte names no operation
    #[error("unknown opcode 0x{code:02x} at byte {offset}")]
    UnknownOpcode {
        /// The byte read
        code: u8,
        /// Its offset
        offset: usize,
    },

    /// Operand tag names no operand kind
    #[error("unknown operand tag {tag} at byte {offset}")]
    UnknownOperandTag {
        /// The byte read
        tag: u8,
        /// Its offset
        offset: usize,
    },

    /// Position tag names no position policy
    #[error("unknown position tag {tag} at byte {offset}")]
    UnknownPositionTag {
        /// The byte read
        tag: u8,
        /// Its offset
        offset: usize,
    },

    /// Text operand is not valid UTF-8
    #[error("invalid UTF-8 text at byte {offset}")]
    InvalidText {
        /// Offset of the text payload
        offset: usize,
    },

    /// Bytes remain after the last instruction
    #[error("trailing bytes after instruction {count}")]
    TrailingBytes {
        /// Number of instructions decoded
        count: usize,
    },
}

/// Errors raised while encoding a program to binary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Instruction count does not fit the u32 header field
    #[error("too many instructions: {count}")]
    TooManyInstructions {
        /// Number of instructions in the program
        count: usize,
    },

    /// Operand count does not fit the per-instruction count byte
    #[error("instruction {index} has {count} operands, at most 255 can be encoded")]
    TooManyOperands {
        /// Index of the offending instruction
        index: usize,
        /// Number of operands it carries
        count: usize,
    },

    /// Text length does not fit the u32 length prefix
    #[error("text operand of instruction {index} is {len} bytes long")]
    TextTooLong {
        /// Index of the offending instruction
        index: usize,
        /// Byte length of the text
        len: usize,
    },
}

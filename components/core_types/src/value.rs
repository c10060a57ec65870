//! Typed attribute values.
//!
//! An attribute holds exactly one of four value kinds. The type tag is
//! derived from the populated variant, so tag and value can never disagree.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TreeError, TreeResult};

/// Type tag of an attribute value.
///
/// The numeric codes are stable and are what `AttrType` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AttributeType {
    /// `true` or `false`
    Boolean = 1,
    /// 64-bit signed integer
    Integer = 2,
    /// IEEE 754 double
    Real = 3,
    /// UTF-8 text with explicit byte length
    Text = 4,
}

impl AttributeType {
    /// Numeric code of this tag
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Tag for a numeric code, if it names one
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(AttributeType::Boolean),
            2 => Some(AttributeType::Integer),
            3 => Some(AttributeType::Real),
            4 => Some(AttributeType::Text),
            _ => None,
        }
    }

    /// Lower-case name used in messages
    pub fn name(self) -> &'static str {
        match self {
            AttributeType::Boolean => "boolean",
            AttributeType::Integer => "integer",
            AttributeType::Real => "real",
            AttributeType::Text => "text",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value stored in an attribute.
///
/// # Examples
///
/// ```
/// use core_types::{AttributeType, AttributeValue};
///
/// let text = AttributeValue::from("hi");
/// assert_eq!(text.attribute_type(), AttributeType::Text);
/// assert_eq!(text.len(), 2);
/// assert_eq!(text.as_text(), Ok("hi"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real value
    Real(f64),
    /// UTF-8 text with an explicit length, so embedded NUL bytes are kept.
    /// Arbitrary non-UTF-8 byte payloads are not representable.
    Text(String),
}

impl AttributeValue {
    /// Type tag matching the populated variant
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            AttributeValue::Boolean(_) => AttributeType::Boolean,
            AttributeValue::Integer(_) => AttributeType::Integer,
            AttributeValue::Real(_) => AttributeType::Real,
            AttributeValue::Text(_) => AttributeType::Text,
        }
    }

    /// Byte length of the value. Text reports its UTF-8 length, the
    /// fixed-size kinds report their storage width.
    pub fn len(&self) -> usize {
        match self {
            AttributeValue::Boolean(_) => 1,
            AttributeValue::Integer(_) | AttributeValue::Real(_) => 8,
            AttributeValue::Text(s) => s.len(),
        }
    }

    /// True only for empty text
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read as boolean
    pub fn as_boolean(&self) -> TreeResult<bool> {
        match self {
            AttributeValue::Boolean(b) => Ok(*b),
            other => Err(other.mismatch(AttributeType::Boolean)),
        }
    }

    /// Read as integer
    pub fn as_integer(&self) -> TreeResult<i64> {
        match self {
            AttributeValue::Integer(n) => Ok(*n),
            other => Err(other.mismatch(AttributeType::Integer)),
        }
    }

    /// Read as real
    pub fn as_real(&self) -> TreeResult<f64> {
        match self {
            AttributeValue::Real(n) => Ok(*n),
            other => Err(other.mismatch(AttributeType::Real)),
        }
    }

    /// Read as text
    pub fn as_text(&self) -> TreeResult<&str> {
        match self {
            AttributeValue::Text(s) => Ok(s),
            other => Err(other.mismatch(AttributeType::Text)),
        }
    }

    fn mismatch(&self, expected: AttributeType) -> TreeError {
        TreeError::TypeMismatch {
            expected,
            found: self.attribute_type(),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Real(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Boolean(b) => write!(f, "{}", b),
            AttributeValue::Integer(n) => write!(f, "{}", n),
            AttributeValue::Real(n) => write!(f, "{}", n),
            AttributeValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

//! Bytecode opcodes for the tree VM
//!
//! Defines the closed instruction set and the metadata table describing
//! each opcode's operands, side effects and result.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::operand::OperandKind;

/// Which part of the engine an opcode targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpcodeFamily {
    /// Node navigation and mutation (`0x10..=0x1F`)
    Node,
    /// Attribute access (`0x20..=0x2F`)
    Attribute,
}

/// Shape of the value an opcode produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultShape {
    /// Nothing
    Void,
    /// A node id, or none when the relation does not exist
    Node,
    /// An attribute id, or none at the end of an enumeration
    Attribute,
    /// A boolean
    Boolean,
    /// An integer (also counts and type tags)
    Integer,
    /// A real
    Real,
    /// Text
    Text,
    /// A typed attribute value
    Value,
}

/// One operand position in an opcode signature.
///
/// A `current` slot may be omitted by the caller, in which case the
/// interpreter fills it from its current node or attribute. Only a leading
/// run of current slots can be omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandSlot {
    /// Operand type accepted in this slot
    pub kind: OperandKind,
    /// Whether the slot may default from interpreter state
    pub current: bool,
}

impl OperandSlot {
    /// Slot that must always be supplied
    pub const fn required(kind: OperandKind) -> Self {
        Self {
            kind,
            current: false,
        }
    }

    /// Slot that defaults to the current node or attribute
    pub const fn current(kind: OperandKind) -> Self {
        Self {
            kind,
            current: true,
        }
    }
}

/// Static description of an opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeInfo {
    /// Operand signature, in order
    pub operands: &'static [OperandSlot],
    /// Whether the opcode changes tree state
    pub mutates: bool,
    /// Whether a successful result becomes the current node/attribute
    pub navigates: bool,
    /// Result produced on success
    pub result: ResultShape,
}

impl OpcodeInfo {
    /// Number of operands when every slot is supplied
    pub fn arity(&self) -> usize {
        self.operands.len()
    }

    /// Number of leading slots that may be omitted
    pub fn defaultable(&self) -> usize {
        self.operands.iter().take_while(|slot| slot.current).count()
    }

    /// Smallest number of operands accepted
    pub fn min_arity(&self) -> usize {
        self.arity() - self.defaultable()
    }
}

const NODE: OperandSlot = OperandSlot::current(OperandKind::Node);
const ATTRIBUTE: OperandSlot = OperandSlot::current(OperandKind::Attribute);

const SIG_NONE: &[OperandSlot] = &[];
const SIG_NODE: &[OperandSlot] = &[NODE];
const SIG_NODE_TYPE: &[OperandSlot] = &[NODE, OperandSlot::required(OperandKind::NodeType)];
const SIG_CHILD: &[OperandSlot] = &[NODE, OperandSlot::required(OperandKind::Node)];
const SIG_INSERT: &[OperandSlot] = &[
    NODE,
    OperandSlot::required(OperandKind::Node),
    OperandSlot::required(OperandKind::Position),
];
const SIG_ATTRIBUTE_ONLY: &[OperandSlot] = &[ATTRIBUTE];
const SIG_NAMED_ATTRIBUTE: &[OperandSlot] =
    &[NODE, OperandSlot::required(OperandKind::Attribute)];
const SIG_ATTRIBUTE: &[OperandSlot] = &[NODE, ATTRIBUTE];
const SIG_SET_BOOLEAN: &[OperandSlot] = &[
    NODE,
    ATTRIBUTE,
    OperandSlot::required(OperandKind::Boolean),
];
const SIG_SET_INTEGER: &[OperandSlot] = &[
    NODE,
    ATTRIBUTE,
    OperandSlot::required(OperandKind::Integer),
];
const SIG_SET_REAL: &[OperandSlot] = &[NODE, ATTRIBUTE, OperandSlot::required(OperandKind::Real)];
const SIG_SET_TEXT: &[OperandSlot] = &[NODE, ATTRIBUTE, OperandSlot::required(OperandKind::Text)];

/// Bytecode opcodes for tree execution.
///
/// Every opcode has its own code; no two operations share a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Opcode {
    // Nodes
    /// Select a node and echo its id
    NodeId = 0x10,
    /// Read the node type tag
    NodeTypeGet = 0x11,
    /// Write the node type tag
    NodeTypeSet = 0x12,
    /// Remove a child and destroy its subtree
    NodeChildRemove = 0x13,
    /// Attach a parentless node as a child
    NodeChildInsert = 0x14,
    /// Count direct children
    NodeChildCount = 0x15,
    /// Move to the next sibling
    NodeSiblingNext = 0x16,
    /// Move to the previous sibling
    NodeSiblingPrevious = 0x17,
    /// Move to the parent
    NodeParent = 0x18,
    /// Move to the first child
    NodeFirstChild = 0x19,
    /// Count attributes on the node
    NodeAttributeCount = 0x1A,
    /// Select an attribute and read its typed value
    NodeAttributeGet = 0x1B,
    /// Move the attribute cursor backwards
    NodeAttributePrevious = 0x1C,
    /// Move the attribute cursor forwards
    NodeAttributeNext = 0x1D,
    /// Create a parentless node and select it
    NodeCreate = 0x1E,
    /// Move to the last child
    NodeLastChild = 0x1F,

    // Attributes
    /// Remove one attribute; absent attributes are ignored
    AttrClear = 0x20,
    /// Remove every attribute of the node
    AttrClearAll = 0x21,
    /// Select an attribute and echo its id
    AttrId = 0x22,
    /// Read the attribute type tag
    AttrType = 0x23,
    /// Store a boolean
    AttrSetBool = 0x24,
    /// Store an integer
    AttrSetInt = 0x25,
    /// Store a real
    AttrSetReal = 0x26,
    /// Store text
    AttrSetText = 0x27,
    /// Read a boolean
    AttrGetBool = 0x28,
    /// Read an integer
    AttrGetInt = 0x29,
    /// Read a real
    AttrGetReal = 0x2A,
    /// Read text
    AttrGetText = 0x2B,
}

impl Opcode {
    /// Every opcode, in code order
    pub const ALL: [Opcode; 28] = [
        Opcode::NodeId,
        Opcode::NodeTypeGet,
        Opcode::NodeTypeSet,
        Opcode::NodeChildRemove,
        Opcode::NodeChildInsert,
        Opcode::NodeChildCount,
        Opcode::NodeSiblingNext,
        Opcode::NodeSiblingPrevious,
        Opcode::NodeParent,
        Opcode::NodeFirstChild,
        Opcode::NodeAttributeCount,
        Opcode::NodeAttributeGet,
        Opcode::NodeAttributePrevious,
        Opcode::NodeAttributeNext,
        Opcode::NodeCreate,
        Opcode::NodeLastChild,
        Opcode::AttrClear,
        Opcode::AttrClearAll,
        Opcode::AttrId,
        Opcode::AttrType,
        Opcode::AttrSetBool,
        Opcode::AttrSetInt,
        Opcode::AttrSetReal,
        Opcode::AttrSetText,
        Opcode::AttrGetBool,
        Opcode::AttrGetInt,
        Opcode::AttrGetReal,
        Opcode::AttrGetText,
    ];

    /// Numeric code of this opcode
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Opcode for a numeric code, if one is assigned
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.code() == code)
    }

    /// Target family, derived from the high nibble of the code
    pub fn family(self) -> OpcodeFamily {
        if self.code() < 0x20 {
            OpcodeFamily::Node
        } else {
            OpcodeFamily::Attribute
        }
    }

    /// Short lower-case name used in listings
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::NodeId => "node.id",
            Opcode::NodeTypeGet => "node.type.get",
            Opcode::NodeTypeSet => "node.type.set",
            Opcode::NodeChildRemove => "node.child.remove",
            Opcode::NodeChildInsert => "node.child.insert",
            Opcode::NodeChildCount => "node.child.count",
            Opcode::NodeSiblingNext => "node.sibling.next",
            Opcode::NodeSiblingPrevious => "node.sibling.previous",
            Opcode::NodeParent => "node.parent",
            Opcode::NodeFirstChild => "node.child.first",
            Opcode::NodeAttributeCount => "node.attr.count",
            Opcode::NodeAttributeGet => "node.attr.get",
            Opcode::NodeAttributePrevious => "node.attr.previous",
            Opcode::NodeAttributeNext => "node.attr.next",
            Opcode::NodeCreate => "node.create",
            Opcode::NodeLastChild => "node.child.last",
            Opcode::AttrClear => "attr.clear",
            Opcode::AttrClearAll => "attr.clear.all",
            Opcode::AttrId => "attr.id",
            Opcode::AttrType => "attr.type",
            Opcode::AttrSetBool => "attr.set.bool",
            Opcode::AttrSetInt => "attr.set.int",
            Opcode::AttrSetReal => "attr.set.real",
            Opcode::AttrSetText => "attr.set.text",
            Opcode::AttrGetBool => "attr.get.bool",
            Opcode::AttrGetInt => "attr.get.int",
            Opcode::AttrGetReal => "attr.get.real",
            Opcode::AttrGetText => "attr.get.text",
        }
    }

    /// Operand signature, side effects and result shape
    pub fn info(self) -> OpcodeInfo {
        use ResultShape as R;

        let (operands, mutates, navigates, result) = match self {
            Opcode::NodeId => (SIG_NODE, false, true, R::Node),
            Opcode::NodeTypeGet => (SIG_NODE, false, false, R::Integer),
            Opcode::NodeTypeSet => (SIG_NODE_TYPE, true, false, R::Void),
            Opcode::NodeChildRemove => (SIG_CHILD, true, false, R::Void),
            Opcode::NodeChildInsert => (SIG_INSERT, true, false, R::Void),
            Opcode::NodeChildCount => (SIG_NODE, false, false, R::Integer),
            Opcode::NodeSiblingNext
            | Opcode::NodeSiblingPrevious
            | Opcode::NodeParent
            | Opcode::NodeFirstChild
            | Opcode::NodeLastChild => (SIG_NODE, false, true, R::Node),
            Opcode::NodeAttributeCount => (SIG_NODE, false, false, R::Integer),
            Opcode::NodeAttributeGet => (SIG_NAMED_ATTRIBUTE, false, true, R::Value),
            Opcode::NodeAttributePrevious | Opcode::NodeAttributeNext => {
                (SIG_ATTRIBUTE, false, true, R::Attribute)
            }
            Opcode::NodeCreate => (SIG_NONE, true, true, R::Node),
            Opcode::AttrClear => (SIG_ATTRIBUTE, true, false, R::Void),
            Opcode::AttrClearAll => (SIG_NODE, true, false, R::Void),
            Opcode::AttrId => (SIG_ATTRIBUTE_ONLY, false, true, R::Attribute),
            Opcode::AttrType => (SIG_ATTRIBUTE, false, false, R::Integer),
            Opcode::AttrSetBool => (SIG_SET_BOOLEAN, true, false, R::Void),
            Opcode::AttrSetInt => (SIG_SET_INTEGER, true, false, R::Void),
            Opcode::AttrSetReal => (SIG_SET_REAL, true, false, R::Void),
            Opcode::AttrSetText => (SIG_SET_TEXT, true, false, R::Void),
            Opcode::AttrGetBool => (SIG_ATTRIBUTE, false, false, R::Boolean),
            Opcode::AttrGetInt => (SIG_ATTRIBUTE, false, false, R::Integer),
            Opcode::AttrGetReal => (SIG_ATTRIBUTE, false, false, R::Real),
            Opcode::AttrGetText => (SIG_ATTRIBUTE, false, false, R::Text),
        };

        OpcodeInfo {
            operands,
            mutates,
            navigates,
            result,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

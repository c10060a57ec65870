//! Execution state for the VM

use core_types::{AttributeId, NodeId};

/// Transient per-stream addressing state.
///
/// Holds the last node and attribute reached by a navigation opcode.
/// Operands left out of an instruction are filled from here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VmState {
    /// Currently addressed node
    pub node: Option<NodeId>,
    /// Currently addressed attribute, scoped to `node`
    pub attribute: Option<AttributeId>,
}

impl VmState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state addressing `node`
    pub fn at(node: NodeId) -> Self {
        Self {
            node: Some(node),
            attribute: None,
        }
    }

    /// Address a node. Moving to a different node drops the attribute,
    /// since attribute ids are only meaningful per node.
    pub fn select_node(&mut self, node: NodeId) {
        if self.node != Some(node) {
            self.attribute = None;
        }
        self.node = Some(node);
    }

    /// Address an attribute of the current node
    pub fn select_attribute(&mut self, attribute: AttributeId) {
        self.attribute = Some(attribute);
    }

    /// Forget both ids
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// VM execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// Between instructions, able to step
    #[default]
    Ready,
    /// A step failed; only [`Vm::reset`](crate::Vm::reset) leaves this state
    Faulted,
}

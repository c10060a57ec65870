//! Opcode dispatch
//!
//! Resolves operands against the opcode table and the current state, runs
//! the matching backend operation, then advances the state for navigation
//! opcodes.

use bytecode_system::{Opcode, Operand, OperandKind};
use core_types::{AttributeId, AttributeValue, NodeId, NodeType, Position, TreeError};
use tracing::trace;
use tree_engine::Backend;

use crate::context::VmState;
use crate::fault::Fault;
use crate::result::StepResult;

/// Operands after defaulting, one entry per signature slot.
///
/// A `None` entry is a defaulted slot for which the state held no id.
#[derive(Debug)]
struct Args {
    opcode: Opcode,
    slots: Vec<Option<Operand>>,
}

impl Args {
    fn resolve(opcode: Opcode, operands: &[Operand], state: &VmState) -> Result<Self, Fault> {
        let info = opcode.info();
        let given = operands.len();
        if given > info.arity() {
            return Err(Fault::operands(
                opcode,
                format!("expected at most {} operands, got {}", info.arity(), given),
            ));
        }
        if given < info.min_arity() {
            return Err(Fault::operands(
                opcode,
                format!("expected at least {} operands, got {}", info.min_arity(), given),
            ));
        }

        let omitted = info.arity() - given;
        let mut slots = Vec::with_capacity(info.arity());
        for slot in &info.operands[..omitted] {
            let current = match slot.kind {
                OperandKind::Node => state.node.map(Operand::Node),
                OperandKind::Attribute => state.attribute.map(Operand::Attribute),
                _ => None,
            };
            slots.push(current);
        }
        for (slot, operand) in info.operands[omitted..].iter().zip(operands) {
            if operand.kind() != slot.kind {
                return Err(Fault::operands(
                    opcode,
                    format!("expected {} operand, got {}", slot.kind, operand.kind()),
                ));
            }
            slots.push(Some(operand.clone()));
        }

        Ok(Self { opcode, slots })
    }

    fn get(&self, index: usize) -> Option<&Operand> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    fn node(&self, index: usize) -> Result<NodeId, Fault> {
        match self.get(index) {
            Some(Operand::Node(id)) => Ok(*id),
            _ => Err(Fault::operands(self.opcode, "no current node")),
        }
    }

    /// Attribute slot that may legitimately be empty
    fn cursor(&self, index: usize) -> Option<AttributeId> {
        match self.get(index) {
            Some(Operand::Attribute(id)) => Some(*id),
            _ => None,
        }
    }

    fn attribute(&self, index: usize) -> Result<AttributeId, Fault> {
        self.cursor(index)
            .ok_or_else(|| Fault::operands(self.opcode, "no current attribute"))
    }

    fn node_type(&self, index: usize) -> Result<NodeType, Fault> {
        match self.get(index) {
            Some(Operand::NodeType(t)) => Ok(*t),
            _ => Err(Fault::operands(self.opcode, "missing node type")),
        }
    }

    fn position(&self, index: usize) -> Result<Position, Fault> {
        match self.get(index) {
            Some(Operand::Position(p)) => Ok(*p),
            _ => Err(Fault::operands(self.opcode, "missing position")),
        }
    }

    fn value(&self, index: usize) -> Result<AttributeValue, Fault> {
        self.get(index)
            .and_then(Operand::to_attribute_value)
            .ok_or_else(|| Fault::operands(self.opcode, "missing value"))
    }
}

/// Executes single opcodes and owns the addressing state
#[derive(Debug, Default)]
pub struct Dispatcher {
    state: VmState,
}

impl Dispatcher {
    /// Create a dispatcher with empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher starting from `state`
    pub fn with_state(state: VmState) -> Self {
        Self { state }
    }

    /// Current addressing state
    pub fn state(&self) -> &VmState {
        &self.state
    }

    /// Replace the addressing state
    pub fn set_state(&mut self, state: VmState) {
        self.state = state;
    }

    /// Execute one opcode against `tree`.
    ///
    /// On success the state is advanced when the opcode navigates and the
    /// result names a node or attribute. On failure the state is untouched.
    pub fn execute<B: Backend + ?Sized>(
        &mut self,
        tree: &mut B,
        opcode: Opcode,
        operands: &[Operand],
    ) -> Result<StepResult, Fault> {
        let args = Args::resolve(opcode, operands, &self.state)?;
        let result = Self::run(tree, &args)?;

        if opcode.info().navigates {
            self.advance(&args, &result);
        }
        Ok(result)
    }

    fn advance(&mut self, args: &Args, result: &StepResult) {
        let attribute = match result {
            StepResult::Node(Some(node)) => {
                self.state.select_node(*node);
                None
            }
            StepResult::Attribute(Some(attribute)) => Some(*attribute),
            StepResult::Value { attribute, .. } => Some(*attribute),
            _ => None,
        };
        if let Some(attribute) = attribute {
            // Attribute results are scoped to the node they were read from
            if let Ok(node) = args.node(0) {
                self.state.select_node(node);
            }
            self.state.select_attribute(attribute);
        }
        trace!(node = ?self.state.node, attribute = ?self.state.attribute, "state advanced");
    }

    fn run<B: Backend + ?Sized>(tree: &mut B, args: &Args) -> Result<StepResult, Fault> {
        let result = match args.opcode {
            // ========== Node family ==========
            Opcode::NodeId => {
                let node = args.node(0)?;
                if !tree.contains(node) {
                    return Err(TreeError::InvalidNode(node).into());
                }
                StepResult::Node(Some(node))
            }
            Opcode::NodeTypeGet => {
                let node_type = tree.node_type(args.node(0)?)?;
                StepResult::Integer(i64::from(node_type.0))
            }
            Opcode::NodeTypeSet => {
                tree.set_node_type(args.node(0)?, args.node_type(1)?)?;
                StepResult::Void
            }
            Opcode::NodeChildRemove => {
                tree.remove_child(args.node(0)?, args.node(1)?)?;
                StepResult::Void
            }
            Opcode::NodeChildInsert => {
                tree.insert_child(args.node(0)?, args.node(1)?, args.position(2)?)?;
                StepResult::Void
            }
            Opcode::NodeChildCount => {
                StepResult::Integer(count(tree.child_count(args.node(0)?)?))
            }
            Opcode::NodeSiblingNext => StepResult::Node(tree.next_sibling(args.node(0)?)?),
            Opcode::NodeSiblingPrevious => {
                StepResult::Node(tree.previous_sibling(args.node(0)?)?)
            }
            Opcode::NodeParent => StepResult::Node(tree.parent(args.node(0)?)?),
            Opcode::NodeFirstChild => StepResult::Node(tree.first_child(args.node(0)?)?),
            Opcode::NodeLastChild => StepResult::Node(tree.last_child(args.node(0)?)?),
            Opcode::NodeAttributeCount => {
                StepResult::Integer(count(tree.attribute_count(args.node(0)?)?))
            }
            Opcode::NodeAttributeGet => {
                let attribute = args.attribute(1)?;
                let value = tree.attribute(args.node(0)?, attribute)?.clone();
                StepResult::Value { attribute, value }
            }
            Opcode::NodeAttributeNext => {
                let node = args.node(0)?;
                let next = match args.cursor(1) {
                    Some(after) => tree.next_attribute(node, after)?,
                    None => tree.first_attribute(node)?,
                };
                StepResult::Attribute(next)
            }
            Opcode::NodeAttributePrevious => {
                let node = args.node(0)?;
                let previous = match args.cursor(1) {
                    Some(before) => tree.previous_attribute(node, before)?,
                    None => tree.last_attribute(node)?,
                };
                StepResult::Attribute(previous)
            }
            Opcode::NodeCreate => StepResult::Node(Some(tree.create_node()?)),

            // ========== Attribute family ==========
            Opcode::AttrClear => {
                tree.clear_attribute(args.node(0)?, args.attribute(1)?)?;
                StepResult::Void
            }
            Opcode::AttrClearAll => {
                tree.clear_attributes(args.node(0)?)?;
                StepResult::Void
            }
            Opcode::AttrId => StepResult::Attribute(Some(args.attribute(0)?)),
            Opcode::AttrType => {
                let value = tree.attribute(args.node(0)?, args.attribute(1)?)?;
                StepResult::Integer(i64::from(value.attribute_type().code()))
            }
            Opcode::AttrSetBool | Opcode::AttrSetInt | Opcode::AttrSetReal | Opcode::AttrSetText => {
                tree.set_attribute(args.node(0)?, args.attribute(1)?, args.value(2)?)?;
                StepResult::Void
            }
            Opcode::AttrGetBool => {
                let value = tree.attribute(args.node(0)?, args.attribute(1)?)?;
                StepResult::Boolean(value.as_boolean()?)
            }
            Opcode::AttrGetInt => {
                let value = tree.attribute(args.node(0)?, args.attribute(1)?)?;
                StepResult::Integer(value.as_integer()?)
            }
            Opcode::AttrGetReal => {
                let value = tree.attribute(args.node(0)?, args.attribute(1)?)?;
                StepResult::Real(value.as_real()?)
            }
            Opcode::AttrGetText => {
                let value = tree.attribute(args.node(0)?, args.attribute(1)?)?;
                StepResult::Text(value.as_text()?.to_string())
            }
        };
        Ok(result)
    }
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

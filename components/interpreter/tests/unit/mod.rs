//! Unit tests for interpreter components

use bytecode_system::{Instruction, Opcode, Operand};
use core_types::{AttributeId, AttributeValue, NodeId, NodeType, Position, StreamId};
use interpreter::{
    Event, Fault, FaultKind, RecordingSink, Status, StepResult, Stream, Vm, VmState,
};
use tree_engine::{ArenaTree, Backend};

const STREAM: StreamId = StreamId(1);

fn stream() -> Stream<RecordingSink> {
    Stream::new(STREAM, RecordingSink::new())
}

// ============================================================================
// Node family
// ============================================================================

#[test]
fn test_node_create_and_insert() {
    let mut vm = Vm::new();
    let mut tree = ArenaTree::new();
    let mut stream = stream();

    let root = vm
        .step(&mut tree, &mut stream, &Instruction::new(Opcode::NodeCreate))
        .unwrap()
        .node()
        .unwrap();
    let child = vm
        .step(&mut tree, &mut stream, &Instruction::new(Opcode::NodeCreate))
        .unwrap()
        .node()
        .unwrap();

    let insert = Instruction::new(Opcode::NodeChildInsert)
        .operand(Operand::Node(root))
        .operand(Operand::Node(child))
        .operand(Operand::Position(Position::Append));
    assert_eq!(
        vm.step(&mut tree, &mut stream, &insert).unwrap(),
        StepResult::Void
    );

    assert_eq!(tree.parent(child).unwrap(), Some(root));
    assert_eq!(tree.child_count(root).unwrap(), 1);
}

#[test]
fn test_node_type_set_and_get() {
    let mut vm = Vm::new();
    let mut tree = ArenaTree::new();
    let mut stream = stream();
    vm.step(&mut tree, &mut stream, &Instruction::new(Opcode::NodeCreate))
        .unwrap();

    let set = Instruction::new(Opcode::NodeTypeSet).operand(Operand::NodeType(NodeType(7)));
    vm.step(&mut tree, &mut stream, &set).unwrap();

    let get = Instruction::new(Opcode::NodeTypeGet);
    assert_eq!(
        vm.step(&mut tree, &mut stream, &get).unwrap(),
        StepResult::Integer(7)
    );
}

#[test]
fn test_sibling_navigation_moves_current_node() {
    let mut tree = ArenaTree::new();
    let root = tree.create_node().unwrap();
    let a = tree.create_node().unwrap();
    let b = tree.create_node().unwrap();
    tree.insert_child(root, a, Position::Append).unwrap();
    tree.insert_child(root, b, Position::Append).unwrap();

    let mut vm = Vm::with_state(VmState::at(a));
    let mut stream = stream();

    let next = Instruction::new(Opcode::NodeSiblingNext);
    assert_eq!(
        vm.step(&mut tree, &mut stream, &next).unwrap(),
        StepResult::Node(Some(b))
    );
    assert_eq!(vm.state().node, Some(b));

    // No further sibling: result is empty and state stays on b
    assert_eq!(
        vm.step(&mut tree, &mut stream, &next).unwrap(),
        StepResult::Node(None)
    );
    assert_eq!(vm.state().node, Some(b));

    let previous = Instruction::new(Opcode::NodeSiblingPrevious);
    assert_eq!(
        vm.step(&mut tree, &mut stream, &previous).unwrap(),
        StepResult::Node(Some(a))
    );

    let parent = Instruction::new(Opcode::NodeParent);
    assert_eq!(
        vm.step(&mut tree, &mut stream, &parent).unwrap(),
        StepResult::Node(Some(root))
    );

    let last = Instruction::new(Opcode::NodeLastChild);
    assert_eq!(
        vm.step(&mut tree, &mut stream, &last).unwrap(),
        StepResult::Node(Some(b))
    );
}

#[test]
fn test_child_remove_destroys_subtree() {
    let mut tree = ArenaTree::new();
    let root = tree.create_node().unwrap();
    let child = tree.create_node().unwrap();
    let grandchild = tree.create_node().unwrap();
    tree.insert_child(root, child, Position::Append).unwrap();
    tree.insert_child(child, grandchild, Position::Append).unwrap();

    let mut vm = Vm::new();
    let mut stream = stream();
    let remove = Instruction::new(Opcode::NodeChildRemove)
        .operand(Operand::Node(root))
        .operand(Operand::Node(child));
    vm.step(&mut tree, &mut stream, &remove).unwrap();

    assert!(!tree.contains(child));
    assert!(!tree.contains(grandchild));
    assert_eq!(tree.child_count(root).unwrap(), 0);
}

#[test]
fn test_insert_cycle_faults_without_change() {
    let mut tree = ArenaTree::new();
    let root = tree.create_node().unwrap();
    let child = tree.create_node().unwrap();
    tree.insert_child(root, child, Position::Append).unwrap();

    let mut vm = Vm::new();
    let mut stream = stream();
    let insert = Instruction::new(Opcode::NodeChildInsert)
        .operand(Operand::Node(child))
        .operand(Operand::Node(root))
        .operand(Operand::Position(Position::Append));
    let fault = vm.step(&mut tree, &mut stream, &insert).unwrap_err();

    assert_eq!(fault.kind(), FaultKind::CycleDetected);
    assert_eq!(tree.parent(root).unwrap(), None);
    assert_eq!(tree.parent(child).unwrap(), Some(root));
}

#[test]
fn test_node_id_selects_node() {
    let mut tree = ArenaTree::new();
    let a = tree.create_node().unwrap();
    let b = tree.create_node().unwrap();
    tree.set_attribute(a, AttributeId(1), AttributeValue::Integer(1))
        .unwrap();

    let mut vm = Vm::new();
    let mut stream = stream();
    let get = Instruction::new(Opcode::NodeAttributeGet)
        .operand(Operand::Node(a))
        .operand(Operand::Attribute(AttributeId(1)));
    vm.step(&mut tree, &mut stream, &get).unwrap();
    assert_eq!(vm.state().attribute, Some(AttributeId(1)));

    let select = Instruction::new(Opcode::NodeId).operand(Operand::Node(b));
    vm.step(&mut tree, &mut stream, &select).unwrap();
    assert_eq!(vm.state().node, Some(b));
    assert_eq!(vm.state().attribute, None);
}

// ============================================================================
// Attribute family
// ============================================================================

#[test]
fn test_attribute_set_get_each_type() {
    let mut tree = ArenaTree::new();
    let node = tree.create_node().unwrap();
    let mut vm = Vm::with_state(VmState::at(node));
    let mut stream = stream();

    let cases = [
        (Opcode::AttrSetBool, Opcode::AttrGetBool, Operand::Boolean(true), StepResult::Boolean(true)),
        (Opcode::AttrSetInt, Opcode::AttrGetInt, Operand::Integer(-4), StepResult::Integer(-4)),
        (Opcode::AttrSetReal, Opcode::AttrGetReal, Operand::Real(0.25), StepResult::Real(0.25)),
        (
            Opcode::AttrSetText,
            Opcode::AttrGetText,
            Operand::Text("abc".into()),
            StepResult::Text("abc".into()),
        ),
    ];

    for (index, (set, get, operand, expected)) in cases.into_iter().enumerate() {
        let attribute = AttributeId(index as u32);
        let set = Instruction::new(set)
            .operand(Operand::Attribute(attribute))
            .operand(operand);
        vm.step(&mut tree, &mut stream, &set).unwrap();

        let get = Instruction::new(get).operand(Operand::Attribute(attribute));
        assert_eq!(vm.step(&mut tree, &mut stream, &get).unwrap(), expected);
    }

    assert_eq!(tree.attribute_count(node).unwrap(), 4);
}

#[test]
fn test_attribute_typed_get_mismatch() {
    let mut tree = ArenaTree::new();
    let node = tree.create_node().unwrap();
    tree.set_attribute(node, AttributeId(1), AttributeValue::Integer(5))
        .unwrap();

    let mut vm = Vm::with_state(VmState::at(node));
    let mut stream = stream();
    let get = Instruction::new(Opcode::AttrGetText).operand(Operand::Attribute(AttributeId(1)));
    let fault = vm.step(&mut tree, &mut stream, &get).unwrap_err();
    assert_eq!(fault.kind(), FaultKind::TypeMismatch);
}

#[test]
fn test_attribute_type_tag() {
    let mut tree = ArenaTree::new();
    let node = tree.create_node().unwrap();
    tree.set_attribute(node, AttributeId(1), AttributeValue::Real(1.0))
        .unwrap();

    let mut vm = Vm::with_state(VmState::at(node));
    let mut stream = stream();
    let tag = Instruction::new(Opcode::AttrType).operand(Operand::Attribute(AttributeId(1)));
    assert_eq!(
        vm.step(&mut tree, &mut stream, &tag).unwrap(),
        StepResult::Integer(3)
    );
}

#[test]
fn test_attribute_clear_is_idempotent() {
    let mut tree = ArenaTree::new();
    let node = tree.create_node().unwrap();
    tree.set_attribute(node, AttributeId(1), AttributeValue::Boolean(false))
        .unwrap();

    let mut vm = Vm::with_state(VmState::at(node));
    let mut stream = stream();
    let clear = Instruction::new(Opcode::AttrClear).operand(Operand::Attribute(AttributeId(1)));
    vm.step(&mut tree, &mut stream, &clear).unwrap();
    vm.step(&mut tree, &mut stream, &clear).unwrap();

    assert_eq!(tree.attribute_count(node).unwrap(), 0);
}

#[test]
fn test_attribute_clear_all() {
    let mut tree = ArenaTree::new();
    let node = tree.create_node().unwrap();
    for id in 0..3 {
        tree.set_attribute(node, AttributeId(id), AttributeValue::Integer(i64::from(id)))
            .unwrap();
    }

    let mut vm = Vm::with_state(VmState::at(node));
    let mut stream = stream();
    vm.step(&mut tree, &mut stream, &Instruction::new(Opcode::AttrClearAll))
        .unwrap();
    let count = Instruction::new(Opcode::NodeAttributeCount);
    assert_eq!(
        vm.step(&mut tree, &mut stream, &count).unwrap(),
        StepResult::Integer(0)
    );
}

#[test]
fn test_attr_id_selects_attribute() {
    let mut vm = Vm::with_state(VmState::at(NodeId(0)));
    let mut tree = ArenaTree::new();
    tree.create_node().unwrap();
    let mut stream = stream();

    let select = Instruction::new(Opcode::AttrId).operand(Operand::Attribute(AttributeId(9)));
    vm.step(&mut tree, &mut stream, &select).unwrap();
    assert_eq!(vm.state().attribute, Some(AttributeId(9)));
    assert_eq!(stream.sink().events(), &[Event::Attribute(STREAM, AttributeId(9))]);
}

// ============================================================================
// Operand defaulting and faults
// ============================================================================

#[test]
fn test_missing_state_is_operand_mismatch() {
    let mut vm = Vm::new();
    let mut tree = ArenaTree::new();
    let mut stream = stream();

    let fault = vm
        .step(&mut tree, &mut stream, &Instruction::new(Opcode::NodeChildCount))
        .unwrap_err();
    assert!(matches!(fault, Fault::OperandMismatch { opcode: Opcode::NodeChildCount, .. }));
    assert_eq!(vm.status(), Status::Faulted);
}

#[test]
fn test_unknown_opcode_code() {
    let mut vm = Vm::new();
    let mut tree = ArenaTree::new();
    let mut stream = stream();

    let fault = vm.step_code(&mut tree, &mut stream, 0x3f, &[]).unwrap_err();
    assert_eq!(fault.kind(), FaultKind::UnknownOpcode);
}

#[test]
fn test_step_code_known_opcode() {
    let mut vm = Vm::new();
    let mut tree = ArenaTree::new();
    let mut stream = stream();

    let result = vm
        .step_code(&mut tree, &mut stream, Opcode::NodeCreate.code(), &[])
        .unwrap();
    assert_eq!(result, StepResult::Node(Some(NodeId(0))));
}

//! Tests for Program and its encodings

use bytecode_system::{DecodeError, Instruction, Opcode, Operand, Program};
use core_types::{AttributeId, NodeId};

fn sample_program() -> Program {
    let mut program = Program::new();
    program.emit(Opcode::NodeCreate);
    program.emit(Opcode::NodeCreate);
    program.emit_with(
        Opcode::AttrSetText,
        vec![Operand::Attribute(AttributeId(1)), Operand::Text("hi".to_string())],
    );
    program.emit_with(Opcode::NodeParent, vec![Operand::Node(NodeId(1))]);
    program
}

#[test]
fn test_program_iteration_order() {
    let program = sample_program();
    let opcodes: Vec<Opcode> = program.iter().map(|inst| inst.opcode).collect();
    assert_eq!(
        opcodes,
        vec![
            Opcode::NodeCreate,
            Opcode::NodeCreate,
            Opcode::AttrSetText,
            Opcode::NodeParent
        ]
    );
}

#[test]
fn test_program_binary_round_trip() {
    let program = sample_program();
    let restored = Program::from_bytes(&program.to_bytes().unwrap()).unwrap();
    assert_eq!(restored, program);
}

#[test]
fn test_program_json_is_instruction_list() {
    let json = r#"[
        {"opcode": "NodeCreate"},
        {"opcode": "AttrSetInt", "operands": [{"Attribute": 1}, {"Integer": 42}]}
    ]"#;
    let program: Program = serde_json::from_str(json).unwrap();
    assert_eq!(program.len(), 2);
    assert_eq!(
        program.instructions[1],
        Instruction::with_operands(
            Opcode::AttrSetInt,
            vec![Operand::Attribute(AttributeId(1)), Operand::Integer(42)]
        )
    );
}

#[test]
fn test_program_json_unknown_opcode() {
    let json = r#"[{"opcode": "Jump"}]"#;
    assert!(serde_json::from_str::<Program>(json).is_err());
}

#[test]
fn test_decode_error_messages() {
    assert_eq!(DecodeError::BadMagic.to_string(), "invalid magic number");
    assert_eq!(
        DecodeError::UnknownOpcode {
            code: 0x05,
            offset: 9
        }
        .to_string(),
        "unknown opcode 0x05 at byte 9"
    );
}

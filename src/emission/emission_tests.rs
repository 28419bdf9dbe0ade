use crate::ast::Const;
use crate::codegen::*;
use rstest::rstest;

#[rstest]
#[case(AsmInstruction::Comment("declare x".into()), "; declare x")]
#[case(AsmInstruction::Label("L0".into()), "L0:")]
#[case(AsmInstruction::Mov(Operand::Reg(0), Operand::Imm(Const::Int(5))), "mov r0, 5")]
#[case(AsmInstruction::Mov(Operand::Reg(3), Operand::Imm(Const::Float(1.0))), "mov r3, 1.0")]
#[case(AsmInstruction::Mov(Operand::Data("x".into()), Operand::Reg(1)), "mov x, r1")]
#[case(AsmInstruction::Imul(Operand::Reg(2), Operand::Data("y".into())), "imul r2, y")]
#[case(AsmInstruction::Mov(Operand::Eax, Operand::Reg(2)), "mov eax, r2")]
#[case(AsmInstruction::Cdq, "cdq")]
#[case(AsmInstruction::Idiv(Operand::Reg(4)), "idiv r4")]
#[case(AsmInstruction::Cmp(Operand::Reg(0), Operand::Imm(Const::Int(0))), "cmp r0, 0")]
#[case(AsmInstruction::Je("L1".into()), "je L1")]
#[case(AsmInstruction::Push(Operand::Reg(0), 0), "push r0 ; arg0")]
#[case(AsmInstruction::Call("f".into()), "call f")]
#[case(AsmInstruction::FreeStack(8), "add esp, 8")]
#[case(AsmInstruction::Ret, "ret")]
fn test_instruction_format(#[case] instruction: AsmInstruction, #[case] expected: &str) {
    assert_eq!(instruction.to_string(), expected);
}

#[test]
fn test_program_sections() {
    let program = AsmProgram {
        data: vec!["x".into(), "y".into()],
        text: vec![
            AsmInstruction::Mov(Operand::Reg(0), Operand::Imm(Const::Int(5))),
            AsmInstruction::Mov(Operand::Data("x".into()), Operand::Reg(0)),
        ],
    };
    assert_eq!(
        program.to_string(),
        "section .data\nx db 0\ny db 0\nsection .text\nmov r0, 5\nmov x, r0\n"
    );
}

#[test]
fn test_empty_program() {
    let program = AsmProgram {
        data: vec![],
        text: vec![],
    };
    assert_eq!(program.to_string(), "section .data\nsection .text\n");
}

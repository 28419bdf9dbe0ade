use crate::ast::{Const, Identifier};

pub type AsmInstructions = Vec<AsmInstruction>;

#[derive(Debug, Clone, PartialEq)]
pub struct AsmProgram {
    /// zero-initialized storage for program-level variables
    pub data: Vec<Identifier>,
    pub text: AsmInstructions,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Virtual register `rN`, never reused within a run.
    Reg(u64),
    /// Named variable storage.
    Data(Identifier),
    Imm(Const),
    /// Return value register.
    Eax,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AsmInstruction {
    Comment(String),
    Label(Identifier),
    Mov(Operand, Operand),
    Add(Operand, Operand),
    Sub(Operand, Operand),
    Imul(Operand, Operand),
    Cdq,
    Idiv(Operand),
    Cmp(Operand, Operand),
    Je(Identifier),
    Jmp(Identifier),
    /// argument value and its position in the call
    Push(Operand, usize),
    Call(Identifier),
    /// caller side stack cleanup, in bytes
    FreeStack(usize),
    Ret,
}

impl AsmInstruction {
    pub fn is_label(&self) -> bool {
        matches!(self, Self::Label(_))
    }

    pub fn is_jump(&self) -> bool {
        matches!(self, Self::Je(_) | Self::Jmp(_))
    }
}

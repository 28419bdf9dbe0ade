//! Code emission using [Display]
//!
//! Implements [Display] for [AsmProgram](crate::codegen::AsmProgram) so the listing can be produced
//! with `to_string` or used directly as a formatting argument.
//!
//! [Display]: https://doc.rust-lang.org/std/fmt/trait.Display.html

#[cfg(test)]
mod emission_tests;

use crate::codegen::*;

use std::fmt;

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Reg(n) => write!(f, "r{n}"),
            Self::Data(name) => write!(f, "{name}"),
            Self::Imm(c) => write!(f, "{c}"),
            Self::Eax => write!(f, "eax"),
        }
    }
}

impl fmt::Display for AsmInstruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Comment(text) => write!(f, "; {text}"),
            Self::Label(name) => write!(f, "{name}:"),
            Self::Mov(dst, src) => write!(f, "mov {dst}, {src}"),
            Self::Add(dst, src) => write!(f, "add {dst}, {src}"),
            Self::Sub(dst, src) => write!(f, "sub {dst}, {src}"),
            Self::Imul(dst, src) => write!(f, "imul {dst}, {src}"),
            Self::Cdq => write!(f, "cdq"),
            Self::Idiv(op) => write!(f, "idiv {op}"),
            Self::Cmp(l, r) => write!(f, "cmp {l}, {r}"),
            Self::Je(target) => write!(f, "je {target}"),
            Self::Jmp(target) => write!(f, "jmp {target}"),
            Self::Push(op, i) => write!(f, "push {op} ; arg{i}"),
            Self::Call(name) => write!(f, "call {name}"),
            Self::FreeStack(bytes) => write!(f, "add esp, {bytes}"),
            Self::Ret => write!(f, "ret"),
        }
    }
}

impl fmt::Display for AsmProgram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "section .data")?;
        for name in &self.data {
            writeln!(f, "{name} db 0")?;
        }
        writeln!(f, "section .text")?;
        for instruction in &self.text {
            writeln!(f, "{instruction}")?;
        }

        Ok(())
    }
}

pub mod asm_ast;

use crate::ast::*;
use std::collections::HashSet;

pub use asm_ast::*;

/// Bytes reserved on the stack per pushed argument.
const ARG_SLOT_SIZE: usize = 4;

struct NameGenerator {
    reg_count: u64,
    label_count: u64,
}

impl NameGenerator {
    fn new() -> Self {
        Self {
            reg_count: 0,
            label_count: 0,
        }
    }

    fn get_reg(&mut self) -> Operand {
        let c = self.reg_count;
        self.reg_count += 1;
        Operand::Reg(c)
    }

    fn get_label(&mut self) -> Identifier {
        let c = self.label_count;
        self.label_count += 1;
        format!("L{c}")
    }
}

fn gen_arith(
    instructions: &mut AsmInstructions,
    op: ArithOp,
    left: Operand,
    right: Operand,
    result: Operand,
) {
    instructions.push(AsmInstruction::Mov(result.clone(), left.clone()));
    match op {
        ArithOp::Add => instructions.push(AsmInstruction::Add(result, right)),
        ArithOp::Substract => instructions.push(AsmInstruction::Sub(result, right)),
        ArithOp::Multiply => instructions.push(AsmInstruction::Imul(result, right)),
        ArithOp::Div => {
            instructions.push(AsmInstruction::Mov(Operand::Eax, left));
            instructions.push(AsmInstruction::Cdq);
            instructions.push(AsmInstruction::Idiv(right));
            instructions.push(AsmInstruction::Mov(result, Operand::Eax));
        }
    }
}

fn gen_expression(instructions: &mut AsmInstructions, e: &Expr, ng: &mut NameGenerator) -> Operand {
    match e {
        Expr::Constant(c) => {
            let reg = ng.get_reg();
            instructions.push(AsmInstruction::Mov(reg.clone(), Operand::Imm(*c)));
            reg
        }
        Expr::Var { name, .. } => Operand::Data(name.clone()),
        Expr::Binary { op, lhs, rhs, .. } => {
            let left = gen_expression(instructions, lhs, ng);
            let right = gen_expression(instructions, rhs, ng);
            let result = ng.get_reg();
            gen_arith(instructions, *op, left, right, result.clone());
            result
        }
        // comparisons only feed jumps, the left operand stands in for the result
        Expr::Compare { lhs, rhs, .. } => {
            let left = gen_expression(instructions, lhs, ng);
            let right = gen_expression(instructions, rhs, ng);
            instructions.push(AsmInstruction::Cmp(left.clone(), right));
            left
        }
    }
}

fn gen_condition(instructions: &mut AsmInstructions, condition: &Expr, false_label: &Identifier, ng: &mut NameGenerator) {
    let c = gen_expression(instructions, condition, ng);
    let zero = Operand::Imm(Const::Int(0));
    instructions.push(AsmInstruction::Cmp(c, zero));
    instructions.push(AsmInstruction::Je(false_label.clone()));
}

fn gen_block(instructions: &mut AsmInstructions, block: &Block, ng: &mut NameGenerator) {
    for st in &block.stmts {
        gen_statement(instructions, st, ng);
    }
}

fn gen_call(instructions: &mut AsmInstructions, call: &Call, ng: &mut NameGenerator) {
    let args: Vec<Operand> = call
        .args
        .iter()
        .map(|arg| gen_expression(instructions, arg, ng))
        .collect();
    let argc = args.len();
    for (i, arg) in args.into_iter().enumerate() {
        instructions.push(AsmInstruction::Push(arg, i));
    }
    instructions.push(AsmInstruction::Call(call.name.clone()));
    instructions.push(AsmInstruction::FreeStack(argc * ARG_SLOT_SIZE));
}

fn gen_statement(instructions: &mut AsmInstructions, statement: &Stmt, ng: &mut NameGenerator) {
    match statement {
        Stmt::Declare { name, .. } => {
            instructions.push(AsmInstruction::Comment(format!("declare {name}")));
        }
        Stmt::DeclareAssign { name, init: value, .. } | Stmt::Assign { name, value } => {
            let src = gen_expression(instructions, value, ng);
            instructions.push(AsmInstruction::Mov(Operand::Data(name.clone()), src));
        }
        Stmt::If {
            condition,
            then,
            els: None,
        } => {
            let else_label = ng.get_label();
            gen_condition(instructions, condition, &else_label, ng);
            gen_block(instructions, then, ng);
            instructions.push(AsmInstruction::Label(else_label));
        }
        Stmt::If {
            condition,
            then,
            els: Some(els),
        } => {
            let else_label = ng.get_label();
            let end_label = ng.get_label();
            gen_condition(instructions, condition, &else_label, ng);
            gen_block(instructions, then, ng);
            instructions.push(AsmInstruction::Jmp(end_label.clone()));
            instructions.push(AsmInstruction::Label(else_label));
            gen_block(instructions, els, ng);
            instructions.push(AsmInstruction::Label(end_label));
        }
        Stmt::While { condition, body } => {
            let start_label = ng.get_label();
            let end_label = ng.get_label();
            instructions.push(AsmInstruction::Label(start_label.clone()));
            gen_condition(instructions, condition, &end_label, ng);
            gen_block(instructions, body, ng);
            instructions.push(AsmInstruction::Jmp(start_label));
            instructions.push(AsmInstruction::Label(end_label));
        }
        Stmt::Block(block) => gen_block(instructions, block, ng),
        Stmt::FunDecl(fun) => {
            instructions.push(AsmInstruction::Comment(format!("Function {}", fun.name)));
            instructions.push(AsmInstruction::Label(fun.name.clone()));
            gen_block(instructions, &fun.body, ng);
            // emitted even after an explicit return
            instructions.push(AsmInstruction::Ret);
        }
        Stmt::Call(call) => gen_call(instructions, call, ng),
        Stmt::Return(exp) => {
            let value = gen_expression(instructions, exp, ng);
            instructions.push(AsmInstruction::Mov(Operand::Eax, value));
            instructions.push(AsmInstruction::Ret);
        }
    }
}

/// One storage slot per program-level name, in order of first declaration.
fn collect_data(program: &Program) -> Vec<Identifier> {
    let mut seen = HashSet::new();
    program
        .body
        .iter()
        .filter_map(|st| match st {
            Stmt::Declare { name, .. } | Stmt::DeclareAssign { name, .. } => Some(name),
            _ => None,
        })
        .filter(|name| seen.insert(*name))
        .cloned()
        .collect()
}

pub fn codegen(program: &Program) -> AsmProgram {
    let mut ng = NameGenerator::new();
    let mut text = AsmInstructions::new();
    for st in &program.body {
        gen_statement(&mut text, st, &mut ng);
    }
    log::debug!(
        "generated {} instruction(s) using {} register(s) and {} label(s)",
        text.len(),
        ng.reg_count,
        ng.label_count
    );

    AsmProgram {
        data: collect_data(program),
        text,
    }
}

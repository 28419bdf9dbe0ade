use std::fmt;

pub type Identifier = String;

/// Static type attached to declarations and inferred for expressions.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Type {
    Int,
    Float,
    Bool,
    /// Sentinel for identifiers that could not be resolved.
    Unknown,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Bool => write!(f, "bool"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Param {
    pub name: Identifier,
    pub param_type: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunDecl {
    pub name: Identifier,
    pub return_type: Type,
    pub params: Vec<Param>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: Identifier,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Declare {
        name: Identifier,
        var_type: Type,
    },
    DeclareAssign {
        name: Identifier,
        var_type: Type,
        init: Expr,
    },
    Assign {
        name: Identifier,
        value: Expr,
    },
    If {
        condition: Expr,
        then: Block,
        els: Option<Block>,
    },
    While {
        condition: Expr,
        body: Block,
    },
    Block(Block),
    FunDecl(FunDecl),
    Call(Call),
    Return(Expr),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Const {
    Int(i64),
    Float(f64),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ArithOp {
    Add,
    Substract,
    Multiply,
    Div,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CmpOp {
    LessThan,
    GreaterThan,
    IsEqual,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary {
        op: ArithOp,
        ty: Type,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Compare {
        op: CmpOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Constant(Const),
    Var {
        name: Identifier,
        ty: Type,
    },
}

impl Const {
    pub fn get_type(&self) -> Type {
        match self {
            Self::Int(_) => Type::Int,
            Self::Float(_) => Type::Float,
        }
    }
}

impl Expr {
    /// Arithmetic result type: `float` as soon as one operand is `float`.
    pub fn binary(op: ArithOp, lhs: Expr, rhs: Expr) -> Self {
        let ty = if lhs.get_type() == Type::Float || rhs.get_type() == Type::Float {
            Type::Float
        } else {
            Type::Int
        };
        Self::Binary {
            op,
            ty,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn compare(op: CmpOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Compare {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn var(name: impl Into<Identifier>, ty: Type) -> Self {
        Self::Var {
            name: name.into(),
            ty,
        }
    }

    pub fn get_type(&self) -> Type {
        match self {
            Self::Binary { ty, .. } | Self::Var { ty, .. } => *ty,
            Self::Compare { .. } => Type::Bool,
            Self::Constant(c) => c.get_type(),
        }
    }
}

impl Block {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Substract => write!(f, "-"),
            Self::Multiply => write!(f, "*"),
            Self::Div => write!(f, "/"),
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::LessThan => write!(f, "<"),
            Self::GreaterThan => write!(f, ">"),
            Self::IsEqual => write!(f, "=="),
        }
    }
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.param_type, self.name)
    }
}

// Text tree view: one node per line, `kind(value)`, two spaces per level.

fn write_node(f: &mut fmt::Formatter, depth: usize, kind: &str, value: Option<&dyn fmt::Display>) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match value {
        Some(v) => writeln!(f, "{indent}{kind}({v})"),
        None => writeln!(f, "{indent}{kind}"),
    }
}

fn write_block(f: &mut fmt::Formatter, depth: usize, block: &Block) -> fmt::Result {
    write_node(f, depth, "block", None)?;
    block
        .stmts
        .iter()
        .try_for_each(|st| write_stmt(f, depth + 1, st))
}

fn write_stmt(f: &mut fmt::Formatter, depth: usize, st: &Stmt) -> fmt::Result {
    match st {
        Stmt::Declare { name, var_type } => {
            let label = format!("{var_type} {name}");
            write_node(f, depth, "declare", Some(&label))
        }
        Stmt::DeclareAssign {
            name,
            var_type,
            init,
        } => {
            let label = format!("{var_type} {name}");
            write_node(f, depth, "declare_assign", Some(&label))?;
            write_expr(f, depth + 1, init)
        }
        Stmt::Assign { name, value } => {
            write_node(f, depth, "assign", Some(name))?;
            write_expr(f, depth + 1, value)
        }
        Stmt::If {
            condition,
            then,
            els,
        } => {
            let kind = if els.is_some() { "if_else" } else { "if" };
            write_node(f, depth, kind, None)?;
            write_expr(f, depth + 1, condition)?;
            write_block(f, depth + 1, then)?;
            els.iter().try_for_each(|els| write_block(f, depth + 1, els))
        }
        Stmt::While { condition, body } => {
            write_node(f, depth, "while", None)?;
            write_expr(f, depth + 1, condition)?;
            write_block(f, depth + 1, body)
        }
        Stmt::Block(block) => write_block(f, depth, block),
        Stmt::FunDecl(fun) => {
            write_node(f, depth, "func_decl", Some(&fun.name))?;
            write_node(f, depth + 1, "params", None)?;
            for param in &fun.params {
                write_node(f, depth + 2, "param", Some(param))?;
            }
            write_block(f, depth + 1, &fun.body)
        }
        Stmt::Call(call) => {
            write_node(f, depth, "func_call", Some(&call.name))?;
            call.args
                .iter()
                .try_for_each(|arg| write_expr(f, depth + 1, arg))
        }
        Stmt::Return(exp) => {
            write_node(f, depth, "return", None)?;
            write_expr(f, depth + 1, exp)
        }
    }
}

fn write_expr(f: &mut fmt::Formatter, depth: usize, exp: &Expr) -> fmt::Result {
    match exp {
        Expr::Binary { op, ty, lhs, rhs } => {
            let label = format!("{op} : {ty}");
            write_node(f, depth, "binop", Some(&label))?;
            write_expr(f, depth + 1, lhs)?;
            write_expr(f, depth + 1, rhs)
        }
        Expr::Compare { op, lhs, rhs } => {
            let label = format!("{op} : {}", Type::Bool);
            write_node(f, depth, "cmpop", Some(&label))?;
            write_expr(f, depth + 1, lhs)?;
            write_expr(f, depth + 1, rhs)
        }
        Expr::Constant(c) => {
            let label = format!("{c} : {}", c.get_type());
            write_node(f, depth, "number", Some(&label))
        }
        Expr::Var { name, ty } => {
            let label = format!("{name} : {ty}");
            write_node(f, depth, "id", Some(&label))
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_node(f, 0, "program", None)?;
        self.body.iter().try_for_each(|st| write_stmt(f, 1, st))
    }
}

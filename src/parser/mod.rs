//! Recursive descent parser with precedence climbing for expressions.
//!
//! Parsing and semantic bookkeeping run in a single pass: whenever a construct
//! is complete the matching [Session] operation runs before the next token is
//! looked at. In particular a function header registers its parameters before
//! the body block opens, so the body scope starts with them declared.

mod cursor;
mod parse_error;

use crate::ast::*;
use crate::lexer::{LinedToken, Token};
use crate::session::Session;
use cursor::Cursor;
pub use parse_error::{InnerParseError, ParseError, Result};

#[allow(clippy::match_same_arms)]
fn get_prec(token: &Token) -> u64 {
    match token {
        Token::Asterisk => 50,
        Token::FSlash => 50,
        Token::Plus => 45,
        Token::Hyphen => 45,
        Token::IsLessThan => 35,
        Token::IsGreaterThan => 35,
        Token::IsEqual => 35,
        _ => 0,
    }
}

enum BinaryOp {
    Arith(ArithOp),
    Cmp(CmpOp),
}

impl TryFrom<&Token> for BinaryOp {
    type Error = InnerParseError;
    fn try_from(value: &Token) -> std::result::Result<Self, InnerParseError> {
        match value {
            Token::Plus => Ok(Self::Arith(ArithOp::Add)),
            Token::Hyphen => Ok(Self::Arith(ArithOp::Substract)),
            Token::Asterisk => Ok(Self::Arith(ArithOp::Multiply)),
            Token::FSlash => Ok(Self::Arith(ArithOp::Div)),
            Token::IsLessThan => Ok(Self::Cmp(CmpOp::LessThan)),
            Token::IsGreaterThan => Ok(Self::Cmp(CmpOp::GreaterThan)),
            Token::IsEqual => Ok(Self::Cmp(CmpOp::IsEqual)),
            _ => Err(InnerParseError::UnexpectedToken(value.clone())),
        }
    }
}

fn unexpected(cursor: &Cursor) -> ParseError {
    let line = cursor.get_line();
    match cursor.peek() {
        Some(t) => InnerParseError::UnexpectedToken(t.clone()).set_line(line),
        None => InnerParseError::UnexpectedEof.set_line(line),
    }
}

fn parse_identifier(cursor: &mut Cursor) -> Result<(Identifier, u64)> {
    let line = cursor.get_line();
    let next = cursor.next_or_error()?;
    if let Token::Identifier(name) = next {
        Ok((name.to_owned(), line))
    } else {
        Err(InnerParseError::ExpectedIdentifierButGot(next.clone()).set_line(line))
    }
}

fn parse_type_specifier(cursor: &mut Cursor) -> Result<Type> {
    let line = cursor.get_line();
    match cursor.next_or_error()? {
        Token::Int => Ok(Type::Int),
        Token::Float => Ok(Type::Float),
        t => Err(InnerParseError::ExpectedTypeButGot(t.clone()).set_line(line)),
    }
}

fn parse_params(cursor: &mut Cursor) -> Result<Vec<Param>> {
    let mut params = Vec::new();
    if cursor.peek_is(&Token::CloseParanth) {
        return Ok(params);
    }

    loop {
        let param_type = parse_type_specifier(cursor)?;
        let (name, _) = parse_identifier(cursor)?;
        params.push(Param { name, param_type });
        if !cursor.bump_if(&Token::Comma) {
            break;
        }
    }

    Ok(params)
}

fn parse_arguments(cursor: &mut Cursor, session: &mut Session) -> Result<Vec<Expr>> {
    let mut args = Vec::new();
    if cursor.peek_is(&Token::CloseParanth) {
        return Ok(args);
    }

    loop {
        let exp = parse_exp(cursor, session, 0)?;
        args.push(exp);
        if !cursor.bump_if(&Token::Comma) {
            break;
        }
    }

    Ok(args)
}

fn parse_exp_binary(cursor: &mut Cursor, session: &mut Session, prec: u64, left: Expr) -> Result<Expr> {
    let line = cursor.get_line();
    let next = cursor.next_or_error()?;
    let op = BinaryOp::try_from(next).map_err(|err| err.set_line(line))?;
    let right = parse_exp(cursor, session, prec + 1)?;
    let exp = match op {
        BinaryOp::Arith(op) => Expr::binary(op, left, right),
        BinaryOp::Cmp(op) => Expr::compare(op, left, right),
    };
    Ok(exp)
}

fn parse_exp(cursor: &mut Cursor, session: &mut Session, min_prec: u64) -> Result<Expr> {
    let mut left = parse_factor(cursor, session)?;

    while let Some(next_token) = cursor.peek().filter(|t| t.is_binaryop()) {
        let prec = get_prec(next_token);
        if prec < min_prec {
            break;
        }
        left = parse_exp_binary(cursor, session, prec, left)?;
    }

    Ok(left)
}

fn parse_factor_subexp(cursor: &mut Cursor, session: &mut Session) -> Result<Expr> {
    cursor.expect(&Token::OpenParanth)?;
    let exp = parse_exp(cursor, session, 0)?;
    cursor.expect(&Token::CloseParanth)?;
    Ok(exp)
}

fn parse_factor(cursor: &mut Cursor, session: &mut Session) -> Result<Expr> {
    let peek = cursor.peek_or_error()?;
    match peek {
        Token::Identifier(_) => {
            let (name, line) = parse_identifier(cursor)?;
            let ty = session.get_var_type(&name, line);
            Ok(Expr::var(name, ty))
        }
        Token::OpenParanth => parse_factor_subexp(cursor, session),
        Token::IntConst(i) => {
            let constant = Expr::Constant(Const::Int(*i));
            cursor.bump();
            Ok(constant)
        }
        Token::FloatConst(f) => {
            let constant = Expr::Constant(Const::Float(*f));
            cursor.bump();
            Ok(constant)
        }
        _ => {
            let peek = peek.clone();
            let line = cursor.get_line();
            Err(InnerParseError::BadFactor(peek).set_line(line))
        }
    }
}

/// Rest of `type name` once the name is read: `= exp` or nothing.
fn parse_var_declaration(
    cursor: &mut Cursor,
    session: &mut Session,
    var_type: Type,
    name: Identifier,
    line: u64,
) -> Result<Stmt> {
    if cursor.bump_if(&Token::Assign) {
        let init = parse_exp(cursor, session, 0)?;
        session.declare_var(name.clone(), var_type);
        session.assign_var(&name, line);
        return Ok(Stmt::DeclareAssign {
            name,
            var_type,
            init,
        });
    }

    session.declare_var(name.clone(), var_type);
    Ok(Stmt::Declare { name, var_type })
}

fn parse_fun_declaration(
    cursor: &mut Cursor,
    session: &mut Session,
    return_type: Type,
    name: Identifier,
) -> Result<Stmt> {
    cursor.expect(&Token::OpenParanth)?;
    let params = parse_params(cursor)?;
    cursor.expect(&Token::CloseParanth)?;

    // consumed by the scope the body block opens
    session.declare_func(name.clone(), return_type, params.clone());
    let body = parse_block(cursor, session)?;

    Ok(Stmt::FunDecl(FunDecl {
        name,
        return_type,
        params,
        body,
    }))
}

fn parse_declaration(cursor: &mut Cursor, session: &mut Session) -> Result<Stmt> {
    let var_type = parse_type_specifier(cursor)?;
    let (name, line) = parse_identifier(cursor)?;

    if cursor.peek_is(&Token::OpenParanth) {
        return parse_fun_declaration(cursor, session, var_type, name);
    }

    let declaration = parse_var_declaration(cursor, session, var_type, name, line)?;
    cursor.expect(&Token::Semicolon)?;
    Ok(declaration)
}

/// `name = exp` or `name(args)`, without the trailing separator.
fn parse_assign_or_call(cursor: &mut Cursor, session: &mut Session) -> Result<Stmt> {
    let (name, line) = parse_identifier(cursor)?;
    match cursor.peek() {
        Some(Token::Assign) => {
            cursor.bump();
            let value = parse_exp(cursor, session, 0)?;
            session.assign_var(&name, line);
            Ok(Stmt::Assign { name, value })
        }
        Some(Token::OpenParanth) => {
            cursor.bump();
            let args = parse_arguments(cursor, session)?;
            cursor.expect(&Token::CloseParanth)?;
            session.call_func(&name, &args, line);
            Ok(Stmt::Call(Call { name, args }))
        }
        _ => Err(unexpected(cursor)),
    }
}

/// Statements allowed in the header of a `for` loop.
fn parse_simple_statement(cursor: &mut Cursor, session: &mut Session) -> Result<Stmt> {
    match cursor.peek_or_error()? {
        t if t.is_type_specifier() => {
            let var_type = parse_type_specifier(cursor)?;
            let (name, line) = parse_identifier(cursor)?;
            parse_var_declaration(cursor, session, var_type, name, line)
        }
        Token::Identifier(_) => parse_assign_or_call(cursor, session),
        _ => Err(unexpected(cursor)),
    }
}

fn parse_return(cursor: &mut Cursor, session: &mut Session) -> Result<Stmt> {
    cursor.expect(&Token::Return)?;
    let exp = parse_exp(cursor, session, 0)?;
    cursor.expect(&Token::Semicolon)?;
    Ok(Stmt::Return(exp))
}

fn parse_condition(cursor: &mut Cursor, session: &mut Session) -> Result<Expr> {
    cursor.expect(&Token::OpenParanth)?;
    let condition = parse_exp(cursor, session, 0)?;
    cursor.expect(&Token::CloseParanth)?;
    Ok(condition)
}

fn parse_if(cursor: &mut Cursor, session: &mut Session) -> Result<Stmt> {
    cursor.expect(&Token::If)?;
    let condition = parse_condition(cursor, session)?;
    let then = parse_block(cursor, session)?;
    let els = cursor
        .bump_if(&Token::Else)
        .then(|| parse_block(cursor, session))
        .transpose()?;

    Ok(Stmt::If {
        condition,
        then,
        els,
    })
}

fn parse_while(cursor: &mut Cursor, session: &mut Session) -> Result<Stmt> {
    cursor.expect(&Token::While)?;
    let condition = parse_condition(cursor, session)?;
    let body = parse_block(cursor, session)?;
    Ok(Stmt::While { condition, body })
}

/// `for (init; cond; post) { body }` becomes
/// `{ init; while (cond) { body; post; } }`.
fn parse_for(cursor: &mut Cursor, session: &mut Session) -> Result<Stmt> {
    cursor.expect(&Token::For)?;
    cursor.expect(&Token::OpenParanth)?;
    session.begin_scope();
    let init = parse_simple_statement(cursor, session)?;
    cursor.expect(&Token::Semicolon)?;
    let condition = parse_exp(cursor, session, 0)?;
    cursor.expect(&Token::Semicolon)?;
    let post = parse_simple_statement(cursor, session)?;
    cursor.expect(&Token::CloseParanth)?;
    let mut body = parse_block(cursor, session)?;
    session.end_scope();

    body.stmts.push(post);
    let while_st = Stmt::While { condition, body };
    Ok(Stmt::Block(Block::new(vec![init, while_st])))
}

fn parse_statement(cursor: &mut Cursor, session: &mut Session) -> Result<Stmt> {
    let peek = cursor.peek_or_error()?;
    match peek {
        t if t.is_type_specifier() => parse_declaration(cursor, session),
        Token::Identifier(_) => {
            let st = parse_assign_or_call(cursor, session)?;
            cursor.expect(&Token::Semicolon)?;
            Ok(st)
        }
        Token::Return => parse_return(cursor, session),
        Token::If => parse_if(cursor, session),
        Token::While => parse_while(cursor, session),
        Token::For => parse_for(cursor, session),
        _ => Err(unexpected(cursor)),
    }
}

fn parse_block(cursor: &mut Cursor, session: &mut Session) -> Result<Block> {
    let mut stmts = Vec::new();

    cursor.expect(&Token::OpenCurly)?;
    session.begin_scope();

    while !cursor.bump_if(&Token::CloseCurly) {
        let st = parse_statement(cursor, session)?;
        stmts.push(st);
    }

    session.end_scope();
    Ok(Block { stmts })
}

pub fn parse(tokens: &[LinedToken], session: &mut Session) -> Result<Program> {
    let mut body = Vec::new();
    let mut cursor = Cursor::new(tokens);

    while !cursor.at_end() {
        let st = parse_statement(&mut cursor, session)?;
        body.push(st);
    }

    log::debug!("parsed {} top-level statement(s)", body.len());
    Ok(Program { body })
}

use super::*;
use crate::ast::{ArithOp, Const, Expr, Param, Type};

fn param(name: &str, param_type: Type) -> Param {
    Param {
        name: name.into(),
        param_type,
    }
}

fn two_int_params() -> Vec<Param> {
    vec![param("a", Type::Int), param("b", Type::Int)]
}

fn types_of(args: &[Expr]) -> Vec<Type> {
    args.iter().map(Expr::get_type).collect()
}

#[test]
fn test_global_scope_is_never_popped() {
    let mut table = SymbolTable::new();
    table.declare_var("g".into(), Type::Int);
    table.end_scope();
    table.end_scope();
    assert_eq!(table.depth(), 1);
    assert_eq!(table.get_var_type("g"), Ok(Type::Int));
}

#[test]
fn test_shadowing_and_scope_lifetime() {
    let mut table = SymbolTable::new();
    table.declare_var("x".into(), Type::Int);
    table.begin_scope();
    table.declare_var("x".into(), Type::Float);
    table.declare_var("inner".into(), Type::Int);
    assert_eq!(table.get_var_type("x"), Ok(Type::Float));
    table.end_scope();
    assert_eq!(table.get_var_type("x"), Ok(Type::Int));
    assert_eq!(
        table.get_var_type("inner"),
        Err(SemAnalysisError::VariableNotDeclared("inner".into()))
    );
}

#[test]
fn test_redeclaration_first_wins() {
    let mut table = SymbolTable::new();
    table.declare_var("x".into(), Type::Int);
    table.declare_var("x".into(), Type::Float);
    assert_eq!(table.get_var_type("x"), Ok(Type::Int));
}

#[test]
fn test_assign_marks_initialized() {
    let mut table = SymbolTable::new();
    table.declare_var("x".into(), Type::Int);
    assert!(!table.is_initialized("x"));
    table.begin_scope();
    assert_eq!(table.assign_var("x"), Ok(()));
    table.end_scope();
    assert!(table.is_initialized("x"));
}

#[test]
fn test_assign_undeclared() {
    let mut table = SymbolTable::new();
    let err = table.assign_var("y").unwrap_err();
    assert_eq!(err.to_string(), "Variable 'y' used before declaration");
    assert_eq!(err.fix(), "Declare variable 'y' before use");
}

#[test]
fn test_pending_params_seed_next_scope_only() {
    let mut table = SymbolTable::new();
    table.declare_func("f".into(), Type::Int, two_int_params());
    assert!(table.has_pending_params());
    assert!(!table.is_declared("a"));

    table.begin_scope();
    assert!(!table.has_pending_params());
    assert!(table.in_param_scope());
    assert_eq!(table.get_var_type("a"), Ok(Type::Int));
    assert_eq!(table.get_var_type("b"), Ok(Type::Int));

    table.begin_scope();
    assert!(!table.in_param_scope());
    assert!(!table.is_declared("c"));
    table.end_scope();
    assert!(!table.in_param_scope());
    table.end_scope();

    assert!(!table.is_declared("a"));
    table.begin_scope();
    assert!(!table.is_declared("a"));
}

#[test]
fn test_empty_param_list_opens_plain_scope() {
    let mut table = SymbolTable::new();
    table.declare_func("main".into(), Type::Int, vec![]);
    assert!(table.has_pending_params());
    table.begin_scope();
    assert!(!table.has_pending_params());
    assert!(!table.in_param_scope());
    assert_eq!(table.arity("main"), Some(0));
}

#[test]
fn test_function_redeclaration_last_wins() {
    let mut table = SymbolTable::new();
    table.declare_func("f".into(), Type::Int, two_int_params());
    table.declare_func("f".into(), Type::Float, vec![param("x", Type::Float)]);
    let signature = table.function("f").unwrap();
    assert_eq!(signature.return_type, Type::Float);
    assert_eq!(signature.params, vec![param("x", Type::Float)]);
}

#[test]
fn test_call_undeclared_function() {
    let table = SymbolTable::new();
    let errors = table.call_func("g", &[]);
    assert_eq!(errors, vec![SemAnalysisError::UndeclaredFunction("g".into())]);
    assert_eq!(errors[0].fix(), "Define 'g()' before calling it.");
}

#[test]
fn test_call_count_mismatch_skips_type_checks() {
    let mut table = SymbolTable::new();
    table.declare_func("f".into(), Type::Int, two_int_params());
    let args = [Expr::Constant(Const::Float(1.5))];
    let errors = table.call_func("f", &types_of(&args));
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "Function 'f' called with 1 argument(s), but expected 2"
    );
    assert_eq!(
        errors[0].fix(),
        "Call 'f' with 2 argument(s), like: f(val, val)"
    );
}

#[test]
fn test_call_reports_every_mismatching_argument() {
    let mut table = SymbolTable::new();
    table.declare_func(
        "f".into(),
        Type::Int,
        vec![param("a", Type::Int), param("b", Type::Int), param("c", Type::Float)],
    );
    let args = [
        Expr::Constant(Const::Float(1.0)),
        Expr::binary(
            ArithOp::Add,
            Expr::var("x", Type::Float),
            Expr::Constant(Const::Int(1)),
        ),
        Expr::Constant(Const::Float(2.0)),
    ];
    let errors = table.call_func("f", &types_of(&args));
    let positions: Vec<String> = errors.iter().map(ToString::to_string).collect();
    assert_eq!(
        positions,
        vec![
            "Argument 1 of function 'f' expected type 'int', but got 'float'",
            "Argument 2 of function 'f' expected type 'int', but got 'float'",
        ]
    );
}

#[test]
fn test_call_with_unknown_argument() {
    let mut table = SymbolTable::new();
    table.declare_func("f".into(), Type::Int, vec![param("a", Type::Int)]);
    let errors = table.call_func("f", &[Type::Unknown]);
    assert_eq!(
        errors,
        vec![SemAnalysisError::ArgumentTypeMismatch {
            name: "f".into(),
            position: 1,
            expected: Type::Int,
            got: Type::Unknown,
        }]
    );
}

#[test]
fn test_reset() {
    let mut table = SymbolTable::new();
    table.declare_var("x".into(), Type::Int);
    table.declare_func("f".into(), Type::Int, two_int_params());
    table.begin_scope();
    table.begin_scope();
    table.declare_func("g".into(), Type::Int, two_int_params());
    table.reset();
    assert_eq!(table.depth(), 1);
    assert!(!table.is_declared("x"));
    assert!(table.function("f").is_none());
    assert!(!table.has_pending_params());
    assert!(!table.in_param_scope());
}

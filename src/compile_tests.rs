use super::*;
use crate::ast::{Stmt, Type};
use crate::diagnostics::DiagnosticKind;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn compile_default(source: &str) -> Compilation {
    init_logger();
    compile(source, &CompileOptions::default())
}

const SAMPLE: &str = "\
int count = 0;
float ratio = 1.5;
int add(int a, int b) {
  return a + b;
}
for (int i = 0; i < 4; i = i + 1) {
  count = count + i;
}
if (count > 3) {
  ratio = ratio * 2;
} else {
  ratio = ratio / 2;
}
add(count, 2);
";

#[test]
fn test_clean_program() {
    let compilation = compile_default(SAMPLE);
    assert!(compilation.is_clean(), "{}", compilation.diagnostics);
    let asm = compilation.asm.unwrap();
    assert_eq!(asm.data, vec!["count".to_string(), "ratio".to_string()]);
    let listing = asm.to_string();
    assert!(listing.starts_with("section .data\ncount db 0\nratio db 0\nsection .text\n"));
    assert!(listing.contains("; Function add\nadd:\n"));
    assert!(listing.contains("call add\nadd esp, 8\n"));
}

#[test]
fn test_compilation_is_deterministic() {
    let source = "int x = 5;\ny = x + 1.0;\n@ @\ng(x);";
    let first = compile_default(source);
    let second = compile_default(source);
    assert_eq!(first.diagnostics, second.diagnostics);
    assert_eq!(first.asm, second.asm);
    assert_eq!(first.ast, second.ast);
    assert_eq!(
        first.asm.map(|asm| asm.to_string()),
        second.asm.map(|asm| asm.to_string())
    );
}

#[test]
fn test_diagnostics_do_not_stop_compilation() {
    let source = "int x = 5;\ny = x + 1.0;\n@ @\nint z = x; z = @ 1;";
    let compilation = compile_default(source);
    assert!(compilation.ast.is_ok());
    assert!(compilation.asm.is_some());

    let lines: Vec<_> = compilation
        .diagnostics
        .iter()
        .map(|d| (d.line, d.kind))
        .collect();
    // the whole text is tokenized before parsing starts
    assert_eq!(
        lines,
        vec![
            (3, DiagnosticKind::Syntax),
            (4, DiagnosticKind::Syntax),
            (2, DiagnosticKind::Semantic),
        ]
    );
}

#[test]
fn test_parse_failure_keeps_tokens_and_diagnostics() {
    let compilation = compile_default("int a = 1 $;\nint b = ;");
    assert!(compilation.asm.is_none());
    assert!(!compilation.tokens.is_empty());
    assert!(!compilation.is_clean());
    let err = compilation.ast.unwrap_err();
    assert_eq!(err.get_ln(), 2);
    assert_eq!(compilation.diagnostics.len(), 1);
}

#[test]
fn test_out_of_range_literal_keeps_parsing() {
    let compilation = compile_default("int x = 99999999999999999999;\nint y = x;");
    assert!(compilation.ast.is_ok());
    assert_eq!(compilation.diagnostics.len(), 1);
    assert_eq!(compilation.asm.unwrap().data, vec!["x".to_string(), "y".to_string()]);
}

#[test]
fn test_tree_view() {
    let compilation = compile_default("int x = 1 + 2;");
    let tree = compilation.ast.unwrap().to_string();
    assert_eq!(
        tree,
        "program\n  declare_assign(int x)\n    binop(+ : int)\n      number(1 : int)\n      number(2 : int)\n"
    );
}

#[test]
fn test_assume_int_params_option() {
    init_logger();
    let source = "int f(int a) {\n  return missing;\n}";
    let lenient_options = CompileOptions {
        assume_int_params: true,
    };
    let strict = compile(source, &CompileOptions::default());
    let lenient = compile(source, &lenient_options);
    assert_eq!(strict.diagnostics.len(), 1);
    assert!(lenient.diagnostics.is_empty());

    let ast = lenient.ast.unwrap();
    let Stmt::FunDecl(fun) = &ast.body[0] else {
        panic!("expected func_decl");
    };
    let Stmt::Return(value) = &fun.body.stmts[0] else {
        panic!("expected return");
    };
    assert_eq!(value.get_type(), Type::Int);

    // without parameters the body is an ordinary scope
    let no_params = compile("int g() {\n  return missing;\n}", &lenient_options);
    assert_eq!(no_params.diagnostics.len(), 1);
}

#[test]
fn test_parallel_compilations_are_independent() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let source = format!("int v{i} = {i};\nw = v{i};");
                compile(&source, &CompileOptions::default())
            })
        })
        .collect();
    for handle in handles {
        let compilation = handle.join().unwrap();
        assert_eq!(compilation.diagnostics.len(), 1);
    }
}

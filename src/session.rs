//! Per-run compilation context.
//!
//! A [Session] owns every piece of mutable state the front end touches: the
//! diagnostics sink, the scope stack with its function table, and the options.
//! One session is built for one source text and dropped afterwards, so separate
//! compilations never observe each other.

use crate::ast::{Expr, Identifier, Param, Type};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::semantic_analysis::{SemAnalysisError, SymbolTable};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct CompileOptions {
    /// Resolve unknown identifiers met directly inside a function body to `int`
    /// instead of reporting them.
    pub assume_int_params: bool,
}

#[derive(Debug, Default)]
pub struct Session {
    pub diagnostics: Diagnostics,
    pub symbols: SymbolTable,
    options: CompileOptions,
}

impl Session {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            diagnostics: Diagnostics::new(),
            symbols: SymbolTable::new(),
            options,
        }
    }

    pub fn report(&mut self, line: u64, err: &SemAnalysisError) {
        let fix = err.fix();
        self.diagnostics
            .record(Diagnostic::semantic(line, err.to_string(), fix));
    }

    pub fn begin_scope(&mut self) {
        self.symbols.begin_scope();
    }

    pub fn end_scope(&mut self) {
        self.symbols.end_scope();
    }

    pub fn declare_var(&mut self, name: Identifier, var_type: Type) {
        self.symbols.declare_var(name, var_type);
    }

    pub fn assign_var(&mut self, name: &str, line: u64) {
        if let Err(err) = self.symbols.assign_var(name) {
            self.report(line, &err);
        }
    }

    /// Declared type of `name`, or [Type::Unknown] after reporting it.
    pub fn get_var_type(&mut self, name: &str, line: u64) -> Type {
        match self.symbols.get_var_type(name) {
            Ok(var_type) => var_type,
            Err(_) if self.options.assume_int_params && self.symbols.in_param_scope() => {
                log::warn!("line {line}: '{name}' is not declared, assuming int");
                Type::Int
            }
            Err(err) => {
                self.report(line, &err);
                Type::Unknown
            }
        }
    }

    pub fn declare_func(&mut self, name: Identifier, return_type: Type, params: Vec<Param>) {
        self.symbols.declare_func(name, return_type, params);
    }

    /// Identifier arguments are looked up again at the call line once the
    /// callee and its arity check out; other arguments keep their inferred type.
    pub fn call_func(&mut self, name: &str, args: &[Expr], line: u64) {
        let arg_types: Vec<Type> = if self.symbols.arity(name) == Some(args.len()) {
            args.iter()
                .map(|arg| match arg {
                    Expr::Var { name, .. } => self.get_var_type(name, line),
                    _ => arg.get_type(),
                })
                .collect()
        } else {
            args.iter().map(Expr::get_type).collect()
        };

        for err in self.symbols.call_func(name, &arg_types) {
            self.report(line, &err);
        }
    }
}

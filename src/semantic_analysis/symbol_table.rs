use crate::ast::{Identifier, Param, Type};
use crate::semantic_analysis::{Result, SemAnalysisError};

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct VarEntry {
    pub var_type: Type,
    pub initialized: bool,
}

pub type Scope = HashMap<Identifier, VarEntry>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FunSignature {
    pub return_type: Type,
    pub params: Vec<Param>,
}

/// Scope stack, global function table and the parameter hand-off between a
/// function header and the scope of its body.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    // never empty: index 0 is the global scope
    scopes: Vec<Scope>,
    functions: HashMap<Identifier, FunSignature>,
    pending_params: Option<Vec<Param>>,
    in_param_scope: bool,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new()],
            functions: HashMap::new(),
            pending_params: None,
            in_param_scope: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn begin_scope(&mut self) {
        self.scopes.push(Scope::new());
        let params = self.pending_params.take().unwrap_or_default();
        log::trace!("scope {} opened with {} parameter(s)", self.depth(), params.len());
        // an empty parameter list opens an ordinary scope
        self.in_param_scope = !params.is_empty();
        for param in params {
            self.declare_var(param.name, param.param_type);
        }
    }

    pub fn end_scope(&mut self) {
        if self.scopes.len() > 1 {
            log::trace!("scope {} closed", self.depth());
            self.scopes.pop();
        }
        self.in_param_scope = false;
    }

    /// First declaration in a scope wins; redeclaring there is a no-op.
    pub fn declare_var(&mut self, name: Identifier, var_type: Type) {
        let entry = VarEntry {
            var_type,
            initialized: false,
        };
        if let Some(innermost) = self.scopes.last_mut() {
            innermost.entry(name).or_insert(entry);
        }
    }

    pub fn assign_var(&mut self, name: &str) -> Result<()> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(name))
            .map(|entry| entry.initialized = true)
            .ok_or_else(|| SemAnalysisError::UsedBeforeDeclaration(name.to_owned()))
    }

    pub fn get_var_type(&self, name: &str) -> Result<Type> {
        self.lookup(name)
            .map(|entry| entry.var_type)
            .ok_or_else(|| SemAnalysisError::VariableNotDeclared(name.to_owned()))
    }

    pub fn declare_func(&mut self, name: Identifier, return_type: Type, params: Vec<Param>) {
        log::trace!("function {name} declared with {} parameter(s)", params.len());
        self.pending_params = Some(params.clone());
        let signature = FunSignature {
            return_type,
            params,
        };
        self.functions.insert(name, signature);
    }

    /// Checks a call against the declared signature, given the static type of
    /// every argument. A count mismatch stops the checks; otherwise every
    /// mismatching position is reported.
    pub fn call_func(&self, name: &str, arg_types: &[Type]) -> Vec<SemAnalysisError> {
        let Some(signature) = self.functions.get(name) else {
            return vec![SemAnalysisError::UndeclaredFunction(name.to_owned())];
        };

        if arg_types.len() != signature.params.len() {
            return vec![SemAnalysisError::ExpectedArgsCountButGot {
                name: name.to_owned(),
                expected: signature.params.len(),
                got: arg_types.len(),
            }];
        }

        arg_types
            .iter()
            .zip(&signature.params)
            .enumerate()
            .filter(|(_, (got, param))| **got != param.param_type)
            .map(|(i, (got, param))| SemAnalysisError::ArgumentTypeMismatch {
                name: name.to_owned(),
                position: i + 1,
                expected: param.param_type,
                got: *got,
            })
            .collect()
    }

    /// Number of parameters `name` was declared with.
    pub fn arity(&self, name: &str) -> Option<usize> {
        self.functions.get(name).map(|signature| signature.params.len())
    }

    pub fn lookup(&self, name: &str) -> Option<&VarEntry> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn is_initialized(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(|entry| entry.initialized)
    }

    pub fn function(&self, name: &str) -> Option<&FunSignature> {
        self.functions.get(name)
    }

    pub fn has_pending_params(&self) -> bool {
        self.pending_params.is_some()
    }

    /// True while directly inside the scope seeded with a function's parameters.
    pub fn in_param_scope(&self) -> bool {
        self.in_param_scope
    }

    /// Number of open scopes, the global one included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

mod semanalysis_error;
#[cfg(test)]
mod semantic_tests;
mod symbol_table;

pub use semanalysis_error::{Result, SemAnalysisError};
pub use symbol_table::{FunSignature, Scope, SymbolTable, VarEntry};

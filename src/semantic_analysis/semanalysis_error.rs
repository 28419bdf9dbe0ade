use crate::ast::{Identifier, Type};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SemAnalysisError>;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SemAnalysisError {
    #[error("Variable '{0}' used before declaration")]
    UsedBeforeDeclaration(Identifier),
    #[error("Variable '{0}' is undeclared")]
    VariableNotDeclared(Identifier),
    #[error("Function '{0}' not declared")]
    UndeclaredFunction(Identifier),
    #[error("Function '{name}' called with {got} argument(s), but expected {expected}")]
    ExpectedArgsCountButGot {
        name: Identifier,
        expected: usize,
        got: usize,
    },
    #[error("Argument {position} of function '{name}' expected type '{expected}', but got '{got}'")]
    ArgumentTypeMismatch {
        name: Identifier,
        position: usize,
        expected: Type,
        got: Type,
    },
}

impl SemAnalysisError {
    /// Suggested fix shown next to the message in the diagnostics table.
    pub fn fix(&self) -> String {
        match self {
            Self::UsedBeforeDeclaration(name) | Self::VariableNotDeclared(name) => {
                format!("Declare variable '{name}' before use")
            }
            Self::UndeclaredFunction(name) => format!("Define '{name}()' before calling it."),
            Self::ExpectedArgsCountButGot { name, expected, .. } => {
                let vals = vec!["val"; *expected].join(", ");
                format!("Call '{name}' with {expected} argument(s), like: {name}({vals})")
            }
            Self::ArgumentTypeMismatch {
                position, expected, ..
            } => format!("Make sure argument {position} is of type '{expected}'"),
        }
    }
}

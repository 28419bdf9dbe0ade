#![deny(unused_must_use)]
#![warn(clippy::pedantic)]
#![allow(clippy::wildcard_imports)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod ast;
#[cfg(feature = "codegen")]
pub mod codegen;
pub mod diagnostics;
#[cfg(feature = "emission")]
pub mod emission;
#[cfg(feature = "lexer")]
pub mod lexer;
#[cfg(feature = "parser")]
pub mod parser;
#[cfg(feature = "semantic_analysis")]
pub mod semantic_analysis;
#[cfg(feature = "semantic_analysis")]
pub mod session;

#[cfg(all(test, feature = "emission"))]
mod compile_tests;

#[cfg(feature = "codegen")]
pub use session::CompileOptions;

/// Everything one run of the pipeline produced.
#[cfg(feature = "codegen")]
#[derive(Debug)]
pub struct Compilation {
    pub tokens: lexer::Tokens,
    pub ast: parser::Result<ast::Program>,
    /// Present only when parsing succeeded.
    pub asm: Option<codegen::AsmProgram>,
    pub diagnostics: diagnostics::Diagnostics,
}

#[cfg(feature = "codegen")]
impl Compilation {
    pub fn is_clean(&self) -> bool {
        self.ast.is_ok() && self.diagnostics.is_empty()
    }
}

/// Runs lexing, parsing with inline checks and code generation over `source`.
///
/// Every call starts from a fresh [`session::Session`], so results only depend
/// on the source text and `options`.
#[cfg(feature = "codegen")]
pub fn compile(source: &str, options: &CompileOptions) -> Compilation {
    let mut session = session::Session::new(*options);
    let tokens = lexer::lex(source, &mut session.diagnostics);
    let ast = parser::parse(&tokens, &mut session);
    let asm = ast.as_ref().ok().map(codegen::codegen);

    if let Err(e) = &ast {
        log::debug!("parse failed: {e}");
    }
    log::debug!("compilation finished with {} diagnostic(s)", session.diagnostics.len());

    Compilation {
        tokens,
        ast,
        asm,
        diagnostics: session.diagnostics,
    }
}

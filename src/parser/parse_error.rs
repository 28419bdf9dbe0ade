use crate::lexer::Token;
use std::fmt::{Display, Formatter};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InnerParseError {
    #[error("syntax error at token '{1}', expected '{0}'")]
    ExpectedButGot(Token, Token),
    #[error("syntax error at token '{0}', expected identifier")]
    ExpectedIdentifierButGot(Token),
    #[error("syntax error at token '{0}', expected type specifier")]
    ExpectedTypeButGot(Token),
    #[error("syntax error at token '{0}'")]
    UnexpectedToken(Token),
    #[error("syntax error at token '{0}', expected expression")]
    BadFactor(Token),
    #[error("syntax error at EOF")]
    UnexpectedEof,
}

/// Fatal parse failure: the offending token and the line it sits on.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub inner: InnerParseError,
    pub ln: u64,
}

impl ParseError {
    pub fn get_ln(&self) -> u64 {
        self.ln
    }
}

impl InnerParseError {
    pub fn set_line(self, ln: u64) -> ParseError {
        ParseError { inner: self, ln }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (line {})", self.inner, self.ln)
    }
}

impl std::error::Error for ParseError {}

use crate::lexer::{LinedToken, Token};
use crate::parser::{InnerParseError, Result};

#[derive(Debug)]
pub struct Cursor<'a> {
    tokens: &'a [LinedToken],
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [LinedToken]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position).map(LinedToken::get_inner)
    }

    pub fn bump(&mut self) {
        self.position += 1;
    }

    pub fn bump_if(&mut self, t: &Token) -> bool {
        let condition = self.peek() == Some(t);
        if condition {
            self.bump();
        }
        condition
    }

    pub fn peek_is(&self, t: &Token) -> bool {
        self.peek() == Some(t)
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Line of the next token; at the end of input, line of the last one.
    pub fn get_line(&self) -> u64 {
        self.tokens
            .get(self.position)
            .or_else(|| self.tokens.last())
            .map_or(1, LinedToken::get_line)
    }

    pub fn expect(&mut self, t: &Token) -> Result<()> {
        let line = self.get_line();
        let next = self.next_or_error()?;
        if next == t {
            Ok(())
        } else {
            let next = next.clone();
            Err(InnerParseError::ExpectedButGot(t.clone(), next).set_line(line))
        }
    }

    pub fn peek_or_error(&self) -> Result<&Token> {
        self.peek()
            .ok_or_else(|| InnerParseError::UnexpectedEof.set_line(self.get_line()))
    }

    pub fn next_or_error(&mut self) -> Result<&Token> {
        let line = self.get_line();
        let next = self
            .tokens
            .get(self.position)
            .ok_or_else(|| InnerParseError::UnexpectedEof.set_line(line))?;
        self.position += 1;
        Ok(next.get_inner())
    }
}

mod cursor;
mod token;

use crate::diagnostics::{Diagnostic, Diagnostics};
use cursor::Cursor;
use std::collections::HashSet;

pub use token::{LinedToken, Token};

pub type Tokens = Vec<LinedToken>;

/// Forward-only token stream over one source text.
///
/// Characters that start no token are reported once per `(line, char)` pair and
/// skipped; the stream itself never fails.
pub struct Lexer<'s, 'd> {
    cursor: Cursor<'s>,
    ln: u64,
    seen_invalid: HashSet<(u64, char)>,
    diagnostics: &'d mut Diagnostics,
}

impl<'s, 'd> Lexer<'s, 'd> {
    pub fn new(source: &'s str, diagnostics: &'d mut Diagnostics) -> Self {
        Self {
            cursor: Cursor::new(source),
            ln: 1,
            seen_invalid: HashSet::new(),
            diagnostics,
        }
    }

    pub fn get_line(&self) -> u64 {
        self.ln
    }

    fn skip_whitespaces(&mut self) {
        while let Some(c) = self
            .cursor
            .peek()
            .filter(|&c| matches!(c, ' ' | '\t' | '\r' | '\n'))
        {
            if c == '\n' {
                self.ln += 1;
            }
            self.cursor.take();
        }
    }

    fn report_invalid_char(&mut self, c: char) {
        if self.seen_invalid.insert((self.ln, c)) {
            self.diagnostics.record(Diagnostic::syntax(
                self.ln,
                format!("Invalid character '{c}'"),
                format!("Remove or replace '{c}' with a valid symbol or identifier."),
            ));
        }
    }

    fn lex_identifier(&mut self) -> Token {
        let word = self
            .cursor
            .take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        Token::from(word)
    }

    fn lex_constant(&mut self) -> Option<Token> {
        let start = self.cursor.as_str();
        let integral = self.cursor.take_while(|c| c.is_ascii_digit()).len();

        let has_fraction = self.cursor.peek() == Some('.')
            && self.cursor.peek_2nd().is_some_and(|c| c.is_ascii_digit());
        if has_fraction {
            self.cursor.take();
            let fraction = self.cursor.take_while(|c| c.is_ascii_digit()).len();
            let literal = &start[..integral + 1 + fraction];
            return literal.parse().ok().map(Token::FloatConst);
        }

        let literal = &start[..integral];
        let value = literal.parse().unwrap_or_else(|_| {
            self.diagnostics.record(Diagnostic::syntax(
                self.ln,
                format!("Integer literal '{literal}' is out of range"),
                format!("Use a value no larger than {}.", i64::MAX),
            ));
            i64::MAX
        });
        Some(Token::IntConst(value))
    }

    fn lex_operator(&mut self) -> Option<Token> {
        let first = self.cursor.take()?;
        if first == '=' && self.cursor.skip_if(|c| c == '=') {
            return Some(Token::IsEqual);
        }
        match Token::try_from(first) {
            Ok(token) => Some(token),
            Err(c) => {
                self.report_invalid_char(c);
                None
            }
        }
    }
}

impl Iterator for Lexer<'_, '_> {
    type Item = LinedToken;

    fn next(&mut self) -> Option<LinedToken> {
        loop {
            self.skip_whitespaces();
            let peek = self.cursor.peek()?;
            let token = match peek {
                'a'..='z' | 'A'..='Z' | '_' => Some(self.lex_identifier()),
                '0'..='9' => self.lex_constant(),
                _ => self.lex_operator(),
            };
            if let Some(token) = token {
                return Some(LinedToken::new(token, self.ln));
            }
        }
    }
}

pub fn lex(source: &str, diagnostics: &mut Diagnostics) -> Tokens {
    let tokens: Tokens = Lexer::new(source, diagnostics).collect();
    log::debug!("lexed {} tokens", tokens.len());
    tokens
}

use std::fmt;
use std::ops::Deref;

/// Token with attached line number to it.
///
/// To get inner [Token] use [Token::from] to consume or [get_inner](LinedToken::get_inner) to borrow.
///
#[derive(Debug, Clone, PartialEq)]
pub struct LinedToken {
    pub(crate) inner: Token,
    ln: u64,
}

impl From<LinedToken> for Token {
    fn from(value: LinedToken) -> Self {
        value.inner
    }
}

/// Basic token type
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// int keyword
    Int,
    /// float keyword
    Float,
    /// any unknown keyword(variable names, function names, ..)
    Identifier(String),
    /// integer literal (e.g. 100)
    IntConst(i64),
    /// literal with a fractional part (e.g. 3.14)
    FloatConst(f64),
    /// (
    OpenParanth,
    /// )
    CloseParanth,
    /// {
    OpenCurly,
    /// }
    CloseCurly,
    /// ;
    Semicolon,
    /// ,
    Comma,
    /// +
    Plus,
    /// -
    Hyphen,
    /// *
    Asterisk,
    /// /
    FSlash,
    /// =
    Assign,
    /// ==
    IsEqual,
    /// <
    IsLessThan,
    /// >
    IsGreaterThan,
    /// return keyword
    Return,
    /// if keyword
    If,
    /// else keyword
    Else,
    /// while keyword
    While,
    /// for keyword
    For,
}

impl LinedToken {
    pub fn new(t: Token, ln: u64) -> Self {
        Self { inner: t, ln }
    }

    pub fn get_line(&self) -> u64 {
        self.ln
    }

    pub fn get_inner(&self) -> &Token {
        &self.inner
    }
}

impl Deref for LinedToken {
    type Target = Token;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Token {
    #[inline]
    pub fn is_type_specifier(&self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }

    #[inline]
    pub fn is_binaryop(&self) -> bool {
        matches!(
            self,
            Token::Plus
                | Token::Hyphen
                | Token::Asterisk
                | Token::FSlash
                | Token::IsEqual
                | Token::IsLessThan
                | Token::IsGreaterThan
        )
    }
}

impl TryFrom<char> for Token {
    type Error = char;
    fn try_from(c: char) -> std::result::Result<Self, char> {
        match c {
            ';' => Ok(Self::Semicolon),
            ',' => Ok(Self::Comma),
            '(' => Ok(Self::OpenParanth),
            ')' => Ok(Self::CloseParanth),
            '{' => Ok(Self::OpenCurly),
            '}' => Ok(Self::CloseCurly),
            '+' => Ok(Self::Plus),
            '-' => Ok(Self::Hyphen),
            '*' => Ok(Self::Asterisk),
            '/' => Ok(Self::FSlash),
            '<' => Ok(Self::IsLessThan),
            '>' => Ok(Self::IsGreaterThan),
            '=' => Ok(Self::Assign),
            _ => Err(c),
        }
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        match s {
            "int" => Self::Int,
            "float" => Self::Float,
            "return" => Self::Return,
            "if" => Self::If,
            "else" => Self::Else,
            "while" => Self::While,
            "for" => Self::For,
            _ => Self::Identifier(s.to_owned()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::IntConst(i) => write!(f, "{i}"),
            Self::FloatConst(x) => write!(f, "{x:?}"),
            Self::OpenParanth => write!(f, "("),
            Self::CloseParanth => write!(f, ")"),
            Self::OpenCurly => write!(f, "{{"),
            Self::CloseCurly => write!(f, "}}"),
            Self::Semicolon => write!(f, ";"),
            Self::Comma => write!(f, ","),
            Self::Plus => write!(f, "+"),
            Self::Hyphen => write!(f, "-"),
            Self::Asterisk => write!(f, "*"),
            Self::FSlash => write!(f, "/"),
            Self::Assign => write!(f, "="),
            Self::IsEqual => write!(f, "=="),
            Self::IsLessThan => write!(f, "<"),
            Self::IsGreaterThan => write!(f, ">"),
            Self::Return => write!(f, "return"),
            Self::If => write!(f, "if"),
            Self::Else => write!(f, "else"),
            Self::While => write!(f, "while"),
            Self::For => write!(f, "for"),
        }
    }
}

impl fmt::Display for LinedToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} '{}' (line {})", self.inner, self.inner, self.ln)
    }
}

use std::str::Chars;

#[derive(Clone)]
pub struct Cursor<'a> {
    chars: Chars<'a>,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        let chars = s.chars();
        Self { chars }
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    pub fn peek_2nd(&self) -> Option<char> {
        // cheap to clone
        let mut chars = self.chars.clone();
        chars.next();
        chars.next()
    }

    #[inline]
    pub fn skip_if(&mut self, p: impl FnOnce(char) -> bool) -> bool {
        let skipped = self.peek().filter(|&c| p(c)).is_some();
        if skipped {
            self.take();
        }
        skipped
    }

    /// Consumes characters while `p` holds and returns the consumed slice.
    pub fn take_while(&mut self, p: impl Fn(char) -> bool) -> &'a str {
        let start = self.as_str();
        let mut len = 0;
        while let Some(c) = self.peek().filter(|&c| p(c)) {
            len += c.len_utf8();
            self.take();
        }
        &start[..len]
    }

    pub fn take(&mut self) -> Option<char> {
        self.chars.next()
    }

    pub fn as_str(&self) -> &'a str {
        self.chars.as_str()
    }
}

use std::str::Chars;

pub(crate) const EOF_CHAR: char = '\0';

pub(crate) struct Cursor<'a> {
    text: &'a str,
    chars: Chars<'a>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { text, chars: text.chars() }
    }

    /// Byte offset of the next character.
    pub(crate) fn offset(&self) -> usize {
        self.text.len() - self.chars.as_str().len()
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    pub(crate) fn peek(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn advance(&mut self) -> char {
        self.chars.next().unwrap_or(EOF_CHAR)
    }

    /// Consumes characters while `f` holds and returns them.
    pub(crate) fn advance_while(&mut self, f: impl Fn(char) -> bool + Copy) -> &'a str {
        let start = self.offset();
        while !self.is_eof() && f(self.peek()) {
            self.advance();
        }
        &self.text[start..self.offset()]
    }

    pub(crate) fn skip_whitespace(&mut self) {
        self.advance_while(char::is_whitespace);
    }
}

//! Line cursor over decoded input text.
//!
//! Both structured-format parsers walk their input line by line with
//! lookahead. The cursor owns that bookkeeping so record parsers never
//! do raw index arithmetic: an overrun surfaces as a typed
//! [`UnexpectedEndOfInput`](crate::error::Error::UnexpectedEndOfInput)
//! instead of a panic, and every error can name its 1-based line number.

use crate::error::{Error, Result};

/// A forward-only cursor over the lines of an input document.
#[derive(Debug)]
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    /// Create a cursor over the lines of `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    /// 1-based number of the line `peek`/`advance` would return next.
    /// Past the end, this is one past the final line, which is where an
    /// `UnexpectedEndOfInput` is reported.
    pub fn line_number(&self) -> usize {
        self.pos + 1
    }

    /// Look at the next line without consuming it.
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Consume and return the next line.
    pub fn advance(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.pos).copied();
        if line.is_some() {
            self.pos += 1;
        }
        line
    }

    /// Consume the next line, failing with `UnexpectedEndOfInput` if the
    /// input is exhausted mid-record.
    pub fn expect_line(&mut self) -> Result<&'a str> {
        let line = self.line_number();
        self.advance().ok_or(Error::UnexpectedEndOfInput { line })
    }

    /// True once every line has been consumed.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_does_not_consume() {
        let mut cursor = LineCursor::new("a\nb\n");
        assert_eq!(cursor.peek(), Some("a"));
        assert_eq!(cursor.peek(), Some("a"));
        assert_eq!(cursor.advance(), Some("a"));
        assert_eq!(cursor.peek(), Some("b"));
    }

    #[test]
    fn test_line_numbers_are_one_based() {
        let mut cursor = LineCursor::new("first\nsecond");
        assert_eq!(cursor.line_number(), 1);
        cursor.advance();
        assert_eq!(cursor.line_number(), 2);
        cursor.advance();
        assert!(cursor.is_eof());
        assert_eq!(cursor.line_number(), 3);
    }

    #[test]
    fn test_expect_line_reports_overrun() {
        let mut cursor = LineCursor::new("only");
        assert_eq!(cursor.expect_line().unwrap(), "only");
        let err = cursor.expect_line().unwrap_err();
        assert!(matches!(err, Error::UnexpectedEndOfInput { line: 2 }));
    }

    #[test]
    fn test_empty_input() {
        let mut cursor = LineCursor::new("");
        assert!(cursor.is_eof());
        assert_eq!(cursor.advance(), None);
    }
}

//! Bounded character cursor for the external scanner
//!
//!     The scanner works on one record at a time, so the cursor is bounded
//!     by the record's content end and never sees the terminator bytes.
//!     Recognition attempts that fail must not consume input; callers take a
//!     mark before an attempt and roll back to it on failure.

use std::ops::Range;

/// Characters that end value scanning: tab (starts the inline comment) and
/// the terminator bytes. The scanner refuses to scan past any of these.
pub fn is_stop_char(ch: char) -> bool {
    matches!(ch, '\t' | '\r' | '\n' | '\0')
}

/// A random-access cursor over a slice of the source buffer.
///
/// Positions are absolute byte offsets into the full buffer, so spans taken
/// from the cursor drop straight into the tree.
#[derive(Debug, Clone)]
pub struct Cursor<'s> {
    source: &'s str,
    pos: usize,
    end: usize,
}

impl<'s> Cursor<'s> {
    /// A cursor over `source[range]`. The range must lie on character
    /// boundaries.
    pub fn new(source: &'s str, range: Range<usize>) -> Self {
        debug_assert!(source.is_char_boundary(range.start));
        debug_assert!(source.is_char_boundary(range.end));
        Self {
            source,
            pos: range.start,
            end: range.end,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Roll back to a previously taken position.
    pub fn rollback(&mut self, mark: usize) {
        debug_assert!(mark <= self.pos);
        self.pos = mark;
    }

    /// The character under the cursor, or None at the end of the region.
    pub fn peek(&self) -> Option<char> {
        self.source[self.pos..self.end].chars().next()
    }

    /// Advance past the current character and return it.
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// True at the end of the region or on a stop character. Mirrors the
    /// scanner's end-of-usable-input test: a tab or terminator is as final
    /// as EOF for token recognition.
    pub fn at_stop(&self) -> bool {
        match self.peek() {
            None => true,
            Some(ch) => is_stop_char(ch),
        }
    }

    /// Consume `literal` if the region starts with it.
    pub fn eat_literal(&mut self, literal: &str) -> bool {
        if self.source[self.pos..self.end].starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Consume characters while `pred` holds; returns how many were eaten.
    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> usize {
        let mut count = 0;
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_and_rollback() {
        let mut cursor = Cursor::new("abc", 0..3);
        let mark = cursor.pos();
        assert_eq!(cursor.bump(), Some('a'));
        assert_eq!(cursor.bump(), Some('b'));
        cursor.rollback(mark);
        assert_eq!(cursor.peek(), Some('a'));
    }

    #[test]
    fn test_bounded_region() {
        let mut cursor = Cursor::new("key=value", 4..9);
        assert_eq!(cursor.peek(), Some('v'));
        cursor.eat_while(|_| true);
        assert_eq!(cursor.pos(), 9);
        assert_eq!(cursor.bump(), None);
        assert!(cursor.at_stop());
    }

    #[test]
    fn test_stop_chars() {
        let cursor = Cursor::new("\tx", 0..2);
        assert!(cursor.at_stop());
        assert!(is_stop_char('\0'));
        assert!(is_stop_char('\r'));
        assert!(!is_stop_char('='));
    }

    #[test]
    fn test_eat_literal_is_atomic() {
        let mut cursor = Cursor::new(":_input_a:", 0..10);
        assert!(!cursor.eat_literal(":_output_"));
        assert_eq!(cursor.pos(), 0);
        assert!(cursor.eat_literal(":_input_"));
        assert_eq!(cursor.pos(), 8);
    }

    #[test]
    fn test_multibyte_bump() {
        let mut cursor = Cursor::new("§a", 0..3);
        assert_eq!(cursor.bump(), Some('§'));
        assert_eq!(cursor.pos(), 2);
    }
}

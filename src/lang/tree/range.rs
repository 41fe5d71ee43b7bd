//! Position tracking for tree nodes
//!
//!     Tree nodes store plain byte spans (`std::ops::Range<usize>`); row and
//!     column positions are derived on demand through a [`LineIndex`] built
//!     once per parse. Columns are counted in characters, not bytes, so
//!     multi-byte sequences such as the section sign (`§`) advance a column
//!     by one.
//!
//!     Rows are delimited by `\n` only. The NUL terminator ends a record but
//!     does not start a new display row; editors treat it as an ordinary
//!     control character.

use std::fmt;

/// A zero-based row/column position in the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// Byte-offset to row/column conversion table.
///
/// Stores the byte offset of the first byte of every row. Lookup is a binary
/// search over the row starts followed by a character count within the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    row_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut row_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                row_starts.push(i + 1);
            }
        }
        Self {
            row_starts,
            len: source.len(),
        }
    }

    /// Convert a byte offset into a row/column position.
    ///
    /// Offsets past the end of the buffer clamp to the end. Offsets that land
    /// inside a multi-byte character report the column of that character.
    pub fn position(&self, source: &str, offset: usize) -> Position {
        let offset = offset.min(self.len);
        let row = match self.row_starts.binary_search(&offset) {
            Ok(row) => row,
            Err(insert) => insert - 1,
        };
        let row_start = self.row_starts[row];
        let column = source[row_start..]
            .char_indices()
            .take_while(|(i, ch)| row_start + i + ch.len_utf8() <= offset)
            .count();
        Position::new(row, column)
    }

    /// Byte offset of the first byte of `row`, if the row exists.
    pub fn row_start(&self, row: usize) -> Option<usize> {
        self.row_starts.get(row).copied()
    }

    pub fn row_count(&self) -> usize {
        self.row_starts.len()
    }
}

//! Inline structural rules
//!
//!     The simple, fixed patterns of the grammar - leading whitespace,
//!     comment marker, key run - are declarative regexes compiled once.
//!     They complement the stateful external scanner: the rule engine picks
//!     per position which of the two token sources applies.

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading whitespace is stripped structurally; it belongs to no token.
static LEADING_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]+").expect("valid regex"));

/// A comment starts with two or more `#` and runs to the end of the record.
static COMMENT_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{2,}").expect("valid regex"));

/// A key is a maximal run of anything but `=` (CR/LF/NUL cannot occur inside
/// a record).
static KEY_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^=]+").expect("valid regex"));

/// Byte length of the leading-whitespace run of `content`.
pub fn leading_whitespace(content: &str) -> usize {
    LEADING_WHITESPACE.find(content).map_or(0, |m| m.end())
}

/// Whether `body` (content after whitespace stripping) is a comment line.
/// Comment detection has priority over entry parsing, so `##x=y` is a
/// comment, never a key starting with `#`.
pub fn is_comment(body: &str) -> bool {
    COMMENT_START.is_match(body)
}

/// Byte length of the key run at the start of `body` (0 when the line
/// starts with `=`). The caller decides between entry and error from
/// whether an `=` follows the run.
pub fn key_len(body: &str) -> usize {
    KEY_RUN.find(body).map_or(0, |m| m.end())
}

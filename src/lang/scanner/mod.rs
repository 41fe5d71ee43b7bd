//! External token recognizer
//!
//!     Values in `.lang` entries are free-form text with escape sequences
//!     mixed in, which makes their tokenization context sensitive: a `%` may
//!     open a format specifier or just be a percent sign, a `:` may open an
//!     input-key placeholder, an emoji shortcode, or nothing at all. The
//!     declarative rules in [`parsing`](crate::lang::parsing) cannot express
//!     this, so the rule engine calls back into this scanner at value
//!     positions, passing the set of token kinds the grammar currently
//!     permits.
//!
//!     The scanner recognizes at most one token per call and never consumes
//!     input on failure; every attempt rolls the cursor back to its mark
//!     when the sequence does not resolve. All working state lives in the
//!     cursor passed per invocation, so parses are reentrant and can run on
//!     independent buffers concurrently.
//!
//! Recognition order
//!
//!     Kinds are attempted in a fixed priority order: linebreak, format
//!     code, input key, format specifier, emoji, then the plain-text
//!     fallback. The first match wins. Escapes are matched greedily;
//!     the text fallback stops before any character that could begin an
//!     escape, leaving the engine's single-character fallback to swallow
//!     orphan delimiters one at a time.

pub mod cursor;

pub use cursor::{is_stop_char, Cursor};

use std::ops::Range;

/// The six context-sensitive token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalKind {
    Text,
    Linebreak,
    FormatCode,
    InputKey,
    FormatSpecifier,
    Emoji,
}

impl ExternalKind {
    pub const COUNT: usize = 6;

    fn index(self) -> usize {
        match self {
            ExternalKind::Text => 0,
            ExternalKind::Linebreak => 1,
            ExternalKind::FormatCode => 2,
            ExternalKind::InputKey => 3,
            ExternalKind::FormatSpecifier => 4,
            ExternalKind::Emoji => 5,
        }
    }
}

/// Which kinds the grammar permits at the current position.
///
/// The engine prunes recognition attempts with this set; a kind that is not
/// valid is never tried, no matter what the input looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidSymbols([bool; ExternalKind::COUNT]);

impl ValidSymbols {
    pub fn none() -> Self {
        Self([false; ExternalKind::COUNT])
    }

    pub fn all() -> Self {
        Self([true; ExternalKind::COUNT])
    }

    pub fn with(mut self, kind: ExternalKind) -> Self {
        self.0[kind.index()] = true;
        self
    }

    pub fn allows(&self, kind: ExternalKind) -> bool {
        self.0[kind.index()]
    }
}

/// A successfully recognized token: its kind and the bytes it consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedToken {
    pub kind: ExternalKind,
    pub span: Range<usize>,
}

/// The callback interface the rule engine drives.
///
/// `scan` either recognizes exactly one token of a permitted kind (advancing
/// the cursor past it) or returns None with the cursor unmoved. Failure is
/// ordinary control flow, not an error.
pub trait ExternalScanner {
    fn scan(&mut self, cursor: &mut Cursor<'_>, valid: &ValidSymbols) -> Option<ScannedToken>;
}

/// Section sign, the format-code marker.
const FORMAT_CODE_MARKER: char = '§';

/// Opening delimiter of an input-key placeholder, e.g. `:_input_key.jump:`.
const INPUT_KEY_PREFIX: &str = ":_input_";

/// The `.lang` scanner. Stateless; everything lives in the cursor.
#[derive(Debug, Default, Clone, Copy)]
pub struct LangScanner;

impl LangScanner {
    pub fn new() -> Self {
        LangScanner
    }

    /// `\n` - a backslash-n escape standing for an embedded newline in the
    /// rendered string (not a source line break).
    fn scan_linebreak(&self, cursor: &mut Cursor<'_>) -> bool {
        cursor.eat_literal("\\n")
    }

    /// `§` plus exactly one alphanumeric style code, e.g. `§a`, `§l`.
    fn scan_format_code(&self, cursor: &mut Cursor<'_>) -> bool {
        let mark = cursor.pos();
        if cursor.bump() != Some(FORMAT_CODE_MARKER) {
            cursor.rollback(mark);
            return false;
        }
        match cursor.peek() {
            Some(ch) if ch.is_alphanumeric() => {
                cursor.bump();
                true
            }
            _ => {
                cursor.rollback(mark);
                false
            }
        }
    }

    /// `:_input_` through the next `:` on the same line. Fails without
    /// consuming when no closing colon appears before tab/terminator/EOF.
    fn scan_input_key(&self, cursor: &mut Cursor<'_>) -> bool {
        let mark = cursor.pos();
        if !cursor.eat_literal(INPUT_KEY_PREFIX) {
            cursor.rollback(mark);
            return false;
        }
        cursor.eat_while(|ch| ch != ':' && !is_stop_char(ch));
        if cursor.peek() == Some(':') {
            cursor.bump();
            true
        } else {
            cursor.rollback(mark);
            false
        }
    }

    /// Printf-style specifier: `%s`/`%d`/`%f`, positional `%1$s`, or
    /// precision `%.2f`. Anything else leaves the `%` for the text fallback.
    fn scan_format_specifier(&self, cursor: &mut Cursor<'_>) -> bool {
        let mark = cursor.pos();
        if cursor.bump() != Some('%') {
            cursor.rollback(mark);
            return false;
        }
        match cursor.peek() {
            Some('s') | Some('d') | Some('f') => {
                cursor.bump();
                return true;
            }
            Some(ch) if ch.is_ascii_digit() => {
                cursor.eat_while(|c| c.is_ascii_digit());
                if cursor.peek() == Some('$') {
                    cursor.bump();
                    if matches!(cursor.peek(), Some('s') | Some('d') | Some('f')) {
                        cursor.bump();
                        return true;
                    }
                }
            }
            Some('.') => {
                cursor.bump();
                if cursor.eat_while(|c| c.is_ascii_digit()) > 0 && cursor.peek() == Some('f') {
                    cursor.bump();
                    return true;
                }
            }
            _ => {}
        }
        cursor.rollback(mark);
        false
    }

    /// `:name:` where the name is one or more word characters. Tried after
    /// input keys, so `:_input_…:` never lands here.
    fn scan_emoji(&self, cursor: &mut Cursor<'_>) -> bool {
        let mark = cursor.pos();
        if cursor.bump() != Some(':') {
            cursor.rollback(mark);
            return false;
        }
        if cursor.eat_while(|ch| ch.is_ascii_alphanumeric() || ch == '_') == 0 {
            cursor.rollback(mark);
            return false;
        }
        if cursor.peek() == Some(':') {
            cursor.bump();
            true
        } else {
            cursor.rollback(mark);
            false
        }
    }

    /// Maximal run of plain characters. Stops before anything that could
    /// begin an escape, and fails if the cursor already sits on one; the
    /// engine's raw single-character fallback handles orphan delimiters.
    fn scan_text(&self, cursor: &mut Cursor<'_>) -> bool {
        cursor.eat_while(|ch| !is_escape_start(ch) && !is_stop_char(ch)) > 0
    }
}

/// Characters that can open an escape sequence inside a value.
pub fn is_escape_start(ch: char) -> bool {
    matches!(ch, '\\' | FORMAT_CODE_MARKER | '%' | ':')
}

impl ExternalScanner for LangScanner {
    fn scan(&mut self, cursor: &mut Cursor<'_>, valid: &ValidSymbols) -> Option<ScannedToken> {
        if cursor.at_stop() {
            return None;
        }
        let start = cursor.pos();
        let attempts: [(ExternalKind, fn(&Self, &mut Cursor<'_>) -> bool); 6] = [
            (ExternalKind::Linebreak, Self::scan_linebreak),
            (ExternalKind::FormatCode, Self::scan_format_code),
            (ExternalKind::InputKey, Self::scan_input_key),
            (ExternalKind::FormatSpecifier, Self::scan_format_specifier),
            (ExternalKind::Emoji, Self::scan_emoji),
            (ExternalKind::Text, Self::scan_text),
        ];
        for (kind, attempt) in attempts {
            if !valid.allows(kind) {
                continue;
            }
            if attempt(self, cursor) {
                debug_assert!(cursor.pos() > start, "scanner must consume on success");
                return Some(ScannedToken {
                    kind,
                    span: start..cursor.pos(),
                });
            }
            debug_assert_eq!(cursor.pos(), start, "failed attempt must not consume");
        }
        None
    }
}

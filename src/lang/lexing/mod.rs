//! Raw record tokenization
//!
//!     The first pipeline stage splits the buffer into terminator-delimited
//!     records with a vanilla logos lexer, mirroring the structural rule
//!     `source_file -> (line terminator)*`. Everything context sensitive
//!     stays out of this stage; a record's content run is handed to the
//!     structural rules and the external scanner untouched.
//!
//!     Terminators are `\r?\n` or a NUL byte. A NUL ends the last record
//!     without requiring a trailing newline, and a final record at EOF
//!     without any terminator is accepted as well. A carriage return that is
//!     not followed by `\n` is no terminator; it surfaces as a stray token
//!     that the parser wraps in an error node, isolating the damage to that
//!     one byte.

pub mod records;

pub use records::{split_records, tokenize, RawRecord, RawToken};

//! # mclang-parser
//!
//! A parser for Minecraft `.lang` localization files.
//!
//! `.lang` files are line-oriented key/value records:
//!
//!     ## Creative menu
//!     item.apple.name=Apple
//!     item.info=Press :_input_key.use: to eat\nTasty! §a%1$d left	legacy note
//!
//! Each terminator-delimited record is a comment (`##` and beyond), an entry
//! (`key=value`, with an optional inline comment after the first tab), or a
//! blank line. Values are free-form text interleaved with escape sequences:
//! `\n` linebreaks, `§`-style format codes, `:_input_…:` input-key
//! placeholders, printf-style format specifiers, and `:shortcode:` emoji.
//!
//! The crate is organized as a pipeline:
//!
//! 1. [`lang::lexing`] splits the raw buffer into terminator-delimited
//!    records.
//! 2. [`lang::scanner`] recognizes the context-sensitive escape tokens
//!    embedded in value text.
//! 3. [`lang::parsing`] applies the structural rules (comment, key,
//!    assignment, inline comment) and drives the scanner over values.
//! 4. [`lang::tree`] is the positioned concrete syntax tree the parser
//!    emits, and [`lang::ast`] the typed document model layered on top.
//!
//! Parsing is lenient by design: malformed lines become isolated error nodes
//! and the rest of the document still parses. Real-world translation files
//! are full of half-escaped text, and highlighters need best-effort structure
//! rather than a whole-file failure.

pub mod lang;

pub use lang::ast::Document;
pub use lang::parsing::{parse, parse_document};
pub use lang::tree::{Node, SyntaxKind, SyntaxTree};

//! Structural rule engine
//!
//!     Assembles the tree from two token sources: the inline regex rules
//!     for fixed patterns (whitespace, comment, key, assignment) and the
//!     external scanner for the context-sensitive escape tokens inside
//!     values. Which source applies is decided per grammar position.
//!
//!     Parsing is resilient: a record that matches no rule becomes an
//!     isolated error node spanning the smallest unmatched text, and the
//!     following records still parse. The engine never fails and never
//!     stalls - when neither token source recognizes anything at a value
//!     position, it consumes exactly one character as an anonymous raw
//!     token, which guarantees forward progress.

pub mod rules;

use std::ops::Range;

use crate::lang::ast::Document;
use crate::lang::lexing::{split_records, tokenize, RawRecord};
use crate::lang::scanner::{
    Cursor, ExternalKind, ExternalScanner, LangScanner, ValidSymbols,
};
use crate::lang::tree::{Field, SyntaxKind, SyntaxTree, TreeBuilder};

/// Parse a buffer into a concrete syntax tree.
pub fn parse(source: &str) -> SyntaxTree {
    let mut builder = TreeBuilder::new();
    parse_region_into(&mut builder, source, 0..source.len());
    builder.finish(source.to_string())
}

/// Parse `source[region]` and emit its records into `builder`.
///
/// The region must start and end on record boundaries; incremental reparse
/// relies on this to re-lex only the damaged records of an edited buffer.
pub(crate) fn parse_region_into(
    builder: &mut TreeBuilder,
    source: &str,
    region: Range<usize>,
) {
    let offset = region.start;
    let shift = |span: &Range<usize>| span.start + offset..span.end + offset;
    let tokens = tokenize(&source[region]);
    let records = split_records(&tokens);
    let mut scanner = LangScanner::new();
    for record in records {
        match record {
            RawRecord::Stray { span } => {
                builder.token(SyntaxKind::Error, shift(&span), None);
            }
            RawRecord::Line {
                content,
                terminator,
            } => {
                if let Some(content) = content {
                    parse_line(builder, &mut scanner, source, shift(&content));
                }
                if let Some(terminator) = terminator {
                    builder.token(SyntaxKind::Terminator, shift(&terminator), None);
                }
            }
        }
    }
}

/// Parse a buffer straight into the typed document model.
pub fn parse_document(source: &str) -> Document {
    Document::from_tree(&parse(source))
}

fn parse_line(
    builder: &mut TreeBuilder,
    scanner: &mut LangScanner,
    source: &str,
    span: Range<usize>,
) {
    let content = &source[span.clone()];
    let ws = rules::leading_whitespace(content);
    let body_start = span.start + ws;
    let body = &content[ws..];

    builder.open(SyntaxKind::Line, None);
    if ws > 0 {
        builder.token(SyntaxKind::Whitespace, span.start..body_start, None);
    }
    if body.is_empty() {
        // Whitespace-only record: a blank line.
    } else if rules::is_comment(body) {
        builder.token(SyntaxKind::Comment, body_start..span.end, None);
    } else {
        let key_len = rules::key_len(body);
        if key_len == body.len() {
            // No assignment anywhere: the whole body is the unmatched span.
            builder.token(SyntaxKind::Error, body_start..span.end, None);
        } else {
            if key_len > 0 {
                builder.token(
                    SyntaxKind::Key,
                    body_start..body_start + key_len,
                    Some(Field::Key),
                );
            }
            let assign_start = body_start + key_len;
            builder.token(
                SyntaxKind::Assignment,
                assign_start..assign_start + 1,
                Some(Field::Assignment),
            );
            parse_value(builder, scanner, source, assign_start + 1..span.end);
        }
    }
    builder.close(span.start);
}

fn syntax_kind(kind: ExternalKind) -> SyntaxKind {
    match kind {
        ExternalKind::Text => SyntaxKind::Text,
        ExternalKind::Linebreak => SyntaxKind::Linebreak,
        ExternalKind::FormatCode => SyntaxKind::FormatCode,
        ExternalKind::InputKey => SyntaxKind::InputKey,
        ExternalKind::FormatSpecifier => SyntaxKind::FormatSpecifier,
        ExternalKind::Emoji => SyntaxKind::Emoji,
    }
}

fn parse_value(
    builder: &mut TreeBuilder,
    scanner: &mut LangScanner,
    source: &str,
    region: Range<usize>,
) {
    let mut cursor = Cursor::new(source, region.clone());
    let mut fragments: Vec<(SyntaxKind, Range<usize>)> = Vec::new();
    let mut inline_comment: Option<Range<usize>> = None;
    let valid = ValidSymbols::all();

    loop {
        match cursor.peek() {
            None => break,
            Some('\t') => {
                // The first tab hands the rest of the record to the inline
                // comment, which is never tokenized further.
                inline_comment = Some(cursor.pos()..region.end);
                break;
            }
            Some(_) => {}
        }
        if let Some(token) = scanner.scan(&mut cursor, &valid) {
            fragments.push((syntax_kind(token.kind), token.span));
        } else {
            // Raw single-character fallback: swallow one orphan delimiter.
            let start = cursor.pos();
            cursor.bump();
            fragments.push((SyntaxKind::RawChar, start..cursor.pos()));
        }
    }

    if !fragments.is_empty() {
        builder.open(SyntaxKind::Value, Some(Field::Value));
        for (kind, span) in fragments {
            builder.token(kind, span, None);
        }
        builder.close(region.start);
    }
    if let Some(span) = inline_comment {
        builder.token(SyntaxKind::InlineComment, span, None);
    }
}

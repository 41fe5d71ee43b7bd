//! Logos token definitions and record grouping

use std::ops::Range;

use logos::Logos;

/// Raw tokens of the record-splitting pass.
///
/// Every byte of the buffer lands in exactly one of these, so downstream
/// stages inherit total coverage for free.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum RawToken {
    /// A record terminator: `\r\n`, `\n`, or NUL.
    #[regex(r"\r?\n|\x00")]
    Terminator,

    /// A carriage return not followed by `\n`. Not a terminator; becomes an
    /// error node.
    #[token("\r")]
    StrayCarriage,

    /// A maximal run of record content (anything but CR, LF, NUL).
    #[regex(r"[^\r\n\x00]+")]
    Content,
}

/// Tokenize the whole buffer into a flat stream with byte ranges.
pub fn tokenize(source: &str) -> Vec<(RawToken, Range<usize>)> {
    RawToken::lexer(source)
        .spanned()
        .map(|(token, span)| {
            // The three patterns jointly match any input, so lexing cannot
            // fail; keep totality explicit anyway.
            (token.unwrap_or(RawToken::StrayCarriage), span)
        })
        .collect()
}

/// One terminator-delimited unit of the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRecord {
    /// A line: optional content run, optional terminator. Both are absent
    /// never; a bare terminator is a blank line, content without terminator
    /// only occurs at EOF or before a stray carriage return.
    Line {
        content: Option<Range<usize>>,
        terminator: Option<Range<usize>>,
    },
    /// A lone carriage return; parsed as an isolated error node.
    Stray { span: Range<usize> },
}

/// Group the flat token stream into records.
pub fn split_records(tokens: &[(RawToken, Range<usize>)]) -> Vec<RawRecord> {
    let mut records = Vec::new();
    let mut pending: Option<Range<usize>> = None;
    for (token, span) in tokens {
        match token {
            RawToken::Content => {
                debug_assert!(pending.is_none(), "two content runs cannot be adjacent");
                pending = Some(span.clone());
            }
            RawToken::Terminator => {
                records.push(RawRecord::Line {
                    content: pending.take(),
                    terminator: Some(span.clone()),
                });
            }
            RawToken::StrayCarriage => {
                if let Some(content) = pending.take() {
                    records.push(RawRecord::Line {
                        content: Some(content),
                        terminator: None,
                    });
                }
                records.push(RawRecord::Stray { span: span.clone() });
            }
        }
    }
    if let Some(content) = pending {
        records.push(RawRecord::Line {
            content: Some(content),
            terminator: None,
        });
    }
    records
}

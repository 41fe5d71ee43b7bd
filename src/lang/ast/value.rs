//! Typed value fragments
//!
//!     The tree keeps value tokens exactly as scanned; the typed layer
//!     normalizes them for consumers. Adjacent text-kind tokens (scanner
//!     text runs and anonymous single-character fallbacks) merge into one
//!     RawText fragment, so `%unknown%` surfaces as a single piece of plain
//!     text. An orphan delimiter with no text around it stays a SingleChar
//!     fragment.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::lang::tree::{Node, SyntaxKind};

/// One piece of an entry's value, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValueFragment {
    /// Plain text, merged from adjacent text tokens.
    RawText { text: String, span: Range<usize> },
    /// The `\n` escape: an embedded newline in the rendered string.
    Linebreak { span: Range<usize> },
    /// `§` plus one style code character.
    FormatCode { code: char, span: Range<usize> },
    /// `:_input_name:`; `name` excludes the delimiters.
    InputKey { name: String, span: Range<usize> },
    /// Printf-style specifier, e.g. `%s`, `%1$d`, `%.2f`.
    FormatSpecifier { spec: String, span: Range<usize> },
    /// `:name:` shortcode; `name` excludes the colons.
    Emoji { name: String, span: Range<usize> },
    /// A lone character swallowed by the raw fallback.
    SingleChar { ch: char, span: Range<usize> },
}

impl ValueFragment {
    pub fn span(&self) -> Range<usize> {
        match self {
            ValueFragment::RawText { span, .. }
            | ValueFragment::Linebreak { span }
            | ValueFragment::FormatCode { span, .. }
            | ValueFragment::InputKey { span, .. }
            | ValueFragment::FormatSpecifier { span, .. }
            | ValueFragment::Emoji { span, .. }
            | ValueFragment::SingleChar { span, .. } => span.clone(),
        }
    }
}

/// An entry's value: ordered fragments covering the value span exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    pub fragments: Vec<ValueFragment>,
    pub span: Range<usize>,
}

impl Value {
    /// Rebuild the value's source text from its fragment spans. The inline
    /// comment is not part of the value and never appears here.
    pub fn reconstruct(&self, source: &str) -> String {
        self.fragments
            .iter()
            .map(|f| &source[f.span()])
            .collect()
    }

    /// Build a typed value from a `value` tree node.
    pub(crate) fn from_node(node: Node<'_>) -> Self {
        debug_assert_eq!(node.kind(), SyntaxKind::Value);
        let mut fragments = Vec::new();
        let mut text_run: Vec<Node<'_>> = Vec::new();
        for child in node.children() {
            match child.kind() {
                SyntaxKind::Text | SyntaxKind::RawChar => text_run.push(child),
                _ => {
                    flush_text_run(&mut fragments, &mut text_run);
                    fragments.push(escape_fragment(child));
                }
            }
        }
        flush_text_run(&mut fragments, &mut text_run);
        Value {
            fragments,
            span: node.span(),
        }
    }
}

fn flush_text_run(fragments: &mut Vec<ValueFragment>, run: &mut Vec<Node<'_>>) {
    match run.as_slice() {
        [] => {}
        [single] if single.kind() == SyntaxKind::RawChar => {
            let span = single.span();
            let ch = single.text().chars().next().expect("raw char is one char");
            fragments.push(ValueFragment::SingleChar { ch, span });
        }
        nodes => {
            let span = nodes[0].span().start..nodes[nodes.len() - 1].span().end;
            let text = nodes.iter().map(|n| n.text()).collect();
            fragments.push(ValueFragment::RawText { text, span });
        }
    }
    run.clear();
}

fn escape_fragment(node: Node<'_>) -> ValueFragment {
    let span = node.span();
    let text = node.text();
    match node.kind() {
        SyntaxKind::Linebreak => ValueFragment::Linebreak { span },
        SyntaxKind::FormatCode => ValueFragment::FormatCode {
            code: text.chars().nth(1).expect("format code is two chars"),
            span,
        },
        SyntaxKind::InputKey => ValueFragment::InputKey {
            name: text[":_input_".len()..text.len() - 1].to_string(),
            span,
        },
        SyntaxKind::FormatSpecifier => ValueFragment::FormatSpecifier {
            spec: text.to_string(),
            span,
        },
        SyntaxKind::Emoji => ValueFragment::Emoji {
            name: text[1..text.len() - 1].to_string(),
            span,
        },
        other => unreachable!("not a value fragment kind: {other:?}"),
    }
}

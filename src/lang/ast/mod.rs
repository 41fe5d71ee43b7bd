//! Typed document model
//!
//!     The concrete syntax tree answers positional queries; this layer
//!     answers semantic ones. A [`Document`] is the ordered list of parsed
//!     lines with their payloads extracted: comment text, entry key and
//!     value fragments, inline comments (without the tab that starts them),
//!     error text. It owns its strings, so it outlives the tree it was
//!     built from.
//!
//!     An absent value and an empty value both render as the empty string;
//!     the model keeps the distinction (`value: None` vs. a `Value` with no
//!     fragments cannot occur - an empty value is simply `None`).

pub mod value;

pub use value::{Value, ValueFragment};

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::lang::tree::{Field, Node, SyntaxKind, SyntaxTree};

/// A comment line: `##` and everything after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentLine {
    /// Full comment text including the leading `##`.
    pub text: String,
    pub span: Range<usize>,
}

/// A `key=value` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryLine {
    /// Key text; empty for the degenerate `=value` form.
    pub key: String,
    /// Span of the key, absent when the key is empty.
    pub key_span: Option<Range<usize>>,
    /// Span of the `=` sign.
    pub assignment_span: Range<usize>,
    /// The value; `None` when nothing follows the `=` (empty semantics).
    pub value: Option<Value>,
    /// Inline comment text after the first tab, tab excluded.
    pub inline_comment: Option<String>,
    pub span: Range<usize>,
}

/// A line that is empty after whitespace trimming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlankLine {
    pub span: Range<usize>,
}

/// An unparseable span, kept isolated so neighbors still parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorLine {
    pub text: String,
    pub span: Range<usize>,
}

/// One terminator-delimited record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Line {
    Comment(CommentLine),
    Entry(EntryLine),
    Blank(BlankLine),
    Error(ErrorLine),
}

impl Line {
    pub fn span(&self) -> Range<usize> {
        match self {
            Line::Comment(line) => line.span.clone(),
            Line::Entry(line) => line.span.clone(),
            Line::Blank(line) => line.span.clone(),
            Line::Error(line) => line.span.clone(),
        }
    }
}

/// An ordered sequence of lines, one per record in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub lines: Vec<Line>,
}

impl Document {
    /// Build the typed model from a parsed tree.
    pub fn from_tree(tree: &SyntaxTree) -> Self {
        let mut lines = Vec::new();
        let mut line_open = false;
        for child in tree.root().children() {
            match child.kind() {
                SyntaxKind::Line => {
                    lines.push(typed_line(child));
                    line_open = true;
                }
                SyntaxKind::Error => {
                    lines.push(Line::Error(ErrorLine {
                        text: child.text().to_string(),
                        span: child.span(),
                    }));
                    line_open = false;
                }
                SyntaxKind::Terminator => {
                    if !line_open {
                        // A bare terminator is a blank record.
                        let start = child.span().start;
                        lines.push(Line::Blank(BlankLine { span: start..start }));
                    }
                    line_open = false;
                }
                other => unreachable!("unexpected root child: {other:?}"),
            }
        }
        Document { lines }
    }

    /// All entries, in document order.
    pub fn entries(&self) -> impl Iterator<Item = &EntryLine> {
        self.lines.iter().filter_map(|line| match line {
            Line::Entry(entry) => Some(entry),
            _ => None,
        })
    }

    /// The first entry with exactly this key.
    pub fn get(&self, key: &str) -> Option<&EntryLine> {
        self.entries().find(|entry| entry.key == key)
    }
}

fn typed_line(node: Node<'_>) -> Line {
    debug_assert_eq!(node.kind(), SyntaxKind::Line);
    if let Some(comment) = node.children().find(|c| c.kind() == SyntaxKind::Comment) {
        return Line::Comment(CommentLine {
            text: comment.text().to_string(),
            span: comment.span(),
        });
    }
    if let Some(error) = node.children().find(|c| c.kind() == SyntaxKind::Error) {
        return Line::Error(ErrorLine {
            text: error.text().to_string(),
            span: error.span(),
        });
    }
    if let Some(assignment) = node.child_by_field(Field::Assignment) {
        let key_node = node.child_by_field(Field::Key);
        let value = node.child_by_field(Field::Value).map(Value::from_node);
        let inline_comment = node
            .children()
            .find(|c| c.kind() == SyntaxKind::InlineComment)
            // Everything after the tab; the tab itself is excluded.
            .map(|c| c.text()[1..].to_string());
        return Line::Entry(EntryLine {
            key: key_node.map(|k| k.text().to_string()).unwrap_or_default(),
            key_span: key_node.map(|k| k.span()),
            assignment_span: assignment.span(),
            value,
            inline_comment,
            span: node.span(),
        });
    }
    Line::Blank(BlankLine { span: node.span() })
}

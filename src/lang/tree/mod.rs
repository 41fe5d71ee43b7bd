//! Positioned concrete syntax tree
//!
//!     The parser emits an arena-backed tree: one flat `Vec` of node data,
//!     with parent/child links expressed as indices. [`Node`] is a cheap
//!     handle (tree reference + index) exposing the traversal surface that
//!     editor tooling expects: children, parent, siblings, field lookup,
//!     byte spans, row/column positions, and the smallest node covering a
//!     byte offset.
//!
//!     Every byte of the source is covered by exactly one leaf. Structural
//!     skips (leading whitespace) and record terminators are kept as
//!     anonymous leaves so the coverage invariant holds; they are excluded
//!     from the S-expression dump, which shows named nodes only.

pub mod builder;
pub mod error;
pub mod range;
pub mod snapshot;

pub use builder::TreeBuilder;
pub use error::PositionLookupError;
pub use range::{LineIndex, Position};

use std::fmt::Write as _;
use std::ops::Range;

/// Every node kind the tree can contain.
///
/// The named kinds are the vocabulary external consumers match on; the
/// anonymous kinds ([`Whitespace`](SyntaxKind::Whitespace),
/// [`Terminator`](SyntaxKind::Terminator), [`RawChar`](SyntaxKind::RawChar))
/// exist for byte coverage only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SyntaxKind {
    SourceFile,
    Line,
    Comment,
    Key,
    Assignment,
    Value,
    InlineComment,
    Text,
    Linebreak,
    FormatCode,
    InputKey,
    FormatSpecifier,
    Emoji,
    Whitespace,
    Terminator,
    RawChar,
    Error,
}

impl SyntaxKind {
    /// The kind name external consumers query (grammar vocabulary).
    pub fn name(self) -> &'static str {
        match self {
            SyntaxKind::SourceFile => "source_file",
            SyntaxKind::Line => "line",
            SyntaxKind::Comment => "comment",
            SyntaxKind::Key => "key",
            SyntaxKind::Assignment => "assignment",
            SyntaxKind::Value => "value",
            SyntaxKind::InlineComment => "inline_comment",
            SyntaxKind::Text => "text",
            SyntaxKind::Linebreak => "linebreak",
            SyntaxKind::FormatCode => "format_code",
            SyntaxKind::InputKey => "input_key",
            SyntaxKind::FormatSpecifier => "format_specifier",
            SyntaxKind::Emoji => "emoji",
            SyntaxKind::Whitespace => "whitespace",
            SyntaxKind::Terminator => "terminator",
            SyntaxKind::RawChar => "raw_char",
            SyntaxKind::Error => "ERROR",
        }
    }

    /// Named kinds appear in the S-expression dump; anonymous ones do not.
    pub fn is_named(self) -> bool {
        !matches!(
            self,
            SyntaxKind::Whitespace | SyntaxKind::Terminator | SyntaxKind::RawChar
        )
    }
}

/// Field tags on the children of an entry line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Field {
    Key,
    Assignment,
    Value,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Key => "key",
            Field::Assignment => "assignment",
            Field::Value => "value",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "key" => Some(Field::Key),
            "assignment" => Some(Field::Assignment),
            "value" => Some(Field::Value),
            _ => None,
        }
    }
}

/// Index of a node within the tree arena. The root is always index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NodeData {
    pub(crate) kind: SyntaxKind,
    pub(crate) span: Range<usize>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) field: Option<Field>,
}

/// An immutable parse result: the node arena plus the source it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
    pub(crate) source: String,
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) line_index: LineIndex,
}

impl SyntaxTree {
    pub fn root(&self) -> Node<'_> {
        Node {
            tree: self,
            id: NodeId(0),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn node(&self, id: NodeId) -> Node<'_> {
        debug_assert!(id.0 < self.nodes.len());
        Node { tree: self, id }
    }

    /// The smallest node whose span contains `offset`.
    ///
    /// Offsets at or past the end of the buffer resolve to the root.
    pub fn node_at_byte(&self, offset: usize) -> Node<'_> {
        let mut current = self.root();
        'descend: loop {
            for child in current.children() {
                let span = child.span();
                if span.start <= offset && offset < span.end {
                    current = child;
                    continue 'descend;
                }
            }
            return current;
        }
    }

    /// The smallest node containing a row/column position.
    pub fn node_at_position(&self, pos: Position) -> Result<Node<'_>, PositionLookupError> {
        let row_start = self
            .line_index
            .row_start(pos.row)
            .ok_or(PositionLookupError::NotFound {
                row: pos.row,
                column: pos.column,
            })?;
        let mut offset = row_start;
        let mut column = 0;
        for (i, ch) in self.source[row_start..].char_indices() {
            if column == pos.column {
                offset = row_start + i;
                break;
            }
            if ch == '\n' {
                return Err(PositionLookupError::NotFound {
                    row: pos.row,
                    column: pos.column,
                });
            }
            column += 1;
            offset = row_start + i + ch.len_utf8();
        }
        Ok(self.node_at_byte(offset))
    }

    /// S-expression dump of the named structure, for golden-file tests.
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        write_sexp(&mut out, self.root());
        out
    }
}

fn write_sexp(out: &mut String, node: Node<'_>) {
    debug_assert!(node.is_named());
    let _ = write!(out, "({}", node.kind().name());
    for child in node.children() {
        if !child.is_named() {
            continue;
        }
        out.push(' ');
        if let Some(field) = child.field() {
            let _ = write!(out, "{}: ", field.name());
        }
        write_sexp(out, child);
    }
    out.push(')');
}

/// A handle to one node: the tree plus an arena index.
#[derive(Debug, Clone, Copy)]
pub struct Node<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> Node<'t> {
    fn data(&self) -> &'t NodeData {
        &self.tree.nodes[self.id.0]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    pub fn is_named(&self) -> bool {
        self.data().kind.is_named()
    }

    pub fn span(&self) -> Range<usize> {
        self.data().span.clone()
    }

    /// The source text this node covers.
    pub fn text(&self) -> &'t str {
        &self.tree.source[self.data().span.clone()]
    }

    pub fn field(&self) -> Option<Field> {
        self.data().field
    }

    pub fn parent(&self) -> Option<Node<'t>> {
        self.data().parent.map(|id| self.tree.node(id))
    }

    pub fn children(&self) -> impl Iterator<Item = Node<'t>> + 't {
        let tree = self.tree;
        self.data().children.iter().map(move |id| tree.node(*id))
    }

    pub fn named_children(&self) -> impl Iterator<Item = Node<'t>> + 't {
        self.children().filter(|n| n.is_named())
    }

    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    pub fn child(&self, index: usize) -> Option<Node<'t>> {
        self.data()
            .children
            .get(index)
            .map(|id| self.tree.node(*id))
    }

    /// Fetch a tagged child directly, without scanning siblings by kind.
    pub fn child_by_field(&self, field: Field) -> Option<Node<'t>> {
        self.children().find(|n| n.data().field == Some(field))
    }

    pub fn child_by_field_name(&self, name: &str) -> Option<Node<'t>> {
        Field::from_name(name).and_then(|f| self.child_by_field(f))
    }

    fn index_in_parent(&self) -> Option<(Node<'t>, usize)> {
        let parent = self.parent()?;
        let index = parent
            .data()
            .children
            .iter()
            .position(|id| *id == self.id)?;
        Some((parent, index))
    }

    pub fn next_sibling(&self) -> Option<Node<'t>> {
        let (parent, index) = self.index_in_parent()?;
        parent.child(index + 1)
    }

    pub fn prev_sibling(&self) -> Option<Node<'t>> {
        let (parent, index) = self.index_in_parent()?;
        index.checked_sub(1).and_then(|i| parent.child(i))
    }

    pub fn start_position(&self) -> Position {
        self.tree
            .line_index
            .position(&self.tree.source, self.data().span.start)
    }

    pub fn end_position(&self) -> Position {
        self.tree
            .line_index
            .position(&self.tree.source, self.data().span.end)
    }
}

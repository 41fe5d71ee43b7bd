//! Arena construction for the syntax tree
//!
//!     The parser emits nodes strictly left to right, so the builder keeps a
//!     stack of open interior nodes and appends leaves to whichever node is
//!     on top. Spans of interior nodes are fixed when they are closed, from
//!     the spans of their children (or the explicit span passed at open time
//!     for nodes that cover structural skips).

use std::ops::Range;

use super::range::LineIndex;
use super::{Field, NodeData, NodeId, SyntaxKind, SyntaxTree};

pub struct TreeBuilder {
    nodes: Vec<NodeData>,
    stack: Vec<NodeId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        let root = NodeData {
            kind: SyntaxKind::SourceFile,
            span: 0..0,
            parent: None,
            children: Vec::new(),
            field: None,
        };
        Self {
            nodes: vec![root],
            stack: vec![NodeId(0)],
        }
    }

    fn attach(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = *self.stack.last().expect("builder stack is never empty");
        self.nodes.push(NodeData {
            parent: Some(parent),
            ..data
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Open an interior node. Its span is computed from its children on
    /// [`close`](Self::close).
    pub fn open(&mut self, kind: SyntaxKind, field: Option<Field>) {
        let id = self.attach(NodeData {
            kind,
            span: 0..0,
            parent: None,
            children: Vec::new(),
            field,
        });
        self.stack.push(id);
    }

    /// Close the innermost open node, fixing its span to cover its children.
    /// `fallback_start` positions childless nodes (zero-width).
    pub fn close(&mut self, fallback_start: usize) {
        let id = self.stack.pop().expect("close without matching open");
        assert!(!self.stack.is_empty(), "cannot close the root");
        let span = {
            let children = &self.nodes[id.0].children;
            match (children.first(), children.last()) {
                (Some(first), Some(last)) => {
                    self.nodes[first.0].span.start..self.nodes[last.0].span.end
                }
                _ => fallback_start..fallback_start,
            }
        };
        self.nodes[id.0].span = span;
    }

    /// Append a leaf token.
    pub fn token(&mut self, kind: SyntaxKind, span: Range<usize>, field: Option<Field>) {
        self.attach(NodeData {
            kind,
            span,
            parent: None,
            children: Vec::new(),
            field,
        });
    }

    /// Copy a subtree out of another tree, shifting every span by `delta`.
    ///
    /// Used by incremental reparse to carry undamaged records into the new
    /// tree without re-lexing them.
    pub fn copy_subtree(&mut self, source: &SyntaxTree, node: NodeId, delta: isize) {
        let data = &source.nodes[node.0];
        let span = shift(&data.span, delta);
        if data.children.is_empty() {
            self.token(data.kind, span, data.field);
            return;
        }
        self.open(data.kind, data.field);
        let children = data.children.clone();
        for child in children {
            self.copy_subtree(source, child, delta);
        }
        self.close(span.start);
    }

    /// Finish the tree, fixing the root span to cover the whole buffer.
    pub fn finish(mut self, source: String) -> SyntaxTree {
        assert_eq!(self.stack.len(), 1, "unclosed nodes at finish");
        self.nodes[0].span = 0..source.len();
        let line_index = LineIndex::new(&source);
        SyntaxTree {
            source,
            nodes: self.nodes,
            line_index,
        }
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn shift(span: &Range<usize>, delta: isize) -> Range<usize> {
    let start = span.start as isize + delta;
    let end = span.end as isize + delta;
    debug_assert!(start >= 0 && end >= start);
    start as usize..end as usize
}

//! Test support utilities
//!
//!     Shared helpers for the unit and integration tests. The coverage
//!     check here is the lexer-completeness property: concatenating every
//!     leaf span in document order must reproduce the input exactly, with
//!     no gaps and no overlaps.

use std::ops::Range;

use crate::lang::tree::{Node, SyntaxTree};

/// All leaf spans in document order, anonymous leaves included.
pub fn leaf_spans(tree: &SyntaxTree) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    collect_leaves(tree.root(), &mut spans);
    spans
}

fn collect_leaves(node: Node<'_>, spans: &mut Vec<Range<usize>>) {
    if node.child_count() == 0 {
        // The root of an empty document is a childless source_file; its
        // zero-width span covers nothing and is not a leaf token.
        if !node.span().is_empty() || node.parent().is_some() {
            spans.push(node.span());
        }
        return;
    }
    for child in node.children() {
        collect_leaves(child, spans);
    }
}

/// Panic unless the tree's leaves cover the source exactly.
pub fn assert_total_coverage(tree: &SyntaxTree) {
    let mut cursor = 0;
    for span in leaf_spans(tree) {
        assert_eq!(
            span.start,
            cursor,
            "gap or overlap before {:?} in {:?}",
            span,
            tree.source()
        );
        assert!(span.end >= span.start);
        cursor = span.end;
    }
    assert_eq!(cursor, tree.source().len(), "leaves stop short of the end");
}

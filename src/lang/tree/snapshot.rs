//! Tree snapshot - a normalized serializable form of the syntax tree
//!
//!     Golden tests and external tooling want the tree as plain data rather
//!     than arena handles. The snapshot captures kind, span, field tag,
//!     leaf text, and children for every node (anonymous leaves included,
//!     so a snapshot accounts for every source byte) and serializes through
//!     serde to JSON or any other format.

use serde::{Deserialize, Serialize};

use super::{Node, SyntaxTree};

/// One node of the tree in normalized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    /// Kind name, e.g. "line", "format_code".
    pub kind: String,

    /// Byte span as (start, end).
    pub span: (usize, usize),

    /// Field tag on entry-line children ("key", "assignment", "value").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Source text, present on leaves only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<TreeSnapshot>,
}

/// Snapshot a single node and its descendants.
pub fn snapshot_node(node: Node<'_>) -> TreeSnapshot {
    let children: Vec<TreeSnapshot> = node.children().map(snapshot_node).collect();
    let span = node.span();
    TreeSnapshot {
        kind: node.kind().name().to_string(),
        span: (span.start, span.end),
        field: node.field().map(|f| f.name().to_string()),
        text: if children.is_empty() {
            Some(node.text().to_string())
        } else {
            None
        },
        children,
    }
}

/// Snapshot the whole tree from the root.
pub fn snapshot_tree(tree: &SyntaxTree) -> TreeSnapshot {
    snapshot_node(tree.root())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::parsing::parse;

    #[test]
    fn test_snapshot_covers_leaves() {
        let tree = parse("key=value\n");
        let snapshot = snapshot_tree(&tree);
        assert_eq!(snapshot.kind, "source_file");
        assert_eq!(snapshot.span, (0, 10));
        let line = &snapshot.children[0];
        assert_eq!(line.kind, "line");
        assert_eq!(line.children[0].field.as_deref(), Some("key"));
        assert_eq!(line.children[0].text.as_deref(), Some("key"));
    }

    #[test]
    fn test_snapshot_roundtrips_through_json() {
        let tree = parse("## note\nkey=§ab\n");
        let snapshot = snapshot_tree(&tree);
        let json = serde_json::to_string(&snapshot).expect("serializes");
        let back: TreeSnapshot = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, snapshot);
    }
}

//! Every node's span must be a valid slice of the source, nested inside its
//! parent, and consistent with position queries.

use mclang_parser::lang::testing::assert_total_coverage;
use mclang_parser::lang::tree::{Node, Position, SyntaxKind};
use mclang_parser::parse;

fn validate_node(node: Node<'_>, source: &str) {
    let span = node.span();
    assert!(span.start <= span.end, "span runs backwards: {:?}", span);
    assert!(
        span.end <= source.len(),
        "span {:?} exceeds source length {}",
        span,
        source.len()
    );
    assert!(
        source.get(span.clone()).is_some(),
        "span {:?} is not on char boundaries",
        span
    );
    if let Some(parent) = node.parent() {
        let outer = parent.span();
        assert!(
            outer.start <= span.start && span.end <= outer.end,
            "child {:?} escapes parent {:?}",
            span,
            outer
        );
    }
    for child in node.children() {
        validate_node(child, source);
    }
}

const SAMPLES: &[&str] = &[
    "",
    "\n",
    "key=value\n",
    "## comment only\n",
    "  padded=§a§b§c\n",
    "k=\\n\\n\\n\t tab comment\n",
    "broken line\r\nnext=ok\0",
    "a=%1$s %.3f %s ::%",
    "emoji=:smile: :_input_key.jump: :unclosed\n",
    "=empty key\nno equals\n\n\n",
];

#[test]
fn spans_are_valid_and_nested() {
    for source in SAMPLES {
        let tree = parse(source);
        validate_node(tree.root(), source);
        assert_total_coverage(&tree);
    }
}

#[test]
fn node_text_matches_slice() {
    let source = "item.name=§aApple\t# fruit\n";
    let tree = parse(source);
    let line = tree.root().child(0).unwrap();
    for child in line.children() {
        assert_eq!(child.text(), &source[child.span()]);
    }
}

#[test]
fn byte_lookup_finds_the_token_under_the_cursor() {
    let source = "key=§ax %s\n";
    let tree = parse(source);
    assert_eq!(tree.node_at_byte(0).kind(), SyntaxKind::Key);
    assert_eq!(tree.node_at_byte(3).kind(), SyntaxKind::Assignment);
    assert_eq!(tree.node_at_byte(4).kind(), SyntaxKind::FormatCode);
    assert_eq!(tree.node_at_byte(7).kind(), SyntaxKind::Text);
    assert_eq!(tree.node_at_byte(9).kind(), SyntaxKind::FormatSpecifier);
}

#[test]
fn position_queries_are_consistent() {
    let source = "a=1\nbb=§a2\n";
    let tree = parse(source);
    let second_line = tree.root().named_children().nth(1).unwrap();
    assert_eq!(second_line.start_position(), Position::new(1, 0));
    // '§' is one column wide even though it is two bytes.
    let value = second_line.child_by_field_name("value").unwrap();
    let last = value.children().last().unwrap();
    assert_eq!(last.start_position(), Position::new(1, 5));

    let found = tree.node_at_position(Position::new(1, 1)).unwrap();
    assert_eq!(found.kind(), SyntaxKind::Key);
}

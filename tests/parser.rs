//! End-to-end parses of representative `.lang` documents.

use mclang_parser::lang::ast::{Line, ValueFragment};
use mclang_parser::{parse, parse_document};

#[test]
fn simple_entry() {
    let document = parse_document("key=value\n");
    assert_eq!(document.lines.len(), 1);
    let entry = document.get("key").expect("entry exists");
    assert_eq!(entry.key, "key");
    let value = entry.value.as_ref().expect("value present");
    assert_eq!(
        value.fragments,
        vec![ValueFragment::RawText {
            text: "value".to_string(),
            span: 4..9,
        }]
    );
}

#[test]
fn comment_line() {
    let document = parse_document("## a comment\n");
    match &document.lines[0] {
        Line::Comment(comment) => assert_eq!(comment.text, "## a comment"),
        other => panic!("expected comment, got {other:?}"),
    }
}

#[test]
fn escaped_linebreak_splits_value() {
    let document = parse_document("key=va\\nlue\n");
    let entry = document.get("key").unwrap();
    let fragments = &entry.value.as_ref().unwrap().fragments;
    assert_eq!(fragments.len(), 3);
    assert!(matches!(&fragments[0], ValueFragment::RawText { text, .. } if text == "va"));
    assert!(matches!(&fragments[1], ValueFragment::Linebreak { .. }));
    assert!(matches!(&fragments[2], ValueFragment::RawText { text, .. } if text == "lue"));
}

#[test]
fn inline_comment_after_tab() {
    let document = parse_document("key=value\t# note\n");
    let entry = document.get("key").unwrap();
    assert!(
        matches!(&entry.value.as_ref().unwrap().fragments[0],
        ValueFragment::RawText { text, .. } if text == "value")
    );
    assert_eq!(entry.inline_comment.as_deref(), Some("# note"));
}

#[test]
fn unclosed_placeholders_degrade_to_text() {
    // `%unknown%` has no closing input-key delimiter in this dialect, and
    // `%u` is no format specifier: plain text either way.
    let document = parse_document("key=%unknown%\n");
    let entry = document.get("key").unwrap();
    assert_eq!(
        entry.value.as_ref().unwrap().fragments,
        vec![ValueFragment::RawText {
            text: "%unknown%".to_string(),
            span: 4..13,
        }]
    );

    let document = parse_document("key=%open\n");
    let entry = document.get("key").unwrap();
    assert_eq!(
        entry.value.as_ref().unwrap().fragments,
        vec![ValueFragment::RawText {
            text: "%open".to_string(),
            span: 4..9,
        }]
    );
}

#[test]
fn leading_whitespace_is_structural() {
    let padded = parse_document("   key=value\n");
    let plain = parse_document("key=value\n");
    let padded_entry = padded.get("key").unwrap();
    let plain_entry = plain.get("key").unwrap();
    assert_eq!(padded_entry.key, plain_entry.key);
    assert_eq!(
        padded_entry.value.as_ref().unwrap().fragments.len(),
        plain_entry.value.as_ref().unwrap().fragments.len()
    );
}

#[test]
fn realistic_file() {
    let source = "\
## Item names\n\
item.apple.name=Apple\n\
item.apple.desc=§aShiny!§r Eat with :_input_key.use:\\nRestores %d hunger\t# keep short\n\
\n\
## Menu\n\
menu.play=Play %1$s :smile:\n";
    let document = parse_document(source);
    assert_eq!(document.lines.len(), 6);

    let desc = document.get("item.apple.desc").unwrap();
    let fragments = &desc.value.as_ref().unwrap().fragments;
    let kinds: Vec<&str> = fragments
        .iter()
        .map(|f| match f {
            ValueFragment::RawText { .. } => "text",
            ValueFragment::Linebreak { .. } => "linebreak",
            ValueFragment::FormatCode { .. } => "format_code",
            ValueFragment::InputKey { .. } => "input_key",
            ValueFragment::FormatSpecifier { .. } => "format_specifier",
            ValueFragment::Emoji { .. } => "emoji",
            ValueFragment::SingleChar { .. } => "single_char",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "format_code",
            "text",
            "format_code",
            "text",
            "input_key",
            "linebreak",
            "text",
            "format_specifier",
            "text",
        ]
    );
    assert_eq!(desc.inline_comment.as_deref(), Some("# keep short"));

    let play = document.get("menu.play").unwrap();
    assert!(play
        .value
        .as_ref()
        .unwrap()
        .fragments
        .iter()
        .any(|f| matches!(f, ValueFragment::Emoji { name, .. } if name == "smile")));
}

#[test]
fn nul_terminates_last_record() {
    let document = parse_document("a=1\nb=2\0");
    assert!(document.get("a").is_some());
    assert!(document.get("b").is_some());
    assert_eq!(document.lines.len(), 2);
}

#[test]
fn malformed_lines_stay_isolated() {
    let source = "good=1\nthis line is broken\nalso.good=2\n";
    let document = parse_document(source);
    assert!(document.get("good").is_some());
    assert!(document.get("also.good").is_some());
    assert!(matches!(document.lines[1], Line::Error(_)));
}

#[test]
fn sexp_matches_grammar_vocabulary() {
    let tree = parse("key=§ax\\n%s\t#n\n");
    assert_eq!(
        tree.to_sexp(),
        "(source_file (line key: (key) assignment: (assignment) \
         value: (value (format_code) (text) (linebreak) (format_specifier)) \
         (inline_comment)))"
    );
}

//! Incremental reparse at edit boundaries
//!
//!     Records are independent of each other, so an edit only damages the
//!     records it touches. Reparsing walks the old tree's record groups,
//!     carries the clean head over unchanged, re-lexes the damaged byte
//!     range against the new buffer, and carries the clean tail over with
//!     spans shifted by the edit's size delta. The result is byte-for-byte
//!     identical to a full parse of the new buffer.
//!
//!     Boundary records are treated as damaged: an insertion at the exact
//!     start of a record can merge with it (and a `\n` inserted after a
//!     stray `\r` merges into a CRLF terminator), so cleanliness requires
//!     strict distance from the edit on both sides.

use std::fmt;
use std::ops::Range;

use crate::lang::parsing::parse_region_into;
use crate::lang::tree::{NodeId, SyntaxKind, SyntaxTree, TreeBuilder};

/// A byte-range edit against a previously parsed buffer: the bytes
/// `start_byte..old_end_byte` of the old buffer were replaced by the bytes
/// `start_byte..new_end_byte` of the new buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEdit {
    pub start_byte: usize,
    pub old_end_byte: usize,
    pub new_end_byte: usize,
}

/// Errors for edits that do not describe the buffers they claim to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// An edit offset is past the end of its buffer.
    OutOfBounds { offset: usize, len: usize },
    /// The edit range runs backwards.
    BackwardsRange { start: usize, end: usize },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::OutOfBounds { offset, len } => {
                write!(f, "Edit offset {} is past the buffer end {}", offset, len)
            }
            EditError::BackwardsRange { start, end } => {
                write!(f, "Edit range runs backwards: {}..{}", start, end)
            }
        }
    }
}

impl std::error::Error for EditError {}

/// Reparse after an edit, re-lexing only the damaged records.
pub fn reparse(
    old: &SyntaxTree,
    new_source: &str,
    edit: InputEdit,
) -> Result<SyntaxTree, EditError> {
    if edit.old_end_byte < edit.start_byte {
        return Err(EditError::BackwardsRange {
            start: edit.start_byte,
            end: edit.old_end_byte,
        });
    }
    if edit.new_end_byte < edit.start_byte {
        return Err(EditError::BackwardsRange {
            start: edit.start_byte,
            end: edit.new_end_byte,
        });
    }
    if edit.old_end_byte > old.source().len() {
        return Err(EditError::OutOfBounds {
            offset: edit.old_end_byte,
            len: old.source().len(),
        });
    }
    if edit.new_end_byte > new_source.len() {
        return Err(EditError::OutOfBounds {
            offset: edit.new_end_byte,
            len: new_source.len(),
        });
    }
    debug_assert_eq!(
        &old.source()[..edit.start_byte],
        &new_source[..edit.start_byte],
        "buffers disagree before the edit"
    );

    let delta = edit.new_end_byte as isize - edit.old_end_byte as isize;
    let records = record_groups(old);

    let mut head_end = 0;
    let mut tail_start_old = old.source().len();
    let mut head: Vec<NodeId> = Vec::new();
    let mut tail: Vec<NodeId> = Vec::new();
    for (span, nodes) in &records {
        if span.end < edit.start_byte {
            head_end = span.end;
            head.extend_from_slice(nodes);
        } else if span.start > edit.old_end_byte {
            tail_start_old = tail_start_old.min(span.start);
            tail.extend_from_slice(nodes);
        }
    }
    if tail.is_empty() {
        tail_start_old = old.source().len();
    }
    let tail_start_new = (tail_start_old as isize + delta) as usize;

    let mut builder = TreeBuilder::new();
    for id in head {
        builder.copy_subtree(old, id, 0);
    }
    parse_region_into(&mut builder, new_source, head_end..tail_start_new);
    for id in tail {
        builder.copy_subtree(old, id, delta);
    }
    Ok(builder.finish(new_source.to_string()))
}

/// Group the root's children into records: a line node plus the terminator
/// that closes it, a bare terminator (blank record), or a stray-carriage
/// error node.
fn record_groups(tree: &SyntaxTree) -> Vec<(Range<usize>, Vec<NodeId>)> {
    let mut groups: Vec<(Range<usize>, Vec<NodeId>)> = Vec::new();
    let mut line_open = false;
    for child in tree.root().children() {
        let span = child.span();
        match child.kind() {
            SyntaxKind::Line => {
                groups.push((span, vec![child.id()]));
                line_open = true;
            }
            SyntaxKind::Terminator if line_open => {
                let last = groups.last_mut().expect("open line exists");
                last.0.end = span.end;
                last.1.push(child.id());
                line_open = false;
            }
            _ => {
                // Bare terminator or stray-carriage error.
                groups.push((span, vec![child.id()]));
                line_open = false;
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::parsing::parse;

    /// Apply `edit` textually and check the incremental result against a
    /// full parse of the outcome.
    fn check(old_source: &str, edit: InputEdit, replacement: &str) {
        let mut new_source = String::new();
        new_source.push_str(&old_source[..edit.start_byte]);
        new_source.push_str(replacement);
        new_source.push_str(&old_source[edit.old_end_byte..]);
        assert_eq!(edit.new_end_byte, edit.start_byte + replacement.len());

        let old = parse(old_source);
        let incremental = reparse(&old, &new_source, edit).expect("valid edit");
        let full = parse(&new_source);
        assert_eq!(incremental, full, "edit {:?} on {:?}", edit, old_source);
    }

    #[test]
    fn test_edit_inside_one_value() {
        check(
            "a=1\nb=2\nc=3\n",
            InputEdit {
                start_byte: 6,
                old_end_byte: 7,
                new_end_byte: 11,
            },
            "§axy",
        );
    }

    #[test]
    fn test_insert_new_line_between_records() {
        check(
            "a=1\nc=3\n",
            InputEdit {
                start_byte: 4,
                old_end_byte: 4,
                new_end_byte: 8,
            },
            "b=2\n",
        );
    }

    #[test]
    fn test_delete_a_newline_merges_records() {
        check(
            "a=1\nb=2\n",
            InputEdit {
                start_byte: 3,
                old_end_byte: 4,
                new_end_byte: 3,
            },
            "",
        );
    }

    #[test]
    fn test_edit_at_start_and_end() {
        check(
            "a=1\nb=2\n",
            InputEdit {
                start_byte: 0,
                old_end_byte: 1,
                new_end_byte: 3,
            },
            "##x",
        );
        check(
            "a=1\nb=2\n",
            InputEdit {
                start_byte: 8,
                old_end_byte: 8,
                new_end_byte: 10,
            },
            "c=",
        );
    }

    #[test]
    fn test_inserted_newline_after_stray_carriage() {
        // The stray `\r` record borders the edit; it must be re-lexed so the
        // inserted `\n` can fuse into a CRLF terminator.
        check(
            "a\rb=2\n",
            InputEdit {
                start_byte: 2,
                old_end_byte: 2,
                new_end_byte: 3,
            },
            "\n",
        );
    }

    #[test]
    fn test_whole_buffer_replacement() {
        check(
            "a=1\n",
            InputEdit {
                start_byte: 0,
                old_end_byte: 4,
                new_end_byte: 9,
            },
            "## x\nk=v\n",
        );
    }

    #[test]
    fn test_invalid_edits_are_rejected() {
        let old = parse("a=1\n");
        assert_eq!(
            reparse(
                &old,
                "a=1\n",
                InputEdit {
                    start_byte: 3,
                    old_end_byte: 1,
                    new_end_byte: 3,
                }
            ),
            Err(EditError::BackwardsRange { start: 3, end: 1 })
        );
        assert_eq!(
            reparse(
                &old,
                "a=1\n",
                InputEdit {
                    start_byte: 0,
                    old_end_byte: 9,
                    new_end_byte: 0,
                }
            ),
            Err(EditError::OutOfBounds { offset: 9, len: 4 })
        );
    }
}

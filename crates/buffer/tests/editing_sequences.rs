// Chunk: docs/chunks/text_buffer - Line-oriented text buffer with gap buffer backing

//! Integration tests for realistic editing sequences.
//!
//! These tests verify that the gap buffer and line index stay in sync
//! through mixed point inserts and range removes.

use deskedit_buffer::{Loc, TextBuffer};

/// Joins the buffer line by line, the way a view materializes it.
fn materialize(buf: &TextBuffer) -> String {
    (0..buf.lines_num())
        .map(|y| buf.line(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_type_multiple_lines_then_edit_middle() {
    let mut buf = TextBuffer::new();

    let mut at = Loc::ORIGIN;
    for line in ["first line", "second line", "third line"] {
        at = buf.insert(at, line);
        if line != "third line" {
            at = buf.insert(at, "\n");
        }
    }

    assert_eq!(buf.lines_num(), 3);
    assert_eq!(buf.line(0), "first line");
    assert_eq!(buf.line(2), "third line");

    buf.insert(Loc::new(7, 1), "awesome ");
    assert_eq!(buf.line(1), "second awesome line");
    assert_eq!(materialize(&buf), buf.content());
}

#[test]
fn test_split_and_rejoin_lines() {
    let mut buf = TextBuffer::from_str("helloworld");

    buf.insert(Loc::new(5, 0), "\n");
    assert_eq!(buf.lines_num(), 2);
    assert_eq!(buf.line(0), "hello");
    assert_eq!(buf.line(1), "world");

    buf.remove(Loc::new(5, 0), Loc::new(0, 1));
    assert_eq!(buf.lines_num(), 1);
    assert_eq!(buf.content(), "helloworld");
}

#[test]
fn test_full_range_rewrite_repeatedly() {
    let mut buf = TextBuffer::from_str("v0");

    for i in 1..=20 {
        let content = (0..i).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n");
        let end = buf.end();
        buf.remove(Loc::ORIGIN, end);
        buf.insert(Loc::ORIGIN, &content);

        assert_eq!(buf.content(), content);
        assert_eq!(buf.lines_num(), i);
        assert_eq!(materialize(&buf), content);
    }
}

#[test]
fn test_remove_across_many_lines() {
    let source: String = (0..100).map(|n| format!("{n}\n")).collect();
    let mut buf = TextBuffer::from_str(&source);
    assert_eq!(buf.lines_num(), 101);

    buf.remove(Loc::new(0, 10), Loc::new(0, 90));
    assert_eq!(buf.lines_num(), 21);
    assert_eq!(buf.line(9), "9");
    assert_eq!(buf.line(10), "90");
}

#[test]
fn test_unicode_columns_are_characters() {
    let mut buf = TextBuffer::from_str("naïve\ncafé");
    assert_eq!(buf.line_len(0), 5);
    buf.insert(Loc::new(4, 1), "s");
    assert_eq!(buf.line(1), "cafés");
    assert_eq!(buf.end(), Loc::new(5, 1));
}

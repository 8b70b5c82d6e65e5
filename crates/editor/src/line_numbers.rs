// Chunk: docs/chunks/line_number_gutter - Bounded line-number column
//!
//! Line-number gutter text derived from view content.
//!
//! The gutter is a bounded-cost approximation: at most
//! [`MAX_RENDERED_LINES`] rows are produced, followed by a `...` marker when
//! the document is longer. Large content is counted with a byte scan so no
//! line array is built.

use serde::{Deserialize, Serialize};

/// Content at or above this many bytes is counted by scanning for `\n`.
pub const SCAN_THRESHOLD: usize = 10_000;

/// Maximum number of numbered rows in the gutter.
pub const MAX_RENDERED_LINES: usize = 1000;

/// Row appended when the document has more lines than the gutter shows.
pub const TRUNCATION_MARKER: &str = "...";

/// How row labels are padded to a common width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    /// `007`
    #[default]
    Zero,
    /// `  7`
    Space,
}

/// A rendered gutter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineNumbers {
    /// One row per line, newline-terminated, plus the marker row if truncated.
    pub text: String,
    /// True line count of the content.
    pub line_count: usize,
    /// Whether rows were capped.
    pub truncated: bool,
}

impl LineNumbers {
    /// Number of rows in `text`, including the marker.
    pub fn row_count(&self) -> usize {
        self.text.lines().count()
    }
}

/// Counts lines: one more than the number of `\n` bytes.
pub fn count_lines(content: &str) -> usize {
    if content.len() < SCAN_THRESHOLD {
        content.split('\n').count()
    } else {
        1 + content.bytes().filter(|&b| b == b'\n').count()
    }
}

/// Renders the gutter for `content`.
pub fn render_line_numbers(content: &str, padding: Padding) -> LineNumbers {
    let line_count = count_lines(content);
    let rendered = line_count.min(MAX_RENDERED_LINES);
    let truncated = line_count > MAX_RENDERED_LINES;
    let width = digits(rendered);

    let mut text = String::with_capacity((rendered + 1) * (width + 1));
    for n in 1..=rendered {
        match padding {
            Padding::Zero => text.push_str(&format!("{n:0width$}\n")),
            Padding::Space => text.push_str(&format!("{n:>width$}\n")),
        }
    }
    if truncated {
        text.push_str(TRUNCATION_MARKER);
        text.push('\n');
    }

    LineNumbers {
        text,
        line_count,
        truncated,
    }
}

fn digits(n: usize) -> usize {
    n.max(1).to_string().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(numbers: &LineNumbers) -> Vec<&str> {
        numbers.text.lines().collect()
    }

    #[test]
    fn test_empty_content_has_one_row() {
        let numbers = render_line_numbers("", Padding::Zero);
        assert_eq!(numbers.line_count, 1);
        assert_eq!(rows(&numbers), vec!["1"]);
        assert!(!numbers.truncated);
    }

    #[test]
    fn test_trailing_newline_counts_a_line() {
        let numbers = render_line_numbers("a\nb\n", Padding::Zero);
        assert_eq!(numbers.line_count, 3);
    }

    #[test]
    fn test_zero_padding_to_widest_number() {
        let content = "x\n".repeat(11);
        let numbers = render_line_numbers(&content, Padding::Zero);
        assert_eq!(numbers.line_count, 12);
        let rows = rows(&numbers);
        assert_eq!(rows[0], "01");
        assert_eq!(rows[11], "12");
    }

    #[test]
    fn test_space_padding_right_aligns() {
        let content = "x\n".repeat(9);
        let numbers = render_line_numbers(&content, Padding::Space);
        let rows = rows(&numbers);
        assert_eq!(rows[0], " 1");
        assert_eq!(rows[9], "10");
    }

    #[test]
    fn test_scan_and_split_agree_at_threshold() {
        let below = "ab\n".repeat(SCAN_THRESHOLD / 3);
        let mut at = below.clone();
        while at.len() < SCAN_THRESHOLD {
            at.push('\n');
        }
        assert!(below.len() < SCAN_THRESHOLD);
        let extra = at.len() - below.len();
        assert_eq!(count_lines(&at), count_lines(&below) + extra);
    }

    #[test]
    fn test_exactly_at_cap_is_not_truncated() {
        let content = "\n".repeat(MAX_RENDERED_LINES - 1);
        let numbers = render_line_numbers(&content, Padding::Zero);
        assert_eq!(numbers.line_count, MAX_RENDERED_LINES);
        assert_eq!(numbers.row_count(), MAX_RENDERED_LINES);
        assert!(!numbers.truncated);
    }

    #[test]
    fn test_over_cap_appends_marker() {
        let content = "\n".repeat(MAX_RENDERED_LINES);
        let numbers = render_line_numbers(&content, Padding::Zero);
        assert_eq!(numbers.line_count, MAX_RENDERED_LINES + 1);
        assert!(numbers.truncated);
        let rows = rows(&numbers);
        assert_eq!(rows.len(), MAX_RENDERED_LINES + 1);
        assert_eq!(rows[MAX_RENDERED_LINES - 1], "1000");
        assert_eq!(rows[MAX_RENDERED_LINES], TRUNCATION_MARKER);
    }

    #[test]
    fn test_large_document_counts_all_lines() {
        let content = "line\n".repeat(50_000);
        let numbers = render_line_numbers(&content, Padding::Zero);
        assert_eq!(numbers.line_count, 50_001);
        assert_eq!(numbers.row_count(), MAX_RENDERED_LINES + 1);
        // Width follows the largest rendered number, not the true count.
        assert_eq!(rows(&numbers)[0], "0001");
    }

    #[test]
    fn test_padding_serializes_lowercase() {
        let json = serde_json::to_string(&Padding::Space).unwrap();
        assert_eq!(json, "\"space\"");
    }
}

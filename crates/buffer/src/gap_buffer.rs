// Chunk: docs/chunks/text_buffer - Line-oriented text buffer with gap buffer backing

//! Gap buffer storage for the text buffer.
//!
//! Characters live in a single array with a movable gap. Edits are applied by
//! moving the gap to the edit offset, then either filling the gap (insert) or
//! widening it over the removed range (remove). Both are O(edit size) once the
//! gap is in place.

const INITIAL_GAP_SIZE: usize = 64;
const GAP_GROWTH_FACTOR: usize = 2;

/// Character storage with a movable gap.
#[derive(Debug)]
pub struct GapBuffer {
    /// `[pre-gap content | gap | post-gap content]`
    data: Vec<char>,
    gap_start: usize,
    gap_end: usize,
}

impl GapBuffer {
    pub fn new() -> Self {
        Self {
            data: vec!['\0'; INITIAL_GAP_SIZE],
            gap_start: 0,
            gap_end: INITIAL_GAP_SIZE,
        }
    }

    pub fn from_str(text: &str) -> Self {
        let mut data: Vec<char> = text.chars().collect();
        let len = data.len();
        data.resize(len + INITIAL_GAP_SIZE, '\0');

        Self {
            gap_start: len,
            gap_end: data.len(),
            data,
        }
    }

    /// Logical length in characters (excluding the gap).
    pub fn len(&self) -> usize {
        self.data.len() - self.gap_len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Moves the gap so that it starts at logical position `pos`.
    ///
    /// O(distance) between the old and new gap position.
    fn move_gap_to(&mut self, pos: usize) {
        let pos = pos.min(self.len());

        if pos < self.gap_start {
            let shift = self.gap_start - pos;
            self.data.copy_within(pos..self.gap_start, self.gap_end - shift);
            self.gap_start = pos;
            self.gap_end -= shift;
        } else if pos > self.gap_start {
            let shift = pos - self.gap_start;
            self.data.copy_within(self.gap_end..self.gap_end + shift, self.gap_start);
            self.gap_start += shift;
            self.gap_end += shift;
        }
    }

    /// Grows the gap in place to at least `min_size`, keeping its position.
    fn ensure_gap(&mut self, min_size: usize) {
        if self.gap_len() >= min_size {
            return;
        }

        let needed = min_size - self.gap_len();
        let growth = needed.max(self.data.len() * GAP_GROWTH_FACTOR);

        let old_len = self.data.len();
        let post_gap_len = old_len - self.gap_end;
        let new_size = old_len + growth;
        self.data.resize(new_size, '\0');

        if post_gap_len > 0 {
            self.data.copy_within(self.gap_end..old_len, new_size - post_gap_len);
        }
        self.gap_end = new_size - post_gap_len;
    }

    /// Inserts `text` at logical position `pos` and returns the number of
    /// characters inserted.
    pub fn insert_str_at(&mut self, pos: usize, text: &str) -> usize {
        let count = text.chars().count();
        self.move_gap_to(pos);
        self.ensure_gap(count);
        for ch in text.chars() {
            self.data[self.gap_start] = ch;
            self.gap_start += 1;
        }
        count
    }

    /// Removes the logical range `[start, end)` and returns the removed text.
    ///
    /// The range is clamped to the buffer length.
    pub fn remove_range(&mut self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        let start = start.min(end);
        let removed = self.slice(start, end);

        self.move_gap_to(start);
        self.gap_end += end - start;
        removed
    }

    pub fn char_at(&self, pos: usize) -> Option<char> {
        if pos >= self.len() {
            return None;
        }
        let physical = if pos < self.gap_start { pos } else { pos + self.gap_len() };
        Some(self.data[physical])
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.data[..self.gap_start]
            .iter()
            .chain(self.data[self.gap_end..].iter())
            .copied()
    }

    /// Returns the logical range `[start, end)` as a String.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        if start >= end {
            return String::new();
        }
        self.chars().skip(start).take(end - start).collect()
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GapBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ch in self.chars() {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_empty() {
        let buf = GapBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.to_string(), "");
    }

    #[test]
    fn test_insert_in_middle() {
        let mut buf = GapBuffer::from_str("held");
        let inserted = buf.insert_str_at(3, "lo wor");
        assert_eq!(inserted, 6);
        assert_eq!(buf.to_string(), "hello world");
    }

    #[test]
    fn test_insert_past_end_appends() {
        let mut buf = GapBuffer::from_str("abc");
        buf.insert_str_at(99, "d");
        assert_eq!(buf.to_string(), "abcd");
    }

    #[test]
    fn test_remove_range() {
        let mut buf = GapBuffer::from_str("hello world");
        let removed = buf.remove_range(5, 11);
        assert_eq!(removed, " world");
        assert_eq!(buf.to_string(), "hello");
    }

    #[test]
    fn test_remove_range_clamps() {
        let mut buf = GapBuffer::from_str("abc");
        assert_eq!(buf.remove_range(1, 100), "bc");
        assert_eq!(buf.to_string(), "a");
        assert_eq!(buf.remove_range(5, 9), "");
    }

    #[test]
    fn test_edits_on_both_sides_of_gap() {
        let mut buf = GapBuffer::from_str("0123456789");
        buf.remove_range(2, 4);
        buf.insert_str_at(6, "xy");
        buf.insert_str_at(0, "<");
        assert_eq!(buf.to_string(), "<014567xy89");
        assert_eq!(buf.char_at(0), Some('<'));
        assert_eq!(buf.char_at(7), Some('x'));
        assert_eq!(buf.char_at(11), None);
    }

    #[test]
    fn test_large_insert_grows_gap() {
        let mut buf = GapBuffer::new();
        let text = "x".repeat(10_000);
        buf.insert_str_at(0, &text);
        assert_eq!(buf.len(), 10_000);
        buf.insert_str_at(5_000, "|");
        assert_eq!(buf.char_at(5_000), Some('|'));
        assert_eq!(buf.len(), 10_001);
    }

    #[test]
    fn test_multibyte_chars_count_once() {
        let mut buf = GapBuffer::from_str("héllo");
        assert_eq!(buf.len(), 5);
        buf.remove_range(1, 2);
        assert_eq!(buf.to_string(), "hllo");
    }
}

// Chunk: docs/chunks/text_buffer - Line-oriented text buffer with gap buffer backing

//! Line start offsets for the text buffer.
//!
//! Keeps one character offset per line so line count is O(1) and line lookup
//! by offset is a binary search. Range edits update the index in bulk.

/// Tracks where each line starts, in character offsets.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// `line_starts[0] == 0` always; sorted ascending.
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new() -> Self {
        Self { line_starts: vec![0] }
    }

    /// Rebuilds the index from scratch. O(n) in content length.
    pub fn rebuild<I>(&mut self, content: I)
    where
        I: IntoIterator<Item = char>,
    {
        self.line_starts.clear();
        self.line_starts.push(0);

        for (offset, ch) in content.into_iter().enumerate() {
            if ch == '\n' {
                self.line_starts.push(offset + 1);
            }
        }
    }

    /// Number of lines. Always at least 1.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Offset just past the last character of `line`, excluding its newline.
    pub fn line_end(&self, line: usize, total_len: usize) -> Option<usize> {
        if line >= self.line_count() {
            return None;
        }
        if line + 1 < self.line_count() {
            Some(self.line_starts[line + 1] - 1)
        } else {
            Some(total_len)
        }
    }

    pub fn line_len(&self, line: usize, total_len: usize) -> Option<usize> {
        let start = self.line_start(line)?;
        let end = self.line_end(line, total_len)?;
        Some(end - start)
    }

    /// Line containing the character at `offset`.
    pub fn line_at_offset(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        }
    }

    /// Updates the index after `text` was inserted at `offset`.
    pub fn apply_insert(&mut self, offset: usize, text: &str) {
        let line = self.line_at_offset(offset);
        let inserted = text.chars().count();

        for start in self.line_starts.iter_mut().skip(line + 1) {
            *start += inserted;
        }

        let new_starts: Vec<usize> = text
            .chars()
            .enumerate()
            .filter(|(_, ch)| *ch == '\n')
            .map(|(i, _)| offset + i + 1)
            .collect();

        if !new_starts.is_empty() {
            let at = line + 1;
            self.line_starts.splice(at..at, new_starts);
        }
    }

    /// Updates the index after the character range `[start, end)` was removed.
    pub fn apply_remove(&mut self, start: usize, end: usize) {
        if end <= start {
            return;
        }
        let removed = end - start;

        // Lines that began inside the removed range merge into their predecessor.
        self.line_starts.retain(|&s| s <= start || s > end);
        for s in self.line_starts.iter_mut() {
            if *s > end {
                *s -= removed;
            }
        }
    }

    #[cfg(test)]
    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(content: &str) -> LineIndex {
        let mut index = LineIndex::new();
        index.rebuild(content.chars());
        index
    }

    #[test]
    fn test_rebuild_empty() {
        let index = index_of("");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_start(0), Some(0));
    }

    #[test]
    fn test_rebuild_multiple_lines() {
        let index = index_of("hello\nworld\n");
        assert_eq!(index.line_starts(), &[0, 6, 12]);
    }

    #[test]
    fn test_line_end_and_len() {
        let index = index_of("hello\nworld");
        assert_eq!(index.line_end(0, 11), Some(5));
        assert_eq!(index.line_end(1, 11), Some(11));
        assert_eq!(index.line_len(1, 11), Some(5));
        assert_eq!(index.line_len(2, 11), None);
    }

    #[test]
    fn test_line_at_offset() {
        let index = index_of("ab\ncd\nef");
        assert_eq!(index.line_at_offset(0), 0);
        assert_eq!(index.line_at_offset(2), 0);
        assert_eq!(index.line_at_offset(3), 1);
        assert_eq!(index.line_at_offset(7), 2);
    }

    #[test]
    fn test_apply_insert_matches_rebuild() {
        let mut index = index_of("ab\ncd");
        index.apply_insert(4, "x\ny\n");
        assert_eq!(index.line_starts(), index_of("ab\ncx\ny\nd").line_starts());
    }

    #[test]
    fn test_apply_insert_at_line_start() {
        let mut index = index_of("ab\ncd");
        index.apply_insert(3, "\n");
        assert_eq!(index.line_starts(), index_of("ab\n\ncd").line_starts());
    }

    #[test]
    fn test_apply_remove_joins_lines() {
        // "ab\ncd\nef" minus "b\ncd\n" (offsets 1..7) -> "aef"
        let mut index = index_of("ab\ncd\nef");
        index.apply_remove(1, 7);
        assert_eq!(index.line_starts(), &[0]);
    }

    #[test]
    fn test_apply_remove_within_line_shifts_following() {
        let mut index = index_of("abcd\nef\ngh");
        index.apply_remove(1, 3);
        assert_eq!(index.line_starts(), index_of("ad\nef\ngh").line_starts());
    }

    #[test]
    fn test_apply_remove_everything() {
        let mut index = index_of("a\nb\nc\n");
        index.apply_remove(0, 6);
        assert_eq!(index.line_starts(), &[0]);
    }
}

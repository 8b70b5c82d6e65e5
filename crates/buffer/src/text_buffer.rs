// Chunk: docs/chunks/text_buffer - Line-oriented text buffer with gap buffer backing
// Chunk: docs/chunks/buffer_file_io - Open and save through the buffer

//! TextBuffer is the line-oriented document the editor views bind to.
//!
//! It combines a gap buffer (character storage) with a line index (line
//! boundaries) and addresses text by [`Loc`]. Besides the edit operations it
//! carries the document's path and a modified flag, and knows how to load
//! itself from disk and write itself back.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::BufferError;
use crate::gap_buffer::GapBuffer;
use crate::line_index::LineIndex;
use crate::types::Loc;

/// A text document addressed by `(x, y)` locations.
#[derive(Debug, Default)]
pub struct TextBuffer {
    buffer: GapBuffer,
    line_index: LineIndex,
    path: Option<PathBuf>,
    modified: bool,
}

impl TextBuffer {
    /// Creates an empty, unnamed buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unnamed buffer holding `content`.
    ///
    /// Not `FromStr`: building a buffer from text cannot fail.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Self {
        let mut line_index = LineIndex::new();
        line_index.rebuild(content.chars());

        Self {
            buffer: GapBuffer::from_str(content),
            line_index,
            path: None,
            modified: false,
        }
    }

    /// Loads the file at `path`.
    ///
    /// Fails with [`BufferError::Io`] when the file cannot be read and with
    /// [`BufferError::InvalidUtf8`] when its bytes are not UTF-8 text.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BufferError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| BufferError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8(bytes).map_err(|_| BufferError::InvalidUtf8 {
            path: path.to_path_buf(),
        })?;

        let mut buffer = Self::from_str(&content);
        buffer.path = Some(path.to_path_buf());
        debug!(path = %path.display(), lines = buffer.lines_num(), "loaded buffer");
        Ok(buffer)
    }

    // ==================== Accessors ====================

    /// Number of lines. Always at least 1, even when empty.
    pub fn lines_num(&self) -> usize {
        self.line_index.line_count()
    }

    /// Content of line `y` without its newline. Empty when out of range.
    pub fn line(&self, y: usize) -> String {
        let total = self.buffer.len();
        match (self.line_index.line_start(y), self.line_index.line_end(y, total)) {
            (Some(start), Some(end)) => self.buffer.slice(start, end),
            _ => String::new(),
        }
    }

    /// Length of line `y` in characters, excluding the newline.
    pub fn line_len(&self, y: usize) -> usize {
        self.line_index.line_len(y, self.buffer.len()).unwrap_or(0)
    }

    /// Total size in characters, newlines included.
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The whole document as one string, lines joined by `\n`.
    pub fn content(&self) -> String {
        self.buffer.to_string()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    /// Whether the document changed since it was loaded or last saved.
    pub fn modified(&self) -> bool {
        self.modified
    }

    /// Location just past the last character.
    pub fn end(&self) -> Loc {
        let y = self.lines_num() - 1;
        Loc::new(self.line_len(y), y)
    }

    // ==================== Location Mapping ====================

    /// Clamps `loc` to an existing location.
    pub fn clamp_loc(&self, loc: Loc) -> Loc {
        let y = loc.y.min(self.lines_num() - 1);
        Loc::new(loc.x.min(self.line_len(y)), y)
    }

    fn loc_to_offset(&self, loc: Loc) -> usize {
        let loc = self.clamp_loc(loc);
        self.line_index.line_start(loc.y).unwrap_or(0) + loc.x
    }

    /// Converts a character offset back into a location.
    pub fn offset_to_loc(&self, offset: usize) -> Loc {
        let offset = offset.min(self.size());
        let y = self.line_index.line_at_offset(offset);
        let start = self.line_index.line_start(y).unwrap_or(0);
        Loc::new(offset - start, y)
    }

    // ==================== Mutations ====================

    /// Inserts `text` at `loc` (clamped) and returns the location just past
    /// the inserted text.
    pub fn insert(&mut self, loc: Loc, text: &str) -> Loc {
        let offset = self.loc_to_offset(loc);
        if text.is_empty() {
            return self.offset_to_loc(offset);
        }

        let inserted = self.buffer.insert_str_at(offset, text);
        self.line_index.apply_insert(offset, text);
        self.modified = true;
        self.offset_to_loc(offset + inserted)
    }

    /// Removes the text between two locations and returns it.
    ///
    /// The locations may come in either order and are clamped first.
    pub fn remove(&mut self, start: Loc, end: Loc) -> String {
        let (a, b) = (self.loc_to_offset(start), self.loc_to_offset(end));
        let (start, end) = (a.min(b), a.max(b));
        if start == end {
            return String::new();
        }

        let removed = self.buffer.remove_range(start, end);
        self.line_index.apply_remove(start, end);
        self.modified = true;
        removed
    }

    /// Replaces the whole document: removes the full range, then inserts
    /// `content` at the origin.
    pub fn replace_all(&mut self, content: &str) {
        let end = self.end();
        self.remove(Loc::ORIGIN, end);
        self.insert(Loc::ORIGIN, content);
    }

    // ==================== Persistence ====================

    /// Writes the document to its path and clears the modified flag.
    pub fn save(&mut self) -> Result<(), BufferError> {
        let path = self.path.clone().ok_or(BufferError::NoPath)?;
        self.write_to(&path)
    }

    /// Writes the document to `path`, which becomes the buffer's path.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<(), BufferError> {
        let path = path.into();
        self.write_to(&path)?;
        self.path = Some(path);
        Ok(())
    }

    fn write_to(&mut self, path: &Path) -> Result<(), BufferError> {
        fs::write(path, self.content()).map_err(|source| BufferError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.modified = false;
        debug!(path = %path.display(), "saved buffer");
        Ok(())
    }
}

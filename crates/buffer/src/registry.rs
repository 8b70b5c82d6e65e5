// Chunk: docs/chunks/buffer_registry - Process-wide open document registry

//! The open-document registry.
//!
//! Every buffer the shell works with is owned here from the moment it is
//! created or opened until it is explicitly closed. Views hold a [`BufferId`]
//! handle instead of the buffer itself, so several parts of the UI can refer
//! to the same document without copying it.
//!
//! The registry is also the place where "open the same file twice" is
//! prevented: [`BufferRegistry::open`] hands back the existing handle when a
//! buffer for that path is already open.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::BufferError;
use crate::text_buffer::TextBuffer;

/// Handle to a buffer owned by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(u64);

impl BufferId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Result of [`BufferRegistry::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// A buffer for this path was already open.
    Reused(BufferId),
    /// The file was read into a new buffer.
    Loaded(BufferId),
}

impl OpenOutcome {
    pub fn id(self) -> BufferId {
        match self {
            OpenOutcome::Reused(id) | OpenOutcome::Loaded(id) => id,
        }
    }
}

/// Owns every open buffer, keyed by [`BufferId`].
#[derive(Debug, Default)]
pub struct BufferRegistry {
    buffers: HashMap<BufferId, TextBuffer>,
    next_id: u64,
}

impl BufferRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn gen_id(&mut self) -> BufferId {
        let id = BufferId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Registers an existing buffer and returns its handle.
    pub fn insert(&mut self, buffer: TextBuffer) -> BufferId {
        let id = self.gen_id();
        self.buffers.insert(id, buffer);
        id
    }

    /// Creates an empty, unnamed buffer.
    pub fn create_empty(&mut self) -> BufferId {
        self.insert(TextBuffer::new())
    }

    /// Opens `path`, reusing the buffer already open for it if there is one.
    ///
    /// On failure nothing is registered.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<OpenOutcome, BufferError> {
        let path = normalize_path(path.as_ref());
        if let Some(id) = self.find_by_path(&path) {
            return Ok(OpenOutcome::Reused(id));
        }

        let buffer = TextBuffer::open(&path)?;
        let id = self.insert(buffer);
        info!(id = id.raw(), path = %path.display(), "opened buffer");
        Ok(OpenOutcome::Loaded(id))
    }

    /// Finds the open buffer whose path is `path`.
    pub fn find_by_path(&self, path: &Path) -> Option<BufferId> {
        let wanted = normalize_path(path);
        self.buffers
            .iter()
            .find(|(_, buf)| buf.path().map(normalize_path).as_deref() == Some(wanted.as_path()))
            .map(|(id, _)| *id)
    }

    pub fn get(&self, id: BufferId) -> Option<&TextBuffer> {
        self.buffers.get(&id)
    }

    pub fn get_mut(&mut self, id: BufferId) -> Option<&mut TextBuffer> {
        self.buffers.get_mut(&id)
    }

    pub fn contains(&self, id: BufferId) -> bool {
        self.buffers.contains_key(&id)
    }

    /// Removes the buffer from the registry and hands it back.
    pub fn close(&mut self, id: BufferId) -> Option<TextBuffer> {
        let removed = self.buffers.remove(&id);
        if removed.is_some() {
            info!(id = id.raw(), "closed buffer");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

/// Absolute, symlink-resolved form of `path` when it exists; otherwise the
/// path made absolute against the current directory.
pub fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

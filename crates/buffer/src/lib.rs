// Chunk: docs/chunks/text_buffer - Line-oriented text buffer with gap buffer backing
// Chunk: docs/chunks/buffer_registry - Process-wide open document registry

//! deskedit-buffer: the document layer of the deskedit shell.
//!
//! This crate provides the line-oriented buffer that editor views bind to,
//! and the registry that owns every open buffer.
//!
//! # Overview
//!
//! [`TextBuffer`] is a gap buffer with a line index, addressed by [`Loc`]:
//! - point insert and range remove
//! - line count and line-by-index reads
//! - a path and a modified flag, plus open/save
//!
//! [`BufferRegistry`] owns the buffers and hands out [`BufferId`] handles.
//! Opening a path that is already open returns the existing handle.
//!
//! # Example
//!
//! ```
//! use deskedit_buffer::{Loc, TextBuffer};
//!
//! let mut buffer = TextBuffer::from_str("hello");
//! buffer.insert(buffer.end(), "\nworld");
//! assert_eq!(buffer.lines_num(), 2);
//! assert_eq!(buffer.line(1), "world");
//!
//! let removed = buffer.remove(Loc::new(0, 0), Loc::new(5, 0));
//! assert_eq!(removed, "hello");
//! assert!(buffer.modified());
//! ```

mod error;
mod gap_buffer;
mod line_index;
mod registry;
mod text_buffer;
mod types;

pub use error::BufferError;
pub use registry::{normalize_path, BufferId, BufferRegistry, OpenOutcome};
pub use text_buffer::TextBuffer;
pub use types::Loc;

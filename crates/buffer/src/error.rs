// Chunk: docs/chunks/shell_errors - Typed errors for buffer I/O

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the buffer when it touches the file system.
#[derive(Debug, Error)]
pub enum BufferError {
    /// The file could not be read or written.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file is not valid UTF-8 text.
    #[error("{} is not a UTF-8 text file", path.display())]
    InvalidUtf8 { path: PathBuf },
    /// Save was requested for a buffer that was never given a path.
    #[error("buffer has no file path")]
    NoPath,
}

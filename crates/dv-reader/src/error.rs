//! Error types for the reader crate.

use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while reading file content.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// No path was supplied.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The path does not exist or cannot be reached.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The process is not allowed to read the path.
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// The path exists but is not a regular file.
    #[error("not a file: {}", .0.display())]
    NotAFile(PathBuf),

    /// The file exceeds the size ceiling.
    #[error("file too large to read entirely ({size} bytes), maximum size is {limit} bytes: {}", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    /// The file extension is on the binary denylist.
    #[error("binary files are not supported: {}", .0.display())]
    BinaryRejected(PathBuf),

    /// Any other I/O failure.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReadError {
    /// Classify an I/O error raised while touching `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// Returns `true` for refusals made by the reading policy rather than
    /// by the filesystem.
    pub fn is_policy_refusal(&self) -> bool {
        matches!(self, Self::TooLarge { .. } | Self::BinaryRejected(_))
    }
}

/// Convenience alias for reader results.
pub type ReadResult<T> = Result<T, ReadError>;

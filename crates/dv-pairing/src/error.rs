//! Error types for the pairing crate.

use std::path::PathBuf;

/// Errors that abort a directory pairing.
///
/// Failures on individual files never surface here; they are logged and the
/// file is left out.
#[derive(Debug, thiserror::Error)]
pub enum PairError {
    /// A required argument was missing.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// One of the two root directories could not be listed.
    #[error("cannot read directory {}: {source}", .path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for pairing results.
pub type PairResult<T> = Result<T, PairError>;

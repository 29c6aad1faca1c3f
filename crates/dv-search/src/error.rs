//! Error types for the search crate.

use std::path::PathBuf;

/// Errors that abort a search before or during the walk.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A required argument was missing.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The search root does not exist or cannot be reached.
    #[error("directory does not exist or is not accessible: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The search root is not a directory.
    #[error("path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The blocking search task failed to complete.
    #[error("search task failed: {0}")]
    Task(String),
}

/// Convenience alias for search results.
pub type SearchResult<T> = Result<T, SearchError>;

use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid diff mode: {0} (expected \"line\" or \"word\")")]
    InvalidDiffMode(String),
}

use std::path::PathBuf;

use dv_pairing::PairError;
use dv_reader::ReadError;
use dv_search::SearchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Pair(#[from] PairError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type SdkResult<T> = Result<T, SdkError>;

/// Coarse classification of an [`SdkError`], used by outer surfaces to
/// pick a status code or exit message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    PermissionDenied,
    TooLarge,
    Unsupported,
    Internal,
}

impl SdkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) | Self::NotADirectory(_) => ErrorKind::InvalidInput,
            Self::Read(e) => match e {
                ReadError::InvalidInput(_) | ReadError::NotAFile(_) => ErrorKind::InvalidInput,
                ReadError::NotFound(_) => ErrorKind::NotFound,
                ReadError::PermissionDenied(_) => ErrorKind::PermissionDenied,
                ReadError::TooLarge { .. } => ErrorKind::TooLarge,
                ReadError::BinaryRejected(_) => ErrorKind::Unsupported,
                ReadError::Io { .. } => ErrorKind::Internal,
            },
            Self::Pair(e) => match e {
                PairError::InvalidInput(_) => ErrorKind::InvalidInput,
                PairError::DirectoryUnreadable { source, .. } => match source.kind() {
                    std::io::ErrorKind::NotFound => ErrorKind::NotFound,
                    std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
                    _ => ErrorKind::Internal,
                },
            },
            Self::Search(e) => match e {
                SearchError::InvalidInput(_) | SearchError::NotADirectory(_) => {
                    ErrorKind::InvalidInput
                }
                SearchError::DirectoryNotFound(_) => ErrorKind::NotFound,
                SearchError::Task(_) => ErrorKind::Internal,
            },
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

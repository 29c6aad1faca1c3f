//! Async and blocking text reads under the shared policy.

use std::path::Path;

use tracing::debug;

use crate::error::{ReadError, ReadResult};
use crate::policy::check_policy;

/// Read a file as text.
///
/// Fails with `NotFound`/`PermissionDenied` if the path cannot be reached,
/// `TooLarge` above the size ceiling and `BinaryRejected` for denylisted
/// extensions. Invalid UTF-8 sequences are replaced rather than rejected.
pub async fn read_content(path: &Path) -> ReadResult<String> {
    if path.as_os_str().is_empty() {
        return Err(ReadError::InvalidInput("file path is required".to_string()));
    }
    debug!(path = %path.display(), "reading file content");

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| ReadError::from_io(path, e))?;
    if !metadata.is_file() {
        return Err(ReadError::NotAFile(path.to_path_buf()));
    }
    check_policy(path, metadata.len())?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ReadError::from_io(path, e))?;
    let text = decode_text(bytes);
    debug!(path = %path.display(), bytes = text.len(), "file read");
    Ok(text)
}

/// Blocking variant of [`read_content`] for use inside directory walks.
pub fn read_content_blocking(path: &Path) -> ReadResult<String> {
    if path.as_os_str().is_empty() {
        return Err(ReadError::InvalidInput("file path is required".to_string()));
    }

    let metadata = std::fs::metadata(path).map_err(|e| ReadError::from_io(path, e))?;
    if !metadata.is_file() {
        return Err(ReadError::NotAFile(path.to_path_buf()));
    }
    check_policy(path, metadata.len())?;

    let bytes = std::fs::read(path).map_err(|e| ReadError::from_io(path, e))?;
    Ok(decode_text(bytes))
}

/// Decode bytes as UTF-8, replacing invalid sequences.
pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::MAX_FILE_SIZE;

    #[tokio::test]
    async fn reads_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "hello\nworld\n").unwrap();
        assert_eq!(read_content(&path).await.unwrap(), "hello\nworld\n");
        assert_eq!(read_content_blocking(&path).unwrap(), "hello\nworld\n");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        assert!(matches!(read_content(&path).await, Err(ReadError::NotFound(_))));
        assert!(matches!(read_content_blocking(&path), Err(ReadError::NotFound(_))));
    }

    #[tokio::test]
    async fn empty_path_is_invalid_input() {
        assert!(matches!(
            read_content(Path::new("")).await,
            Err(ReadError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_content(dir.path()).await,
            Err(ReadError::NotAFile(_))
        ));
    }

    #[tokio::test]
    async fn binary_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.PDF");
        std::fs::write(&path, "actually text").unwrap();
        assert!(matches!(
            read_content(&path).await,
            Err(ReadError::BinaryRejected(_))
        ));
    }

    #[tokio::test]
    async fn oversized_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.txt");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(MAX_FILE_SIZE + 1).unwrap();
        assert!(matches!(
            read_content(&path).await,
            Err(ReadError::TooLarge { .. })
        ));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let text = decode_text(vec![b'a', 0xFF, b'b']);
        assert_eq!(text, "a\u{FFFD}b");
    }
}

//! Reading policy shared by diffing, pairing, and search.
//!
//! Classification is extension-based only. A text file with a binary-looking
//! extension is refused, and a binary file with a text extension is read.

use std::path::{Path, PathBuf};

use crate::error::{ReadError, ReadResult};

/// Largest file, in bytes, that will be read as text (10 MiB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Extensions (lowercase, without the dot) that are never read as text.
pub const BINARY_EXTENSIONS: &[&str] = &[
    // executables and libraries
    "exe", "dll", "so", "dylib", "bin", "obj",
    // images
    "jpg", "jpeg", "png", "gif", "bmp", "ico",
    // audio and video
    "mp3", "mp4", "avi", "mov", "wmv", "flv",
    // archives
    "zip", "tar", "gz", "rar", "7z",
    // office documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx",
];

/// Returns `true` if the path's extension is on the denylist.
pub fn is_binary_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            BINARY_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Check a file of `size` bytes at `path` against the size ceiling and the
/// binary denylist, in that order.
pub fn check_policy(path: &Path, size: u64) -> ReadResult<()> {
    if size > MAX_FILE_SIZE {
        return Err(ReadError::TooLarge {
            path: PathBuf::from(path),
            size,
            limit: MAX_FILE_SIZE,
        });
    }
    if is_binary_path(path) {
        return Err(ReadError::BinaryRejected(PathBuf::from(path)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_extensions_detected() {
        assert!(is_binary_path(Path::new("archive.zip")));
        assert!(is_binary_path(Path::new("/a/b/photo.JPG")));
        assert!(is_binary_path(Path::new("report.pptx")));
        assert!(is_binary_path(Path::new("bundle.tar.gz")));
    }

    #[test]
    fn text_extensions_pass() {
        assert!(!is_binary_path(Path::new("notes.txt")));
        assert!(!is_binary_path(Path::new("README")));
        assert!(!is_binary_path(Path::new("main.rs")));
        assert!(!is_binary_path(Path::new(".zip")));
    }

    #[test]
    fn size_ceiling_is_inclusive() {
        assert!(check_policy(Path::new("a.txt"), MAX_FILE_SIZE).is_ok());
        assert!(matches!(
            check_policy(Path::new("a.txt"), MAX_FILE_SIZE + 1),
            Err(ReadError::TooLarge { size, .. }) if size == MAX_FILE_SIZE + 1
        ));
    }

    #[test]
    fn size_checked_before_extension() {
        assert!(matches!(
            check_policy(Path::new("a.png"), MAX_FILE_SIZE + 1),
            Err(ReadError::TooLarge { .. })
        ));
        assert!(matches!(
            check_policy(Path::new("a.png"), 10),
            Err(ReadError::BinaryRejected(_))
        ));
    }
}

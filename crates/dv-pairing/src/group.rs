//! Directory listing and `prefix:title` grouping.

use std::collections::BTreeMap;
use std::path::Path;

use dv_types::{group_key, DocumentGroup, FileEntry};
use tracing::{debug, warn};

use crate::error::{PairError, PairResult};
use crate::naming::{extract_prefix, extract_title};

/// Groups of one directory side, keyed by `prefix:title`.
pub type GroupMap = BTreeMap<String, DocumentGroup>;

/// List the regular files directly inside `dir`, sorted by filename.
///
/// Failing to open `dir` is an error; entries whose type cannot be
/// determined are logged and skipped.
pub async fn list_files(dir: &Path) -> PairResult<Vec<FileEntry>> {
    let unreadable = |source| PairError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut read_dir = tokio::fs::read_dir(dir).await.map_err(unreadable)?;
    let mut files = Vec::new();

    while let Some(entry) = read_dir.next_entry().await.map_err(unreadable)? {
        let path = entry.path();
        match entry.file_type().await {
            Ok(file_type) if file_type.is_file() => {
                let filename = entry.file_name().to_string_lossy().into_owned();
                files.push(FileEntry::new(path, filename));
            }
            Ok(_) => {}
            Err(e) => warn!(path = %path.display(), error = %e, "cannot stat directory entry, skipping"),
        }
    }

    files.sort_by(|a, b| a.filename.cmp(&b.filename));
    debug!(dir = %dir.display(), count = files.len(), "listed files");
    Ok(files)
}

/// Group files by prefix and document title.
///
/// Files without a prefix, files that cannot be read as text, and files
/// whose first line yields no title are left out. Files inside each group
/// are sorted by filename.
pub async fn group_files(files: &[FileEntry]) -> GroupMap {
    let mut groups = GroupMap::new();

    for file in files {
        let Some(prefix) = extract_prefix(&file.filename) else {
            continue;
        };

        let content = match dv_reader::read_content(&file.path).await {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %file.path.display(), error = %e, "cannot read file for grouping, skipping");
                continue;
            }
        };

        let Some(title) = extract_title(&content) else {
            debug!(path = %file.path.display(), "no title on first line, skipping");
            continue;
        };

        groups
            .entry(group_key(prefix, &title))
            .or_insert_with(|| DocumentGroup::new(prefix, title))
            .files
            .push(file.clone());
    }

    for group in groups.values_mut() {
        group.sort_by_filename();
    }
    groups
}

//! Stream view: every file of a directory with its content, newest first.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use dv_pairing::{extract_title, list_files};
use dv_reader::ReadError;
use dv_types::FileEntry;
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::error::{SdkError, SdkResult};

/// One file of the stream view.
///
/// A file that could not be read still appears, with `error` set and the
/// message standing in for its content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamFile {
    pub path: PathBuf,
    pub filename: String,
    /// Document title, falling back to the filename.
    pub title: String,
    pub content: String,
    pub size: u64,
    pub modified_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirEntryInfo {
    pub name: String,
    pub path: PathBuf,
    pub is_directory: bool,
}

/// A single file's content with its metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamFileContent {
    pub content: String,
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

async fn load_stream_file(entry: FileEntry) -> StreamFile {
    let loaded = async {
        let metadata = tokio::fs::metadata(&entry.path)
            .await
            .map_err(|e| ReadError::from_io(&entry.path, e))?;
        let content = dv_reader::read_content(&entry.path).await?;
        Ok::<_, ReadError>((metadata, content))
    }
    .await;

    match loaded {
        Ok((metadata, content)) => {
            let title = extract_title(&content).unwrap_or_else(|| entry.filename.clone());
            StreamFile {
                title,
                content,
                size: metadata.len(),
                modified_time: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH).into(),
                error: None,
                path: entry.path,
                filename: entry.filename,
            }
        }
        Err(e) => {
            debug!(path = %entry.path.display(), error = %e, "cannot load file for stream view");
            StreamFile {
                title: entry.filename.clone(),
                content: format!("Error reading file: {e}"),
                size: 0,
                modified_time: Utc::now(),
                error: Some(e.to_string()),
                path: entry.path,
                filename: entry.filename,
            }
        }
    }
}

/// Load every regular file directly inside `dir`, newest first.
pub async fn stream_files(dir: &Path) -> SdkResult<Vec<StreamFile>> {
    if dir.as_os_str().is_empty() {
        return Err(SdkError::InvalidInput("directory path is required".to_string()));
    }
    let metadata = tokio::fs::metadata(dir)
        .await
        .map_err(|e| ReadError::from_io(dir, e))?;
    if !metadata.is_dir() {
        return Err(SdkError::NotADirectory(dir.to_path_buf()));
    }

    let entries = list_files(dir).await?;
    let mut tasks = JoinSet::new();
    for entry in entries {
        tasks.spawn(load_stream_file(entry));
    }

    let mut files = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(file) => files.push(file),
            Err(e) => warn!(error = %e, "stream file task failed"),
        }
    }

    files.sort_by(|a, b| {
        b.modified_time
            .cmp(&a.modified_time)
            .then_with(|| a.filename.cmp(&b.filename))
    });
    debug!(dir = %dir.display(), count = files.len(), "loaded stream files");
    Ok(files)
}

/// List the entries of `dir`, sorted by name.
pub async fn list_directory(dir: &Path) -> SdkResult<Vec<DirEntryInfo>> {
    if dir.as_os_str().is_empty() {
        return Err(SdkError::InvalidInput("directory path is required".to_string()));
    }
    let io_err = |e| SdkError::Read(ReadError::from_io(dir, e));

    let mut read_dir = tokio::fs::read_dir(dir).await.map_err(io_err)?;
    let mut entries = Vec::new();
    while let Some(entry) = read_dir.next_entry().await.map_err(io_err)? {
        let is_directory = match entry.file_type().await {
            Ok(file_type) => file_type.is_dir(),
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "cannot stat directory entry");
                false
            }
        };
        entries.push(DirEntryInfo {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path(),
            is_directory,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Read one file for the stream view.
pub async fn read_stream_file(path: &Path) -> SdkResult<StreamFileContent> {
    let content = dv_reader::read_content(path).await?;
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| ReadError::from_io(path, e))?;
    Ok(StreamFileContent {
        content,
        name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        path: path.to_path_buf(),
        size: metadata.len(),
        modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH).into(),
    })
}

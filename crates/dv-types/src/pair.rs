//! File grouping and comparison pair types.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// A single file discovered on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub path: PathBuf,
    pub filename: String,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            filename: filename.into(),
        }
    }
}

/// All files on one side of a comparison sharing the same prefix and title.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentGroup {
    pub prefix: String,
    pub title: String,
    pub files: Vec<FileEntry>,
}

impl DocumentGroup {
    pub fn new(prefix: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            title: title.into(),
            files: Vec::new(),
        }
    }

    /// The grouping key, `prefix:title`.
    pub fn key(&self) -> String {
        group_key(&self.prefix, &self.title)
    }

    /// Sort files by filename ascending.
    pub fn sort_by_filename(&mut self) {
        self.files.sort_by(|a, b| a.filename.cmp(&b.filename));
    }

    /// The lexicographically first file (the "oldest" by naming convention).
    pub fn first_by_name(&self) -> Option<&FileEntry> {
        self.files.iter().min_by(|a, b| a.filename.cmp(&b.filename))
    }

    /// The lexicographically last file (the "newest" by naming convention).
    pub fn last_by_name(&self) -> Option<&FileEntry> {
        self.files.iter().max_by(|a, b| a.filename.cmp(&b.filename))
    }
}

/// Build the `prefix:title` key used to match groups across directories.
pub fn group_key(prefix: &str, title: &str) -> String {
    format!("{prefix}:{title}")
}

/// How a pair was produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PairKind {
    /// A group present in both directories.
    Matched,
    /// A group present only in the new directory.
    NewOnly,
    /// A group present only in the old directory.
    OldOnly,
    /// The two most recent versions of a group inside the new directory.
    NewVersions { time_difference: String },
}

impl PairKind {
    pub fn is_new_file(&self) -> bool {
        matches!(self, Self::NewOnly)
    }

    pub fn is_old_file(&self) -> bool {
        matches!(self, Self::OldOnly)
    }

    pub fn is_new_versions_compare(&self) -> bool {
        matches!(self, Self::NewVersions { .. })
    }

    pub fn time_difference(&self) -> Option<&str> {
        match self {
            Self::NewVersions { time_difference } => Some(time_difference),
            _ => None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PairFlags<'a> {
    is_new_file: bool,
    is_old_file: bool,
    is_new_versions_compare: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_difference: Option<&'a str>,
}

// Pairs travel as mutually exclusive boolean flags on the wire.
impl Serialize for PairKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PairFlags {
            is_new_file: self.is_new_file(),
            is_old_file: self.is_old_file(),
            is_new_versions_compare: self.is_new_versions_compare(),
            time_difference: self.time_difference(),
        }
        .serialize(serializer)
    }
}

/// One unit of directory comparison output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonPair {
    pub prefix: String,
    pub title: String,
    pub old_file: Option<PathBuf>,
    pub new_file: Option<PathBuf>,
    pub old_file_name: Option<String>,
    pub new_file_name: Option<String>,
    /// Modification time of the file that governs the pair's position.
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: PairKind,
}

impl ComparisonPair {
    pub fn matched(
        group: &DocumentGroup,
        old: &FileEntry,
        new: &FileEntry,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            prefix: group.prefix.clone(),
            title: group.title.clone(),
            old_file: Some(old.path.clone()),
            new_file: Some(new.path.clone()),
            old_file_name: Some(old.filename.clone()),
            new_file_name: Some(new.filename.clone()),
            timestamp,
            kind: PairKind::Matched,
        }
    }

    pub fn new_only(group: &DocumentGroup, new: &FileEntry, timestamp: DateTime<Utc>) -> Self {
        Self {
            prefix: group.prefix.clone(),
            title: group.title.clone(),
            old_file: None,
            new_file: Some(new.path.clone()),
            old_file_name: None,
            new_file_name: Some(new.filename.clone()),
            timestamp,
            kind: PairKind::NewOnly,
        }
    }

    pub fn old_only(group: &DocumentGroup, old: &FileEntry, timestamp: DateTime<Utc>) -> Self {
        Self {
            prefix: group.prefix.clone(),
            title: group.title.clone(),
            old_file: Some(old.path.clone()),
            new_file: None,
            old_file_name: Some(old.filename.clone()),
            new_file_name: None,
            timestamp,
            kind: PairKind::OldOnly,
        }
    }

    pub fn new_versions(
        group: &DocumentGroup,
        previous: &FileEntry,
        latest: &FileEntry,
        timestamp: DateTime<Utc>,
        time_difference: String,
    ) -> Self {
        Self {
            prefix: group.prefix.clone(),
            title: group.title.clone(),
            old_file: Some(previous.path.clone()),
            new_file: Some(latest.path.clone()),
            old_file_name: Some(previous.filename.clone()),
            new_file_name: Some(latest.filename.clone()),
            timestamp,
            kind: PairKind::NewVersions { time_difference },
        }
    }

    pub fn key(&self) -> String {
        group_key(&self.prefix, &self.title)
    }
}

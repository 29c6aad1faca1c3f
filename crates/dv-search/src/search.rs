//! Recursive directory search.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{SearchError, SearchResult};
use crate::options::SearchOptions;

/// One line of a file that contains the search term.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMatch {
    /// 1-based line number.
    pub line_number: usize,
    /// The line with surrounding whitespace trimmed.
    pub line_content: String,
    /// Index of the first occurrence within the compared line, in UTF-16
    /// code units, so browser clients can slice the line directly.
    pub position: usize,
}

/// Where a file matched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSet {
    pub in_name: bool,
    pub in_content: Vec<ContentMatch>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HitMetadata {
    pub size: u64,
    pub modified_time: DateTime<Utc>,
}

/// A file that matched the search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub file_path: PathBuf,
    pub file_name: String,
    pub matches: MatchSet,
    pub metadata: HitMetadata,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    pub files_scanned: usize,
    pub matches_found: usize,
    pub directories_scanned: usize,
}

/// Everything a search produced.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub results: Vec<SearchHit>,
    pub stats: SearchStats,
}

impl SearchReport {
    /// Order results by modification time, newest first.
    pub fn sort_newest_first(&mut self) {
        self.results
            .sort_by(|a, b| b.metadata.modified_time.cmp(&a.metadata.modified_time));
    }
}

/// Search `dir` recursively for `term`.
///
/// A missing term or directory fails fast. Once the walk has started,
/// unreadable subdirectories and files are logged and skipped. The walk
/// stops as soon as `max_results` hits have been collected.
pub async fn search_files(
    dir: &Path,
    term: &str,
    options: &SearchOptions,
) -> SearchResult<SearchReport> {
    if term.is_empty() {
        return Err(SearchError::InvalidInput("search term is required".to_string()));
    }
    if dir.as_os_str().is_empty() {
        return Err(SearchError::InvalidInput("directory path is required".to_string()));
    }

    let metadata = tokio::fs::metadata(dir)
        .await
        .map_err(|_| SearchError::DirectoryNotFound(dir.to_path_buf()))?;
    if !metadata.is_dir() {
        return Err(SearchError::NotADirectory(dir.to_path_buf()));
    }

    debug!(dir = %dir.display(), term, "starting search");
    let dir = dir.to_path_buf();
    let term = term.to_string();
    let options = options.clone();
    let report = tokio::task::spawn_blocking(move || walk(&dir, &term, &options))
        .await
        .map_err(|e| SearchError::Task(e.to_string()))?;

    debug!(
        files_scanned = report.stats.files_scanned,
        matches_found = report.stats.matches_found,
        "search completed"
    );
    Ok(report)
}

fn walk(dir: &Path, term: &str, options: &SearchOptions) -> SearchReport {
    let needle = if options.case_sensitive {
        term.to_string()
    } else {
        term.to_lowercase()
    };
    let mut report = SearchReport::default();

    if options.max_results == 0 {
        return report;
    }

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "cannot read directory entry, skipping");
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            report.stats.directories_scanned += 1;
            continue;
        }
        if !file_type.is_file() {
            continue;
        }
        report.stats.files_scanned += 1;

        let path = entry.path();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if !options.accepts_extension(&ext) {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        let in_name = options.search_names && fold(&file_name, options.case_sensitive).contains(&needle);

        let in_content = if options.search_content && !in_name {
            content_matches(path, &needle, options.case_sensitive)
        } else {
            Vec::new()
        };

        if !in_name && in_content.is_empty() {
            continue;
        }

        let Some(metadata) = hit_metadata(path) else {
            continue;
        };
        report.results.push(SearchHit {
            file_path: path.to_path_buf(),
            file_name,
            matches: MatchSet { in_name, in_content },
            metadata,
        });
        report.stats.matches_found += 1;

        if report.results.len() >= options.max_results {
            break;
        }
    }

    report
}

fn fold(text: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    }
}

fn content_matches(path: &Path, needle: &str, case_sensitive: bool) -> Vec<ContentMatch> {
    let content = match dv_reader::read_content_blocking(path) {
        Ok(content) => content,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "skipping content search");
            return Vec::new();
        }
    };

    content
        .split('\n')
        .enumerate()
        .filter_map(|(i, line)| {
            let compared = fold(line, case_sensitive);
            compared.find(needle).map(|offset| ContentMatch {
                line_number: i + 1,
                line_content: line.trim().to_string(),
                position: utf16_index(&compared, offset),
            })
        })
        .collect()
}

/// Convert a byte offset into `text` to a UTF-16 code unit index.
fn utf16_index(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].encode_utf16().count()
}

fn hit_metadata(path: &Path) -> Option<HitMetadata> {
    match std::fs::metadata(path) {
        Ok(metadata) => Some(HitMetadata {
            size: metadata.len(),
            modified_time: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH).into(),
        }),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot stat matching file, skipping");
            None
        }
    }
}

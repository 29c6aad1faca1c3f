//! File and directory comparison.

use std::path::{Path, PathBuf};

use dv_diff::{diff_lines, reconcile};
use dv_reader::ReadError;
use dv_types::{ComparisonPair, DiffMode, DiffPart, FileMeta, Row};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{SdkError, SdkResult};

/// The result of comparing two files, either of which may be absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileComparison {
    pub old_file_path: Option<PathBuf>,
    pub new_file_path: Option<PathBuf>,
    pub old_file_meta: Option<FileMeta>,
    pub new_file_meta: Option<FileMeta>,
    /// Line-level edit script.
    pub diff_result: Vec<DiffPart>,
    /// Word-annotated rows, present only in word mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_diff_result: Option<Vec<Row>>,
    pub rows: Vec<Row>,
    pub diff_mode: DiffMode,
    pub old_content: String,
    pub new_content: String,
}

/// A comparison pair together with the diff of its two files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairComparison {
    #[serde(flatten)]
    pub pair: ComparisonPair,
    pub diff: Vec<DiffPart>,
    pub rows: Vec<Row>,
    pub diff_mode: DiffMode,
    pub old_file_meta: Option<FileMeta>,
    pub new_file_meta: Option<FileMeta>,
    pub old_content: String,
    pub new_content: String,
}

struct Side {
    content: String,
    meta: Option<FileMeta>,
}

impl Side {
    fn absent() -> Self {
        Self {
            content: String::new(),
            meta: None,
        }
    }
}

async fn load_side(path: Option<&Path>) -> SdkResult<Side> {
    let Some(path) = path else {
        return Ok(Side::absent());
    };
    let content = dv_reader::read_content(path).await?;
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| ReadError::from_io(path, e))?;
    Ok(Side {
        content,
        meta: Some(FileMeta::from_metadata(path, &metadata)),
    })
}

/// Compare two files. A missing side is treated as empty content, so a
/// new-only file diffs as all additions and an old-only file as all
/// removals. Passing neither path is an error.
pub async fn compare_files(
    old: Option<&Path>,
    new: Option<&Path>,
    mode: DiffMode,
) -> SdkResult<FileComparison> {
    if old.is_none() && new.is_none() {
        return Err(SdkError::InvalidInput(
            "old and new file paths cannot both be absent".to_string(),
        ));
    }
    debug!(old = ?old, new = ?new, %mode, "comparing files");

    let (old_side, new_side) = tokio::try_join!(load_side(old), load_side(new))?;

    let diff_result = diff_lines(&old_side.content, &new_side.content);
    let rows = reconcile(&diff_result, mode);
    let word_diff_result = match mode {
        DiffMode::Word => Some(rows.clone()),
        DiffMode::Line => None,
    };

    Ok(FileComparison {
        old_file_path: old.map(Path::to_path_buf),
        new_file_path: new.map(Path::to_path_buf),
        old_file_meta: old_side.meta,
        new_file_meta: new_side.meta,
        diff_result,
        word_diff_result,
        rows,
        diff_mode: mode,
        old_content: old_side.content,
        new_content: new_side.content,
    })
}

/// Pair the files of two directories and diff every pair.
///
/// Pairs whose files cannot be read are logged and left out; the order of
/// the remaining pairs is preserved (newest first).
pub async fn compare_directories(
    old_dir: &Path,
    new_dir: &Path,
    mode: DiffMode,
) -> SdkResult<Vec<PairComparison>> {
    let pairs = dv_pairing::pair_directories(old_dir, new_dir).await?;
    let total = pairs.len();

    let mut results = Vec::with_capacity(total);
    for pair in pairs {
        let compared =
            compare_files(pair.old_file.as_deref(), pair.new_file.as_deref(), mode).await;
        match compared {
            Ok(cmp) => results.push(PairComparison {
                pair,
                diff: cmp.diff_result,
                rows: cmp.rows,
                diff_mode: mode,
                old_file_meta: cmp.old_file_meta,
                new_file_meta: cmp.new_file_meta,
                old_content: cmp.old_content,
                new_content: cmp.new_content,
            }),
            Err(e) => warn!(key = %pair.key(), error = %e, "cannot compare pair, skipping"),
        }
    }

    debug!(pairs = total, compared = results.len(), "directory comparison finished");
    Ok(results)
}

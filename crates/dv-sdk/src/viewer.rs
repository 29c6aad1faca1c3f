use std::path::Path;

use dv_search::{SearchOptions, SearchReport};
use dv_types::DiffMode;

use crate::compare::{self, FileComparison, PairComparison};
use crate::error::SdkResult;
use crate::keywords::{self, KeywordCategory};
use crate::stream::{self, DirEntryInfo, StreamFile, StreamFileContent};

/// High-level DeltaVision API.
///
/// Holds no state beyond the diff mode used for comparisons; every call
/// works directly against the paths it is given.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeltaVision {
    diff_mode: DiffMode,
}

impl DeltaVision {
    pub fn new(diff_mode: DiffMode) -> Self {
        Self { diff_mode }
    }

    pub fn diff_mode(&self) -> DiffMode {
        self.diff_mode
    }

    // ---- Comparison ----

    pub async fn compare_files(
        &self,
        old: Option<&Path>,
        new: Option<&Path>,
    ) -> SdkResult<FileComparison> {
        compare::compare_files(old, new, self.diff_mode).await
    }

    pub async fn compare_directories(
        &self,
        old_dir: &Path,
        new_dir: &Path,
    ) -> SdkResult<Vec<PairComparison>> {
        compare::compare_directories(old_dir, new_dir, self.diff_mode).await
    }

    // ---- Search and reading ----

    /// Search `dir` for `term`; results come back newest first.
    pub async fn search_files(
        &self,
        dir: &Path,
        term: &str,
        options: &SearchOptions,
    ) -> SdkResult<SearchReport> {
        let mut report = dv_search::search_files(dir, term, options).await?;
        report.sort_newest_first();
        Ok(report)
    }

    pub async fn read_file_content(&self, path: &Path) -> SdkResult<String> {
        Ok(dv_reader::read_content(path).await?)
    }

    // ---- Stream view and keywords ----

    pub async fn stream_files(&self, dir: &Path) -> SdkResult<Vec<StreamFile>> {
        stream::stream_files(dir).await
    }

    pub async fn list_directory(&self, dir: &Path) -> SdkResult<Vec<DirEntryInfo>> {
        stream::list_directory(dir).await
    }

    pub async fn read_stream_file(&self, path: &Path) -> SdkResult<StreamFileContent> {
        stream::read_stream_file(path).await
    }

    pub async fn parse_keywords_file(&self, path: &Path) -> Vec<KeywordCategory> {
        keywords::parse_keywords_file(path).await
    }
}

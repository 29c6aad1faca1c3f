//! High-level SDK for DeltaVision.
//!
//! Ties the reader, pairing, diff and search crates together behind the
//! [`DeltaVision`] facade. This is the entry point for the CLI and the HTTP
//! mirror, and for applications embedding DeltaVision.

pub mod compare;
pub mod error;
pub mod keywords;
pub mod stream;
pub mod viewer;

pub use compare::{compare_directories, compare_files, FileComparison, PairComparison};
pub use error::{ErrorKind, SdkError, SdkResult};
pub use keywords::{parse_keywords, parse_keywords_file, KeywordCategory};
pub use stream::{list_directory, read_stream_file, stream_files, DirEntryInfo, StreamFile, StreamFileContent};
pub use viewer::DeltaVision;

// Re-export key types
pub use dv_diff::DiffStats;
pub use dv_search::{SearchOptions, SearchReport};
pub use dv_types::{ComparisonPair, DiffMode, DiffPart, FileMeta, Row};

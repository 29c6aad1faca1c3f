//! File search for DeltaVision.
//!
//! Walks a directory tree and reports files whose name or content contains
//! a search term, together with scan statistics. Content inspection uses the
//! shared reading policy, so oversized and binary files are counted as
//! scanned but never matched.

pub mod error;
pub mod options;
pub mod search;

pub use error::{SearchError, SearchResult};
pub use options::SearchOptions;
pub use search::{search_files, ContentMatch, HitMetadata, MatchSet, SearchHit, SearchReport, SearchStats};

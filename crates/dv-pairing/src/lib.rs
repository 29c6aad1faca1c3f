//! File pairing for DeltaVision.
//!
//! Scans an "old" and a "new" directory, groups files that follow the
//! `PREFIX__anything` naming convention by prefix and document title, and
//! selects which files to compare.
//!
//! # Key Types
//!
//! - [`extract_prefix`] / [`extract_title`] -- The naming convention
//! - [`group_files`] / [`GroupMap`] -- Files grouped by `prefix:title`
//! - [`pair_directories`] -- Ordered comparison pairs for two directories

pub mod error;
pub mod group;
pub mod naming;
pub mod pairer;

pub use error::{PairError, PairResult};
pub use group::{group_files, list_files, GroupMap};
pub use naming::{extract_prefix, extract_title, PREFIX_SEPARATOR};
pub use pairer::{modified_time, pair_directories};

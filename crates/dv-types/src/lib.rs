//! Foundation types for DeltaVision.
//!
//! This crate provides the data model shared by every other DeltaVision
//! crate: what a comparison pair looks like, how a diff is expressed, and the
//! two-column row model consumed by renderers.
//!
//! # Key Types
//!
//! - [`FileEntry`] / [`DocumentGroup`] -- Files grouped by naming convention
//! - [`ComparisonPair`] / [`PairKind`] -- One unit of directory comparison output
//! - [`DiffPart`] / [`DiffMode`] -- Raw edit script produced by the diff engine
//! - [`Row`] / [`Cell`] -- Reconciled, renderable two-column rows
//! - [`FileMeta`] -- Human-readable file metadata

pub mod diff;
pub mod error;
pub mod meta;
pub mod pair;
pub mod row;

pub use diff::{DiffMode, DiffPart};
pub use error::TypeError;
pub use meta::{format_file_size, format_time_difference, FileMeta};
pub use pair::{group_key, ComparisonPair, DocumentGroup, FileEntry, PairKind};
pub use row::{Cell, CellKind, Row, RowKind};

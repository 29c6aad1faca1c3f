//! Diff engine for DeltaVision.
//!
//! Computes line- and word-level edit scripts between two texts and turns a
//! line-level script into aligned two-column rows.
//!
//! # Key Types
//!
//! - [`diff_lines`] / [`diff_words`] -- Edit scripts as [`DiffPart`](dv_types::DiffPart) runs
//! - [`reconcile`] / [`Reconciler`] / [`Block`] -- Row reconciliation with modify-block lookahead
//! - [`DiffStats`] -- Per-kind row counts

pub mod parts;
pub mod reconcile;

pub use parts::{diff_lines, diff_words};
pub use reconcile::{next_block, reconcile, split_lines, Block, DiffStats, Reconciler};

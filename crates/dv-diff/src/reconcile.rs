//! Row reconciliation: turn a line-level edit script into aligned rows.
//!
//! The scan walks the parts once with a single part of lookahead. A removed
//! part immediately followed by an added part forms a modify block; the two
//! parts are zipped line by line and consumed together. Every other part is
//! consumed on its own. All rows share one line counter, so the left and
//! right columns always carry the same number.

use std::sync::Arc;

use dv_types::{DiffMode, DiffPart, Row, RowKind};

use crate::parts::diff_words;

/// Split a part's value into lines.
///
/// One trailing empty string produced by a final newline is dropped. An
/// empty value has no lines at all, while `"\n"` is one empty line.
pub fn split_lines(value: &str) -> Vec<&str> {
    if value.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<&str> = value.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// What the scanner decided to do with the parts at its current position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block<'a> {
    /// A part with no lines.
    Skip,
    Unchanged(Vec<&'a str>),
    Added(Vec<&'a str>),
    Removed(Vec<&'a str>),
    /// A removed part and the added part right after it.
    ModifyBlock {
        removed: Vec<&'a str>,
        added: Vec<&'a str>,
    },
}

impl Block<'_> {
    /// Number of parts this block accounts for.
    pub fn consumed(&self) -> usize {
        match self {
            Self::ModifyBlock { .. } => 2,
            _ => 1,
        }
    }
}

/// Decide the block starting at `parts[0]`, looking at `parts[1]` only when
/// `parts[0]` is a removal.
///
/// # Panics
///
/// Panics if `parts` is empty.
pub fn next_block(parts: &[DiffPart]) -> Block<'_> {
    let part = &parts[0];
    let lines = split_lines(&part.value);
    if lines.is_empty() {
        return Block::Skip;
    }

    if part.added {
        return Block::Added(lines);
    }
    if part.removed {
        return match parts.get(1) {
            Some(next) if next.added => Block::ModifyBlock {
                removed: lines,
                added: split_lines(&next.value),
            },
            _ => Block::Removed(lines),
        };
    }
    Block::Unchanged(lines)
}

/// Accumulates rows block by block.
#[derive(Debug)]
pub struct Reconciler {
    mode: DiffMode,
    next_line: usize,
    next_id: usize,
    rows: Vec<Row>,
}

impl Reconciler {
    pub fn new(mode: DiffMode) -> Self {
        Self {
            mode,
            next_line: 1,
            next_id: 0,
            rows: Vec::new(),
        }
    }

    /// Rows produced so far.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Emit the rows for one block and advance the shared line counter.
    pub fn push_block(&mut self, block: Block<'_>) {
        match block {
            Block::Skip => {}
            Block::Unchanged(lines) => {
                for line in lines {
                    let (id, number) = (self.row_id(), self.take_line());
                    self.rows.push(Row::unchanged(id, number, line));
                }
            }
            Block::Added(lines) => {
                for line in lines {
                    let (id, number) = (self.row_id(), self.take_line());
                    self.rows.push(Row::added(id, number, line));
                }
            }
            Block::Removed(lines) => {
                for line in lines {
                    let (id, number) = (self.row_id(), self.take_line());
                    self.rows.push(Row::removed(id, number, line));
                }
            }
            Block::ModifyBlock { removed, added } => self.push_modify_block(&removed, &added),
        }
    }

    fn push_modify_block(&mut self, removed: &[&str], added: &[&str]) {
        let base = self.next_line;
        let span = removed.len().max(added.len());

        for j in 0..span {
            let number = base + j;
            let id = self.row_id();
            let row = match (removed.get(j), added.get(j)) {
                (Some(old), Some(new)) => {
                    let word_diff = match self.mode {
                        DiffMode::Word => Some(Arc::new(diff_words(old, new))),
                        DiffMode::Line => None,
                    };
                    Row::modified(id, number, old, new, word_diff)
                }
                (Some(old), None) => Row::removed(id, number, old),
                (None, Some(new)) => Row::added(id, number, new),
                (None, None) => unreachable!("index below the longer block length"),
            };
            self.rows.push(row);
        }

        self.next_line += span;
    }

    pub fn finish(self) -> Vec<Row> {
        self.rows
    }

    fn row_id(&mut self) -> String {
        let id = format!("row-{}", self.next_id);
        self.next_id += 1;
        id
    }

    fn take_line(&mut self) -> usize {
        let line = self.next_line;
        self.next_line += 1;
        line
    }
}

/// Reconcile a line-level edit script into rows.
///
/// Row ids restart at `row-0` on every call, so reconciling the same parts
/// twice yields identical rows.
pub fn reconcile(parts: &[DiffPart], mode: DiffMode) -> Vec<Row> {
    let mut reconciler = Reconciler::new(mode);
    let mut rest = parts;
    while !rest.is_empty() {
        let block = next_block(rest);
        let consumed = block.consumed();
        reconciler.push_block(block);
        rest = &rest[consumed..];
    }
    reconciler.finish()
}

/// Row counts per kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub unchanged: usize,
}

impl DiffStats {
    pub fn from_rows(rows: &[Row]) -> Self {
        let mut stats = Self::default();
        for row in rows {
            match row.kind {
                RowKind::Added => stats.added += 1,
                RowKind::Removed => stats.removed += 1,
                RowKind::Modified => stats.modified += 1,
                RowKind::Unchanged => stats.unchanged += 1,
            }
        }
        stats
    }

    /// Returns `true` if every row is unchanged.
    pub fn is_identical(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.modified == 0
    }
}

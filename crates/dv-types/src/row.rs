//! The reconciled two-column row model.
//!
//! Both columns of a [`Row`] share a single line number, so the numbering
//! stays continuous on the screen no matter how many lines were inserted or
//! deleted on either side.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::diff::DiffPart;

/// Classification of a whole row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Added,
    Removed,
    Modified,
    Unchanged,
}

/// Classification of one side of a row. `Empty` marks the side that has no
/// content (the left side of an addition, the right side of a removal).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Added,
    Removed,
    Modified,
    Unchanged,
    Empty,
}

/// One column of a row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub number: usize,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: CellKind,
    /// Word-level diff between the two lines of a modified row. The same
    /// allocation is shared by the left and right cells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_diff: Option<Arc<Vec<DiffPart>>>,
}

impl Cell {
    pub fn new(number: usize, content: impl Into<String>, kind: CellKind) -> Self {
        Self {
            number,
            content: content.into(),
            kind,
            word_diff: None,
        }
    }

    pub fn empty(number: usize) -> Self {
        Self::new(number, String::new(), CellKind::Empty)
    }

    pub fn is_empty(&self) -> bool {
        self.kind == CellKind::Empty
    }
}

/// A renderable, aligned row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: String,
    pub line_number: usize,
    #[serde(rename = "type")]
    pub kind: RowKind,
    pub left: Cell,
    pub right: Cell,
}

impl Row {
    /// A line present only in the new text.
    pub fn added(id: String, line_number: usize, content: &str) -> Self {
        Self {
            id,
            line_number,
            kind: RowKind::Added,
            left: Cell::empty(line_number),
            right: Cell::new(line_number, content, CellKind::Added),
        }
    }

    /// A line present only in the old text.
    pub fn removed(id: String, line_number: usize, content: &str) -> Self {
        Self {
            id,
            line_number,
            kind: RowKind::Removed,
            left: Cell::new(line_number, content, CellKind::Removed),
            right: Cell::empty(line_number),
        }
    }

    /// A line present in both texts.
    pub fn unchanged(id: String, line_number: usize, content: &str) -> Self {
        Self {
            id,
            line_number,
            kind: RowKind::Unchanged,
            left: Cell::new(line_number, content, CellKind::Unchanged),
            right: Cell::new(line_number, content, CellKind::Unchanged),
        }
    }

    /// An old line replaced by a new line.
    pub fn modified(
        id: String,
        line_number: usize,
        old: &str,
        new: &str,
        word_diff: Option<Arc<Vec<DiffPart>>>,
    ) -> Self {
        let mut left = Cell::new(line_number, old, CellKind::Modified);
        let mut right = Cell::new(line_number, new, CellKind::Modified);
        left.word_diff = word_diff.clone();
        right.word_diff = word_diff;
        Self {
            id,
            line_number,
            kind: RowKind::Modified,
            left,
            right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn added_row_has_empty_left() {
        let row = Row::added("row-0".into(), 4, "hello");
        assert!(row.left.is_empty());
        assert_eq!(row.right.content, "hello");
        assert_eq!(row.left.number, 4);
        assert_eq!(row.right.number, 4);
    }

    #[test]
    fn modified_row_shares_word_diff() {
        let parts = Arc::new(vec![DiffPart::removed("b", 1), DiffPart::added("x", 1)]);
        let row = Row::modified("row-1".into(), 2, "b", "x", Some(parts));
        let left = row.left.word_diff.as_ref().unwrap();
        let right = row.right.word_diff.as_ref().unwrap();
        assert!(Arc::ptr_eq(left, right));
    }

    #[test]
    fn row_serializes_camel_case_with_type_tag() {
        let row = Row::removed("row-3".into(), 7, "gone");
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["lineNumber"], 7);
        assert_eq!(json["type"], "removed");
        assert_eq!(json["right"]["type"], "empty");
        assert!(json["left"].get("wordDiff").is_none());
    }
}

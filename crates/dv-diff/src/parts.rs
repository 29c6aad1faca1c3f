//! Line- and word-level edit scripts.
//!
//! Uses the `similar` crate (Myers diff algorithm) and folds its per-token
//! changes into runs. Inside a changed region every removed token is emitted
//! before every added token, so a removal immediately followed by an
//! addition always means "this was replaced by that".

use dv_types::DiffPart;
use similar::{ChangeTag, TextDiff};

/// Diff two texts line by line. Line terminators stay attached to the
/// values, so concatenating the unchanged and removed values yields `old`,
/// and the unchanged and added values yield `new`.
pub fn diff_lines(old: &str, new: &str) -> Vec<DiffPart> {
    let diff = TextDiff::from_lines(old, new);
    collect_parts(diff.iter_all_changes().map(|c| (c.tag(), c.value())))
}

/// Diff two lines word by word. Whitespace runs are tokens of their own.
pub fn diff_words(old: &str, new: &str) -> Vec<DiffPart> {
    let diff = TextDiff::from_words(old, new);
    collect_parts(diff.iter_all_changes().map(|c| (c.tag(), c.value())))
}

#[derive(Default)]
struct Run {
    value: String,
    count: usize,
}

impl Run {
    fn push(&mut self, token: &str) {
        self.value.push_str(token);
        self.count += 1;
    }

    fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn take(&mut self) -> Run {
        std::mem::take(self)
    }
}

fn collect_parts<'a>(changes: impl Iterator<Item = (ChangeTag, &'a str)>) -> Vec<DiffPart> {
    let mut parts = Vec::new();
    let mut equal = Run::default();
    let mut removed = Run::default();
    let mut added = Run::default();

    for (tag, token) in changes {
        match tag {
            ChangeTag::Equal => {
                flush_changes(&mut parts, &mut removed, &mut added);
                equal.push(token);
            }
            ChangeTag::Delete => {
                flush_equal(&mut parts, &mut equal);
                removed.push(token);
            }
            ChangeTag::Insert => {
                flush_equal(&mut parts, &mut equal);
                added.push(token);
            }
        }
    }
    flush_equal(&mut parts, &mut equal);
    flush_changes(&mut parts, &mut removed, &mut added);

    parts
}

fn flush_equal(parts: &mut Vec<DiffPart>, equal: &mut Run) {
    if !equal.is_empty() {
        let run = equal.take();
        parts.push(DiffPart::unchanged(run.value, run.count));
    }
}

fn flush_changes(parts: &mut Vec<DiffPart>, removed: &mut Run, added: &mut Run) {
    if !removed.is_empty() {
        let run = removed.take();
        parts.push(DiffPart::removed(run.value, run.count));
    }
    if !added.is_empty() {
        let run = added.take();
        parts.push(DiffPart::added(run.value, run.count));
    }
}

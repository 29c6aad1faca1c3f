//! The file naming convention that drives pairing.
//!
//! A file takes part in pairing when its name contains `__`; everything
//! before the first `__` is its prefix. Its title comes from the first line
//! of its content.

use std::sync::LazyLock;

use regex::Regex;

/// Separator between a file's prefix and the rest of its name.
pub const PREFIX_SEPARATOR: &str = "__";

static QUOTED_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("valid quoted title pattern"));

static MARKDOWN_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s+(.+)$").expect("valid markdown title pattern"));

const BYTE_ORDER_MARK: char = '\u{feff}';

/// The part of `filename` before the first `__`, or `None` when the name has
/// no separator or nothing before it.
pub fn extract_prefix(filename: &str) -> Option<&str> {
    let (prefix, _) = filename.split_once(PREFIX_SEPARATOR)?;
    if prefix.is_empty() {
        None
    } else {
        Some(prefix)
    }
}

/// The document title from the first line of `content`.
///
/// A leading byte-order mark counts as whitespace. Tried in order on the
/// trimmed first line: the first double-quoted text,
/// a markdown heading (`# Title`), then the whole line. Returns `None` when
/// the chosen candidate is empty.
pub fn extract_title(content: &str) -> Option<String> {
    let first_line = content
        .split('\n')
        .next()
        .unwrap_or_default()
        .trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK);

    let title = if let Some(caps) = QUOTED_TITLE.captures(first_line) {
        caps.get(1).map_or("", |m| m.as_str())
    } else if let Some(caps) = MARKDOWN_TITLE.captures(first_line) {
        caps.get(1).map_or("", |m| m.as_str())
    } else {
        first_line
    };

    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

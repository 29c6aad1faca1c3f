//! Keyword files for highlighting.
//!
//! A keyword file is a list of categories. A line of the form
//! `# Name (Color)` opens a category, and every following non-empty line is
//! a keyword of that category. Lines before the first header, and `#` lines
//! that do not match the header form, are ignored.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

static CATEGORY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#\s+(.+?)\s*\((.+?)\)\s*$").expect("valid category header pattern")
});

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeywordCategory {
    pub name: String,
    /// Lowercased color name.
    pub color: String,
    pub keywords: Vec<String>,
}

pub fn parse_keywords(content: &str) -> Vec<KeywordCategory> {
    let mut categories: Vec<KeywordCategory> = Vec::new();

    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with('#') {
            if let Some(caps) = CATEGORY_HEADER.captures(line) {
                categories.push(KeywordCategory {
                    name: caps[1].trim().to_string(),
                    color: caps[2].trim().to_lowercase(),
                    keywords: Vec::new(),
                });
            }
        } else if let Some(current) = categories.last_mut() {
            current.keywords.push(line.to_string());
        }
    }
    categories
}

/// Read and parse a keyword file. A missing path or a read failure yields
/// no categories.
pub async fn parse_keywords_file(path: &Path) -> Vec<KeywordCategory> {
    if path.as_os_str().is_empty() {
        debug!("no keywords file given");
        return Vec::new();
    }
    match dv_reader::read_content(path).await {
        Ok(content) => {
            let categories = parse_keywords(&content);
            for category in &categories {
                debug!(name = %category.name, keywords = category.keywords.len(), "keyword category");
            }
            categories
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read keywords file");
            Vec::new()
        }
    }
}

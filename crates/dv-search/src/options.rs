use serde::{Deserialize, Serialize};

/// Knobs for a search. Missing fields take their defaults when
/// deserialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchOptions {
    pub search_names: bool,
    pub search_content: bool,
    pub case_sensitive: bool,
    /// Extensions to include, lowercase and without the dot. Empty means all.
    pub file_types: Vec<String>,
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            search_names: true,
            search_content: true,
            case_sensitive: false,
            file_types: Vec::new(),
            max_results: 1000,
        }
    }
}

impl SearchOptions {
    /// Returns `true` if a file with extension `ext` passes the type filter.
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.file_types.is_empty() || self.file_types.iter().any(|t| t.eq_ignore_ascii_case(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = SearchOptions::default();
        assert!(opts.search_names);
        assert!(opts.search_content);
        assert!(!opts.case_sensitive);
        assert!(opts.file_types.is_empty());
        assert_eq!(opts.max_results, 1000);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let opts: SearchOptions =
            serde_json::from_str(r#"{"caseSensitive":true,"fileTypes":["md"]}"#).unwrap();
        assert!(opts.case_sensitive);
        assert!(opts.search_names);
        assert_eq!(opts.max_results, 1000);
        assert_eq!(opts.file_types, vec!["md"]);
    }

    #[test]
    fn extension_filter() {
        let mut opts = SearchOptions::default();
        assert!(opts.accepts_extension("txt"));
        opts.file_types = vec!["md".into(), "txt".into()];
        assert!(opts.accepts_extension("txt"));
        assert!(opts.accepts_extension("TXT"));
        assert!(!opts.accepts_extension("rs"));
        assert!(!opts.accepts_extension(""));
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Granularity requested by the caller of a comparison.
///
/// In `Word` mode every modified row additionally carries a word-level diff
/// of its two lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffMode {
    #[default]
    Line,
    Word,
}

impl DiffMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Word => "word",
        }
    }
}

impl fmt::Display for DiffMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiffMode {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "word" => Ok(Self::Word),
            other => Err(TypeError::InvalidDiffMode(other.to_string())),
        }
    }
}

/// One run of an edit script.
///
/// A run is either unchanged (both flags false), present only in the new
/// text (`added`), or present only in the old text (`removed`). `count` is
/// the number of tokens (lines or words) the run spans.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffPart {
    pub value: String,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub added: bool,
    #[serde(default)]
    pub removed: bool,
}

impl DiffPart {
    pub fn unchanged(value: impl Into<String>, count: usize) -> Self {
        Self {
            value: value.into(),
            count,
            added: false,
            removed: false,
        }
    }

    pub fn added(value: impl Into<String>, count: usize) -> Self {
        Self {
            value: value.into(),
            count,
            added: true,
            removed: false,
        }
    }

    pub fn removed(value: impl Into<String>, count: usize) -> Self {
        Self {
            value: value.into(),
            count,
            added: false,
            removed: true,
        }
    }

    /// Returns `true` if the run appears in both texts.
    pub fn is_unchanged(&self) -> bool {
        !self.added && !self.removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_mode_parse() {
        assert_eq!("line".parse::<DiffMode>().unwrap(), DiffMode::Line);
        assert_eq!("WORD".parse::<DiffMode>().unwrap(), DiffMode::Word);
        assert!(matches!(
            "char".parse::<DiffMode>(),
            Err(TypeError::InvalidDiffMode(_))
        ));
    }

    #[test]
    fn diff_mode_serde_lowercase() {
        assert_eq!(serde_json::to_string(&DiffMode::Word).unwrap(), "\"word\"");
        let mode: DiffMode = serde_json::from_str("\"line\"").unwrap();
        assert_eq!(mode, DiffMode::Line);
        assert_eq!(DiffMode::default(), DiffMode::Line);
    }

    #[test]
    fn part_constructors() {
        assert!(DiffPart::unchanged("a\n", 1).is_unchanged());
        assert!(DiffPart::added("a\n", 1).added);
        assert!(DiffPart::removed("a\n", 1).removed);
    }

    #[test]
    fn part_flags_default_when_missing() {
        let part: DiffPart = serde_json::from_str(r#"{"value":"x\n"}"#).unwrap();
        assert!(part.is_unchanged());
        assert_eq!(part.count, 0);
    }
}

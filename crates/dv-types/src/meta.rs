use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Display metadata for one side of a file comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    /// Human-readable size, e.g. `"1.5 KB"`.
    pub size: String,
    pub size_bytes: u64,
    pub modified: DateTime<Utc>,
    /// Modification time rendered in the local timezone.
    pub modified_date: String,
    pub full_path: PathBuf,
}

impl FileMeta {
    pub fn from_metadata(path: &Path, metadata: &Metadata) -> Self {
        let modified: DateTime<Utc> = metadata
            .modified()
            .unwrap_or(SystemTime::UNIX_EPOCH)
            .into();
        Self {
            size: format_file_size(metadata.len()),
            size_bytes: metadata.len(),
            modified,
            modified_date: modified
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            full_path: path.to_path_buf(),
        }
    }
}

/// Format a byte count with 1024-based units and at most two decimals.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rendered = format!("{value:.2}");
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{rendered} {}", SIZE_UNITS[unit])
}

/// Format the gap between two file versions.
///
/// `"{d}d {h}h"` from one day up, `"{h}h {m}m"` from one hour up, otherwise
/// `"{m}m"`. Every component is floored.
pub fn format_time_difference(millis: u64) -> String {
    let minutes = millis / 60_000;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{days}d {}h", hours % 24)
    } else if hours > 0 {
        format!("{hours}h {}m", minutes % 60)
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_size_units() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(format_file_size(1_288_490_189), "1.2 GB");
    }

    #[test]
    fn time_difference_minutes_only() {
        assert_eq!(format_time_difference(0), "0m");
        assert_eq!(format_time_difference(59_999), "0m");
        assert_eq!(format_time_difference(45 * 60_000), "45m");
    }

    #[test]
    fn time_difference_hours() {
        assert_eq!(format_time_difference(3 * 3_600_000), "3h 0m");
        assert_eq!(format_time_difference(3 * 3_600_000 + 25 * 60_000), "3h 25m");
    }

    #[test]
    fn time_difference_days() {
        assert_eq!(format_time_difference(24 * 3_600_000), "1d 0h");
        assert_eq!(format_time_difference(50 * 3_600_000 + 59 * 60_000), "2d 2h");
    }

    #[test]
    fn meta_from_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.txt");
        std::fs::write(&path, b"hello").unwrap();
        let md = std::fs::metadata(&path).unwrap();
        let meta = FileMeta::from_metadata(&path, &md);
        assert_eq!(meta.size, "5 Bytes");
        assert_eq!(meta.size_bytes, 5);
        assert_eq!(meta.full_path, path);
    }
}

//! Comparison pair selection.
//!
//! Matched pairs take the lexicographically first file of the old group and
//! the lexicographically last file of the new group, relying on a sortable
//! version in the filename. Version-compare pairs use modification times
//! instead, and are produced for every new group with two or more files,
//! whether or not that group was already matched.

use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use dv_types::{format_time_difference, ComparisonPair, DocumentGroup, FileEntry};
use tracing::{debug, warn};

use crate::error::{PairError, PairResult};
use crate::group::{group_files, list_files, GroupMap};

/// Modification time of `path`, or `None` (logged) when it cannot be read.
pub async fn modified_time(path: &Path) -> Option<DateTime<Utc>> {
    let result = tokio::fs::metadata(path)
        .await
        .and_then(|metadata| metadata.modified());
    match result {
        Ok(time) => Some(time.into()),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read modification time");
            None
        }
    }
}

/// Build the ordered list of comparison pairs for two directories.
///
/// Fails only when either directory cannot be listed. The result is sorted
/// newest first by timestamp.
pub async fn pair_directories(old_dir: &Path, new_dir: &Path) -> PairResult<Vec<ComparisonPair>> {
    if old_dir.as_os_str().is_empty() || new_dir.as_os_str().is_empty() {
        return Err(PairError::InvalidInput(
            "both old and new directory paths are required".to_string(),
        ));
    }
    debug!(old = %old_dir.display(), new = %new_dir.display(), "selecting files to compare");

    let (old_files, new_files) = tokio::try_join!(list_files(old_dir), list_files(new_dir))?;
    let (old_groups, new_groups) = tokio::join!(group_files(&old_files), group_files(&new_files));
    debug!(
        old_groups = old_groups.len(),
        new_groups = new_groups.len(),
        "grouped files"
    );

    let mut pairs = Vec::new();
    pairs.extend(matched_pairs(&old_groups, &new_groups).await);
    pairs.extend(new_only_pairs(&old_groups, &new_groups).await);
    pairs.extend(old_only_pairs(&old_groups, &new_groups).await);
    pairs.extend(version_pairs(&new_groups).await);

    pairs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    debug!(
        total = pairs.len(),
        new_only = pairs.iter().filter(|p| p.kind.is_new_file()).count(),
        old_only = pairs.iter().filter(|p| p.kind.is_old_file()).count(),
        versions = pairs.iter().filter(|p| p.kind.is_new_versions_compare()).count(),
        "comparison list ready"
    );
    Ok(pairs)
}

async fn timestamp_or_now(file: &FileEntry) -> DateTime<Utc> {
    modified_time(&file.path).await.unwrap_or_else(Utc::now)
}

async fn matched_pairs(old_groups: &GroupMap, new_groups: &GroupMap) -> Vec<ComparisonPair> {
    let mut pairs = Vec::new();
    for (key, old_group) in old_groups {
        let Some(new_group) = new_groups.get(key) else {
            continue;
        };
        let (Some(oldest), Some(newest)) = (old_group.first_by_name(), new_group.last_by_name())
        else {
            continue;
        };
        let timestamp = timestamp_or_now(newest).await;
        pairs.push(ComparisonPair::matched(old_group, oldest, newest, timestamp));
    }
    pairs
}

async fn new_only_pairs(old_groups: &GroupMap, new_groups: &GroupMap) -> Vec<ComparisonPair> {
    let mut pairs = Vec::new();
    for (key, group) in new_groups {
        if old_groups.contains_key(key) {
            continue;
        }
        if let Some(newest) = group.last_by_name() {
            let timestamp = timestamp_or_now(newest).await;
            pairs.push(ComparisonPair::new_only(group, newest, timestamp));
        }
    }
    pairs
}

async fn old_only_pairs(old_groups: &GroupMap, new_groups: &GroupMap) -> Vec<ComparisonPair> {
    let mut pairs = Vec::new();
    for (key, group) in old_groups {
        if new_groups.contains_key(key) {
            continue;
        }
        if let Some(oldest) = group.first_by_name() {
            let timestamp = timestamp_or_now(oldest).await;
            pairs.push(ComparisonPair::old_only(group, oldest, timestamp));
        }
    }
    pairs
}

async fn version_pairs(new_groups: &GroupMap) -> Vec<ComparisonPair> {
    let mut pairs = Vec::new();
    for group in new_groups.values() {
        if let Some(pair) = latest_versions(group).await {
            pairs.push(pair);
        }
    }
    pairs
}

/// Compare the two most recently modified files of a group, if they differ
/// in modification time. Files that cannot be stat'ed sort as oldest.
async fn latest_versions(group: &DocumentGroup) -> Option<ComparisonPair> {
    if group.files.len() < 2 {
        return None;
    }

    let mut dated = Vec::with_capacity(group.files.len());
    for file in &group.files {
        let mtime = modified_time(&file.path)
            .await
            .unwrap_or_else(|| SystemTime::UNIX_EPOCH.into());
        dated.push((file, mtime));
    }
    dated.sort_by(|a, b| b.1.cmp(&a.1));

    let (latest, latest_time) = dated[0];
    let (previous, previous_time) = dated[1];
    if latest_time == previous_time {
        return None;
    }

    let gap = (latest_time - previous_time).num_milliseconds().max(0) as u64;
    let time_difference = format_time_difference(gap);
    debug!(
        title = %group.title,
        previous = %previous.filename,
        latest = %latest.filename,
        gap = %time_difference,
        "added version comparison"
    );
    Some(ComparisonPair::new_versions(
        group,
        previous,
        latest,
        latest_time,
        time_difference,
    ))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use filetime::FileTime;

    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    fn set_mtime(dir: &Path, name: &str, secs: i64) {
        filetime::set_file_mtime(dir.join(name), FileTime::from_unix_time(secs, 0)).unwrap();
    }

    struct Dirs {
        _root: tempfile::TempDir,
        old: std::path::PathBuf,
        new: std::path::PathBuf,
    }

    fn dirs() -> Dirs {
        let root = tempfile::tempdir().unwrap();
        let old = root.path().join("old");
        let new = root.path().join("new");
        std::fs::create_dir(&old).unwrap();
        std::fs::create_dir(&new).unwrap();
        Dirs { _root: root, old, new }
    }

    #[tokio::test]
    async fn matched_pair_by_prefix_and_title() {
        let d = dirs();
        write(&d.old, "ABC__Report.txt", "Q1 Report\nold body\n");
        write(&d.new, "ABC__UpdatedReport.txt", "Q1 Report\nnew body\n");

        let pairs = pair_directories(&d.old, &d.new).await.unwrap();
        assert_eq!(pairs.len(), 1);
        let pair = &pairs[0];
        assert_eq!(pair.prefix, "ABC");
        assert_eq!(pair.title, "Q1 Report");
        assert_eq!(pair.kind, dv_types::PairKind::Matched);
        assert_eq!(pair.old_file_name.as_deref(), Some("ABC__Report.txt"));
        assert_eq!(pair.new_file_name.as_deref(), Some("ABC__UpdatedReport.txt"));
    }

    #[tokio::test]
    async fn byte_order_mark_does_not_split_groups() {
        let d = dirs();
        write(&d.old, "ABC__1.txt", "\u{feff}Q1 Report\nold body\n");
        write(&d.new, "ABC__2.txt", "Q1 Report\nnew body\n");

        let pairs = pair_directories(&d.old, &d.new).await.unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].kind, dv_types::PairKind::Matched);
        assert_eq!(pairs[0].key(), "ABC:Q1 Report");
    }

    #[tokio::test]
    async fn matched_group_also_yields_version_compare() {
        let d = dirs();
        write(&d.old, "ABC__v1.txt", "Q1 Report\n");
        write(&d.new, "ABC__v2.txt", "Q1 Report\nsecond\n");
        write(&d.new, "ABC__v3.txt", "Q1 Report\nthird\n");
        set_mtime(&d.old, "ABC__v1.txt", 1_000);
        set_mtime(&d.new, "ABC__v2.txt", 5_000);
        set_mtime(&d.new, "ABC__v3.txt", 3_000);

        let pairs = pair_directories(&d.old, &d.new).await.unwrap();
        assert_eq!(pairs.len(), 2);

        // The version pair follows mtime (v2 newest); the matched pair
        // follows filename order (v3 last) and sorts after it.
        let versions = &pairs[0];
        assert!(versions.kind.is_new_versions_compare());
        assert_eq!(versions.old_file_name.as_deref(), Some("ABC__v3.txt"));
        assert_eq!(versions.new_file_name.as_deref(), Some("ABC__v2.txt"));
        assert_eq!(versions.timestamp.timestamp(), 5_000);
        assert_eq!(versions.kind.time_difference(), Some("33m"));

        let matched = &pairs[1];
        assert_eq!(matched.kind, dv_types::PairKind::Matched);
        assert_eq!(matched.old_file_name.as_deref(), Some("ABC__v1.txt"));
        assert_eq!(matched.new_file_name.as_deref(), Some("ABC__v3.txt"));
        assert_eq!(matched.timestamp.timestamp(), 3_000);
        assert_eq!(matched.key(), versions.key());
    }

    #[tokio::test]
    async fn matched_pair_uses_filename_order_not_mtime() {
        let d = dirs();
        write(&d.old, "ABC__v1.txt", "Doc\n");
        write(&d.old, "ABC__v2.txt", "Doc\n");
        write(&d.new, "ABC__v3.txt", "Doc\n");
        write(&d.new, "ABC__v4.txt", "Doc\n");
        // Give the lexicographically last new file the older timestamp.
        set_mtime(&d.new, "ABC__v4.txt", 1_000);
        set_mtime(&d.new, "ABC__v3.txt", 2_000);
        set_mtime(&d.old, "ABC__v1.txt", 5_000);

        let pairs = pair_directories(&d.old, &d.new).await.unwrap();
        let matched = pairs
            .iter()
            .find(|p| p.kind == dv_types::PairKind::Matched)
            .unwrap();
        assert_eq!(matched.old_file_name.as_deref(), Some("ABC__v1.txt"));
        assert_eq!(matched.new_file_name.as_deref(), Some("ABC__v4.txt"));
        assert_eq!(matched.timestamp.timestamp(), 1_000);
    }

    #[tokio::test]
    async fn new_only_and_old_only_pairs() {
        let d = dirs();
        write(&d.old, "OLD__a.txt", "Retired\n");
        write(&d.new, "NEW__a.txt", "Fresh\n");

        let pairs = pair_directories(&d.old, &d.new).await.unwrap();
        assert_eq!(pairs.len(), 2);

        let new_only = pairs.iter().find(|p| p.kind.is_new_file()).unwrap();
        assert_eq!(new_only.prefix, "NEW");
        assert!(new_only.old_file.is_none());
        assert!(new_only.new_file.is_some());

        let old_only = pairs.iter().find(|p| p.kind.is_old_file()).unwrap();
        assert_eq!(old_only.prefix, "OLD");
        assert!(old_only.new_file.is_none());
        assert!(old_only.old_file.is_some());
    }

    #[tokio::test]
    async fn version_compare_three_hours_apart() {
        let d = dirs();
        write(&d.new, "X__1.txt", "Doc\nfirst\n");
        write(&d.new, "X__2.txt", "Doc\nsecond\n");
        set_mtime(&d.new, "X__1.txt", 1_700_000_000);
        set_mtime(&d.new, "X__2.txt", 1_700_000_000 + 3 * 3600);

        let pairs = pair_directories(&d.old, &d.new).await.unwrap();
        let versions: Vec<_> = pairs.iter().filter(|p| p.kind.is_new_versions_compare()).collect();
        assert_eq!(versions.len(), 1);
        let v = versions[0];
        assert_eq!(v.kind.time_difference(), Some("3h 0m"));
        assert_eq!(v.old_file_name.as_deref(), Some("X__1.txt"));
        assert_eq!(v.new_file_name.as_deref(), Some("X__2.txt"));
        assert_eq!(v.timestamp.timestamp(), 1_700_000_000 + 3 * 3600);

        // The same group also yields its new-only pair.
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().any(|p| p.kind.is_new_file()));
    }

    #[tokio::test]
    async fn version_compare_needs_distinct_mtimes() {
        let d = dirs();
        write(&d.new, "X__1.txt", "Doc\n");
        write(&d.new, "X__2.txt", "Doc\n");
        set_mtime(&d.new, "X__1.txt", 1_700_000_000);
        set_mtime(&d.new, "X__2.txt", 1_700_000_000);

        let pairs = pair_directories(&d.old, &d.new).await.unwrap();
        assert!(pairs.iter().all(|p| !p.kind.is_new_versions_compare()));
    }

    #[tokio::test]
    async fn pairs_sorted_newest_first() {
        let d = dirs();
        for (i, name) in ["A__x.txt", "B__x.txt", "C__x.txt"].iter().enumerate() {
            write(&d.new, name, "Doc\n");
            set_mtime(&d.new, name, 1_000 + (i as i64) * 60);
        }
        write(&d.old, "D__x.txt", "Doc\n");
        set_mtime(&d.old, "D__x.txt", 1_030);

        let pairs = pair_directories(&d.old, &d.new).await.unwrap();
        let prefixes: Vec<_> = pairs.iter().map(|p| p.prefix.as_str()).collect();
        assert_eq!(prefixes, vec!["C", "B", "D", "A"]);
        for w in pairs.windows(2) {
            assert!(w[0].timestamp >= w[1].timestamp);
        }
    }

    #[tokio::test]
    async fn every_group_lands_in_exactly_one_primary_pair() {
        let d = dirs();
        write(&d.old, "A__1.txt", "Alpha\n");
        write(&d.old, "B__1.txt", "Beta\n");
        write(&d.old, "B__2.txt", "Beta\n");
        write(&d.new, "B__3.txt", "Beta\n");
        write(&d.new, "C__1.txt", "Gamma\n");
        write(&d.new, "C__2.txt", "Gamma\n");
        write(&d.new, "ignored.txt", "No prefix\n");

        let pairs = pair_directories(&d.old, &d.new).await.unwrap();
        let primary: Vec<_> = pairs
            .iter()
            .filter(|p| !p.kind.is_new_versions_compare())
            .map(|p| p.key())
            .collect();
        let unique: HashSet<_> = primary.iter().cloned().collect();
        assert_eq!(primary.len(), unique.len());
        let expected: HashSet<String> = ["A:Alpha", "B:Beta", "C:Gamma"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(unique, expected);
    }

    #[tokio::test]
    async fn unreadable_root_is_fatal() {
        let d = dirs();
        let missing = d.old.join("missing");
        let result = pair_directories(&missing, &d.new).await;
        assert!(matches!(result, Err(PairError::DirectoryUnreadable { .. })));
    }

    #[tokio::test]
    async fn empty_path_is_invalid_input() {
        let d = dirs();
        let result = pair_directories(Path::new(""), &d.new).await;
        assert!(matches!(result, Err(PairError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn modified_time_of_missing_file_is_none() {
        let d = dirs();
        assert!(modified_time(&d.old.join("nope.txt")).await.is_none());
        write(&d.old, "yes.txt", "x");
        let t = modified_time(&d.old.join("yes.txt")).await.unwrap();
        assert!(Utc::now() - t < chrono::Duration::from_std(Duration::from_secs(3600)).unwrap());
    }
}

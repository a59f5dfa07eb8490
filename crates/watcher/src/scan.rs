//! Startup scan
//!
//! Lists the source files that already exist when watching starts and feeds
//! them through the same scheduling entry point as live events.

use iconwatch_core::JobScheduler;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::WatchError;
use crate::normalize::ExtensionFilter;
use crate::target::WatchTarget;

/// List matching files directly inside the watch target
pub fn scan(target: &WatchTarget, filter: &ExtensionFilter) -> Result<Vec<PathBuf>, WatchError> {
    let mut found = Vec::new();

    for entry in WalkDir::new(target.path())
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| WatchError::Enumeration {
            path: target.path().to_path_buf(),
            source,
        })?;

        if filter.matches(entry.path()) && entry.path().is_file() {
            found.push(entry.into_path());
        }
    }

    Ok(found)
}

/// Schedule a conversion for every matching file; returns how many
pub fn seed(
    target: &WatchTarget,
    filter: &ExtensionFilter,
    scheduler: &Arc<JobScheduler>,
) -> Result<usize, WatchError> {
    let files = scan(target, filter)?;

    for path in &files {
        debug!("Startup scan found {}", path.display());
        scheduler.schedule_conversion(path.clone());
    }

    Ok(files.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_is_flat_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::write(root.join("b.svg"), "<svg/>").unwrap();
        fs::write(root.join("A.SVG"), "<svg/>").unwrap();
        fs::write(root.join("b.ico"), b"\0\0\x01\0").unwrap();
        fs::write(root.join("notes.txt"), "x").unwrap();
        fs::create_dir(root.join("nested")).unwrap();
        fs::write(root.join("nested/deep.svg"), "<svg/>").unwrap();
        fs::create_dir(root.join("folder.svg")).unwrap();

        let target = WatchTarget::validate(root).unwrap();
        let found = scan(&target, &ExtensionFilter::default()).unwrap();

        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["A.SVG", "b.svg"]);
        assert!(found.iter().all(|p| p.starts_with(target.path())));
    }

    #[test]
    fn test_vanished_target_reports_enumeration_failure() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("icons");
        fs::create_dir(&dir).unwrap();

        let target = WatchTarget::validate(&dir).unwrap();
        fs::remove_dir(&dir).unwrap();

        let err = scan(&target, &ExtensionFilter::default()).unwrap_err();
        assert!(matches!(err, WatchError::Enumeration { .. }));
    }
}

//! Watch target validation

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::WatchError;

/// A validated, canonical directory to watch
///
/// Validated once at startup. If the directory disappears later, events
/// simply stop arriving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    dir: PathBuf,
}

impl WatchTarget {
    /// Check that `path` is an existing, readable directory
    pub fn validate(path: &Path) -> Result<Self, WatchError> {
        let metadata = fs::metadata(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => WatchError::InvalidTarget {
                path: path.to_path_buf(),
                reason: "directory does not exist".to_string(),
            },
            _ => WatchError::Unreadable {
                path: path.to_path_buf(),
                source: err,
            },
        })?;

        if !metadata.is_dir() {
            return Err(WatchError::InvalidTarget {
                path: path.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        let unreadable = |source| WatchError::Unreadable {
            path: path.to_path_buf(),
            source,
        };
        fs::read_dir(path).map_err(unreadable)?;
        let dir = path.canonicalize().map_err(unreadable)?;

        Ok(Self { dir })
    }

    /// Canonical directory path
    pub fn path(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_existing_directory_is_canonicalized() {
        let temp_dir = TempDir::new().unwrap();
        let target = WatchTarget::validate(temp_dir.path()).unwrap();

        assert!(target.path().is_absolute());
        assert_eq!(target.path(), temp_dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_missing_directory_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let err = WatchTarget::validate(&missing).unwrap_err();
        assert!(matches!(err, WatchError::InvalidTarget { .. }));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_file_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("icon.svg");
        fs::write(&file, "<svg/>").unwrap();

        let err = WatchTarget::validate(&file).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }
}

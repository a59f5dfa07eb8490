//! Watch-side errors

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while watching or scanning the watch target
#[derive(Debug, Error)]
pub enum WatchError {
    /// Watch directory failed validation at startup (fatal)
    #[error("cannot watch {}: {reason}", path.display())]
    InvalidTarget { path: PathBuf, reason: String },

    /// Watch directory exists but cannot be resolved or read
    #[error("cannot watch {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Startup scan could not list files
    #[error("failed to list {}: {source}", path.display())]
    Enumeration {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Underlying notification mechanism faulted
    #[error("file watcher error: {0}")]
    Notify(#[from] notify::Error),
}

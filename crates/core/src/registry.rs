//! Per-path debounce registry
//!
//! Maps each source path to the cancellation handle of the one job that is
//! currently allowed to act on it. Replacing an entry hands the old handle
//! back to the caller so it can be cancelled.

use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Unique id of a scheduled job
pub type JobId = u64;

/// A job that currently owns a path
#[derive(Debug, Clone)]
pub struct PendingJob {
    /// Job id, used to make removal safe against newer replacements
    pub id: JobId,
    /// Cancellation handle observed by the job at each suspension point
    pub token: CancellationToken,
    /// When the job was scheduled
    pub created_at: Instant,
}

impl PendingJob {
    /// Create a fresh job with its own cancellation handle
    pub fn new(id: JobId) -> Self {
        Self {
            id,
            token: CancellationToken::new(),
            created_at: Instant::now(),
        }
    }
}

/// Concurrent path -> active job table
#[derive(Debug, Default)]
pub struct DebounceRegistry {
    jobs: DashMap<PathBuf, PendingJob>,
}

impl DebounceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `job` as the active job for `path`
    ///
    /// The swap is atomic per key: of two concurrent replacements for the same
    /// path, exactly one gets the other's job back.
    pub fn register_or_replace(&self, path: PathBuf, job: PendingJob) -> Option<PendingJob> {
        self.jobs.insert(path, job)
    }

    /// Remove the entry for `path` if it still belongs to `id`
    ///
    /// No-op when the path is absent or a newer job already took it over.
    /// Returns whether an entry was removed.
    pub fn remove(&self, path: &Path, id: JobId) -> bool {
        self.jobs.remove_if(path, |_, job| job.id == id).is_some()
    }

    /// Id of the job currently registered for `path`
    pub fn active_job(&self, path: &Path) -> Option<JobId> {
        self.jobs.get(path).map(|entry| entry.id)
    }

    /// Whether any job is registered for `path`
    pub fn contains(&self, path: &Path) -> bool {
        self.jobs.contains_key(path)
    }

    /// Number of paths with a registered job
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether no job is registered
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Cancel every registered job
    ///
    /// Entries are left for the jobs themselves to clear on exit.
    pub fn cancel_all(&self) -> usize {
        let mut cancelled = 0;
        for entry in self.jobs.iter() {
            entry.token.cancel();
            cancelled += 1;
        }
        cancelled
    }
}

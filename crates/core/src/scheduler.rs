//! Conversion job scheduler
//!
//! Every touch of a source file becomes a job:
//! - install the job in the registry, cancelling whatever job it replaces
//! - wait out the debounce window
//! - attempt conversion, retrying while the file is locked
//! - clear the registry entry on every exit path
//!
//! Jobs are fire-and-forget tokio tasks. The registry is the only thing
//! they share.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::SchedulerConfig;
use crate::outcome::{JobOutcome, Reporter};
use crate::port::{ConvertError, Converter};
use crate::registry::{DebounceRegistry, JobId, PendingJob};

/// Schedules debounced, supersedable conversion jobs
pub struct JobScheduler {
    /// Active job per source path
    registry: Arc<DebounceRegistry>,

    /// Conversion port
    converter: Arc<dyn Converter>,

    /// Outcome sink
    reporter: Arc<dyn Reporter>,

    /// Timing and retry policy
    config: SchedulerConfig,

    /// Job id allocator
    next_id: AtomicU64,
}

impl JobScheduler {
    /// Create a scheduler around a converter and a reporter
    pub fn new(
        converter: Arc<dyn Converter>,
        reporter: Arc<dyn Reporter>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            registry: Arc::new(DebounceRegistry::new()),
            converter,
            reporter,
            config,
            next_id: AtomicU64::new(1),
        }
    }

    /// Schedule a conversion of `path`, superseding any pending job for it
    ///
    /// The registry swap and the cancellation of the previous job happen
    /// before this returns, so the new job's debounce wait always starts
    /// after the old job has been told to stop. The returned handle may be
    /// dropped; the job runs to completion either way.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule_conversion(self: &Arc<Self>, path: PathBuf) -> JoinHandle<JobOutcome> {
        let job = PendingJob::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let id = job.id;
        let token = job.token.clone();

        if let Some(previous) = self.registry.register_or_replace(path.clone(), job) {
            debug!(
                "Job {} for {} supersedes job {}",
                id,
                path.display(),
                previous.id
            );
            previous.token.cancel();
        }

        let scheduler = Arc::clone(self);
        tokio::spawn(async move {
            let guard = RegistryGuard {
                registry: Arc::clone(&scheduler.registry),
                path: path.clone(),
                id,
            };

            let outcome = scheduler.run_job(&path, &token).await;

            drop(guard);
            scheduler.reporter.report(&path, &outcome);
            outcome
        })
    }

    /// Cancel every pending job
    ///
    /// Jobs already inside the converter finish their current call.
    pub fn cancel_all(&self) -> usize {
        self.registry.cancel_all()
    }

    /// Number of paths with a job in flight
    pub fn pending_jobs(&self) -> usize {
        self.registry.len()
    }

    async fn run_job(&self, path: &Path, token: &CancellationToken) -> JobOutcome {
        if !pause(token, self.config.debounce).await {
            return JobOutcome::Cancelled;
        }

        let max_attempts = self.config.max_attempts;
        for attempt in 1..=max_attempts {
            if token.is_cancelled() {
                return JobOutcome::Cancelled;
            }

            if !path.exists() {
                return JobOutcome::Stale;
            }

            match self.convert(path).await {
                Ok(output) => return JobOutcome::Converted { output },
                Err(err) if err.is_transient() => {
                    warn!(
                        "Attempt {}/{} for {}: {}",
                        attempt,
                        max_attempts,
                        path.display(),
                        err
                    );
                    if attempt < max_attempts && !pause(token, self.config.retry_delay).await {
                        return JobOutcome::Cancelled;
                    }
                }
                // Deleted between the existence check and the read
                Err(err) if !path.exists() => {
                    debug!("{} vanished during conversion: {}", path.display(), err);
                    return JobOutcome::Stale;
                }
                Err(err) => {
                    return JobOutcome::Failed {
                        message: err.detail(),
                    }
                }
            }
        }

        JobOutcome::AccessExhausted {
            attempts: max_attempts,
        }
    }

    /// Run the converter on the blocking pool
    async fn convert(&self, path: &Path) -> Result<PathBuf, ConvertError> {
        let converter = Arc::clone(&self.converter);
        let source = path.to_path_buf();

        match tokio::task::spawn_blocking(move || converter.convert(&source)).await {
            Ok(result) => result,
            Err(join_err) => Err(ConvertError::Failed(anyhow::anyhow!(
                "conversion task aborted: {}",
                join_err
            ))),
        }
    }
}

/// Sleep for `duration` unless `token` fires first; true if the full wait elapsed
async fn pause(token: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        biased;
        _ = token.cancelled() => false,
        _ = tokio::time::sleep(duration) => true,
    }
}

/// Clears a job's registry entry when the job task ends, however it ends
struct RegistryGuard {
    registry: Arc<DebounceRegistry>,
    path: PathBuf,
    id: JobId,
}

impl Drop for RegistryGuard {
    fn drop(&mut self) {
        self.registry.remove(&self.path, self.id);
    }
}

//! Watch pipeline
//!
//! Event source and startup scan both feed `JobScheduler::schedule_conversion`;
//! there is no separate path for files seen at boot.

use iconwatch_core::JobScheduler;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::error::WatchError;
use crate::normalize::ExtensionFilter;
use crate::scan;
use crate::source::{EventSource, SourceMessage};
use crate::target::WatchTarget;

/// Receives pipeline-level status (job outcomes go through `Reporter`)
pub trait PipelineReporter: Send + Sync {
    /// Watching has started
    fn watching(&self, _target: &WatchTarget, _filter: &ExtensionFilter) {}

    /// Startup scan scheduled `count` files
    fn scanned(&self, _count: usize) {}

    /// Non-fatal watch or enumeration error
    fn error(&self, error: &WatchError);
}

/// Running watch: live events plus the startup scan, feeding one scheduler
pub struct WatchPipeline {
    _source: EventSource,
    events: mpsc::Receiver<SourceMessage>,
    scheduler: Arc<JobScheduler>,
    reporter: Arc<dyn PipelineReporter>,
}

impl WatchPipeline {
    /// Register the live watch, then seed the scheduler from a startup scan
    ///
    /// The watch is registered first so files written during the scan are
    /// not missed; a file seen by both is collapsed by the debounce.
    /// A failed scan is reported and watching continues.
    pub fn start(
        target: &WatchTarget,
        filter: ExtensionFilter,
        scheduler: Arc<JobScheduler>,
        reporter: Arc<dyn PipelineReporter>,
    ) -> Result<Self, WatchError> {
        let (source, events) = EventSource::start(target, filter.clone())?;

        info!(
            "Watching {} for *.{} changes",
            target.path().display(),
            filter.extension()
        );
        reporter.watching(target, &filter);

        seed_or_report(target, &filter, &scheduler, reporter.as_ref());

        Ok(Self {
            _source: source,
            events,
            scheduler,
            reporter,
        })
    }

    /// Dispatch events until `shutdown` resolves or the source closes
    ///
    /// Pending jobs are cancelled on the way out; conversions already
    /// running are not awaited.
    pub async fn run_until<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                message = self.events.recv() => match message {
                    Some(message) => self.dispatch(message),
                    None => break,
                },
            }
        }

        let cancelled = self.scheduler.cancel_all();
        debug!("Pipeline stopped, cancelled {} pending job(s)", cancelled);
    }

    fn dispatch(&self, message: SourceMessage) {
        match message {
            Ok(touch) => {
                debug!("{:?} {}", touch.kind, touch.path.display());
                self.scheduler.schedule_conversion(touch.path);
            }
            Err(err) => {
                debug!("Watch error: {}", err);
                self.reporter.error(&err);
            }
        }
    }
}

/// Run the startup scan; a failure is reported, never fatal
fn seed_or_report(
    target: &WatchTarget,
    filter: &ExtensionFilter,
    scheduler: &Arc<JobScheduler>,
    reporter: &dyn PipelineReporter,
) {
    match scan::seed(target, filter, scheduler) {
        Ok(count) => {
            info!("Startup scan scheduled {} file(s)", count);
            reporter.scanned(count);
        }
        Err(err) => {
            debug!("Startup scan failed: {}", err);
            reporter.error(&err);
        }
    }
}

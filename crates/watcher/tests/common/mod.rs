//! Shared fixtures for pipeline tests

#![allow(dead_code)]

use iconwatch_core::{
    derive_output_path, ConvertError, Converter, JobOutcome, JobScheduler, Reporter,
    SchedulerConfig,
};
use iconwatch_watcher::{PipelineReporter, WatchError};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Converter that records every call and always succeeds
#[derive(Default)]
pub struct CountingConverter {
    calls: Mutex<Vec<PathBuf>>,
}

impl CountingConverter {
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().clone()
    }

    pub fn calls_named(&self, name: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|p| p.file_name().map(|n| n == name).unwrap_or(false))
            .count()
    }
}

impl Converter for CountingConverter {
    fn convert(&self, source: &Path) -> Result<PathBuf, ConvertError> {
        self.calls.lock().push(source.to_path_buf());
        Ok(derive_output_path(source))
    }
}

/// Collects job outcomes and pipeline status
#[derive(Default)]
pub struct CollectingReporter {
    pub outcomes: Mutex<Vec<(PathBuf, JobOutcome)>>,
    pub scanned: Mutex<Option<usize>>,
    pub errors: Mutex<Vec<String>>,
}

impl CollectingReporter {
    pub fn converted(&self) -> usize {
        self.outcomes
            .lock()
            .iter()
            .filter(|(_, o)| matches!(o, JobOutcome::Converted { .. }))
            .count()
    }
}

impl Reporter for CollectingReporter {
    fn report(&self, source: &Path, outcome: &JobOutcome) {
        self.outcomes
            .lock()
            .push((source.to_path_buf(), outcome.clone()));
    }
}

impl PipelineReporter for CollectingReporter {
    fn scanned(&self, count: usize) {
        *self.scanned.lock() = Some(count);
    }

    fn error(&self, error: &WatchError) {
        self.errors.lock().push(error.to_string());
    }
}

/// Scheduler with a short debounce so tests stay quick
pub fn scheduler(
    converter: &Arc<CountingConverter>,
    reporter: &Arc<CollectingReporter>,
) -> Arc<JobScheduler> {
    let config = SchedulerConfig::default()
        .with_debounce(Duration::from_millis(150))
        .with_retry_delay(Duration::from_millis(20));
    Arc::new(JobScheduler::new(
        converter.clone(),
        reporter.clone(),
        config,
    ))
}

/// Poll `condition` until it holds or `timeout` passes
pub async fn wait_for(condition: impl Fn() -> bool, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    condition()
}

//! Operator-facing status lines

use iconwatch_core::{JobOutcome, Reporter};
use iconwatch_watcher::{ExtensionFilter, PipelineReporter, WatchError, WatchTarget};
use owo_colors::OwoColorize;
use std::path::Path;

/// Prints one line per start, export, failure and watch error
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// Final line after Ctrl+C
    pub fn stopped(&self) {
        println!("{}", "Stopped watching".dimmed());
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, source: &Path, outcome: &JobOutcome) {
        let Some(line) = outcome_line(source, outcome) else {
            return;
        };

        if outcome.is_failure() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

impl PipelineReporter for ConsoleReporter {
    fn watching(&self, target: &WatchTarget, filter: &ExtensionFilter) {
        println!(
            "{} {} for *.{} changes (Ctrl+C to stop)",
            "Watching".green().bold(),
            target.path().display(),
            filter.extension()
        );
    }

    fn scanned(&self, count: usize) {
        if count > 0 {
            println!("{} {} existing file(s)", "Queued".cyan(), count);
        }
    }

    fn error(&self, error: &WatchError) {
        eprintln!("{}", error_line(error));
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Status line for a finished job; `None` for silent outcomes
pub fn outcome_line(source: &Path, outcome: &JobOutcome) -> Option<String> {
    let name = file_name(source);

    match outcome {
        JobOutcome::Converted { output } => Some(format!(
            "{} {} -> {}",
            "Exported".green(),
            name,
            file_name(output)
        )),
        JobOutcome::AccessExhausted { attempts } => Some(format!(
            "{} {}: file still locked after {} attempts",
            "Failed".red(),
            name,
            attempts
        )),
        JobOutcome::Failed { message } => {
            Some(format!("{} {}: {}", "Failed".red(), name, message))
        }
        JobOutcome::Cancelled | JobOutcome::Stale => None,
    }
}

/// Status line for a non-fatal watch-side error
pub fn error_line(error: &WatchError) -> String {
    let label = match error {
        WatchError::Enumeration { .. } => "Scan error:",
        _ => "Watch error:",
    };
    format!("{} {}", label.yellow(), error)
}

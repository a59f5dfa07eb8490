//! Terminal job outcomes and how they are surfaced

use std::path::{Path, PathBuf};

/// How a conversion job ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// Artifact written
    Converted {
        /// Path of the written artifact
        output: PathBuf,
    },
    /// Superseded by a newer event or shut down (silent)
    Cancelled,
    /// Source vanished before conversion (silent)
    Stale,
    /// Every attempt hit a locked file
    AccessExhausted {
        /// Attempts made before giving up
        attempts: u32,
    },
    /// Non-retryable conversion error
    Failed {
        /// Error detail, cause chain included
        message: String,
    },
}

impl JobOutcome {
    /// Whether the operator should hear about this outcome
    pub fn is_reportable(&self) -> bool {
        !matches!(self, JobOutcome::Cancelled | JobOutcome::Stale)
    }

    /// Whether this outcome is an error
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            JobOutcome::AccessExhausted { .. } | JobOutcome::Failed { .. }
        )
    }
}

/// Receives the outcome of every finished job
///
/// Called once per job, from the job's own task, for reportable and silent
/// outcomes alike. Implementations decide what to show.
pub trait Reporter: Send + Sync + 'static {
    fn report(&self, source: &Path, outcome: &JobOutcome);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_outcomes() {
        assert!(!JobOutcome::Cancelled.is_reportable());
        assert!(!JobOutcome::Stale.is_reportable());
        assert!(JobOutcome::AccessExhausted { attempts: 5 }.is_reportable());
        assert!(JobOutcome::Converted {
            output: PathBuf::from("a.ico")
        }
        .is_reportable());
    }

    #[test]
    fn test_failure_classes() {
        assert!(JobOutcome::Failed {
            message: "bad svg".into()
        }
        .is_failure());
        assert!(!JobOutcome::Stale.is_failure());
    }
}

//! Job scheduling core for icowatch
//!
//! This crate provides:
//! - Debounce registry (one active job per source path)
//! - Job scheduler (debounce, supersede, bounded retry on locked files)
//! - Conversion port (`Converter` trait and its error classes)
//! - Outcome reporting seam (`Reporter` trait)

pub mod config;
pub mod outcome;
pub mod port;
pub mod registry;
pub mod scheduler;

// Re-exports
pub use config::SchedulerConfig;
pub use outcome::{JobOutcome, Reporter};
pub use port::{derive_output_path, is_lock_violation, ConvertError, Converter};
pub use registry::{DebounceRegistry, JobId, PendingJob};
pub use scheduler::JobScheduler;

/// Source format extension (compared case-insensitively)
pub const SOURCE_EXTENSION: &str = "svg";

/// Output artifact extension
pub const OUTPUT_EXTENSION: &str = "ico";

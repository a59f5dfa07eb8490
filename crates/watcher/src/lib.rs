//! File system watching for icowatch
//!
//! This crate turns a watched directory into conversion jobs:
//! - Watch target validation
//! - Notification normalization and extension filtering
//! - Live event source (non-recursive)
//! - Startup scan of pre-existing files
//! - Pipeline wiring both into the job scheduler

pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod scan;
pub mod source;
pub mod target;

pub use error::WatchError;
pub use normalize::{normalize, ExtensionFilter};
pub use pipeline::{PipelineReporter, WatchPipeline};
pub use source::{EventSource, SourceMessage};
pub use target::WatchTarget;

use std::path::PathBuf;

/// A source file was touched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TouchEvent {
    /// File that changed
    pub path: PathBuf,
    /// What happened to it
    pub kind: TouchKind,
}

/// Kind of touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchKind {
    /// File created
    Created,
    /// File contents changed
    Modified,
    /// File renamed into this path
    RenamedTo,
}

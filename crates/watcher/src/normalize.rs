//! Notification normalization
//!
//! Collapses the platform's event vocabulary into three kinds of touch and
//! drops everything that is not a source file.

use notify::event::{CreateKind, ModifyKind, RenameMode};
use notify::{Event, EventKind};
use std::path::Path;

use crate::{TouchEvent, TouchKind};

/// Case-insensitive file extension filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    extension: String,
}

impl ExtensionFilter {
    /// Filter admitting files with `extension` (without the dot)
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    /// Whether `path` carries the filtered extension
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(&self.extension))
            .unwrap_or(false)
    }

    /// The extension being matched
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new(iconwatch_core::SOURCE_EXTENSION)
    }
}

/// Map a raw notification to the touch events it implies
pub fn normalize(event: &Event, filter: &ExtensionFilter) -> Vec<TouchEvent> {
    let Some(kind) = classify(&event.kind) else {
        return Vec::new();
    };

    // A two-sided rename lists [from, to]; only the destination was touched
    let paths = match event.kind {
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            event.paths.last().into_iter().collect::<Vec<_>>()
        }
        _ => event.paths.iter().collect(),
    };

    paths
        .into_iter()
        .filter(|path| filter.matches(path) && !path.is_dir())
        .map(|path| TouchEvent {
            path: path.clone(),
            kind,
        })
        .collect()
}

fn classify(kind: &EventKind) -> Option<TouchKind> {
    match kind {
        EventKind::Create(CreateKind::Folder) => None,
        EventKind::Create(_) => Some(TouchKind::Created),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => None,
        EventKind::Modify(ModifyKind::Name(_)) => Some(TouchKind::RenamedTo),
        EventKind::Modify(ModifyKind::Metadata(_)) => None,
        EventKind::Modify(_) => Some(TouchKind::Modified),
        EventKind::Any => Some(TouchKind::Modified),
        EventKind::Remove(_) | EventKind::Access(_) | EventKind::Other => None,
    }
}

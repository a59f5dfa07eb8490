//! Live event source
//!
//! Bridges `notify` callbacks (delivered on the watcher's own thread) into a
//! tokio channel of normalized touch events.

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::WatchError;
use crate::normalize::{normalize, ExtensionFilter};
use crate::target::WatchTarget;
use crate::TouchEvent;

/// Capacity of the notify -> tokio bridge
const CHANNEL_CAPACITY: usize = 512;

/// Item delivered by the event source
pub type SourceMessage = Result<TouchEvent, WatchError>;

/// Non-recursive watch on a single directory
///
/// Dropping the source stops the OS watch and closes the channel.
pub struct EventSource {
    _watcher: RecommendedWatcher,
}

impl EventSource {
    /// Start watching `target`, admitting only files that pass `filter`
    pub fn start(
        target: &WatchTarget,
        filter: ExtensionFilter,
    ) -> Result<(Self, mpsc::Receiver<SourceMessage>), WatchError> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        let mut watcher = notify::recommended_watcher(
            move |res: notify::Result<notify::Event>| match res {
                Ok(event) => {
                    let touches = normalize(&event, &filter);
                    if touches.is_empty() {
                        debug!("Dropped {:?} for {:?}", event.kind, event.paths);
                    }
                    for touch in touches {
                        if tx.blocking_send(Ok(touch)).is_err() {
                            return;
                        }
                    }
                }
                Err(err) => {
                    let _ = tx.blocking_send(Err(WatchError::Notify(err)));
                }
            },
        )?;

        watcher.watch(target.path(), RecursiveMode::NonRecursive)?;

        Ok((Self { _watcher: watcher }, rx))
    }
}

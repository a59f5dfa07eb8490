//! Conversion port
//!
//! The scheduler treats conversion as an opaque, blocking operation that
//! turns a source file into an artifact at a derived output path. The only
//! thing it needs to know about a failure is whether it is worth retrying.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::OUTPUT_EXTENSION;

/// Produces an output artifact from a source file
///
/// Called on the blocking thread pool, so implementations are free to do
/// synchronous I/O and CPU-heavy work.
///
/// A source deleted while the call runs may surface as any error; the
/// scheduler treats a failure on a vanished source as stale, not failed.
pub trait Converter: Send + Sync + 'static {
    /// Convert `source`, returning the path of the artifact written
    fn convert(&self, source: &Path) -> Result<PathBuf, ConvertError>;
}

impl<F> Converter for F
where
    F: Fn(&Path) -> Result<PathBuf, ConvertError> + Send + Sync + 'static,
{
    fn convert(&self, source: &Path) -> Result<PathBuf, ConvertError> {
        self(source)
    }
}

/// Conversion failure, split by retry class
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input or output held exclusively by another writer (retryable)
    #[error("{} is locked by another process", path.display())]
    Locked {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Anything else (terminal)
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl ConvertError {
    /// Classify an I/O error raised while touching `path`
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        if is_lock_violation(&err) {
            ConvertError::Locked {
                path: path.to_path_buf(),
                source: err,
            }
        } else {
            let context = format!("I/O error on {}", path.display());
            ConvertError::Failed(anyhow::Error::new(err).context(context))
        }
    }

    /// Whether the scheduler should retry after this error
    pub fn is_transient(&self) -> bool {
        matches!(self, ConvertError::Locked { .. })
    }

    /// Single-line description including the full cause chain
    pub fn detail(&self) -> String {
        match self {
            ConvertError::Locked { source, .. } => format!("{}: {}", self, source),
            ConvertError::Failed(err) => format!("{:#}", err),
        }
    }
}

/// Output artifact path for a source file: same directory and stem, `.ico`
pub fn derive_output_path(source: &Path) -> PathBuf {
    source.with_extension(OUTPUT_EXTENSION)
}

/// Check whether an I/O error means "someone else holds this file right now"
pub fn is_lock_violation(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::WouldBlock {
        return true;
    }

    match err.raw_os_error() {
        Some(code) => is_lock_code(code),
        None => false,
    }
}

#[cfg(unix)]
fn is_lock_code(code: i32) -> bool {
    use nix::errno::Errno;

    matches!(
        Errno::from_i32(code),
        Errno::EBUSY | Errno::ETXTBSY | Errno::EAGAIN
    )
}

#[cfg(windows)]
fn is_lock_code(code: i32) -> bool {
    // ERROR_SHARING_VIOLATION, ERROR_LOCK_VIOLATION
    matches!(code, 32 | 33)
}

#[cfg(not(any(unix, windows)))]
fn is_lock_code(_code: i32) -> bool {
    false
}

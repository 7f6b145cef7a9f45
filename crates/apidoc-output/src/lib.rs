//! Output sink abstraction for apidoc.
//!
//! The rendering pipeline hands finished page content to an [`Output`] and
//! never touches the filesystem itself. [`FsOutput`] writes under an output
//! directory; [`MemoryOutput`] (behind the `mock` feature) collects pages
//! in memory for tests.
//!
//! # Path Convention
//!
//! All paths are logical page/asset paths relative to the output root, with
//! forward slashes (e.g. `"index.html"`, `"a.b.core.html"`,
//! `"css/default.css"`).

mod fs;
#[cfg(any(test, feature = "mock"))]
mod memory;

use std::path::PathBuf;

pub use fs::FsOutput;
#[cfg(any(test, feature = "mock"))]
pub use memory::MemoryOutput;

/// Error raised while persisting output.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// The logical path escapes the output root or is otherwise unusable.
    #[error("invalid output path: {}", .0.display())]
    InvalidPath(PathBuf),
    /// I/O error writing a file.
    #[error("I/O error writing {}: {source}", path.display())]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Sink for assembled page and asset content.
///
/// Implementations must be safe to call from multiple threads; pages are
/// independent and may be written concurrently.
pub trait Output: Send + Sync {
    /// Persist `contents` under the logical path `path`.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] if the content cannot be persisted.
    fn write(&self, path: &str, contents: &[u8]) -> Result<(), OutputError>;
}

//! Filesystem output implementation.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::{Output, OutputError};

/// Filesystem output sink.
///
/// Writes content under a root output directory, creating intermediate
/// directories as needed (e.g. for `css/default.css`).
///
/// # Example
///
/// ```ignore
/// use apidoc_output::{FsOutput, Output};
///
/// let output = FsOutput::new(PathBuf::from("target/doc"));
/// output.write("index.html", b"<!DOCTYPE html>...")?;
/// ```
pub struct FsOutput {
    /// Root directory all paths resolve under.
    root: PathBuf,
}

impl FsOutput {
    /// Create a filesystem output rooted at `root`.
    ///
    /// The directory itself is created lazily on first write.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root output directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reject paths that would escape the output root.
    fn validate_path(path: &str) -> Result<(), OutputError> {
        let as_path = Path::new(path);
        let escapes = as_path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir));

        if path.is_empty() || escapes {
            return Err(OutputError::InvalidPath(as_path.to_path_buf()));
        }
        Ok(())
    }
}

impl Output for FsOutput {
    fn write(&self, path: &str, contents: &[u8]) -> Result<(), OutputError> {
        Self::validate_path(path)?;

        let dest = self.root.join(path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| OutputError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        tracing::debug!(path = %dest.display(), bytes = contents.len(), "Writing output file");
        fs::write(&dest, contents).map_err(|source| OutputError::Io { path: dest, source })
    }
}

//! In-memory output implementation for testing.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::{Output, OutputError};

/// In-memory output sink for tests.
///
/// Collects everything written through it, keyed by logical path.
///
/// # Example
///
/// ```ignore
/// use apidoc_output::{MemoryOutput, Output};
///
/// let output = MemoryOutput::new();
/// output.write("index.html", b"<html></html>")?;
/// assert!(output.contains("index.html"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryOutput {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryOutput {
    /// Create an empty in-memory output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether something was written under `path`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.files.read().unwrap().contains_key(path)
    }

    /// Content written under `path`, decoded as UTF-8.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned or the content is not UTF-8.
    #[must_use]
    pub fn text(&self, path: &str) -> Option<String> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .map(|bytes| String::from_utf8(bytes.clone()).unwrap())
    }

    /// All written paths, sorted.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files.read().unwrap().keys().cloned().collect();
        paths.sort();
        paths
    }
}

impl Output for MemoryOutput {
    fn write(&self, path: &str, contents: &[u8]) -> Result<(), OutputError> {
        self.files
            .write()
            .unwrap()
            .insert(path.to_owned(), contents.to_vec());
        Ok(())
    }
}

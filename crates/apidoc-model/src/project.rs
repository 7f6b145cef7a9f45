//! Project snapshot and source-link configuration.

use std::path::Path;

use serde::Deserialize;

use crate::validate::ModelError;
use crate::var::Namespace;

/// One source-URI rewrite rule.
///
/// `pattern` is a regex tested against a var's `path`; on the first match
/// the `template` is emitted with the literal `{file}` placeholder replaced
/// by the var's `file`. Rules apply first-match-wins in declared order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SourceRule {
    /// Regex matched against the var's source root path.
    pub pattern: String,
    /// Rewrite template; `{file}` expands to the var's file name.
    pub template: String,
}

/// Source-browsing link configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SourceConfig {
    /// Base URI prepended verbatim to every rewritten path (include any
    /// trailing slash here).
    pub dir_uri: String,
    /// Ordered rewrite rules, first match wins.
    #[serde(default)]
    pub uri_rules: Vec<SourceRule>,
    /// Prefix for line-number fragments (e.g. `"L"` yields `#L42`).
    #[serde(default)]
    pub linenum_anchor_prefix: Option<String>,
}

/// Read-only project snapshot supplied at the start of a rendering pass.
#[derive(Clone, Debug, Deserialize)]
pub struct Project {
    /// Project name.
    pub name: String,
    /// Project version string.
    pub version: String,
    /// Short project description shown on the index page.
    #[serde(default)]
    pub description: Option<String>,
    /// Default doc format tag for the whole project.
    #[serde(default)]
    pub doc_format: Option<String>,
    /// Source-link configuration; absent disables source links.
    #[serde(default)]
    pub source: Option<SourceConfig>,
    /// Documented namespaces.
    #[serde(default)]
    pub namespaces: Vec<Namespace>,
}

impl Project {
    /// Parse a project snapshot from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Parse`] if the JSON does not match the model.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a project snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Io`] if the file cannot be read and
    /// [`ModelError::Parse`] if it does not match the model.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let json = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Namespaces sorted lexicographically by name (the page order).
    #[must_use]
    pub fn sorted_namespaces(&self) -> Vec<&Namespace> {
        let mut namespaces: Vec<&Namespace> = self.namespaces.iter().collect();
        namespaces.sort_by(|a, b| a.name.cmp(&b.name));
        namespaces
    }
}

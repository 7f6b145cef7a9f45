//! Source-browser link resolution.

use std::fmt::Write;

use apidoc_model::SourceConfig;
use regex::Regex;

use crate::RenderError;

/// Resolves a var's on-disk location into a source-browser URI.
///
/// Built from a [`SourceConfig`]: the `dir_uri` prefix, ordered
/// `(pattern, template)` rewrite rules, and an optional line-number anchor
/// prefix. Rules are matched against the var's source root path in declared
/// order; the first match wins and its template (with `{file}` substituted)
/// replaces the path. When nothing matches, the raw path is used as-is.
///
/// `dir_uri` is concatenated verbatim; include the trailing slash there.
pub struct SourceLocator {
    dir_uri: String,
    rules: Vec<(Regex, String)>,
    anchor_prefix: Option<String>,
}

impl SourceLocator {
    /// Compile a locator from source-link configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidPattern`] if a rule pattern is not a
    /// valid regex.
    pub fn new(config: &SourceConfig) -> Result<Self, RenderError> {
        let rules = config
            .uri_rules
            .iter()
            .map(|rule| {
                Regex::new(&rule.pattern)
                    .map(|regex| (regex, rule.template.clone()))
                    .map_err(|source| RenderError::InvalidPattern {
                        pattern: rule.pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            dir_uri: config.dir_uri.clone(),
            rules,
            anchor_prefix: config.linenum_anchor_prefix.clone(),
        })
    }

    /// Resolve a source location to a browse URI.
    #[must_use]
    pub fn uri(&self, path: &str, file: &str, line: u32) -> String {
        let rewritten = self
            .rules
            .iter()
            .find(|(pattern, _)| pattern.is_match(path))
            .map_or_else(
                || path.to_owned(),
                |(_, template)| template.replace("{file}", file),
            );

        let mut uri = format!("{}{rewritten}", self.dir_uri);
        if let Some(prefix) = &self.anchor_prefix {
            let _ = write!(uri, "#{prefix}{line}");
        }
        uri
    }
}

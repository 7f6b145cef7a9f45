//! Pluggable doc-format rendering.
//!
//! A doc string arrives with a format tag (per var, per namespace, or the
//! project default) and is rendered through whichever [`DocFormat`] is
//! registered for that tag. Unknown tags are a configuration error and
//! fail the build rather than silently rendering with a wrong format.

use std::collections::HashMap;

use pulldown_cmark::{Options, Parser};
use regex::Regex;

use crate::RenderError;
use crate::escape::escape_html;

/// Tag of the built-in plain-text format.
pub const PLAINTEXT: &str = "plaintext";

/// Tag of the built-in markdown format.
pub const MARKDOWN: &str = "markdown";

/// A doc-format implementation: raw doc string in, HTML fragment out.
pub trait DocFormat: Send + Sync {
    /// Render a raw doc string to an HTML fragment.
    fn render(&self, doc: &str) -> String;
}

/// Plain-text format: HTML-escape, then autolink bare URLs.
///
/// Any substring matching `http`/`https`/`ftp`/`file` followed by `://` and
/// non-whitespace, non-bracket characters becomes an anchor pointing at
/// itself, so bare URLs are clickable without a markup parser. Output is
/// wrapped in `<pre class="plaintext">` to preserve the doc's line breaks.
pub struct PlainText {
    url_regex: Regex,
}

impl Default for PlainText {
    fn default() -> Self {
        Self {
            url_regex: Regex::new(r"(?:https?|ftp|file)://[^\s<>\[\]]+").unwrap(),
        }
    }
}

impl DocFormat for PlainText {
    fn render(&self, doc: &str) -> String {
        let escaped = escape_html(doc);
        let linked = self
            .url_regex
            .replace_all(&escaped, |caps: &regex::Captures<'_>| {
                let url = &caps[0];
                format!(r#"<a href="{url}">{url}</a>"#)
            });
        format!(r#"<pre class="plaintext">{linked}</pre>"#)
    }
}

/// Markdown format: extended markdown via pulldown-cmark.
///
/// The raw string is passed through the converter unmodified; escaping is
/// the converter's concern.
pub struct Markdown {
    options: Options,
}

impl Default for Markdown {
    fn default() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_TASKLISTS,
        }
    }
}

impl DocFormat for Markdown {
    fn render(&self, doc: &str) -> String {
        let parser = Parser::new_ext(doc, self.options);
        let mut html = String::new();
        pulldown_cmark::html::push_html(&mut html, parser);
        html
    }
}

/// Registry mapping format tags to [`DocFormat`] implementations.
///
/// Comes with [`PLAINTEXT`] and [`MARKDOWN`] registered; additional formats
/// register explicitly via [`FormatRegistry::register`]. The default tag is
/// used when neither var, namespace, nor project declare one.
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn DocFormat>>,
    default_tag: String,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatRegistry {
    /// Create a registry with the built-in formats and [`PLAINTEXT`] as the
    /// default tag.
    #[must_use]
    pub fn new() -> Self {
        let mut formats: HashMap<String, Box<dyn DocFormat>> = HashMap::new();
        formats.insert(PLAINTEXT.to_owned(), Box::new(PlainText::default()));
        formats.insert(MARKDOWN.to_owned(), Box::new(Markdown::default()));
        Self {
            formats,
            default_tag: PLAINTEXT.to_owned(),
        }
    }

    /// Register a format implementation under a tag.
    ///
    /// Replaces any existing registration for the tag.
    pub fn register(&mut self, tag: impl Into<String>, format: Box<dyn DocFormat>) {
        self.formats.insert(tag.into(), format);
    }

    /// The tag used when no override is declared anywhere.
    #[must_use]
    pub fn default_tag(&self) -> &str {
        &self.default_tag
    }

    /// Whether a format is registered for `tag`.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.formats.contains_key(tag)
    }

    /// Render a doc string with the format registered for `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownFormat`] if no format is registered
    /// for `tag`.
    pub fn render(&self, tag: &str, doc: &str) -> Result<String, RenderError> {
        self.formats
            .get(tag)
            .map(|format| format.render(doc))
            .ok_or_else(|| RenderError::UnknownFormat(tag.to_owned()))
    }
}

/// Summary of a doc string: the text up to the first blank line.
///
/// This is the first paragraph of the doc; strings without a blank line are
/// returned whole. Used by the index page for short-form namespace docs.
#[must_use]
pub fn doc_summary(doc: &str) -> &str {
    let mut offset = 0;
    for line in doc.split_inclusive('\n') {
        if line.trim().is_empty() && offset > 0 {
            return doc[..offset].trim();
        }
        offset += line.len();
    }
    doc.trim()
}

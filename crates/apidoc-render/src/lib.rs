//! Leaf rendering components for apidoc.
//!
//! Everything here turns one small piece of API metadata into text:
//!
//! - [`escape_html`]: HTML escaping for all interpolated content
//! - [`var_anchor`]: stable, URL- and id-safe anchor tokens for vars
//! - [`FormatRegistry`]: pluggable doc-format dispatch ([`PlainText`],
//!   [`Markdown`], plus anything registered by the caller)
//! - [`SourceLocator`]: var source location to source-browser URI
//!
//! None of these know about pages; page assembly lives in `apidoc-site`.

mod anchor;
mod escape;
mod format;
mod source;

pub use anchor::var_anchor;
pub use escape::escape_html;
pub use format::{DocFormat, FormatRegistry, MARKDOWN, Markdown, PLAINTEXT, PlainText, doc_summary};
pub use source::SourceLocator;

/// Error raised by the rendering components.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A doc referenced a format tag nothing was registered for.
    #[error("no doc format registered for tag {0:?}")]
    UnknownFormat(String),
    /// A source-uri rule pattern failed to compile.
    #[error("invalid source-uri pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The offending pattern string.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },
}

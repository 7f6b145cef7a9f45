//! Static frontend assets for apidoc.
//!
//! The stylesheet and script every generated page references are compiled
//! into the binary via `rust-embed` and copied into the output directory at
//! build time. Paths are relative to the crate's `static/` directory and
//! match the relative paths pages link to (`css/...`, `js/...`).

use std::borrow::Cow;

/// Embedded static assets.
#[derive(rust_embed::RustEmbed)]
#[folder = "static"]
#[prefix = ""]
struct Assets;

/// Get an asset by path (relative to `static/`).
///
/// Returns the file contents if the asset exists, `None` otherwise.
#[must_use]
pub fn get(path: &str) -> Option<Cow<'static, [u8]>> {
    Assets::get(path).map(|f| f.data)
}

/// Iterate all available asset paths.
pub fn iter() -> impl Iterator<Item = Cow<'static, str>> {
    Assets::iter()
}

/// Return the MIME type string for the given file path.
#[must_use]
pub fn mime_for(path: &str) -> &'static str {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    // Leak the string so we get a `&'static str` — there are only a bounded
    // number of MIME types so this doesn't grow unboundedly in practice.
    Box::leak(mime.to_string().into_boxed_str())
}

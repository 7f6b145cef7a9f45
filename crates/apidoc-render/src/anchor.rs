//! Anchor identifiers for vars.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters passed through unencoded (the URL "unreserved" set).
const ANCHOR_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encode a var name as an anchor token.
///
/// Percent-encodes the name, then replaces every `%` with `.` so the result
/// is valid both as an HTML `id` attribute and as a URL fragment. The
/// output is deterministic for a given name and never contains `%`.
#[must_use]
pub fn var_anchor(name: &str) -> String {
    utf8_percent_encode(name, ANCHOR_SET)
        .to_string()
        .replace('%', ".")
}

//! Opaque, URL-safe identifiers derived from resource locations.
//!
//! An id is the unpadded URL-safe base64 of the location's UTF-8 bytes. Lookups
//! never decode an id to open a resource; they encode each known location and
//! compare, so an id is only meaningful relative to the catalog that issued it.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Derives the id for a canonical location string.
pub fn encode(location: &str) -> String {
    URL_SAFE_NO_PAD.encode(location.as_bytes())
}

/// Returns true when `id` names the resource at `location`.
///
/// A bare filename also matches, which keeps links minted before ids existed
/// working. The filename comparison runs first.
pub fn matches(id: &str, location: &str, filename: Option<&str>) -> bool {
    if filename.is_some_and(|name| name == id) {
        return true;
    }
    encode(location) == id
}

/// Recovers the location an id was minted from, if it is well formed.
///
/// Diagnostic use only: resolution goes through [`matches`].
pub fn decode(id: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(id.as_bytes()).ok()?;
    String::from_utf8(bytes).ok()
}

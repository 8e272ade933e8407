//! Log sanitization utilities
//!
//! Keeps certificate bodies, private keys and credentials from being fully
//! exposed in debug/error logs.

/// Maximum number of bytes to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of an access key id kept visible.
const KEY_ID_VISIBLE: usize = 4;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Strings within the limit are returned unchanged, longer ones are cut at a
/// char boundary and suffixed with the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask an access key id, keeping only its first characters.
///
/// `"AKIDEXAMPLE"` -> `"AKID*******"`
pub fn mask_key_id(key_id: &str) -> String {
    let visible: String = key_id.chars().take(KEY_ID_VISIBLE).collect();
    let hidden = key_id.chars().count().saturating_sub(KEY_ID_VISIBLE);
    format!("{visible}{}", "*".repeat(hidden))
}

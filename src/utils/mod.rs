//! Identifier sanitization helpers.

use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::OnceLock;

/// Characters outside `[A-Za-z0-9-]`, one or more in a row.
fn unsafe_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9\-]+").expect("static pattern compiles"))
}

/// Sanitizes a string into a stable identifier usable as a TSconfig path
/// segment.
///
/// Runs of characters outside `[A-Za-z0-9-]` collapse into a single `_`,
/// and leading/trailing underscores are trimmed. When nothing survives
/// (e.g. the input was entirely punctuation), a hash of the original input
/// is returned instead so the result is never empty and stays
/// deterministic.
///
/// The function is idempotent: sanitizing an already-sanitized string
/// yields the same string.
///
/// # Examples
///
/// ```
/// use fluidcontent::utils::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("my_ext/Standard.html"), "my_ext_Standard_html");
/// assert_eq!(sanitize_identifier("Content"), "Content");
/// assert_ne!(sanitize_identifier("???"), "");
/// ```
pub fn sanitize_identifier(input: &str) -> String {
    let replaced = unsafe_runs().replace_all(input, "_");
    let trimmed = replaced.trim_matches('_');
    if trimmed.is_empty() {
        content_hash(input)
    } else {
        trimmed.to_string()
    }
}

/// Hex digest used as the fallback identifier for inputs that sanitize to
/// nothing. Truncated to 32 characters; collision resistance at that length
/// is far beyond what a set of template ids needs.
fn content_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut hash = hex::encode(digest);
    hash.truncate(32);
    hash
}

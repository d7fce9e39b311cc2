//! Text helpers for user-visible output

/// Maximum characters of diagnostic text shown to a moderator
pub const DIAGNOSTIC_LIMIT: usize = 200;

/// Truncate to at most `max` characters, never splitting a code point
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

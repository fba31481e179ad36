//! Whitespace-insensitive text canonicalization used for matching.

/// Trim `text` and collapse every run of whitespace to a single space.
///
/// Only used for comparison. The text written into a document is never
/// normalized.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Compare two strings after normalizing both.
pub fn normalized_eq(a: &str, b: &str) -> bool {
    a.split_whitespace().eq(b.split_whitespace())
}

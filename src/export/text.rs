//! Plain-text extraction.

use crate::model::Document;

/// Every paragraph's text followed by a newline, in document order.
///
/// Empty paragraphs contribute a bare newline, so line `n` of the output is
/// paragraph `n` of the document.
pub fn extract_text(document: &Document) -> String {
    let mut text = String::new();
    for paragraph in document.paragraphs() {
        text.push_str(&paragraph.text());
        text.push('\n');
    }
    text
}

/// Non-blank lines of the document's text.
///
/// Paragraphs containing line breaks contribute one entry per line. Lines that
/// are empty or whitespace-only are dropped, and a trailing `\r` is removed.
pub fn extract_lines(document: &Document) -> Vec<String> {
    extract_text(document)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

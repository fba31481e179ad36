//! Locate the paragraph an edit targets.

use crate::model::{Document, Paragraph};

use super::normalize::normalized_eq;

/// Index of the first paragraph whose normalized text equals the normalized
/// `target`, or `None` if no paragraph matches.
///
/// The scan stops at the first match; later paragraphs with the same text are
/// never considered.
pub fn find_paragraph(document: &Document, target: &str) -> Option<usize> {
    document
        .paragraphs()
        .iter()
        .position(|paragraph| paragraph_matches(paragraph, target))
}

fn paragraph_matches(paragraph: &Paragraph, target: &str) -> bool {
    normalized_eq(&paragraph.text(), target)
}

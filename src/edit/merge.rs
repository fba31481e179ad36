//! Substitute a paragraph's text while keeping its first run's formatting.

use crate::model::Paragraph;

/// Write `replacement` into the paragraph's first run and drop every other run.
///
/// The first run keeps its formatting; anything carried only by later runs is
/// lost. Returns `false` without touching the paragraph if it has no runs,
/// since there is no formatting to anchor the new text to.
pub fn replace_paragraph_text(paragraph: &mut Paragraph, replacement: &str) -> bool {
    let Some(first) = paragraph.first_run_mut() else {
        return false;
    };
    first.set_text(replacement);

    // Highest index first so earlier indices stay valid.
    for index in (1..paragraph.runs().len()).rev() {
        paragraph.remove_run(index);
    }

    true
}

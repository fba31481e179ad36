//! Apply a batch of accepted edits to a document.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::Document;

use super::candidate::EditCandidate;
use super::matcher::find_paragraph;
use super::merge::replace_paragraph_text;

/// What happened to one accepted edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum EditOutcome {
    /// The edit replaced the text of the paragraph at this index.
    Applied { paragraph: usize },
    /// The index did not refer to any candidate.
    SkippedBadIndex,
    /// The candidate lacked a usable target or replacement.
    SkippedUnresolvable,
    /// No paragraph matched the target, or the match had no runs to edit.
    SkippedNoMatch,
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied { .. })
    }
}

/// Per-edit outcomes of one batch, in the order the indices were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    pub outcomes: Vec<IndexedOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedOutcome {
    pub index: usize,
    pub outcome: EditOutcome,
}

impl ApplyReport {
    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.outcome.is_applied()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.applied_count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndexedOutcome> {
        self.outcomes.iter()
    }
}

/// Apply the accepted candidates to `document`, one at a time, in order.
///
/// Each edit sees the document as left by the edits before it. Bad indices,
/// unresolvable candidates, and targets with no matching paragraph are skipped
/// and recorded in the report; they never stop the batch.
pub fn apply_edits(
    document: &mut Document,
    accepted: &[usize],
    candidates: &[EditCandidate],
) -> ApplyReport {
    let mut report = ApplyReport {
        outcomes: Vec::with_capacity(accepted.len()),
    };

    for &index in accepted {
        let outcome = apply_one(document, index, candidates);
        debug!(index, ?outcome, "edit processed");
        report.outcomes.push(IndexedOutcome { index, outcome });
    }

    info!(
        accepted = accepted.len(),
        applied = report.applied_count(),
        skipped = report.skipped_count(),
        "applied edit batch"
    );

    report
}

fn apply_one(document: &mut Document, index: usize, candidates: &[EditCandidate]) -> EditOutcome {
    let Some(candidate) = candidates.get(index) else {
        return EditOutcome::SkippedBadIndex;
    };
    let Some(edit) = candidate.resolve() else {
        return EditOutcome::SkippedUnresolvable;
    };
    let Some(position) = find_paragraph(document, edit.target) else {
        return EditOutcome::SkippedNoMatch;
    };

    let replaced = document
        .paragraph_mut(position)
        .is_some_and(|paragraph| replace_paragraph_text(paragraph, edit.replacement));

    if replaced {
        EditOutcome::Applied {
            paragraph: position,
        }
    } else {
        EditOutcome::SkippedNoMatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, Run};

    fn candidates() -> Vec<EditCandidate> {
        vec![
            EditCandidate::new("Managed a team", "Led a team of 5"),
            EditCandidate::new("Led development", "Drove development of the billing API"),
        ]
    }

    #[test]
    fn test_applies_matching_edit() {
        let mut doc = Document::from_texts(["Managed a team", "Led development"]);
        let report = apply_edits(&mut doc, &[0], &candidates());

        assert_eq!(doc.texts(), vec!["Led a team of 5", "Led development"]);
        assert_eq!(
            report.outcomes,
            vec![IndexedOutcome {
                index: 0,
                outcome: EditOutcome::Applied { paragraph: 0 },
            }]
        );
    }

    #[test]
    fn test_bullet_fields_win() {
        let mut doc = Document::from_texts(["Managed a team", "Managed a team of five"]);
        let edits = vec![
            EditCandidate::new("Managed a team", "Led a team of 5")
                .with_bullets("Managed a team of five", "Led five engineers"),
        ];
        apply_edits(&mut doc, &[0], &edits);
        assert_eq!(doc.texts(), vec!["Managed a team", "Led five engineers"]);
    }

    #[test]
    fn test_out_of_range_index_is_skipped() {
        let mut doc = Document::from_texts(["Managed a team", "Led development"]);
        let report = apply_edits(&mut doc, &[99], &candidates());
        assert_eq!(doc.texts(), vec!["Managed a team", "Led development"]);
        assert_eq!(report.outcomes[0].outcome, EditOutcome::SkippedBadIndex);
    }

    #[test]
    fn test_unresolvable_candidate_is_skipped() {
        let mut doc = Document::from_texts(["Managed a team"]);
        let edits = vec![EditCandidate::default()];
        let report = apply_edits(&mut doc, &[0], &edits);
        assert_eq!(report.outcomes[0].outcome, EditOutcome::SkippedUnresolvable);
        assert_eq!(doc.texts(), vec!["Managed a team"]);
    }

    #[test]
    fn test_edits_apply_in_order_and_chain() {
        let mut doc = Document::from_texts(["Managed a team"]);
        let edits = vec![
            EditCandidate::new("Managed a team", "Led a team"),
            EditCandidate::new("Led a team", "Led a team of 5"),
        ];

        let report = apply_edits(&mut doc, &[0, 1], &edits);
        assert_eq!(doc.texts(), vec!["Led a team of 5"]);
        assert_eq!(report.applied_count(), 2);

        // Reversed order: the second edit finds nothing yet.
        let mut doc = Document::from_texts(["Managed a team"]);
        let report = apply_edits(&mut doc, &[1, 0], &edits);
        assert_eq!(doc.texts(), vec!["Led a team"]);
        assert_eq!(report.outcomes[0].outcome, EditOutcome::SkippedNoMatch);
        assert_eq!(report.applied_count(), 1);
    }

    #[test]
    fn test_reapplying_is_idempotent() {
        let mut doc = Document::from_texts(["Managed a team", "Led development"]);
        apply_edits(&mut doc, &[0, 1], &candidates());
        let first = doc.texts();

        let report = apply_edits(&mut doc, &[0, 1], &candidates());
        assert_eq!(doc.texts(), first);
        assert_eq!(report.applied_count(), 0);
        assert_eq!(report.skipped_count(), 2);
    }

    #[test]
    fn test_paragraph_without_runs_is_not_edited() {
        let mut doc = Document::new(vec![Paragraph::new(Vec::new())]);
        let edits = vec![EditCandidate::new("Managed a team", "Led")];
        let report = apply_edits(&mut doc, &[0], &edits);
        assert_eq!(report.outcomes[0].outcome, EditOutcome::SkippedNoMatch);
    }

    #[test]
    fn test_duplicate_paragraphs_only_first_changes() {
        let mut doc = Document::new(vec![
            Paragraph::new(vec![Run::new("Managed a team")]),
            Paragraph::new(vec![Run::new("Managed "), Run::new("a team")]),
        ]);
        apply_edits(&mut doc, &[0], &candidates());
        assert_eq!(doc.texts(), vec!["Led a team of 5", "Managed a team"]);

        // A second pass reaches the duplicate.
        apply_edits(&mut doc, &[0], &candidates());
        assert_eq!(doc.texts(), vec!["Led a team of 5", "Led a team of 5"]);
    }

    #[test]
    fn test_report_serializes_with_status_tags() {
        let report = ApplyReport {
            outcomes: vec![
                IndexedOutcome {
                    index: 0,
                    outcome: EditOutcome::Applied { paragraph: 3 },
                },
                IndexedOutcome {
                    index: 7,
                    outcome: EditOutcome::SkippedBadIndex,
                },
            ],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcomes"][0]["outcome"]["status"], "applied");
        assert_eq!(json["outcomes"][0]["outcome"]["paragraph"], 3);
        assert_eq!(json["outcomes"][1]["outcome"]["status"], "skipped-bad-index");
        assert_eq!(json["outcomes"][1]["index"], 7);
    }
}

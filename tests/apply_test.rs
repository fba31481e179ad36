//! End-to-end edit application over DOCX bytes.

mod common;

use common::{bold, docx, docx_from_texts, italic, plain};
use proptest::prelude::*;
use redline::{
    Docx, EditCandidate, EditOutcome, ErrorKind, document_lines, document_text,
    process_document, process_document_with_report,
};

fn paragraph_texts(bytes: &[u8]) -> Vec<String> {
    Docx::from_bytes(bytes).unwrap().document().texts()
}

fn candidates() -> Vec<EditCandidate> {
    vec![
        EditCandidate::new("Managed a team", "Led a team of 5"),
        EditCandidate::new("Led development", "Drove development of the billing API"),
    ]
}

#[test]
fn test_accepted_edit_replaces_paragraph() {
    let original = docx_from_texts(&["Managed a team", "Led development"]);
    let updated = process_document(&original, &[0], &candidates()).unwrap();

    assert_eq!(
        paragraph_texts(&updated),
        vec!["Led a team of 5", "Led development"]
    );
}

#[test]
fn test_bullet_fields_take_precedence() {
    let original = docx_from_texts(&["Managed a team", "Built dashboards"]);
    let edits = vec![
        EditCandidate::new("Managed a team", "Led a team of 5")
            .with_bullets("Built dashboards", "Built Grafana dashboards for 12 services"),
    ];
    let updated = process_document(&original, &[0], &edits).unwrap();

    assert_eq!(
        paragraph_texts(&updated),
        vec!["Managed a team", "Built Grafana dashboards for 12 services"]
    );
}

#[test]
fn test_stale_index_is_ignored() {
    let original = docx_from_texts(&["Managed a team", "Led development"]);
    let (updated, report) = process_document_with_report(&original, &[99], &candidates()).unwrap();

    assert_eq!(
        paragraph_texts(&updated),
        vec!["Managed a team", "Led development"]
    );
    assert_eq!(report.outcomes[0].outcome, EditOutcome::SkippedBadIndex);
}

#[test]
fn test_no_accepted_edits_keeps_text() {
    let original = docx_from_texts(&["Managed a team", "Led development"]);
    let updated = process_document(&original, &[], &candidates()).unwrap();
    assert_eq!(paragraph_texts(&updated), paragraph_texts(&original));
}

#[test]
fn test_invalid_signature_fails_fast() {
    let err = process_document(b"GIF89a....", &[0], &candidates()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidFormat);
}

#[test]
fn test_whitespace_differences_still_match() {
    let original = docx(&[vec![plain("Managed   a"), plain("\tteam ")]]);
    let updated = process_document(&original, &[0], &candidates()).unwrap();
    assert_eq!(paragraph_texts(&updated), vec!["Led a team of 5"]);
}

#[test]
fn test_first_run_formatting_survives() {
    let original = docx(&[vec![bold("Managed "), italic("a "), plain("team")]]);
    let updated = process_document(&original, &[0], &candidates()).unwrap();

    let docx = Docx::from_bytes(&updated).unwrap();
    let paragraph = &docx.document().paragraphs()[0];
    assert_eq!(paragraph.runs().len(), 1);
    assert_eq!(paragraph.text(), "Led a team of 5");
    assert_eq!(
        paragraph.runs()[0].properties().as_xml(),
        "<w:rPr><w:b/></w:rPr>"
    );
}

#[test]
fn test_replacement_is_written_verbatim() {
    let original = docx_from_texts(&["Managed a team"]);
    let edits = vec![EditCandidate::new("Managed a team", "  Led  a team & more ")];
    let updated = process_document(&original, &[0], &edits).unwrap();
    assert_eq!(paragraph_texts(&updated), vec!["  Led  a team & more "]);
}

#[test]
fn test_second_pass_is_a_no_op() {
    let original = docx_from_texts(&["Managed a team", "Led development", "Wrote tests"]);
    let once = process_document(&original, &[0, 1], &candidates()).unwrap();
    let (twice, report) = process_document_with_report(&once, &[0, 1], &candidates()).unwrap();

    assert_eq!(paragraph_texts(&twice), paragraph_texts(&once));
    assert!(
        report
            .iter()
            .all(|o| o.outcome == EditOutcome::SkippedNoMatch)
    );
}

#[test]
fn test_only_first_duplicate_changes() {
    let original = docx_from_texts(&["Managed a team", "Managed a team"]);
    let updated = process_document(&original, &[0], &candidates()).unwrap();
    assert_eq!(
        paragraph_texts(&updated),
        vec!["Led a team of 5", "Managed a team"]
    );
}

#[test]
fn test_report_covers_every_skip_reason() {
    let original = docx_from_texts(&["Managed a team"]);
    let edits = vec![
        EditCandidate::new("Managed a team", "Led a team of 5"),
        EditCandidate::default(),
        EditCandidate::new("Not in the document", "Anything"),
    ];
    let (_, report) = process_document_with_report(&original, &[0, 1, 2, 3], &edits).unwrap();

    let outcomes: Vec<_> = report.iter().map(|o| o.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            EditOutcome::Applied { paragraph: 0 },
            EditOutcome::SkippedUnresolvable,
            EditOutcome::SkippedNoMatch,
            EditOutcome::SkippedBadIndex,
        ]
    );
}

#[test]
fn test_extract_text() {
    let original = docx(&[
        vec![bold("Jane "), plain("Doe")],
        vec![],
        vec![plain("Managed a team")],
    ]);
    assert_eq!(
        document_text(&original).unwrap(),
        "Jane Doe\n\nManaged a team\n"
    );
    assert_eq!(
        document_lines(&original).unwrap(),
        vec!["Jane Doe", "Managed a team"]
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_reapplying_converges(
        texts in prop::collection::btree_set("[a-d]{1,3}( [a-d]{1,3}){0,2}", 1..6),
        edits in prop::collection::btree_map("[a-d]{1,3}", "[e-h]{1,3}", 1..4),
        accepted in prop::collection::btree_set(0usize..5, 0..5),
    ) {
        let candidates: Vec<EditCandidate> = edits
            .iter()
            .map(|(target, replacement)| EditCandidate::new(target.clone(), replacement.clone()))
            .collect();
        let accepted: Vec<usize> = accepted.into_iter().collect();

        let mut doc = redline::Document::from_texts(texts);
        redline::apply_edits(&mut doc, &accepted, &candidates);
        let once = doc.texts();

        let report = redline::apply_edits(&mut doc, &accepted, &candidates);
        prop_assert_eq!(doc.texts(), once);
        prop_assert_eq!(report.applied_count(), 0);
    }
}

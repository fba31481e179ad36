//! Byte-in, byte-out entry points.
//!
//! Each call builds its own [`Docx`] from the given bytes and drops it before
//! returning; nothing is cached or shared between calls.

use tracing::{debug, error, warn};

use crate::docx::{Docx, WriteConfig, check_signature};
use crate::edit::{ApplyReport, EditCandidate, apply_edits};
use crate::error::{Error, ErrorKind, Result};
use crate::export::{PdfConfig, PdfExporter, extract_lines, extract_text};

/// Apply the accepted edits to a DOCX and return the new DOCX bytes.
///
/// Indices outside `candidates`, candidates without a usable target or
/// replacement, and targets matching no paragraph are skipped silently. The
/// call fails only if the document itself cannot be read or written.
///
/// # Example
///
/// ```no_run
/// use redline::{EditCandidate, process_document};
///
/// let original = std::fs::read("resume.docx")?;
/// let edits = vec![EditCandidate::new("Managed a team", "Led a team of 5")];
/// let updated = process_document(&original, &[0], &edits)?;
/// std::fs::write("resume-updated.docx", updated)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn process_document(
    original: &[u8],
    accepted: &[usize],
    candidates: &[EditCandidate],
) -> Result<Vec<u8>> {
    process_document_with_report(original, accepted, candidates).map(|(bytes, _)| bytes)
}

/// Like [`process_document`], also returning what happened to each edit.
pub fn process_document_with_report(
    original: &[u8],
    accepted: &[usize],
    candidates: &[EditCandidate],
) -> Result<(Vec<u8>, ApplyReport)> {
    process_with_config(original, accepted, candidates, &WriteConfig::default())
}

/// Apply edits and write the result with the given settings.
pub fn process_with_config(
    original: &[u8],
    accepted: &[usize],
    candidates: &[EditCandidate],
    config: &WriteConfig,
) -> Result<(Vec<u8>, ApplyReport)> {
    let run = || -> Result<(Vec<u8>, ApplyReport)> {
        let mut docx = Docx::from_bytes(original)?;
        debug!(
            part = docx.main_part(),
            paragraphs = docx.document().len(),
            candidates = candidates.len(),
            "loaded document"
        );
        let report = apply_edits(docx.document_mut(), accepted, candidates);
        let bytes = docx.to_bytes_with_config(config)?;
        Ok((bytes, report))
    };
    run().inspect_err(|e| log_failure("process document", e))
}

/// Render a DOCX to the placeholder PDF page.
///
/// The input is only checked for the zip signature; its content does not
/// affect the output.
pub fn export_pdf(document: &[u8]) -> Result<Vec<u8>> {
    export_pdf_with_config(document, &PdfConfig::default())
}

pub fn export_pdf_with_config(document: &[u8], config: &PdfConfig) -> Result<Vec<u8>> {
    let run = || -> Result<Vec<u8>> {
        check_signature(document)?;
        Ok(PdfExporter::new().with_config(config.clone()).render()?)
    };
    run().inspect_err(|e| log_failure("export PDF", e))
}

/// Newline-joined text of all body paragraphs, in document order.
pub fn document_text(document: &[u8]) -> Result<String> {
    Docx::from_bytes(document)
        .map(|docx| extract_text(docx.document()))
        .inspect_err(|e| log_failure("extract text", e))
}

/// Non-blank lines of the document's text.
pub fn document_lines(document: &[u8]) -> Result<Vec<String>> {
    Docx::from_bytes(document)
        .map(|docx| extract_lines(docx.document()))
        .inspect_err(|e| log_failure("extract text", e))
}

fn log_failure(operation: &str, err: &Error) {
    match err.kind() {
        ErrorKind::InvalidFormat => warn!(operation, error = %err, "rejected input"),
        ErrorKind::ProcessingFailure => error!(operation, error = ?err, "operation failed"),
    }
}

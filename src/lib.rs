//! # redline
//!
//! Apply accepted text edits to DOCX documents while keeping their formatting.
//!
//! ## Features
//!
//! - Load a DOCX and expose its body paragraphs and runs
//! - Match proposed edits to paragraphs by whitespace-insensitive text
//! - Replace a paragraph's text in its first run, preserving that run's formatting
//! - Write the package back with every untouched byte of the document intact
//! - Extract plain text, or emit a placeholder PDF page
//!
//! ## Quick Start
//!
//! ```no_run
//! use redline::{EditCandidate, process_document};
//!
//! let original = std::fs::read("resume.docx")?;
//! let candidates = vec![
//!     EditCandidate::new("Managed a team", "Led a team of 5"),
//!     EditCandidate::new("Wrote code", "Shipped the billing service in Rust"),
//! ];
//!
//! // Only the edits the user accepted are applied, in this order.
//! let updated = process_document(&original, &[1, 0], &candidates)?;
//! std::fs::write("resume-updated.docx", updated)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Working with the paragraph model
//!
//! ```
//! use redline::{Document, EditCandidate, EditOutcome, apply_edits};
//!
//! let mut doc = Document::from_texts(["Managed a team", "Led development"]);
//! let candidates = vec![EditCandidate::new("Managed  a team", "Led a team of 5")];
//!
//! let report = apply_edits(&mut doc, &[0, 99], &candidates);
//! assert_eq!(doc.texts(), vec!["Led a team of 5", "Led development"]);
//! assert_eq!(report.outcomes[1].outcome, EditOutcome::SkippedBadIndex);
//! ```

pub mod docx;
pub mod edit;
pub mod error;
pub mod export;
pub mod model;
pub mod request;
pub mod service;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use docx::{Docx, WriteConfig, read_docx, write_docx};
pub use edit::{
    ApplyReport, EditCandidate, EditOutcome, ResolvedEdit, apply_edits, find_paragraph, normalize,
    replace_paragraph_text, resolve,
};
pub use error::{Error, ErrorKind, Result};
pub use export::{PdfConfig, PdfExporter};
pub use model::{Document, Paragraph, Run, RunProperties};
pub use service::{
    document_lines, document_text, export_pdf, export_pdf_with_config, process_document,
    process_document_with_report, process_with_config,
};

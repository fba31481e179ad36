//! Output formats other than DOCX.
//!
//! - [`extract_text`] / [`extract_lines`]: the document's paragraphs as plain text
//! - [`PdfExporter`]: a fixed single-page PDF standing in for a layout renderer

mod pdf;
mod text;

pub use pdf::{PdfConfig, PdfExporter};
pub use text::{extract_lines, extract_text};

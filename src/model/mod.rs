//! Paragraph model for word-processing documents.
//!
//! This module contains:
//! - [`Document`]: the ordered body paragraphs of one loaded document
//! - [`Paragraph`]: an ordered sequence of runs with derived text
//! - [`Run`]: the smallest formatting-carrying text fragment
//! - [`RunProperties`]: opaque run formatting, carried but never inspected

mod document;
mod run;

pub use document::{Document, Paragraph};
pub use run::{Run, RunProperties};

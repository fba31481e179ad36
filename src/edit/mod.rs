//! The edit-application engine.
//!
//! Control flow for one batch: [`apply_edits`] walks the accepted indices,
//! [`resolve`] picks each candidate's target and replacement,
//! [`find_paragraph`] locates the first paragraph whose [`normalize`]d text
//! equals the target, and [`replace_paragraph_text`] rewrites it in place.

mod apply;
mod candidate;
mod matcher;
mod merge;
mod normalize;

pub use apply::{ApplyReport, EditOutcome, IndexedOutcome, apply_edits};
pub use candidate::{EditCandidate, ResolvedEdit, resolve};
pub use matcher::find_paragraph;
pub use merge::replace_paragraph_text;
pub use normalize::{normalize, normalized_eq};

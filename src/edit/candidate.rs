//! Proposed edits and how their alternative fields are resolved.

use serde::{Deserialize, Serialize};

use super::normalize::normalize;

/// One proposed change to a document.
///
/// The bullet-level fields, when present and non-empty, take precedence over
/// the passage-level `original` / `suggested` pair. `section` and `reason`
/// travel with the candidate but are never read by the edit engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCandidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, alias = "bulletOriginal", skip_serializing_if = "Option::is_none")]
    pub original_bullet: Option<String>,
    #[serde(default, alias = "bulletImproved", skip_serializing_if = "Option::is_none")]
    pub improved_bullet: Option<String>,
}

impl EditCandidate {
    /// A passage-level edit.
    pub fn new(original: impl Into<String>, suggested: impl Into<String>) -> Self {
        Self {
            original: Some(original.into()),
            suggested: Some(suggested.into()),
            ..Self::default()
        }
    }

    pub fn with_bullets(
        mut self,
        original_bullet: impl Into<String>,
        improved_bullet: impl Into<String>,
    ) -> Self {
        self.original_bullet = Some(original_bullet.into());
        self.improved_bullet = Some(improved_bullet.into());
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Pick the target and replacement this candidate stands for.
    pub fn resolve(&self) -> Option<ResolvedEdit<'_>> {
        resolve(self)
    }
}

/// The strings an edit actually uses: what to find and what to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedEdit<'a> {
    pub target: &'a str,
    pub replacement: &'a str,
}

/// Resolve a candidate's field pairs.
///
/// `original_bullet` wins over `original` and `improved_bullet` over
/// `suggested` whenever the bullet field is present and non-empty. Returns
/// `None` when either side is missing after that fallback, or when the target
/// is blank: a blank target would match the first empty paragraph, which is
/// never what an edit means. A blank replacement is kept and clears the
/// paragraph's text.
pub fn resolve(candidate: &EditCandidate) -> Option<ResolvedEdit<'_>> {
    let target = prefer_non_empty(&candidate.original_bullet, &candidate.original)?;
    let replacement = prefer_non_empty(&candidate.improved_bullet, &candidate.suggested)?;

    if normalize(target).is_empty() {
        return None;
    }

    Some(ResolvedEdit {
        target,
        replacement,
    })
}

fn prefer_non_empty<'a>(preferred: &'a Option<String>, fallback: &'a Option<String>) -> Option<&'a str> {
    match preferred.as_deref() {
        Some(value) if !value.is_empty() => Some(value),
        _ => fallback.as_deref(),
    }
}

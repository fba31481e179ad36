//! JSON request and response envelopes.
//!
//! Documents travel base64-encoded inside JSON objects with camelCase field
//! names. The handlers here turn a request into a response without ever
//! failing: every error becomes `success: false` with a message.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::edit::{ApplyReport, EditCandidate};
use crate::error::{Error, ErrorKind};
use crate::service::{export_pdf, process_document_with_report};

/// A request to apply accepted edits to a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    /// The original DOCX, base64-encoded.
    pub original_file: String,
    /// Indices into `suggested_edits`. Negative or out-of-range values are skipped.
    #[serde(default)]
    pub accepted_edits: Vec<i64>,
    #[serde(default)]
    pub suggested_edits: Vec<EditCandidate>,
    /// Carried for the caller's benefit; not used when applying edits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    /// The updated DOCX, base64-encoded. Absent on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<ApplyReport>,
}

/// A request to render a document to a page format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// The DOCX to render, base64-encoded.
    pub document: String,
    /// Requested output format; only `"pdf"` is produced.
    #[serde(default = "default_export_format")]
    pub format: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    /// The rendered PDF, base64-encoded. Absent on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
    pub success: bool,
    pub message: String,
}

fn default_export_format() -> String {
    "pdf".to_string()
}

/// Apply the accepted edits carried by a request.
pub fn handle_process(request: &ProcessRequest) -> ProcessResponse {
    match run_process(request) {
        Ok((document, report)) => ProcessResponse {
            document: Some(document),
            success: true,
            message: "Document processed successfully".to_string(),
            report: Some(report),
        },
        Err(e) => ProcessResponse {
            document: None,
            success: false,
            message: match e.kind() {
                ErrorKind::InvalidFormat => format!("Invalid document format: {e}"),
                ErrorKind::ProcessingFailure => format!("Failed to process document: {e}"),
            },
            report: None,
        },
    }
}

fn run_process(request: &ProcessRequest) -> Result<(String, ApplyReport), Error> {
    let original = STANDARD.decode(request.original_file.trim())?;
    let accepted: Vec<usize> = request
        .accepted_edits
        .iter()
        .map(|&i| usize::try_from(i).unwrap_or(usize::MAX))
        .collect();
    let (bytes, report) =
        process_document_with_report(&original, &accepted, &request.suggested_edits)?;
    Ok((STANDARD.encode(bytes), report))
}

/// Render the document carried by a request.
pub fn handle_export(request: &ExportRequest) -> ExportResponse {
    match run_export(request) {
        Ok(pdf) => ExportResponse {
            pdf: Some(pdf),
            success: true,
            message: "Document exported successfully".to_string(),
        },
        Err(e) => ExportResponse {
            pdf: None,
            success: false,
            message: format!("Failed to export document: {e}"),
        },
    }
}

fn run_export(request: &ExportRequest) -> Result<String, Error> {
    if !request.format.eq_ignore_ascii_case("pdf") {
        return Err(Error::InvalidFormat(format!(
            "unsupported export format '{}'",
            request.format
        )));
    }
    let document = STANDARD.decode(request.document.trim())?;
    Ok(STANDARD.encode(export_pdf(&document)?))
}

/// Status payload for liveness checks.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

pub fn health() -> HealthStatus {
    HealthStatus {
        status: "OK",
        service: "redline document service",
        version: env!("CARGO_PKG_VERSION"),
    }
}

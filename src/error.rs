//! Error types for redline operations.

use thiserror::Error;

/// Errors that can occur while reading, editing, or writing a document.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidFormat(String),

    #[error("Missing package part: {0}")]
    MissingPart(String),

    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of an [`Error`] for callers that only need to know
/// whether the request itself was rejected or the operation failed midway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input is not a DOCX container at all (empty, or wrong signature).
    InvalidFormat,
    /// The container was recognized but could not be parsed, edited, or written.
    ProcessingFailure,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidFormat(_) => ErrorKind::InvalidFormat,
            _ => ErrorKind::ProcessingFailure,
        }
    }

    pub fn is_invalid_format(&self) -> bool {
        self.kind() == ErrorKind::InvalidFormat
    }
}

pub type Result<T> = std::result::Result<T, Error>;

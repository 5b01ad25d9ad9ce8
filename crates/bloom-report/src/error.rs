//! Error types for document export.

use thiserror::Error;

/// Errors raised while rendering the export document.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write document XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("failed to write document part: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to package document: {0}")]
    Package(#[from] zip::result::ZipError),
}

impl ReportError {
    pub fn user_message(&self) -> String {
        "The export document could not be built. Try building it again.".to_string()
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

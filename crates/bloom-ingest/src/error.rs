//! Error types for module content extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning uploaded files into module text.
///
/// Per-file failures (`UnsupportedFileType`, `Unreadable`, `FileRead`) are
/// collected next to the files that did extract; only the token budget
/// blocks the whole upload.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Per-file Errors ===
    /// File extension is not one we can extract text from.
    #[error("unsupported file type: {name}")]
    UnsupportedFileType { name: String },

    /// File looked supported but could not be parsed.
    #[error("failed to parse '{name}': {reason}")]
    Unreadable { name: String, reason: String },

    /// Failed to read a file from disk.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Budget Errors ===
    /// Combined content is larger than the module token budget.
    #[error("module content is {tokens} tokens, over the limit of {limit}")]
    TokenLimitExceeded { tokens: usize, limit: usize },
}

impl IngestError {
    pub(crate) fn unreadable(name: &str, reason: impl std::fmt::Display) -> Self {
        Self::Unreadable {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedFileType { name } => format!(
                "'{name}' is not a supported file type. Upload .txt, .md, .docx or .pptx files."
            ),
            Self::Unreadable { name, .. } => format!(
                "Failed to parse '{name}': the file may be corrupted, password-protected, or in an unsupported format."
            ),
            Self::FileRead { path, .. } => format!("Could not read {}", path.display()),
            Self::TokenLimitExceeded { tokens, limit } => format!(
                "The uploaded content is about {tokens} tokens, above the {limit} token limit. Remove a file or upload a shorter version."
            ),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::TokenLimitExceeded {
            tokens: 30_000,
            limit: 27_000,
        };
        assert_eq!(
            err.to_string(),
            "module content is 30000 tokens, over the limit of 27000"
        );
    }

    #[test]
    fn test_unreadable_user_message_names_file() {
        let err = IngestError::unreadable("notes.docx", "bad zip");
        assert!(err.user_message().contains("notes.docx"));
        assert!(err.to_string().contains("bad zip"));
    }
}

//! Persistence error types.
//!
//! All persistence operations return structured errors that provide
//! user-friendly messages and optional remediation hints. A failed load
//! never touches the current session.

use std::path::PathBuf;
use thiserror::Error;

use bloom_model::ObjectiveId;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Not a session snapshot.
    #[error("Invalid snapshot format: {reason}")]
    InvalidFormat { reason: String },

    /// Snapshot written by a newer schema.
    #[error("Snapshot version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion { found: u64, max_supported: u32 },

    /// Serialization error.
    #[error("Failed to serialize session snapshot")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot state does not match the domain types.
    #[error("Failed to deserialize session snapshot: {source}")]
    Deserialization {
        #[source]
        source: serde_json::Error,
    },

    /// Two objectives share an id.
    #[error("Snapshot contains objective {id} more than once")]
    DuplicateObjective { id: ObjectiveId },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            reason: reason.into(),
        }
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::InvalidFormat { reason } => {
                format!("The file is not a valid saved session: {reason}")
            }
            Self::UnsupportedVersion {
                found,
                max_supported,
            } => {
                format!(
                    "This session was saved by a newer version of the tool \
                    (snapshot version {found}, this version supports up to {max_supported})."
                )
            }
            Self::Serialization { .. } => {
                "An error occurred while saving the session.".to_string()
            }
            Self::Deserialization { .. } => {
                "An error occurred while reading the saved session. The file may be corrupted."
                    .to_string()
            }
            Self::DuplicateObjective { id } => {
                format!("The saved session lists learning objective {id} twice.")
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::InvalidFormat { .. } => {
                Some("Make sure you selected a .json file saved by this tool.".into())
            }
            Self::UnsupportedVersion { .. } => Some("Update to the latest version.".into()),
            Self::Serialization { .. } => None,
            Self::Deserialization { .. } | Self::DuplicateObjective { .. } => {
                Some("Try loading an earlier save if you have one.".into())
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistError>;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid objective id: {0:?}")]
    InvalidObjectiveId(String),
    #[error("unknown Bloom level: {0}")]
    UnknownBloomLevel(String),
    #[error("unknown option id: {0}")]
    UnknownOptionId(String),
    #[error("unknown alignment label: {0}")]
    UnknownAlignmentLabel(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// Failure reported by a content generator (alignment, questions, outline).
///
/// Provider-specific failures are converted into this type at the boundary,
/// so the workflow only ever sees success or one of these two kinds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The model answered, but the payload does not match the expected schema.
    #[error("malformed model output: {reason}")]
    MalformedModelOutput { reason: String },

    /// The provider could not produce a response at all.
    #[error("generation provider failed: {message}")]
    Provider { message: String },
}

impl GenerationError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedModelOutput {
            reason: reason.into(),
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::MalformedModelOutput { .. } => {
                "AI returned an unexpected format, please retry.".to_string()
            }
            Self::Provider { message } => format!("The AI service could not be reached: {message}"),
        }
    }
}

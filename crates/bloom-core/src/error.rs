//! Workflow error types.
//!
//! Invalidation itself never fails; these errors come from guarded
//! transitions and from generator calls converted at the boundary.

use thiserror::Error;

use bloom_model::{GenerationError, ObjectiveId};

/// Why a guarded transition was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuardFailure {
    #[error("objective text is empty")]
    EmptyText,
    #[error("intended Bloom level is not set")]
    LevelUnset,
    #[error("objective has not been accepted as final")]
    NotFinalized,
    #[error("module content is missing")]
    MissingModuleContent,
    #[error("alignment result has no suggested rewrite")]
    NoSuggestion,
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("unknown learning objective: {0}")]
    UnknownObjective(ObjectiveId),

    #[error("learning objective already exists: {0}")]
    DuplicateObjective(ObjectiveId),

    #[error("cannot {action} {id}: {failure}")]
    Guard {
        id: ObjectiveId,
        action: &'static str,
        failure: GuardFailure,
    },

    #[error("cannot {action}: {failure}")]
    SessionGuard {
        action: &'static str,
        failure: GuardFailure,
    },

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl WorkflowError {
    pub(crate) fn guard(id: &ObjectiveId, action: &'static str, failure: GuardFailure) -> Self {
        Self::Guard {
            id: id.clone(),
            action,
            failure,
        }
    }

    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Generation(error) => error.user_message(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkflowError>;

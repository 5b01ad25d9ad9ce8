//! Export readiness gate.
//!
//! A built export remembers the question-set signature and inclusion
//! options it was rendered from. It may be downloaded only while both
//! still match the session.

use tracing::info;

use bloom_model::{InclusionOptions, LearningObjective, QuestionSets, Signature};

use crate::session::Session;
use crate::signature::question_set_signature;

/// A rendered export document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub built_from_signature: Signature,
    pub inclusion_options: InclusionOptions,
}

/// True when `artifact` is missing or no longer matches the current
/// questions or inclusion options.
pub fn is_export_stale(
    artifact: Option<&ExportArtifact>,
    question_sets: &QuestionSets,
    inclusion_options: &InclusionOptions,
) -> bool {
    match artifact {
        None => true,
        Some(artifact) => {
            artifact.inclusion_options != *inclusion_options
                || artifact.built_from_signature != question_set_signature(question_sets)
        }
    }
}

impl Session {
    /// Render and store a fresh export artifact.
    pub fn build_export<F, E>(&mut self, render: F) -> Result<&ExportArtifact, E>
    where
        F: FnOnce(&[LearningObjective], &QuestionSets, &InclusionOptions) -> Result<Vec<u8>, E>,
    {
        let bytes = render(&self.objectives, &self.questions, &self.inclusion_options)?;
        let artifact = ExportArtifact {
            bytes,
            built_from_signature: question_set_signature(&self.questions),
            inclusion_options: self.inclusion_options,
        };
        info!(
            bytes = artifact.bytes.len(),
            signature = %artifact.built_from_signature,
            "export built"
        );
        Ok(self.export.insert(artifact))
    }

    pub fn export_is_stale(&self) -> bool {
        is_export_stale(
            self.export.as_ref(),
            &self.questions,
            &self.inclusion_options,
        )
    }

    /// The built export, only while it still matches the session.
    pub fn downloadable_export(&self) -> Option<&ExportArtifact> {
        if self.export_is_stale() {
            None
        } else {
            self.export.as_ref()
        }
    }
}

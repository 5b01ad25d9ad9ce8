//! The session state container.
//!
//! All domain state for one author lives in a [`Session`]. Core operations
//! are methods on it (or free functions taking it by `&mut`), so nothing
//! reads or writes ambient global state.

use serde::{Deserialize, Serialize};

use bloom_model::{
    CourseOutline, InclusionOptions, LearningObjective, ModuleContent, ObjectiveId, Question,
    QuestionSets, SessionConfig, Signature,
};

use crate::error::{Result, WorkflowError};
use crate::export::ExportArtifact;
use crate::invalidation::InvalidationReport;
use crate::signature::{outline_signature, signature};

/// Step of the authoring workflow the author is looking at.
///
/// Interaction state only; it is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowStep {
    #[default]
    Upload,
    Outline,
    Objectives,
    Alignment,
    Questions,
    Export,
}

/// The durable domain keys of a session.
///
/// This is the allow-list used by snapshots: anything not named here
/// (workflow step, export bytes, last notice) is never saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainState {
    pub config: SessionConfig,
    pub module: Option<ModuleContent>,
    pub outline_guidance: String,
    pub outline: Option<CourseOutline>,
    pub objectives: Vec<LearningObjective>,
    pub questions: QuestionSets,
    pub inclusion_options: InclusionOptions,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub(crate) config: SessionConfig,
    pub(crate) module: Option<ModuleContent>,
    pub(crate) outline_guidance: String,
    pub(crate) outline: Option<CourseOutline>,
    pub(crate) objectives: Vec<LearningObjective>,
    pub(crate) questions: QuestionSets,
    pub(crate) inclusion_options: InclusionOptions,
    pub(crate) export: Option<ExportArtifact>,
    pub(crate) step: WorkflowStep,
    pub(crate) last_invalidation: Option<InvalidationReport>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Rebuild a session from restored domain state.
    ///
    /// Stored signatures are taken as-is; no invalidation runs. The
    /// workflow returns to its first step.
    pub fn from_domain_state(state: DomainState) -> Self {
        Self {
            config: state.config,
            module: state.module,
            outline_guidance: state.outline_guidance,
            outline: state.outline,
            objectives: state.objectives,
            questions: state.questions,
            inclusion_options: state.inclusion_options,
            export: None,
            step: WorkflowStep::Upload,
            last_invalidation: None,
        }
    }

    /// Copy of the durable domain keys.
    pub fn domain_state(&self) -> DomainState {
        DomainState {
            config: self.config.clone(),
            module: self.module.clone(),
            outline_guidance: self.outline_guidance.clone(),
            outline: self.outline.clone(),
            objectives: self.objectives.clone(),
            questions: self.questions.clone(),
            inclusion_options: self.inclusion_options,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SessionConfig {
        &mut self.config
    }

    pub fn module(&self) -> Option<&ModuleContent> {
        self.module.as_ref()
    }

    /// Text of the current module, empty when none has been applied.
    pub fn module_text(&self) -> &str {
        self.module
            .as_ref()
            .map(|module| module.text.as_str())
            .unwrap_or("")
    }

    /// Signature of the current module; the signature of empty text when
    /// no module has been applied.
    pub fn module_signature(&self) -> Signature {
        match &self.module {
            Some(module) => module.signature.clone(),
            None => signature(""),
        }
    }

    pub fn has_module_content(&self) -> bool {
        self.module.as_ref().is_some_and(|module| !module.is_empty())
    }

    pub fn objectives(&self) -> &[LearningObjective] {
        &self.objectives
    }

    pub fn objective(&self, id: &ObjectiveId) -> Result<&LearningObjective> {
        self.objectives
            .iter()
            .find(|objective| &objective.id == id)
            .ok_or_else(|| WorkflowError::UnknownObjective(id.clone()))
    }

    pub(crate) fn objective_mut(&mut self, id: &ObjectiveId) -> Result<&mut LearningObjective> {
        self.objectives
            .iter_mut()
            .find(|objective| &objective.id == id)
            .ok_or_else(|| WorkflowError::UnknownObjective(id.clone()))
    }

    pub fn question_sets(&self) -> &QuestionSets {
        &self.questions
    }

    /// Questions generated for an objective (empty when none).
    pub fn questions(&self, id: &ObjectiveId) -> &[Question] {
        self.questions.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Mutable access to one generated question for direct editing.
    ///
    /// Edits need no invalidation: export staleness is detected from the
    /// question-set signature.
    pub fn question_mut(&mut self, id: &ObjectiveId, index: usize) -> Option<&mut Question> {
        self.questions
            .get_mut(id)
            .and_then(|questions| questions.get_mut(index))
    }

    pub fn outline_guidance(&self) -> &str {
        &self.outline_guidance
    }

    pub fn set_outline_guidance(&mut self, guidance: impl Into<String>) {
        self.outline_guidance = guidance.into();
    }

    pub fn outline(&self) -> Option<&CourseOutline> {
        self.outline.as_ref()
    }

    /// Replace the course outline with an edited version.
    pub fn set_outline(&mut self, outline: CourseOutline) {
        self.outline = Some(outline);
    }

    pub fn outline_signature(&self) -> Option<Signature> {
        self.outline.as_ref().map(outline_signature)
    }

    pub fn inclusion_options(&self) -> &InclusionOptions {
        &self.inclusion_options
    }

    pub fn set_inclusion_options(&mut self, options: InclusionOptions) {
        self.inclusion_options = options;
    }

    pub fn step(&self) -> WorkflowStep {
        self.step
    }

    pub fn set_step(&mut self, step: WorkflowStep) {
        self.step = step;
    }

    /// Most recent cascade, kept so the next view can show a notice.
    pub fn last_invalidation(&self) -> Option<&InvalidationReport> {
        self.last_invalidation.as_ref()
    }

    pub fn take_last_invalidation(&mut self) -> Option<InvalidationReport> {
        self.last_invalidation.take()
    }
}

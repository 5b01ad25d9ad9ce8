//! Learning objective state machine.
//!
//! An objective moves forward through
//! `Draft -> Aligned -> Finalized -> QuestionsGenerated`. The status is
//! derived from stored fields and signatures on every read, never stored.
//! Any transition that changes an upstream input hands off to the
//! invalidation engine, which clears everything downstream.

use std::fmt;

use tracing::{debug, info};

use bloom_model::{AlignmentResult, BloomLevel, LearningObjective, ObjectiveId, Question};

use crate::error::{GuardFailure, Result, WorkflowError};
use crate::generator::{AlignmentRequest, ContentGenerator, QuestionRequest};
use crate::invalidation::{Change, InvalidationReport, invalidate};
use crate::session::Session;
use crate::signature::{alignment_signature, generation_signature};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectiveStatus {
    /// No alignment for the current inputs.
    Draft,
    /// Alignment computed for the current inputs.
    Aligned,
    /// Accepted as final; no questions for the current final text.
    Finalized,
    /// Questions generated for the current final text.
    QuestionsGenerated,
}

impl ObjectiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectiveStatus::Draft => "draft",
            ObjectiveStatus::Aligned => "aligned",
            ObjectiveStatus::Finalized => "finalized",
            ObjectiveStatus::QuestionsGenerated => "questions generated",
        }
    }
}

impl fmt::Display for ObjectiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of accepting an objective as final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acceptance {
    pub final_text: String,
    /// Present when the new final text made generated questions stale.
    pub invalidation: Option<InvalidationReport>,
}

fn require_inputs(objective: &LearningObjective, action: &'static str) -> Result<BloomLevel> {
    if objective.text.trim().is_empty() {
        return Err(WorkflowError::guard(
            &objective.id,
            action,
            GuardFailure::EmptyText,
        ));
    }
    objective
        .intended_level
        .ok_or_else(|| WorkflowError::guard(&objective.id, action, GuardFailure::LevelUnset))
}

impl Session {
    /// Add an empty draft objective and return its new id.
    pub fn add_objective(&mut self) -> ObjectiveId {
        let id = ObjectiveId::generate();
        self.objectives.push(LearningObjective::new(id.clone()));
        debug!(objective = %id, "added objective");
        id
    }

    /// Add an empty draft objective under a caller-chosen id.
    pub fn add_objective_with_id(&mut self, id: ObjectiveId) -> Result<()> {
        if self.objective(&id).is_ok() {
            return Err(WorkflowError::DuplicateObjective(id));
        }
        debug!(objective = %id, "added objective");
        self.objectives.push(LearningObjective::new(id));
        Ok(())
    }

    /// Remove an objective together with its question set.
    pub fn delete_objective(&mut self, id: &ObjectiveId) -> Result<()> {
        self.objective(id)?;
        invalidate(self, Change::ObjectiveRemoved(id.clone()));
        self.objectives.retain(|objective| &objective.id != id);
        info!(objective = %id, "deleted objective");
        Ok(())
    }

    pub fn set_objective_text(
        &mut self,
        id: &ObjectiveId,
        text: impl Into<String>,
    ) -> Result<Option<InvalidationReport>> {
        let level = self.objective(id)?.intended_level;
        self.edit_objective(id, text, level)
    }

    pub fn set_intended_level(
        &mut self,
        id: &ObjectiveId,
        level: Option<BloomLevel>,
    ) -> Result<Option<InvalidationReport>> {
        let text = self.objective(id)?.text.clone();
        self.edit_objective(id, text, level)
    }

    /// Replace an objective's draft text and intended level.
    ///
    /// When the alignment inputs change, the objective's alignment, final
    /// text and questions are cleared in one cascade. Re-entering earlier
    /// text does not bring an old alignment back.
    pub fn edit_objective(
        &mut self,
        id: &ObjectiveId,
        text: impl Into<String>,
        level: Option<BloomLevel>,
    ) -> Result<Option<InvalidationReport>> {
        let module_signature = self.module_signature();
        let objective = self.objective_mut(id)?;
        let before = alignment_signature(
            &objective.text,
            objective.intended_level,
            &module_signature,
        );
        objective.text = text.into();
        objective.intended_level = level;
        let after = alignment_signature(
            &objective.text,
            objective.intended_level,
            &module_signature,
        );
        if before == after {
            return Ok(None);
        }
        Ok(invalidate(self, Change::ObjectiveInputsChanged(id.clone())))
    }

    /// Run an alignment check and record it under the current inputs.
    ///
    /// On generator failure the objective is left untouched.
    pub fn run_alignment(
        &mut self,
        id: &ObjectiveId,
        generator: &mut dyn ContentGenerator,
    ) -> Result<&AlignmentResult> {
        let module_signature = self.module_signature();
        let objective = self.objective(id)?;
        let level = require_inputs(objective, "run alignment for")?;
        let request = AlignmentRequest {
            objective_text: &objective.text,
            intended_level: level,
            module_text: self.module_text(),
        };
        let result = generator.check_alignment(&request)?;
        let inputs = alignment_signature(&objective.text, Some(level), &module_signature);

        info!(objective = %id, label = %result.label, "alignment recorded");
        let objective = self.objective_mut(id)?;
        objective.alignment_signature = Some(inputs);
        Ok(objective.alignment.insert(result))
    }

    /// Accept the current draft text as final.
    ///
    /// Allowed with or without an alignment. If questions were generated
    /// from a different final text, they are cleared.
    pub fn accept_as_final(&mut self, id: &ObjectiveId) -> Result<Acceptance> {
        let text = self.objective(id)?.text.clone();
        self.accept_text(id, text, "accept")
    }

    /// Replace the final text of an already finalized objective.
    ///
    /// Only generated questions depend on the final text; alignment is kept.
    pub fn set_final_text(
        &mut self,
        id: &ObjectiveId,
        final_text: impl Into<String>,
    ) -> Result<Acceptance> {
        if !self.objective(id)?.is_finalized() {
            return Err(WorkflowError::guard(
                id,
                "edit final text of",
                GuardFailure::NotFinalized,
            ));
        }
        self.accept_text(id, final_text.into(), "edit final text of")
    }

    /// Adopt the alignment's suggested rewrite as the draft and accept it.
    ///
    /// The rewrite is a new input, so the existing alignment is cleared
    /// first; the objective ends up finalized without an alignment.
    pub fn accept_suggestion(&mut self, id: &ObjectiveId) -> Result<Acceptance> {
        let objective = self.objective(id)?;
        let suggestion = objective
            .alignment
            .as_ref()
            .and_then(|alignment| alignment.suggested_rewrite.clone())
            .ok_or_else(|| {
                WorkflowError::guard(id, "accept suggestion for", GuardFailure::NoSuggestion)
            })?;
        let level = objective.intended_level;
        let edited = self.edit_objective(id, suggestion, level)?;
        let mut acceptance = self.accept_as_final(id)?;
        if acceptance.invalidation.is_none() {
            acceptance.invalidation = edited;
        }
        Ok(acceptance)
    }

    fn accept_text(
        &mut self,
        id: &ObjectiveId,
        final_text: String,
        action: &'static str,
    ) -> Result<Acceptance> {
        let module_signature = self.module_signature();
        let objective = self.objective_mut(id)?;
        let level = require_inputs(objective, action)?;
        if final_text.trim().is_empty() {
            return Err(WorkflowError::guard(id, action, GuardFailure::EmptyText));
        }
        objective.final_text = Some(final_text.clone());
        let stale = objective.generation_signature.as_ref().is_some_and(|stored| {
            *stored != generation_signature(&final_text, Some(level), &module_signature)
        });
        info!(objective = %id, "accepted as final");

        let invalidation = if stale {
            invalidate(self, Change::FinalTextChanged(id.clone()))
        } else {
            None
        };
        Ok(Acceptance {
            final_text,
            invalidation,
        })
    }

    /// Withdraw the final text, returning the objective to Aligned or Draft.
    ///
    /// Questions are kept; accepting the same text again makes them current.
    pub fn reopen(&mut self, id: &ObjectiveId) -> Result<()> {
        let objective = self.objective_mut(id)?;
        objective.final_text = None;
        debug!(objective = %id, "reopened objective");
        Ok(())
    }

    /// Generate questions for a finalized objective.
    pub fn generate_questions(
        &mut self,
        id: &ObjectiveId,
        generator: &mut dyn ContentGenerator,
    ) -> Result<&[Question]> {
        let action = "generate questions for";
        if !self.has_module_content() {
            return Err(WorkflowError::guard(
                id,
                action,
                GuardFailure::MissingModuleContent,
            ));
        }
        let module_signature = self.module_signature();
        let objective = self.objective(id)?;
        let level = require_inputs(objective, action)?;
        let final_text = objective
            .final_text
            .as_deref()
            .ok_or_else(|| WorkflowError::guard(id, action, GuardFailure::NotFinalized))?;

        let request = QuestionRequest {
            final_text,
            level,
            module_text: self.module_text(),
            count: self.config.question_count(),
        };
        let questions = generator.generate_questions(&request)?;
        let inputs = generation_signature(final_text, Some(level), &module_signature);

        info!(objective = %id, count = questions.len(), "questions generated");
        self.objective_mut(id)?.generation_signature = Some(inputs);
        let stored = self.questions.entry(id.clone()).or_default();
        *stored = questions;
        Ok(stored.as_slice())
    }

    /// Derived status of an objective under the current inputs.
    pub fn status(&self, id: &ObjectiveId) -> Result<ObjectiveStatus> {
        let objective = self.objective(id)?;
        let module_signature = self.module_signature();

        if let Some(final_text) = &objective.final_text {
            let current =
                generation_signature(final_text, objective.intended_level, &module_signature);
            let generated = objective.generation_signature.as_ref() == Some(&current)
                && !self.questions(id).is_empty();
            return Ok(if generated {
                ObjectiveStatus::QuestionsGenerated
            } else {
                ObjectiveStatus::Finalized
            });
        }

        let current = alignment_signature(
            &objective.text,
            objective.intended_level,
            &module_signature,
        );
        if objective.alignment.is_some() && objective.alignment_signature.as_ref() == Some(&current)
        {
            Ok(ObjectiveStatus::Aligned)
        } else {
            Ok(ObjectiveStatus::Draft)
        }
    }
}

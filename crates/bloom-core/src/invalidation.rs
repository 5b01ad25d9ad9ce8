//! Derived-state invalidation.
//!
//! The dependency chain is
//! `module -> objective inputs -> alignment -> final text -> questions`.
//! This module is the only place that clears derived fields. Each cascade
//! finishes clearing an objective (alignment, final text, generation
//! signature, question set) before returning, and only ever touches the
//! objectives the change reaches.

use std::fmt;

use tracing::info;

use bloom_model::{LearningObjective, ObjectiveId, QuestionSets};

use crate::session::Session;

/// An upstream edit whose downstream state must be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Module text changed: every objective loses its derived state.
    ModuleChanged,
    /// An objective's text or intended level changed.
    ObjectiveInputsChanged(ObjectiveId),
    /// An objective's final text changed: only its questions are stale.
    FinalTextChanged(ObjectiveId),
    /// An objective is being deleted: its question set goes with it.
    ObjectiveRemoved(ObjectiveId),
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::ModuleChanged => f.write_str("module content changed"),
            Change::ObjectiveInputsChanged(id) => write!(f, "objective {id} was edited"),
            Change::FinalTextChanged(id) => write!(f, "final text of {id} changed"),
            Change::ObjectiveRemoved(id) => write!(f, "objective {id} was deleted"),
        }
    }
}

/// What a cascade cleared, for the one-line notice shown to the author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationReport {
    pub cause: Change,
    /// Objectives that lost derived state, in session order.
    pub cleared: Vec<ObjectiveId>,
}

impl InvalidationReport {
    pub fn notice(&self) -> String {
        match &self.cause {
            Change::ModuleChanged => format!(
                "Module content changed; alignment, final text and questions cleared for {} objective(s).",
                self.cleared.len()
            ),
            Change::ObjectiveInputsChanged(_) => {
                "Objective edited; its alignment, final text and questions were cleared."
                    .to_string()
            }
            Change::FinalTextChanged(_) => {
                "Final text changed; previously generated questions were cleared.".to_string()
            }
            Change::ObjectiveRemoved(_) => "Objective deleted with its questions.".to_string(),
        }
    }
}

/// Apply a change to the session and clear everything downstream of it.
///
/// Returns `None` when nothing derived existed, so callers only surface a
/// notice when state was actually lost.
pub fn invalidate(session: &mut Session, change: Change) -> Option<InvalidationReport> {
    let Session {
        objectives,
        questions,
        ..
    } = &mut *session;

    let mut cleared = Vec::new();
    match &change {
        Change::ModuleChanged => {
            for objective in objectives.iter_mut() {
                if clear_from_alignment(objective, questions) {
                    cleared.push(objective.id.clone());
                }
            }
        }
        Change::ObjectiveInputsChanged(id) => {
            if let Some(objective) = objectives.iter_mut().find(|objective| &objective.id == id)
                && clear_from_alignment(objective, questions)
            {
                cleared.push(id.clone());
            }
        }
        Change::FinalTextChanged(id) => {
            if let Some(objective) = objectives.iter_mut().find(|objective| &objective.id == id)
                && clear_generation(objective, questions)
            {
                cleared.push(id.clone());
            }
        }
        Change::ObjectiveRemoved(id) => {
            if questions.remove(id).is_some() {
                cleared.push(id.clone());
            }
        }
    }

    if cleared.is_empty() {
        return None;
    }

    info!(cause = %change, cleared = cleared.len(), "invalidated derived state");
    let report = InvalidationReport {
        cause: change,
        cleared,
    };
    session.last_invalidation = Some(report.clone());
    Some(report)
}

/// Clear alignment, final text, generation signature and questions.
fn clear_from_alignment(objective: &mut LearningObjective, questions: &mut QuestionSets) -> bool {
    let had_alignment = objective.alignment.take().is_some();
    let had_alignment_signature = objective.alignment_signature.take().is_some();
    let had_final = objective.final_text.take().is_some();
    let had_generation = clear_generation(objective, questions);
    had_alignment || had_alignment_signature || had_final || had_generation
}

/// Clear the generation signature and the question set.
fn clear_generation(objective: &mut LearningObjective, questions: &mut QuestionSets) -> bool {
    let had_signature = objective.generation_signature.take().is_some();
    let had_questions = questions.remove(&objective.id).is_some();
    had_signature || had_questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloom_model::{AlignmentLabel, AlignmentResult, Signature};

    fn aligned(id: &str) -> LearningObjective {
        let mut objective = LearningObjective::new(ObjectiveId::new(id).unwrap());
        objective.text = "Explain X".to_string();
        objective.alignment = Some(AlignmentResult {
            label: AlignmentLabel::Consistent,
            reasons: vec!["ok".to_string()],
            suggested_rewrite: None,
        });
        objective.alignment_signature = Some(Signature::new("a"));
        objective.final_text = Some("Explain X".to_string());
        objective.generation_signature = Some(Signature::new("g"));
        objective
    }

    #[test]
    fn final_text_change_keeps_alignment() {
        let mut session = Session::default();
        session.objectives.push(aligned("lo-1"));
        let id = ObjectiveId::new("lo-1").unwrap();
        session.questions.insert(id.clone(), Vec::new());

        let report = invalidate(&mut session, Change::FinalTextChanged(id.clone()))
            .expect("questions were cleared");
        assert_eq!(report.cleared, vec![id.clone()]);

        let objective = &session.objectives[0];
        assert!(objective.alignment.is_some());
        assert!(objective.final_text.is_some());
        assert!(objective.generation_signature.is_none());
        assert!(!session.questions.contains_key(&id));
    }

    #[test]
    fn removed_objective_drops_only_its_questions() {
        let mut session = Session::default();
        session.objectives.push(aligned("lo-1"));
        session.objectives.push(aligned("lo-2"));
        let removed = ObjectiveId::new("lo-1").unwrap();
        let kept = ObjectiveId::new("lo-2").unwrap();
        session.questions.insert(removed.clone(), Vec::new());
        session.questions.insert(kept.clone(), Vec::new());

        let report = invalidate(&mut session, Change::ObjectiveRemoved(removed.clone()))
            .expect("question set was dropped");
        assert_eq!(report.cleared, vec![removed.clone()]);
        assert_eq!(report.notice(), "Objective deleted with its questions.");
        assert!(!session.questions.contains_key(&removed));
        assert!(session.questions.contains_key(&kept));
        assert!(session.objectives[1].generation_signature.is_some());

        assert!(invalidate(&mut session, Change::ObjectiveRemoved(removed)).is_none());
    }

    #[test]
    fn nothing_to_clear_reports_nothing() {
        let mut session = Session::default();
        session
            .objectives
            .push(LearningObjective::new(ObjectiveId::new("lo-1").unwrap()));
        assert!(invalidate(&mut session, Change::ModuleChanged).is_none());
        assert!(session.last_invalidation.is_none());
    }
}

//! Tests for the objective workflow and derived-state invalidation.

mod common;

use bloom_core::{
    Change, GuardFailure, ObjectiveStatus, Session, WorkflowError, alignment_signature,
    generation_signature, signature,
};
use bloom_model::{BloomLevel, GenerationError, SessionConfig};
use common::{StubGenerator, add, complete, id};

fn session_with_module(text: &str) -> Session {
    let mut session = Session::new(SessionConfig::default().with_questions_per_objective(2));
    session.apply_module_content(text, 10, vec!["module.txt".to_string()]);
    session
}

// =========================================================================
// State machine
// =========================================================================

#[test]
fn test_full_lifecycle_records_signatures() {
    let mut session = session_with_module("m1");
    let mut generator = StubGenerator::default();
    let lo1 = add(&mut session, "lo1", "Explain X", BloomLevel::Understand);
    assert_eq!(session.status(&lo1).unwrap(), ObjectiveStatus::Draft);

    session.run_alignment(&lo1, &mut generator).unwrap();
    assert_eq!(session.status(&lo1).unwrap(), ObjectiveStatus::Aligned);
    let module = signature("m1");
    assert_eq!(
        session.objective(&lo1).unwrap().alignment_signature,
        Some(alignment_signature(
            "Explain X",
            Some(BloomLevel::Understand),
            &module
        ))
    );

    session.accept_as_final(&lo1).unwrap();
    assert_eq!(session.status(&lo1).unwrap(), ObjectiveStatus::Finalized);

    let questions = session.generate_questions(&lo1, &mut generator).unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(
        session.status(&lo1).unwrap(),
        ObjectiveStatus::QuestionsGenerated
    );
    assert_eq!(
        session.objective(&lo1).unwrap().generation_signature,
        Some(generation_signature(
            "Explain X",
            Some(BloomLevel::Understand),
            &module
        ))
    );
}

#[test]
fn test_alignment_requires_text_and_level() {
    let mut session = session_with_module("m1");
    let mut generator = StubGenerator::default();
    let lo = id("lo1");
    session.add_objective_with_id(lo.clone()).unwrap();

    let err = session.run_alignment(&lo, &mut generator).unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Guard {
            failure: GuardFailure::EmptyText,
            ..
        }
    ));

    session.set_objective_text(&lo, "Explain X").unwrap();
    let err = session.run_alignment(&lo, &mut generator).unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Guard {
            failure: GuardFailure::LevelUnset,
            ..
        }
    ));
    assert_eq!(generator.alignment_calls, 0);
}

#[test]
fn test_accept_without_alignment_is_allowed() {
    let mut session = session_with_module("m1");
    let lo = add(&mut session, "lo1", "List three causes", BloomLevel::Remember);
    let acceptance = session.accept_as_final(&lo).unwrap();
    assert_eq!(acceptance.final_text, "List three causes");
    assert!(acceptance.invalidation.is_none());
    assert_eq!(session.status(&lo).unwrap(), ObjectiveStatus::Finalized);
}

#[test]
fn test_generation_requires_final_text_and_module() {
    let mut generator = StubGenerator::default();

    let mut session = Session::default();
    let lo = add(&mut session, "lo1", "Explain X", BloomLevel::Understand);
    session.accept_as_final(&lo).unwrap();
    let err = session.generate_questions(&lo, &mut generator).unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Guard {
            failure: GuardFailure::MissingModuleContent,
            ..
        }
    ));

    let mut session = session_with_module("m1");
    let lo = add(&mut session, "lo1", "Explain X", BloomLevel::Understand);
    let err = session.generate_questions(&lo, &mut generator).unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Guard {
            failure: GuardFailure::NotFinalized,
            ..
        }
    ));
    assert_eq!(generator.question_calls, 0);
}

#[test]
fn test_generator_failure_leaves_objective_untouched() {
    let mut session = session_with_module("m1");
    let lo = add(&mut session, "lo1", "Explain X", BloomLevel::Understand);
    let before = session.objective(&lo).unwrap().clone();

    let mut generator = StubGenerator::failing(GenerationError::malformed("missing label"));
    let err = session.run_alignment(&lo, &mut generator).unwrap_err();
    assert_eq!(
        err.user_message(),
        "AI returned an unexpected format, please retry."
    );
    assert_eq!(session.objective(&lo).unwrap(), &before);
}

#[test]
fn test_reopen_returns_to_aligned_and_keeps_questions() {
    let mut session = session_with_module("m1");
    let mut generator = StubGenerator::default();
    let lo = add(&mut session, "lo1", "Explain X", BloomLevel::Understand);
    complete(&mut session, &lo, &mut generator);

    session.reopen(&lo).unwrap();
    assert_eq!(session.status(&lo).unwrap(), ObjectiveStatus::Aligned);
    assert_eq!(session.questions(&lo).len(), 2);

    let acceptance = session.accept_as_final(&lo).unwrap();
    assert!(acceptance.invalidation.is_none());
    assert_eq!(
        session.status(&lo).unwrap(),
        ObjectiveStatus::QuestionsGenerated
    );
}

#[test]
fn test_new_final_text_clears_only_questions() {
    let mut session = session_with_module("m1");
    let mut generator = StubGenerator::default();
    let lo = add(&mut session, "lo1", "Explain X", BloomLevel::Understand);
    complete(&mut session, &lo, &mut generator);

    let acceptance = session.set_final_text(&lo, "Explain X clearly").unwrap();
    let report = acceptance.invalidation.expect("questions cleared");
    assert_eq!(report.cause, Change::FinalTextChanged(lo.clone()));

    let objective = session.objective(&lo).unwrap();
    assert!(objective.alignment.is_some());
    assert_eq!(objective.final_text.as_deref(), Some("Explain X clearly"));
    assert!(objective.generation_signature.is_none());
    assert!(session.questions(&lo).is_empty());
    assert_eq!(session.status(&lo).unwrap(), ObjectiveStatus::Finalized);
}

#[test]
fn test_set_final_text_requires_finalized_objective() {
    let mut session = session_with_module("m1");
    let lo = add(&mut session, "lo1", "Explain X", BloomLevel::Understand);
    let err = session.set_final_text(&lo, "Explain Y").unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Guard {
            failure: GuardFailure::NotFinalized,
            ..
        }
    ));
}

#[test]
fn test_accept_suggestion_finalizes_rewrite() {
    let mut session = session_with_module("m1");
    let mut generator = StubGenerator::default();
    let lo = add(&mut session, "lo1", "Know X", BloomLevel::Understand);

    let err = session.accept_suggestion(&lo).unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Guard {
            failure: GuardFailure::NoSuggestion,
            ..
        }
    ));

    session.run_alignment(&lo, &mut generator).unwrap();
    let acceptance = session.accept_suggestion(&lo).unwrap();
    assert_eq!(acceptance.final_text, "Know X precisely");

    let objective = session.objective(&lo).unwrap();
    assert_eq!(objective.text, "Know X precisely");
    assert!(objective.alignment.is_none());
    assert_eq!(session.status(&lo).unwrap(), ObjectiveStatus::Finalized);
}

#[test]
fn test_delete_removes_objective_and_questions() {
    let mut session = session_with_module("m1");
    let mut generator = StubGenerator::default();
    let lo1 = add(&mut session, "lo1", "Explain X", BloomLevel::Understand);
    let lo2 = add(&mut session, "lo2", "Apply Y", BloomLevel::Apply);
    complete(&mut session, &lo1, &mut generator);
    complete(&mut session, &lo2, &mut generator);

    session.delete_objective(&lo1).unwrap();
    assert!(matches!(
        session.objective(&lo1),
        Err(WorkflowError::UnknownObjective(_))
    ));
    assert!(!session.question_sets().contains_key(&lo1));
    assert_eq!(session.questions(&lo2).len(), 2);
    assert!(matches!(
        session.delete_objective(&lo1),
        Err(WorkflowError::UnknownObjective(_))
    ));
}

#[test]
fn test_duplicate_objective_id_is_rejected() {
    let mut session = Session::default();
    session.add_objective_with_id(id("lo1")).unwrap();
    assert!(matches!(
        session.add_objective_with_id(id("lo1")),
        Err(WorkflowError::DuplicateObjective(_))
    ));
    let generated = session.add_objective();
    assert_ne!(generated, id("lo1"));
    assert_eq!(session.objectives().len(), 2);
}

// =========================================================================
// Invalidation
// =========================================================================

#[test]
fn test_editing_one_objective_keeps_sibling_state() {
    let mut session = session_with_module("m1");
    let mut generator = StubGenerator::default();
    let lo1 = add(&mut session, "lo1", "Explain X", BloomLevel::Understand);
    let lo2 = add(&mut session, "lo2", "Apply Y", BloomLevel::Apply);
    complete(&mut session, &lo1, &mut generator);
    complete(&mut session, &lo2, &mut generator);
    let lo2_before = session.objective(&lo2).unwrap().clone();
    let lo2_questions = session.questions(&lo2).to_vec();

    let report = session
        .set_objective_text(&lo1, "Explain X in detail")
        .unwrap()
        .expect("cascade ran");
    assert_eq!(report.cleared, vec![lo1.clone()]);

    let objective = session.objective(&lo1).unwrap();
    assert!(objective.alignment.is_none());
    assert!(objective.alignment_signature.is_none());
    assert!(objective.final_text.is_none());
    assert!(objective.generation_signature.is_none());
    assert!(session.questions(&lo1).is_empty());
    assert_eq!(session.status(&lo1).unwrap(), ObjectiveStatus::Draft);

    assert_eq!(session.objective(&lo2).unwrap(), &lo2_before);
    assert_eq!(session.questions(&lo2), lo2_questions.as_slice());
    assert_eq!(
        session.status(&lo2).unwrap(),
        ObjectiveStatus::QuestionsGenerated
    );
}

#[test]
fn test_level_change_cascades() {
    let mut session = session_with_module("m1");
    let mut generator = StubGenerator::default();
    let lo = add(&mut session, "lo1", "Explain X", BloomLevel::Understand);
    complete(&mut session, &lo, &mut generator);

    let report = session
        .set_intended_level(&lo, Some(BloomLevel::Analyze))
        .unwrap();
    assert!(report.is_some());
    assert_eq!(session.status(&lo).unwrap(), ObjectiveStatus::Draft);
}

#[test]
fn test_unchanged_edit_does_not_cascade() {
    let mut session = session_with_module("m1");
    let mut generator = StubGenerator::default();
    let lo = add(&mut session, "lo1", "Explain X", BloomLevel::Understand);
    complete(&mut session, &lo, &mut generator);

    let report = session
        .edit_objective(&lo, "Explain X", Some(BloomLevel::Understand))
        .unwrap();
    assert!(report.is_none());
    assert_eq!(
        session.status(&lo).unwrap(),
        ObjectiveStatus::QuestionsGenerated
    );
}

#[test]
fn test_edit_then_revert_does_not_resurrect_alignment() {
    let mut session = session_with_module("m1");
    let mut generator = StubGenerator::default();
    let lo = add(&mut session, "lo1", "Explain X", BloomLevel::Understand);
    session.run_alignment(&lo, &mut generator).unwrap();

    session.set_objective_text(&lo, "Explain Y").unwrap();
    session.set_objective_text(&lo, "Explain X").unwrap();

    let objective = session.objective(&lo).unwrap();
    assert!(objective.alignment.is_none());
    assert!(objective.alignment_signature.is_none());
    assert_eq!(session.status(&lo).unwrap(), ObjectiveStatus::Draft);

    session.run_alignment(&lo, &mut generator).unwrap();
    assert_eq!(generator.alignment_calls, 2);
    assert_eq!(session.status(&lo).unwrap(), ObjectiveStatus::Aligned);
}

#[test]
fn test_module_change_clears_every_objective_completely() {
    let mut session = session_with_module("m1");
    let mut generator = StubGenerator::default();
    let ids: Vec<_> = (0..4)
        .map(|index| {
            let lo = add(
                &mut session,
                &format!("lo{index}"),
                &format!("Explain topic {index}"),
                BloomLevel::Understand,
            );
            complete(&mut session, &lo, &mut generator);
            lo
        })
        .collect();

    let report = session
        .apply_module_content("m2", 12, vec!["other.txt".to_string()])
        .expect("cascade ran");
    assert_eq!(report.cause, Change::ModuleChanged);
    assert_eq!(report.cleared, ids);
    assert_eq!(session.last_invalidation(), Some(&report));

    for lo in &ids {
        let objective = session.objective(lo).unwrap();
        assert!(objective.alignment.is_none());
        assert!(objective.alignment_signature.is_none());
        assert!(objective.final_text.is_none());
        assert!(objective.generation_signature.is_none());
        assert!(session.questions(lo).is_empty());
        assert_eq!(session.status(lo).unwrap(), ObjectiveStatus::Draft);
    }
    assert!(session.question_sets().is_empty());
}

#[test]
fn test_identical_reupload_under_new_name_keeps_state() {
    let mut session = session_with_module("Cells divide by mitosis.");
    let mut generator = StubGenerator::default();
    let lo = add(&mut session, "lo1", "Explain mitosis", BloomLevel::Understand);
    complete(&mut session, &lo, &mut generator);
    let before = session.domain_state();

    for _ in 0..2 {
        let report = session.apply_module_content(
            "Cells divide by mitosis.",
            10,
            vec!["renamed.txt".to_string()],
        );
        assert!(report.is_none());
    }

    let after = session.domain_state();
    assert_eq!(after.objectives, before.objectives);
    assert_eq!(after.questions, before.questions);
    assert_eq!(
        session.module().unwrap().source_file_names,
        vec!["renamed.txt".to_string()]
    );
    assert!(session.last_invalidation().is_none());
}

#[test]
fn test_reset_module_clears_derived_state_and_guidance() {
    let mut session = session_with_module("m1");
    let mut generator = StubGenerator::default();
    session.set_outline_guidance("Three units");
    let lo = add(&mut session, "lo1", "Explain X", BloomLevel::Understand);
    complete(&mut session, &lo, &mut generator);

    let report = session.reset_module_content().expect("cascade ran");
    assert_eq!(report.cleared, vec![lo.clone()]);
    assert!(session.module().is_none());
    assert_eq!(session.outline_guidance(), "");
    assert_eq!(session.objective(&lo).unwrap().text, "Explain X");
    assert_eq!(session.status(&lo).unwrap(), ObjectiveStatus::Draft);
}

// =========================================================================
// Outline
// =========================================================================

#[test]
fn test_outline_requires_module() {
    let mut session = Session::default();
    let mut generator = StubGenerator::default();
    assert!(matches!(
        session.generate_outline(&mut generator),
        Err(WorkflowError::SessionGuard {
            failure: GuardFailure::MissingModuleContent,
            ..
        })
    ));

    session.apply_module_content("m1", 1, Vec::new());
    session.set_outline_guidance("intro course");
    let outline = session.generate_outline(&mut generator).unwrap();
    assert_eq!(outline.course_title, "Course: intro course");
    assert!(session.outline_signature().is_some());
}

// =========================================================================
// Export gate
// =========================================================================

fn render_stub(
    _: &[bloom_model::LearningObjective],
    sets: &bloom_model::QuestionSets,
    _: &bloom_model::InclusionOptions,
) -> Result<Vec<u8>, std::convert::Infallible> {
    Ok(format!("{} sets", sets.len()).into_bytes())
}

#[test]
fn test_question_edit_makes_export_stale_until_rebuilt() {
    let mut session = session_with_module("m1");
    let mut generator = StubGenerator::default();
    let lo = add(&mut session, "lo1", "Explain X", BloomLevel::Understand);
    complete(&mut session, &lo, &mut generator);

    assert!(session.export_is_stale());
    let built = session.build_export(render_stub).unwrap();
    assert_eq!(built.bytes, b"1 sets".to_vec());
    assert!(!session.export_is_stale());
    assert!(session.downloadable_export().is_some());

    let question = session.question_mut(&lo, 0).expect("question exists");
    question.options.c.rationale.push('!');
    assert!(session.export_is_stale());
    assert!(session.downloadable_export().is_none());

    session.build_export(render_stub).unwrap();
    assert!(!session.export_is_stale());
}

#[test]
fn test_regeneration_makes_export_stale() {
    let mut session = session_with_module("m1");
    let mut generator = StubGenerator::default();
    let lo = add(&mut session, "lo1", "Explain X", BloomLevel::Understand);
    complete(&mut session, &lo, &mut generator);
    session.build_export(render_stub).unwrap();

    session.set_objective_text(&lo, "Explain X again").unwrap();
    assert!(session.export_is_stale());
}

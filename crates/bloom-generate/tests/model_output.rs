//! Tests for validating scripted model output end to end.

use bloom_core::{ContentGenerator, ObjectiveStatus, QuestionRequest, Session, WorkflowError};
use bloom_generate::{MockGenerator, ModelGenerator, ScriptedProvider, Task};
use bloom_model::{
    AlignmentLabel, BloomLevel, GenerationError, ObjectiveId, OptionId, SessionConfig,
};

const ALIGNMENT: &str = r#"{
  "label": "inconsistent",
  "reasons": ["'List' is a Remember verb.", "Apply needs a task."],
  "suggested_lo": "Use the formula to compute X for a new data set."
}"#;

fn question_json(ids: [&str; 4], correct: &str) -> String {
    let options: Vec<String> = ids
        .iter()
        .enumerate()
        .map(|(index, id)| {
            format!(r#"{{"id": "{id}", "text": "option {index}", "option_rationale": "why {index}"}}"#)
        })
        .collect();
    format!(
        r#"{{"questions": [{{
            "type": "MCQ_4",
            "stem": "Which value results?",
            "options": [{}],
            "correct_option_id": "{correct}",
            "cognitive_rationale": "Requires applying the formula.",
            "contentReference": "Section 2"
        }}]}}"#,
        options.join(", ")
    )
}

fn generator(responses: Vec<String>) -> ModelGenerator<ScriptedProvider> {
    ModelGenerator::new(ScriptedProvider::new(responses), "gpt-5-nano")
}

fn request(count: usize) -> QuestionRequest<'static> {
    QuestionRequest {
        final_text: "Use the formula",
        level: BloomLevel::Apply,
        module_text: "module",
        count,
    }
}

#[test]
fn test_options_are_keyed_by_id_not_position() {
    let mut generator = generator(vec![question_json(["C", "A", "D", "B"], "C")]);
    let questions = generator.generate_questions(&request(1)).unwrap();
    let question = &questions[0];
    assert_eq!(question.options.a.text, "option 1");
    assert_eq!(question.options.c.text, "option 0");
    assert_eq!(question.options.b.rationale, "why 3");
    assert_eq!(question.correct_option_id, OptionId::C);
    assert_eq!(question.content_reference, "Section 2");
}

#[test]
fn test_schema_violations_are_malformed_output() {
    let cases = vec![
        question_json(["A", "B", "C", "E"], "A"),
        question_json(["A", "B", "C", "C"], "A"),
        question_json(["A", "B", "C", "D"], "E"),
        question_json(["a", "B", "C", "D"], "A"),
        question_json(["A", "B", "C", "D"], "A").replace("MCQ_4", "TRUE_FALSE"),
        question_json(["A", "B", "C", "D"], "A").replace("contentReference", "content_reference"),
        r#"{"questions": []}"#.to_string(),
        r#"{"items": []}"#.to_string(),
        "Sure! Here are your questions".to_string(),
    ];
    for raw in cases {
        let mut generator = generator(vec![raw.clone()]);
        let err = generator.generate_questions(&request(1)).unwrap_err();
        assert!(
            matches!(err, GenerationError::MalformedModelOutput { .. }),
            "accepted: {raw}"
        );
    }
}

#[test]
fn test_three_options_rejected() {
    let raw = question_json(["A", "B", "C", "D"], "A").replace(
        r#", {"id": "D", "text": "option 3", "option_rationale": "why 3"}"#,
        "",
    );
    let mut generator = generator(vec![raw]);
    let err = generator.generate_questions(&request(1)).unwrap_err();
    assert!(err.to_string().contains("need 4 options"));
}

#[test]
fn test_alignment_flows_into_session() {
    let mut session = Session::new(SessionConfig::default());
    session.apply_module_content("Formula for X.", 4, vec!["m.txt".to_string()]);
    let id = ObjectiveId::new("lo-1").unwrap();
    session.add_objective_with_id(id.clone()).unwrap();
    session
        .edit_objective(&id, "List the formula", Some(BloomLevel::Apply))
        .unwrap();

    let mut generator = generator(vec![
        ALIGNMENT.to_string(),
        question_json(["A", "B", "C", "D"], "B"),
    ]);
    let alignment = session.run_alignment(&id, &mut generator).unwrap();
    assert_eq!(alignment.label, AlignmentLabel::Inconsistent);

    session.accept_suggestion(&id).unwrap();
    session.generate_questions(&id, &mut generator).unwrap();
    assert_eq!(
        session.status(&id).unwrap(),
        ObjectiveStatus::QuestionsGenerated
    );
    assert_eq!(
        generator.provider().served(),
        &[Task::Alignment, Task::Questions]
    );
}

#[test]
fn test_malformed_output_leaves_session_unchanged() {
    let mut session = Session::default();
    let id = ObjectiveId::new("lo-1").unwrap();
    session.add_objective_with_id(id.clone()).unwrap();
    session
        .edit_objective(&id, "Explain X", Some(BloomLevel::Understand))
        .unwrap();
    let before = session.domain_state();

    let mut generator = generator(vec![r#"{"label": "great"}"#.to_string()]);
    let err = session.run_alignment(&id, &mut generator).unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::Generation(GenerationError::MalformedModelOutput { .. })
    ));
    assert_eq!(
        err.user_message(),
        "AI returned an unexpected format, please retry."
    );
    assert_eq!(session.domain_state(), before);
}

#[test]
fn test_outline_payload_validated() {
    let raw = r#"{
      "courseTitle": "Cell Biology",
      "courseLevelObjectives": ["Explain cell division"],
      "modules": [{
        "moduleTitle": "Mitosis",
        "overview": "Phases of mitosis",
        "sections": [{
          "sectionTitle": "Phases",
          "sectionLevelObjectives": ["Order the phases"],
          "units": [{"unitTitle": "Prophase", "unitLevelObjective": "Describe prophase", "keyPoints": ["Chromatin condenses"]}]
        }]
      }]
    }"#;
    let mut session = Session::default();
    session.apply_module_content("Mitosis text", 2, Vec::new());
    let mut generator = generator(vec![raw.to_string(), r#"{"courseTitle": "x", "modules": [], "extra": 1}"#.to_string()]);

    let outline = session.generate_outline(&mut generator).unwrap();
    assert_eq!(outline.unit_count(), 1);

    assert!(matches!(
        session.generate_outline(&mut generator),
        Err(WorkflowError::Generation(
            GenerationError::MalformedModelOutput { .. }
        ))
    ));
    assert_eq!(session.outline().unwrap().course_title, "Cell Biology");
}

#[test]
fn test_mock_generator_drives_full_workflow() {
    let mut session = Session::new(SessionConfig::default().with_questions_per_objective(3));
    session.apply_module_content("Mock module", 2, vec!["mock_module.txt".to_string()]);
    let id = session.add_objective();
    session
        .edit_objective(&id, "Know addition", Some(BloomLevel::Remember))
        .unwrap();

    let mut generator = MockGenerator::new(1);
    let alignment = session.run_alignment(&id, &mut generator).unwrap();
    assert_eq!(alignment.label, AlignmentLabel::Ambiguous);
    assert!(alignment.suggested_rewrite.is_some());

    session.accept_suggestion(&id).unwrap();
    let questions = session.generate_questions(&id, &mut generator).unwrap();
    assert_eq!(questions.len(), 3);
    assert!(questions.iter().all(|q| q.correct_option_id == OptionId::B));
}

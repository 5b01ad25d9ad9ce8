//! Shared test double for the content generator.

#![allow(dead_code)]

use bloom_core::{AlignmentRequest, ContentGenerator, OutlineRequest, QuestionRequest, Session};
use bloom_model::{
    AlignmentLabel, AlignmentResult, AnswerOption, AnswerOptions, BloomLevel, CourseOutline,
    GenerationError, ObjectiveId, OptionId, Question,
};

/// Generator that answers deterministically from its inputs and counts calls.
#[derive(Debug, Default)]
pub struct StubGenerator {
    pub alignment_calls: usize,
    pub question_calls: usize,
    pub fail_next: Option<GenerationError>,
}

impl StubGenerator {
    pub fn failing(error: GenerationError) -> Self {
        Self {
            fail_next: Some(error),
            ..Default::default()
        }
    }

    fn check_failure(&mut self) -> Result<(), GenerationError> {
        match self.fail_next.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl ContentGenerator for StubGenerator {
    fn check_alignment(
        &mut self,
        request: &AlignmentRequest<'_>,
    ) -> Result<AlignmentResult, GenerationError> {
        self.check_failure()?;
        self.alignment_calls += 1;
        Ok(AlignmentResult {
            label: AlignmentLabel::Ambiguous,
            reasons: vec![format!("checked against {}", request.intended_level)],
            suggested_rewrite: Some(format!("{} precisely", request.objective_text)),
        })
    }

    fn generate_questions(
        &mut self,
        request: &QuestionRequest<'_>,
    ) -> Result<Vec<Question>, GenerationError> {
        self.check_failure()?;
        self.question_calls += 1;
        Ok((0..request.count)
            .map(|index| question(&format!("{} #{index}", request.final_text)))
            .collect())
    }

    fn generate_outline(
        &mut self,
        request: &OutlineRequest<'_>,
    ) -> Result<CourseOutline, GenerationError> {
        self.check_failure()?;
        Ok(CourseOutline {
            course_title: format!("Course: {}", request.guidance),
            course_level_objectives: vec!["Understand the material".to_string()],
            modules: Vec::new(),
        })
    }
}

pub fn question(stem: &str) -> Question {
    Question {
        stem: stem.to_string(),
        options: AnswerOptions {
            a: AnswerOption::new("right", "because"),
            b: AnswerOption::new("wrong 1", "no"),
            c: AnswerOption::new("wrong 2", "no"),
            d: AnswerOption::new("wrong 3", "no"),
        },
        correct_option_id: OptionId::A,
        cognitive_rationale: "requires recall".to_string(),
        content_reference: "section 1".to_string(),
    }
}

pub fn id(value: &str) -> ObjectiveId {
    ObjectiveId::new(value).expect("valid id")
}

/// Add an objective with text and level under a fixed id.
pub fn add(session: &mut Session, value: &str, text: &str, level: BloomLevel) -> ObjectiveId {
    let objective = id(value);
    session
        .add_objective_with_id(objective.clone())
        .expect("new id");
    session
        .edit_objective(&objective, text, Some(level))
        .expect("edit");
    objective
}

/// Drive an objective all the way to generated questions.
pub fn complete(session: &mut Session, objective: &ObjectiveId, generator: &mut StubGenerator) {
    session.run_alignment(objective, generator).expect("align");
    session.accept_as_final(objective).expect("accept");
    session
        .generate_questions(objective, generator)
        .expect("generate");
}

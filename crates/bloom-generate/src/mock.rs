//! Offline generator with canned responses.
//!
//! Alignment answers rotate through four scenarios starting at an injected
//! seed, so a session exercises every branch of the review flow while
//! tests stay deterministic.

use tracing::debug;

use bloom_core::{AlignmentRequest, ContentGenerator, OutlineRequest, QuestionRequest};
use bloom_model::{
    AlignmentLabel, AlignmentResult, AnswerOption, AnswerOptions, BloomLevel, CourseOutline,
    GenerationError, OptionId, OutlineModule, OutlineSection, OutlineUnit, Question,
};

/// Canned alignment outcomes, in rotation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockScenario {
    /// Verb and demand match the intended level.
    Consistent,
    /// Vague or mixed verbs.
    VagueWording,
    /// Verb implies a different level.
    WrongLevel,
    /// Module only partly covers the objective.
    PartialCoverage,
}

impl MockScenario {
    pub const ALL: [MockScenario; 4] = [
        MockScenario::Consistent,
        MockScenario::VagueWording,
        MockScenario::WrongLevel,
        MockScenario::PartialCoverage,
    ];

    pub fn result(self, objective_text: &str, level: BloomLevel) -> AlignmentResult {
        let lower = level.as_str().to_lowercase();
        match self {
            MockScenario::Consistent => AlignmentResult {
                label: AlignmentLabel::Consistent,
                reasons: vec![
                    format!("Primary verb and cognitive demand match '{level}'."),
                    "LO is measurable and specific.".to_string(),
                ],
                suggested_rewrite: None,
            },
            MockScenario::VagueWording => AlignmentResult {
                label: AlignmentLabel::Ambiguous,
                reasons: vec![
                    "LO mixes multiple actions or vague phrasing (e.g., 'understand', 'know')."
                        .to_string(),
                ],
                suggested_rewrite: Some(format!(
                    "Revise to a single measurable verb at {level}: replace vague phrasing in \"{objective_text}\" with a concrete, observable outcome."
                )),
            },
            MockScenario::WrongLevel => AlignmentResult {
                label: AlignmentLabel::Inconsistent,
                reasons: vec![
                    format!("Stated verb implies a different Bloom level than '{level}'."),
                    "Assessment would not evidence the intended level.".to_string(),
                ],
                suggested_rewrite: Some(format!(
                    "Rewrite for {level}: start with a strong {lower}-level verb and specify observable criteria relevant to the module."
                )),
            },
            MockScenario::PartialCoverage => AlignmentResult {
                label: AlignmentLabel::Ambiguous,
                reasons: vec![
                    "Module content only partially covers the constructs referenced in the LO."
                        .to_string(),
                ],
                suggested_rewrite: Some(format!(
                    "Constrain scope to topics covered in the module and keep the {lower} cognitive demand."
                )),
            },
        }
    }
}

/// Generator that never leaves the process.
#[derive(Debug, Clone, Default)]
pub struct MockGenerator {
    next: usize,
}

impl MockGenerator {
    /// Start the scenario rotation at `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            next: (seed % MockScenario::ALL.len() as u64) as usize,
        }
    }

    /// Scenario the next alignment call will return.
    pub fn peek_scenario(&self) -> MockScenario {
        MockScenario::ALL[self.next]
    }

    fn next_scenario(&mut self) -> MockScenario {
        let scenario = self.peek_scenario();
        self.next = (self.next + 1) % MockScenario::ALL.len();
        scenario
    }
}

/// Canned question `index` (zero-based) of a mock set.
pub fn mock_question(index: usize) -> Question {
    Question {
        stem: format!("Mock question {}: What is 2 + 2?", index + 1),
        options: AnswerOptions {
            a: AnswerOption::new("3", "Off by one."),
            b: AnswerOption::new("4", "Correct."),
            c: AnswerOption::new("5", "Common addition error."),
            d: AnswerOption::new("22", "Concatenates the digits."),
        },
        correct_option_id: OptionId::B,
        cognitive_rationale: "Remember-level arithmetic fact.".to_string(),
        content_reference: String::new(),
    }
}

pub fn mock_outline(guidance: &str) -> CourseOutline {
    let unit = |title: &str, objective: &str, points: &[&str]| OutlineUnit {
        unit_title: title.to_string(),
        unit_level_objective: objective.to_string(),
        key_points: points.iter().map(|point| (*point).to_string()).collect(),
    };
    let course_title = if guidance.trim().is_empty() {
        "Mock Course".to_string()
    } else {
        format!("Mock Course: {}", guidance.trim())
    };

    CourseOutline {
        course_title,
        course_level_objectives: vec![
            "Explain the core concepts introduced in the source material.".to_string(),
            "Apply the concepts to short worked scenarios.".to_string(),
        ],
        modules: vec![OutlineModule {
            module_title: "Foundations".to_string(),
            overview: "Introduces the vocabulary and ideas the rest of the course builds on."
                .to_string(),
            sections: vec![OutlineSection {
                section_title: "Key ideas".to_string(),
                section_level_objectives: vec!["Describe each key idea in your own words.".to_string()],
                units: vec![
                    unit(
                        "Terminology",
                        "Define the main terms.",
                        &["Core terms", "Common confusions"],
                    ),
                    unit(
                        "Worked example",
                        "Use the terms to explain an example.",
                        &["Step-by-step walkthrough"],
                    ),
                ],
            }],
        }],
    }
}

impl ContentGenerator for MockGenerator {
    fn check_alignment(
        &mut self,
        request: &AlignmentRequest<'_>,
    ) -> Result<AlignmentResult, GenerationError> {
        let scenario = self.next_scenario();
        debug!(?scenario, "mock alignment");
        Ok(scenario.result(request.objective_text, request.intended_level))
    }

    fn generate_questions(
        &mut self,
        request: &QuestionRequest<'_>,
    ) -> Result<Vec<Question>, GenerationError> {
        debug!(count = request.count, "mock questions");
        Ok((0..request.count).map(mock_question).collect())
    }

    fn generate_outline(
        &mut self,
        request: &OutlineRequest<'_>,
    ) -> Result<CourseOutline, GenerationError> {
        Ok(mock_outline(request.guidance))
    }
}

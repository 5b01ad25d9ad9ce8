//! Seam to the external content generator.
//!
//! The workflow hands validated inputs to a [`ContentGenerator`] and gets
//! back typed results or a [`GenerationError`]. Prompting, transport and
//! schema validation live behind this trait (see `bloom-generate`).

use bloom_model::{AlignmentResult, BloomLevel, CourseOutline, GenerationError, Question};

#[derive(Debug, Clone, Copy)]
pub struct AlignmentRequest<'a> {
    pub objective_text: &'a str,
    pub intended_level: BloomLevel,
    pub module_text: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct QuestionRequest<'a> {
    pub final_text: &'a str,
    pub level: BloomLevel,
    pub module_text: &'a str,
    pub count: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct OutlineRequest<'a> {
    pub guidance: &'a str,
    pub source_material: &'a str,
}

pub trait ContentGenerator {
    fn check_alignment(
        &mut self,
        request: &AlignmentRequest<'_>,
    ) -> Result<AlignmentResult, GenerationError>;

    fn generate_questions(
        &mut self,
        request: &QuestionRequest<'_>,
    ) -> Result<Vec<Question>, GenerationError>;

    fn generate_outline(
        &mut self,
        request: &OutlineRequest<'_>,
    ) -> Result<CourseOutline, GenerationError>;
}

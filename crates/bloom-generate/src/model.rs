//! Content generator backed by a language model.

use tracing::{debug, info};

use bloom_core::{AlignmentRequest, ContentGenerator, OutlineRequest, QuestionRequest};
use bloom_model::{AlignmentResult, CourseOutline, GenerationError, Question};

use crate::parse::{
    parse_json_strict, validate_alignment_payload, validate_outline_payload,
    validate_questions_payload,
};
use crate::prompts::{
    ALIGNMENT_MAX_TOKENS, OUTLINE_MAX_TOKENS, OUTLINE_SYSTEM_PROMPT, QUESTIONS_MAX_TOKENS,
    SYSTEM_PROMPT, alignment_prompt, outline_prompt, questions_prompt,
};
use crate::provider::{ChatRequest, ResponseProvider, Task};

/// Prompts the model through a [`ResponseProvider`] and validates what it
/// returns before handing typed results to the workflow.
#[derive(Debug)]
pub struct ModelGenerator<P> {
    provider: P,
    model: String,
}

impl<P: ResponseProvider> ModelGenerator<P> {
    pub fn new(provider: P, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn into_provider(self) -> P {
        self.provider
    }

    fn ask(
        &mut self,
        task: Task,
        system: &str,
        user: &str,
        max_output_tokens: u32,
    ) -> Result<serde_json::Map<String, serde_json::Value>, GenerationError> {
        let request = ChatRequest {
            task,
            model: &self.model,
            system,
            user,
            max_output_tokens,
        };
        debug!(task = task.as_str(), model = %self.model, prompt_chars = user.len(), "requesting completion");
        let raw = self.provider.complete(&request)?;
        parse_json_strict(&raw)
    }
}

impl<P: ResponseProvider> ContentGenerator for ModelGenerator<P> {
    fn check_alignment(
        &mut self,
        request: &AlignmentRequest<'_>,
    ) -> Result<AlignmentResult, GenerationError> {
        let prompt = alignment_prompt(
            request.intended_level,
            request.objective_text,
            request.module_text,
        );
        let payload = self.ask(
            Task::Alignment,
            SYSTEM_PROMPT,
            &prompt,
            ALIGNMENT_MAX_TOKENS,
        )?;
        let result = validate_alignment_payload(payload)?;
        info!(label = %result.label, "alignment validated");
        Ok(result)
    }

    fn generate_questions(
        &mut self,
        request: &QuestionRequest<'_>,
    ) -> Result<Vec<Question>, GenerationError> {
        let prompt = questions_prompt(
            request.level,
            request.final_text,
            request.module_text,
            request.count,
        );
        let payload = self.ask(
            Task::Questions,
            SYSTEM_PROMPT,
            &prompt,
            QUESTIONS_MAX_TOKENS,
        )?;
        let questions = validate_questions_payload(payload)?;
        info!(
            requested = request.count,
            received = questions.len(),
            "questions validated"
        );
        Ok(questions)
    }

    fn generate_outline(
        &mut self,
        request: &OutlineRequest<'_>,
    ) -> Result<CourseOutline, GenerationError> {
        let prompt = outline_prompt(request.guidance, request.source_material);
        let payload = self.ask(
            Task::Outline,
            OUTLINE_SYSTEM_PROMPT,
            &prompt,
            OUTLINE_MAX_TOKENS,
        )?;
        validate_outline_payload(payload)
    }
}

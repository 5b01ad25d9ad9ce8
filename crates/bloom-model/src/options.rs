//! Session configuration and export inclusion options.

use serde::{Deserialize, Serialize};

/// Default model identifier used for live generation.
pub const DEFAULT_MODEL: &str = "gpt-5-nano";

/// Default token budget for combined module content.
pub const DEFAULT_MODULE_TOKEN_LIMIT: usize = 27_000;

/// Upper bound on questions generated per objective.
pub const MAX_QUESTIONS_PER_OBJECTIVE: usize = 10;

/// Settings that shape generation, persisted with the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Model identifier passed to the generation provider.
    pub model: String,

    /// Use canned responses instead of calling a model.
    pub mock_mode: bool,

    /// Questions requested per objective.
    pub questions_per_objective: usize,

    /// Token budget for module content.
    pub module_token_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            mock_mode: true,
            questions_per_objective: 3,
            module_token_limit: DEFAULT_MODULE_TOKEN_LIMIT,
        }
    }
}

impl SessionConfig {
    pub fn with_questions_per_objective(mut self, count: usize) -> Self {
        self.questions_per_objective = count;
        self
    }

    pub fn with_mock_mode(mut self, enable: bool) -> Self {
        self.mock_mode = enable;
        self
    }

    /// Requested question count clamped to `1..=MAX_QUESTIONS_PER_OBJECTIVE`.
    pub fn question_count(&self) -> usize {
        self.questions_per_objective
            .clamp(1, MAX_QUESTIONS_PER_OBJECTIVE)
    }
}

/// Which sections the export document includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct InclusionOptions {
    pub objectives: bool,
    pub bloom_level: bool,
    pub answer: bool,
    pub feedback: bool,
    pub content_reference: bool,
    pub cognitive_rationale: bool,
}

impl Default for InclusionOptions {
    fn default() -> Self {
        Self {
            objectives: true,
            bloom_level: true,
            answer: true,
            feedback: true,
            content_reference: true,
            cognitive_rationale: true,
        }
    }
}

impl InclusionOptions {
    /// Student-facing variant: stems and options only.
    pub fn questions_only() -> Self {
        Self {
            objectives: false,
            bloom_level: false,
            answer: false,
            feedback: false,
            content_reference: false,
            cognitive_rationale: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_count_is_clamped() {
        let config = SessionConfig::default().with_questions_per_objective(0);
        assert_eq!(config.question_count(), 1);
        let config = SessionConfig::default().with_questions_per_objective(50);
        assert_eq!(config.question_count(), MAX_QUESTIONS_PER_OBJECTIVE);
    }

    #[test]
    fn missing_config_keys_take_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"mock_mode": false}"#).expect("parse config");
        assert!(!config.mock_mode);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.module_token_limit, DEFAULT_MODULE_TOKEN_LIMIT);
    }
}

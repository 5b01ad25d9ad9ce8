//! Content generation for the Bloom workflow.
//!
//! Implements the `bloom_core::ContentGenerator` seam two ways:
//!
//! - [`ModelGenerator`] builds prompts, asks a [`ResponseProvider`] for raw
//!   JSON and validates it strictly against the expected schema. Any
//!   violation becomes `GenerationError::MalformedModelOutput`.
//! - [`MockGenerator`] answers offline with canned data, rotating through
//!   alignment scenarios from an injected seed.
//!
//! [`ScriptedProvider`] replays a fixed sequence of raw responses, for tests
//! and for validating responses captured from a model elsewhere.

pub mod mock;
pub mod model;
pub mod parse;
pub mod prompts;
pub mod provider;

pub use mock::{MockGenerator, MockScenario, mock_outline, mock_question};
pub use model::ModelGenerator;
pub use parse::{
    parse_json_strict, validate_alignment_payload, validate_outline_payload,
    validate_questions_payload,
};
pub use provider::{ChatRequest, ResponseProvider, ScriptedProvider, Task};

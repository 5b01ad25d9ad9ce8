//! Domain model for the Bloom authoring workflow.
//!
//! Plain, serializable records for everything a course author edits:
//! module content, learning objectives, alignment results, generated
//! questions and the course outline. Behavior (signatures, invalidation,
//! state transitions) lives in `bloom-core`.

pub mod bloom;
pub mod error;
pub mod ids;
pub mod module;
pub mod objective;
pub mod options;
pub mod outline;
pub mod question;

pub use bloom::BloomLevel;
pub use error::{GenerationError, ModelError, Result};
pub use ids::{ObjectiveId, Signature};
pub use module::ModuleContent;
pub use objective::{AlignmentLabel, AlignmentResult, LearningObjective};
pub use options::{InclusionOptions, SessionConfig};
pub use outline::{CourseOutline, OutlineModule, OutlineSection, OutlineUnit};
pub use question::{AnswerOption, AnswerOptions, OptionId, Question, QuestionSets};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn objective_serializes_absent_fields_as_null() {
        let objective = LearningObjective::new(ObjectiveId::new("lo-1").unwrap());
        let json = serde_json::to_value(&objective).expect("serialize objective");
        assert_eq!(json["id"], "lo-1");
        assert!(json["alignment"].is_null());
        assert!(json["final_text"].is_null());
    }
}

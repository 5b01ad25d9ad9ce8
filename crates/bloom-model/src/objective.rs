//! Learning objectives and their alignment judgments.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{BloomLevel, ModelError, ObjectiveId, Signature};

/// How well an objective's wording matches its intended Bloom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentLabel {
    Consistent,
    Ambiguous,
    Inconsistent,
}

impl AlignmentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlignmentLabel::Consistent => "consistent",
            AlignmentLabel::Ambiguous => "ambiguous",
            AlignmentLabel::Inconsistent => "inconsistent",
        }
    }
}

impl fmt::Display for AlignmentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlignmentLabel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "consistent" => Ok(AlignmentLabel::Consistent),
            "ambiguous" => Ok(AlignmentLabel::Ambiguous),
            "inconsistent" => Ok(AlignmentLabel::Inconsistent),
            _ => Err(ModelError::UnknownAlignmentLabel(s.to_string())),
        }
    }
}

/// Result of an alignment check. Replaced wholesale, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentResult {
    pub label: AlignmentLabel,
    /// One to three short reasons.
    pub reasons: Vec<String>,
    pub suggested_rewrite: Option<String>,
}

/// The central user-authored entity.
///
/// Derived fields (`alignment`, `final_text` and the two signatures) are
/// only ever cleared by the invalidation engine in `bloom-core`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningObjective {
    pub id: ObjectiveId,
    pub text: String,
    pub intended_level: Option<BloomLevel>,
    pub alignment: Option<AlignmentResult>,
    /// Signature of the alignment inputs that produced `alignment`.
    pub alignment_signature: Option<Signature>,
    /// Present once the objective has been accepted as final.
    pub final_text: Option<String>,
    /// Signature of the generation inputs when questions were last generated.
    pub generation_signature: Option<Signature>,
}

impl LearningObjective {
    /// Create an empty draft objective.
    pub fn new(id: ObjectiveId) -> Self {
        Self {
            id,
            text: String::new(),
            intended_level: None,
            alignment: None,
            alignment_signature: None,
            final_text: None,
            generation_signature: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_level(mut self, level: BloomLevel) -> Self {
        self.intended_level = Some(level);
        self
    }

    pub fn is_finalized(&self) -> bool {
        self.final_text.is_some()
    }

    /// Text shown to learners: the final text when accepted, else the draft.
    pub fn display_text(&self) -> &str {
        self.final_text.as_deref().unwrap_or(&self.text)
    }
}

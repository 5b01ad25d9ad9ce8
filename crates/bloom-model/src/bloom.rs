//! Bloom's Taxonomy cognitive levels.
//!
//! Six ordinal categories of cognitive demand, from recall (`Remember`)
//! to synthesis (`Create`). The declaration order is the taxonomy order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BloomLevel {
    Remember,
    Understand,
    Apply,
    Analyze,
    Evaluate,
    Create,
}

impl BloomLevel {
    /// All levels in taxonomy order.
    pub const ALL: [BloomLevel; 6] = [
        BloomLevel::Remember,
        BloomLevel::Understand,
        BloomLevel::Apply,
        BloomLevel::Analyze,
        BloomLevel::Evaluate,
        BloomLevel::Create,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloomLevel::Remember => "Remember",
            BloomLevel::Understand => "Understand",
            BloomLevel::Apply => "Apply",
            BloomLevel::Analyze => "Analyze",
            BloomLevel::Evaluate => "Evaluate",
            BloomLevel::Create => "Create",
        }
    }

    /// Short definition of the cognitive process at this level.
    pub fn definition(&self) -> &'static str {
        match self {
            BloomLevel::Remember => {
                "Retrieve, recognize, and recall relevant knowledge from long-term memory."
            }
            BloomLevel::Understand => {
                "Construct meaning through interpreting, exemplifying, classifying, summarizing, \
                 inferring, comparing, and explaining."
            }
            BloomLevel::Apply => "Carry out or use a procedure for execution or implementation.",
            BloomLevel::Analyze => {
                "Break material into parts and determine how the parts relate to one another \
                 and to an overall structure or purpose."
            }
            BloomLevel::Evaluate => {
                "Make judgments based on criteria and standards through checking and critiquing."
            }
            BloomLevel::Create => {
                "Put elements together to form a new whole; reorganize into a new pattern or \
                 structure through generating, planning, or producing."
            }
        }
    }

    /// Typical action verbs for objectives written at this level.
    pub fn example_verbs(&self) -> &'static [&'static str] {
        match self {
            BloomLevel::Remember => &[
                "list", "recite", "outline", "define", "name", "match", "quote", "recall",
                "identify", "label", "recognize",
            ],
            BloomLevel::Understand => &[
                "describe",
                "explain",
                "paraphrase",
                "restate",
                "summarize",
                "contrast",
                "interpret",
                "discuss",
            ],
            BloomLevel::Apply => &[
                "calculate",
                "predict",
                "apply",
                "solve",
                "illustrate",
                "use",
                "demonstrate",
                "determine",
                "model",
                "perform",
                "present",
            ],
            BloomLevel::Analyze => &[
                "classify",
                "break down",
                "categorize",
                "analyze",
                "diagram",
                "criticize",
                "simplify",
                "associate",
            ],
            BloomLevel::Evaluate => &[
                "choose", "support", "defend", "judge", "grade", "compare", "argue", "justify",
                "convince", "select", "evaluate",
            ],
            BloomLevel::Create => &[
                "design",
                "formulate",
                "build",
                "invent",
                "create",
                "compose",
                "generate",
                "derive",
                "modify",
                "develop",
            ],
        }
    }
}

impl fmt::Display for BloomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloomLevel {
    type Err = ModelError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        BloomLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownBloomLevel(s.to_string()))
    }
}

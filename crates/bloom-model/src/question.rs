//! Four-option multiple-choice assessment questions.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ModelError, ObjectiveId};

/// Generated questions per objective, iterated in objective-id order.
pub type QuestionSets = BTreeMap<ObjectiveId, Vec<Question>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionId {
    A,
    B,
    C,
    D,
}

impl OptionId {
    pub const ALL: [OptionId; 4] = [OptionId::A, OptionId::B, OptionId::C, OptionId::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionId::A => "A",
            OptionId::B => "B",
            OptionId::C => "C",
            OptionId::D => "D",
        }
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(OptionId::A),
            "B" => Ok(OptionId::B),
            "C" => Ok(OptionId::C),
            "D" => Ok(OptionId::D),
            _ => Err(ModelError::UnknownOptionId(s.to_string())),
        }
    }
}

/// One answer option together with the feedback explaining it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    pub rationale: String,
}

impl AnswerOption {
    pub fn new(text: impl Into<String>, rationale: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rationale: rationale.into(),
        }
    }
}

/// Exactly four options keyed A to D.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOptions {
    #[serde(rename = "A")]
    pub a: AnswerOption,
    #[serde(rename = "B")]
    pub b: AnswerOption,
    #[serde(rename = "C")]
    pub c: AnswerOption,
    #[serde(rename = "D")]
    pub d: AnswerOption,
}

impl AnswerOptions {
    pub fn get(&self, id: OptionId) -> &AnswerOption {
        match id {
            OptionId::A => &self.a,
            OptionId::B => &self.b,
            OptionId::C => &self.c,
            OptionId::D => &self.d,
        }
    }

    pub fn get_mut(&mut self, id: OptionId) -> &mut AnswerOption {
        match id {
            OptionId::A => &mut self.a,
            OptionId::B => &mut self.b,
            OptionId::C => &mut self.c,
            OptionId::D => &mut self.d,
        }
    }

    /// Options in fixed A-D order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionId, &AnswerOption)> {
        OptionId::ALL.into_iter().map(move |id| (id, self.get(id)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub stem: String,
    pub options: AnswerOptions,
    pub correct_option_id: OptionId,
    pub cognitive_rationale: String,
    pub content_reference: String,
}

impl Question {
    pub fn correct_option(&self) -> &AnswerOption {
        self.options.get(self.correct_option_id)
    }
}

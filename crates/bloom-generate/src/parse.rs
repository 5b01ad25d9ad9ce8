//! Strict parsing and schema validation of model output.
//!
//! Every payload is rejected as a whole on the first violation; partial
//! data never reaches the workflow.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use bloom_model::{
    AlignmentLabel, AlignmentResult, AnswerOption, AnswerOptions, CourseOutline, GenerationError,
    OptionId, Question,
};

type Result<T> = std::result::Result<T, GenerationError>;

/// Question type the generator is asked for.
pub const QUESTION_TYPE: &str = "MCQ_4";
const MAX_REASONS: usize = 3;

/// Parse raw model text as a JSON object.
pub fn parse_json_strict(raw: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|e| GenerationError::malformed(format!("model returned invalid JSON: {e}")))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(GenerationError::malformed(format!(
            "expected a JSON object, got {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn decode<T: DeserializeOwned>(payload: Map<String, Value>, what: &str) -> Result<T> {
    serde_json::from_value(Value::Object(payload))
        .map_err(|e| GenerationError::malformed(format!("{what}: {e}")))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AlignmentPayload {
    label: String,
    reasons: Vec<String>,
    suggested_lo: Option<String>,
}

/// Validate an alignment payload.
///
/// Requires exactly `label`, `reasons` and `suggested_lo` (which may be
/// null but must be present), a label from the fixed set, and one to
/// three reasons.
pub fn validate_alignment_payload(payload: Map<String, Value>) -> Result<AlignmentResult> {
    if !payload.contains_key("suggested_lo") {
        return Err(GenerationError::malformed("alignment: suggested_lo missing"));
    }
    let payload: AlignmentPayload = decode(payload, "alignment")?;

    let label: AlignmentLabel = payload
        .label
        .parse()
        .map_err(|e| GenerationError::malformed(format!("alignment: {e}")))?;
    if payload.reasons.is_empty() || payload.reasons.len() > MAX_REASONS {
        return Err(GenerationError::malformed(format!(
            "alignment: expected 1-{MAX_REASONS} reasons, got {}",
            payload.reasons.len()
        )));
    }

    Ok(AlignmentResult {
        label,
        reasons: payload.reasons,
        suggested_rewrite: payload
            .suggested_lo
            .filter(|rewrite| !rewrite.trim().is_empty()),
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct QuestionsPayload {
    questions: Vec<QuestionPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct QuestionPayload {
    #[serde(rename = "type")]
    kind: String,
    stem: String,
    options: Vec<OptionPayload>,
    correct_option_id: String,
    cognitive_rationale: String,
    #[serde(rename = "contentReference")]
    content_reference: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionPayload {
    id: String,
    text: String,
    option_rationale: String,
}

/// Validate a question-generation payload.
///
/// Each question must be `MCQ_4` with exactly four options whose ids are
/// A, B, C and D (in any order, no repeats) and a correct id among them.
pub fn validate_questions_payload(payload: Map<String, Value>) -> Result<Vec<Question>> {
    let payload: QuestionsPayload = decode(payload, "questions")?;
    if payload.questions.is_empty() {
        return Err(GenerationError::malformed("questions: list is empty"));
    }
    payload
        .questions
        .into_iter()
        .enumerate()
        .map(|(index, question)| {
            convert_question(question).map_err(|reason| {
                GenerationError::malformed(format!("question {}: {reason}", index + 1))
            })
        })
        .collect()
}

fn convert_question(payload: QuestionPayload) -> std::result::Result<Question, String> {
    if payload.kind != QUESTION_TYPE {
        return Err(format!("type must be {QUESTION_TYPE}, got {:?}", payload.kind));
    }
    if payload.options.len() != OptionId::ALL.len() {
        return Err(format!("need 4 options, got {}", payload.options.len()));
    }

    let mut slots: [Option<AnswerOption>; 4] = Default::default();
    for option in payload.options {
        let id: OptionId = option
            .id
            .parse()
            .map_err(|_| format!("option ids must be A-D, got {:?}", option.id))?;
        let slot = &mut slots[id as usize];
        if slot.is_some() {
            return Err(format!("option {id} appears twice"));
        }
        *slot = Some(AnswerOption::new(option.text, option.option_rationale));
    }
    let [Some(a), Some(b), Some(c), Some(d)] = slots else {
        return Err("option ids must be A-D".to_string());
    };

    let correct_option_id: OptionId = payload.correct_option_id.parse().map_err(|_| {
        format!(
            "correct_option_id must be A-D, got {:?}",
            payload.correct_option_id
        )
    })?;

    Ok(Question {
        stem: payload.stem,
        options: AnswerOptions { a, b, c, d },
        correct_option_id,
        cognitive_rationale: payload.cognitive_rationale,
        content_reference: payload.content_reference,
    })
}

/// Validate a course outline payload.
pub fn validate_outline_payload(payload: Map<String, Value>) -> Result<CourseOutline> {
    let outline: CourseOutline = decode(payload, "outline")?;
    if outline.course_title.trim().is_empty() {
        return Err(GenerationError::malformed("outline: courseTitle is empty"));
    }
    if outline.modules.is_empty() {
        return Err(GenerationError::malformed("outline: no modules"));
    }
    Ok(outline)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(raw: &str) -> Map<String, Value> {
        parse_json_strict(raw).unwrap()
    }

    #[test]
    fn non_object_json_is_rejected() {
        let err = parse_json_strict("[1, 2]").unwrap_err();
        assert_eq!(
            err,
            GenerationError::malformed("expected a JSON object, got an array")
        );
        assert!(parse_json_strict("{not json").is_err());
    }

    #[test]
    fn alignment_with_null_suggestion() {
        let result = validate_alignment_payload(object(
            r#"{"label": "consistent", "reasons": ["verb matches"], "suggested_lo": null}"#,
        ))
        .unwrap();
        assert_eq!(result.label, AlignmentLabel::Consistent);
        assert_eq!(result.suggested_rewrite, None);
    }

    #[test]
    fn alignment_requires_suggestion_key() {
        let err = validate_alignment_payload(object(
            r#"{"label": "consistent", "reasons": ["ok"]}"#,
        ))
        .unwrap_err();
        assert!(err.to_string().contains("suggested_lo missing"));
    }

    #[test]
    fn alignment_rejects_label_outside_enum() {
        let err = validate_alignment_payload(object(
            r#"{"label": "aligned", "reasons": ["ok"], "suggested_lo": null}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, GenerationError::MalformedModelOutput { .. }));
    }

    #[test]
    fn alignment_rejects_reason_counts() {
        for reasons in ["[]", r#"["a","b","c","d"]"#] {
            let raw = format!(r#"{{"label": "ambiguous", "reasons": {reasons}, "suggested_lo": "x"}}"#);
            assert!(validate_alignment_payload(object(&raw)).is_err());
        }
    }

    #[test]
    fn alignment_rejects_extra_keys() {
        let err = validate_alignment_payload(object(
            r#"{"label": "consistent", "reasons": ["ok"], "suggested_lo": null, "score": 3}"#,
        ))
        .unwrap_err();
        assert!(err.to_string().contains("score"));
    }
}

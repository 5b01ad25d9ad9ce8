//! Content signatures.
//!
//! Every staleness check in the workflow is an equality test between a
//! signature stored when a derived artifact was produced and one computed
//! from the current inputs. Signatures are SHA-256 digests rendered as
//! lowercase hex.
//!
//! # Canonical encoding
//!
//! Scalar text is hashed as its raw UTF-8 bytes. Composite signatures start
//! with a domain tag and encode every field as an 8-byte little-endian
//! length followed by the field bytes, so `"ab" + "c"` and `"a" + "bc"`
//! never collide and no separator can be forged by field content.

use sha2::{Digest, Sha256};

use bloom_model::{BloomLevel, CourseOutline, QuestionSets, Signature};

/// Signature of a piece of text (module content, for instance).
pub fn signature(text: &str) -> Signature {
    let digest = Sha256::digest(text.as_bytes());
    Signature::new(hex::encode(digest))
}

/// Incremental builder for composite signatures.
pub struct SignatureBuilder {
    hasher: Sha256,
}

impl SignatureBuilder {
    pub fn new(tag: &str) -> Self {
        let mut builder = Self {
            hasher: Sha256::new(),
        };
        builder.field(tag);
        builder
    }

    pub fn field(&mut self, value: &str) -> &mut Self {
        self.count(value.len());
        self.hasher.update(value.as_bytes());
        self
    }

    pub fn count(&mut self, value: usize) -> &mut Self {
        self.hasher.update((value as u64).to_le_bytes());
        self
    }

    pub fn finish(self) -> Signature {
        Signature::new(hex::encode(self.hasher.finalize()))
    }
}

fn level_field(level: Option<BloomLevel>) -> &'static str {
    level.map(|level| level.as_str()).unwrap_or("")
}

/// Signature of the inputs consumed by an alignment check.
pub fn alignment_signature(
    lo_text: &str,
    intended_level: Option<BloomLevel>,
    module_signature: &Signature,
) -> Signature {
    let mut builder = SignatureBuilder::new("alignment");
    builder
        .field(lo_text)
        .field(level_field(intended_level))
        .field(module_signature.as_str());
    builder.finish()
}

/// Signature of the inputs consumed by question generation.
pub fn generation_signature(
    final_text: &str,
    intended_level: Option<BloomLevel>,
    module_signature: &Signature,
) -> Signature {
    let mut builder = SignatureBuilder::new("generation");
    builder
        .field(final_text)
        .field(level_field(intended_level))
        .field(module_signature.as_str());
    builder.finish()
}

/// Signature over every editable field of every question.
///
/// Objectives are visited in id order, questions in list order and options
/// in A-D order.
pub fn question_set_signature(question_sets: &QuestionSets) -> Signature {
    let mut builder = SignatureBuilder::new("questions");
    builder.count(question_sets.len());
    for (objective_id, questions) in question_sets {
        builder.field(objective_id.as_str()).count(questions.len());
        for question in questions {
            builder
                .field(&question.stem)
                .field(question.correct_option_id.as_str())
                .field(&question.content_reference)
                .field(&question.cognitive_rationale);
            for (option_id, option) in question.options.iter() {
                builder
                    .field(option_id.as_str())
                    .field(&option.text)
                    .field(&option.rationale);
            }
        }
    }
    builder.finish()
}

/// Signature of an edited course outline.
pub fn outline_signature(outline: &CourseOutline) -> Signature {
    let mut builder = SignatureBuilder::new("outline");
    builder.field(&outline.course_title);
    list(&mut builder, &outline.course_level_objectives);
    builder.count(outline.modules.len());
    for module in &outline.modules {
        builder.field(&module.module_title).field(&module.overview);
        builder.count(module.sections.len());
        for section in &module.sections {
            builder.field(&section.section_title);
            list(&mut builder, &section.section_level_objectives);
            builder.count(section.units.len());
            for unit in &section.units {
                builder
                    .field(&unit.unit_title)
                    .field(&unit.unit_level_objective);
                list(&mut builder, &unit.key_points);
            }
        }
    }
    builder.finish()
}

fn list(builder: &mut SignatureBuilder, items: &[String]) {
    builder.count(items.len());
    for item in items {
        builder.field(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_signature_is_plain_sha256() {
        assert_eq!(
            signature("Hello, World!").as_str(),
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
    }

    #[test]
    fn field_boundaries_are_unambiguous() {
        let module = signature("m1");
        let split_early = alignment_signature("ab", None, &module);
        let split_late = alignment_signature("a", None, &module);
        assert_ne!(split_early, split_late);

        let mut left = SignatureBuilder::new("t");
        left.field("ab").field("c");
        let mut right = SignatureBuilder::new("t");
        right.field("a").field("bc");
        assert_ne!(left.finish(), right.finish());
    }

    #[test]
    fn alignment_and_generation_signatures_differ_for_same_inputs() {
        let module = signature("m1");
        assert_ne!(
            alignment_signature("Explain X", Some(BloomLevel::Understand), &module),
            generation_signature("Explain X", Some(BloomLevel::Understand), &module)
        );
    }

    #[test]
    fn unset_level_differs_from_every_level() {
        let module = signature("m1");
        let unset = alignment_signature("Explain X", None, &module);
        for level in BloomLevel::ALL {
            assert_ne!(unset, alignment_signature("Explain X", Some(level), &module));
        }
    }

    #[test]
    fn empty_question_sets_have_a_stable_signature() {
        let empty = QuestionSets::new();
        assert_eq!(question_set_signature(&empty), question_set_signature(&empty));
    }
}

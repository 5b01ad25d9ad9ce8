//! WordprocessingML body of the assessment document.
//!
//! Layout per objective that has questions:
//!
//! ```text
//! Learning Objective: <final text>        (Heading 2)
//! Bloom level: <level>                    (italic)
//! 1. <stem>                               (bold, purple)
//!    (A) <option>                         (correct one highlighted)
//!    ...
//! Answer: <id>
//! Feedback:
//!    (A) <rationale>
//! Content reference: <reference>
//! Rationale for Bloom level: <rationale>
//! ```
//!
//! Every block except the stem and options is switched by
//! [`InclusionOptions`].

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use bloom_model::{InclusionOptions, LearningObjective, Question, QuestionSets};

use crate::error::Result;

/// WordprocessingML main namespace.
pub const WORDPROCESSING_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Title line at the top of every export.
pub const DOCUMENT_TITLE: &str = "Assessment Questions";

const STEM_COLOR: &str = "5F497A";

/// Option and feedback indent, in twentieths of a point.
const INDENT_TWIPS: &str = "360";

#[derive(Debug, Clone, Copy, Default)]
struct RunStyle {
    bold: bool,
    italic: bool,
    highlight: bool,
    color: Option<&'static str>,
}

impl RunStyle {
    const PLAIN: RunStyle = RunStyle {
        bold: false,
        italic: false,
        highlight: false,
        color: None,
    };
    const BOLD: RunStyle = RunStyle {
        bold: true,
        ..RunStyle::PLAIN
    };
    const ITALIC: RunStyle = RunStyle {
        italic: true,
        ..RunStyle::PLAIN
    };
    const STEM: RunStyle = RunStyle {
        bold: true,
        color: Some(STEM_COLOR),
        ..RunStyle::PLAIN
    };
    const CORRECT: RunStyle = RunStyle {
        highlight: true,
        ..RunStyle::PLAIN
    };

    fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.highlight || self.color.is_some())
    }
}

#[derive(Debug, Default)]
struct Paragraph {
    style: Option<&'static str>,
    indent: bool,
    runs: Vec<(String, RunStyle)>,
}

impl Paragraph {
    fn styled(style: &'static str) -> Self {
        Self {
            style: Some(style),
            ..Self::default()
        }
    }

    fn indented() -> Self {
        Self {
            indent: true,
            ..Self::default()
        }
    }

    fn run(mut self, text: impl Into<String>, style: RunStyle) -> Self {
        self.runs.push((text.into(), style));
        self
    }

    fn write<W: Write>(&self, xml: &mut Writer<W>) -> Result<()> {
        xml.write_event(Event::Start(BytesStart::new("w:p")))?;
        if self.style.is_some() || self.indent {
            xml.write_event(Event::Start(BytesStart::new("w:pPr")))?;
            if let Some(style) = self.style {
                write_empty(xml, "w:pStyle", &[("w:val", style)])?;
            }
            if self.indent {
                write_empty(xml, "w:ind", &[("w:left", INDENT_TWIPS)])?;
            }
            xml.write_event(Event::End(BytesEnd::new("w:pPr")))?;
        }
        for (text, style) in &self.runs {
            write_run(xml, text, *style)?;
        }
        xml.write_event(Event::End(BytesEnd::new("w:p")))?;
        Ok(())
    }
}

fn write_empty<W: Write>(xml: &mut Writer<W>, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
    let mut element = BytesStart::new(name);
    for attribute in attributes {
        element.push_attribute(*attribute);
    }
    xml.write_event(Event::Empty(element))?;
    Ok(())
}

fn write_run<W: Write>(xml: &mut Writer<W>, text: &str, style: RunStyle) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("w:r")))?;
    if !style.is_plain() {
        xml.write_event(Event::Start(BytesStart::new("w:rPr")))?;
        if style.bold {
            write_empty(xml, "w:b", &[])?;
        }
        if style.italic {
            write_empty(xml, "w:i", &[])?;
        }
        if let Some(color) = style.color {
            write_empty(xml, "w:color", &[("w:val", color)])?;
        }
        if style.highlight {
            write_empty(xml, "w:highlight", &[("w:val", "yellow")])?;
        }
        xml.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    }

    let mut t = BytesStart::new("w:t");
    t.push_attribute(("xml:space", "preserve"));
    xml.write_event(Event::Start(t))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new("w:t")))?;

    xml.write_event(Event::End(BytesEnd::new("w:r")))?;
    Ok(())
}

/// Write `word/document.xml` for the given objectives.
///
/// Objectives are rendered in the order given. Only objectives with an
/// accepted final text and at least one question appear; a reopened
/// objective is left out until it is accepted again.
pub fn write_document<W: Write>(
    writer: W,
    objectives: &[LearningObjective],
    questions: &QuestionSets,
    include: &InclusionOptions,
) -> Result<()> {
    let mut xml = Writer::new(writer);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut root = BytesStart::new("w:document");
    root.push_attribute(("xmlns:w", WORDPROCESSING_NS));
    xml.write_event(Event::Start(root))?;
    xml.write_event(Event::Start(BytesStart::new("w:body")))?;

    Paragraph::styled("Title")
        .run(DOCUMENT_TITLE, RunStyle::PLAIN)
        .write(&mut xml)?;

    for objective in objectives {
        let Some(final_text) = objective.final_text.as_deref() else {
            continue;
        };
        let Some(set) = questions.get(&objective.id).filter(|set| !set.is_empty()) else {
            continue;
        };
        write_objective(&mut xml, objective, final_text, set, include)?;
    }

    xml.write_event(Event::End(BytesEnd::new("w:body")))?;
    xml.write_event(Event::End(BytesEnd::new("w:document")))?;
    Ok(())
}

fn write_objective<W: Write>(
    xml: &mut Writer<W>,
    objective: &LearningObjective,
    final_text: &str,
    questions: &[Question],
    include: &InclusionOptions,
) -> Result<()> {
    if include.objectives {
        Paragraph::styled("Heading2")
            .run(
                format!("Learning Objective: {final_text}"),
                RunStyle::PLAIN,
            )
            .write(xml)?;
    }
    if include.bloom_level
        && let Some(level) = objective.intended_level
    {
        Paragraph::default()
            .run(format!("Bloom level: {level}"), RunStyle::ITALIC)
            .write(xml)?;
    }
    for (index, question) in questions.iter().enumerate() {
        write_question(xml, index + 1, question, include)?;
    }
    Ok(())
}

fn write_question<W: Write>(
    xml: &mut Writer<W>,
    number: usize,
    question: &Question,
    include: &InclusionOptions,
) -> Result<()> {
    Paragraph::default()
        .run(format!("{number}. {}", question.stem), RunStyle::STEM)
        .write(xml)?;

    for (id, option) in question.options.iter() {
        let style = if include.answer && id == question.correct_option_id {
            RunStyle::CORRECT
        } else {
            RunStyle::PLAIN
        };
        Paragraph::indented()
            .run(format!("({id}) {}", option.text), style)
            .write(xml)?;
    }

    if include.answer {
        labelled(xml, "Answer: ", question.correct_option_id.as_str())?;
    }
    if include.feedback {
        Paragraph::default()
            .run("Feedback:", RunStyle::BOLD)
            .write(xml)?;
        for (id, option) in question.options.iter() {
            Paragraph::indented()
                .run(format!("({id}) {}", option.rationale), RunStyle::PLAIN)
                .write(xml)?;
        }
    }
    if include.content_reference {
        labelled(xml, "Content reference: ", &question.content_reference)?;
    }
    if include.cognitive_rationale {
        labelled(
            xml,
            "Rationale for Bloom level: ",
            &question.cognitive_rationale,
        )?;
    }
    Ok(())
}

/// A bold label followed by plain text in one paragraph.
fn labelled<W: Write>(xml: &mut Writer<W>, label: &str, text: &str) -> Result<()> {
    Paragraph::default()
        .run(label, RunStyle::BOLD)
        .run(text, RunStyle::PLAIN)
        .write(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(objectives: &[LearningObjective], questions: &QuestionSets) -> String {
        let mut out = Vec::new();
        write_document(&mut out, objectives, questions, &InclusionOptions::default()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_empty_export_has_title_only() {
        let xml = render(&[], &QuestionSets::new());
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>"));
        assert!(xml.contains("<w:pStyle w:val=\"Title\"/>"));
        assert!(xml.contains(">Assessment Questions</w:t>"));
        assert!(!xml.contains("Heading2"));
    }

    #[test]
    fn test_run_properties() {
        let mut out = Vec::new();
        let mut xml = Writer::new(&mut out);
        write_run(&mut xml, "a < b", RunStyle::STEM).unwrap();
        let xml = String::from_utf8(out).unwrap();
        assert_eq!(
            xml,
            "<w:r><w:rPr><w:b/><w:color w:val=\"5F497A\"/></w:rPr>\
             <w:t xml:space=\"preserve\">a &lt; b</w:t></w:r>"
        );
    }

    #[test]
    fn test_plain_run_has_no_properties() {
        let mut out = Vec::new();
        let mut xml = Writer::new(&mut out);
        write_run(&mut xml, "x", RunStyle::PLAIN).unwrap();
        assert!(!String::from_utf8(out).unwrap().contains("w:rPr"));
    }
}

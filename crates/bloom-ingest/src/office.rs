//! Text extraction from Office Open XML packages (.docx, .pptx).
//!
//! Both formats are zip archives of XML parts. Paragraph text lives in
//! `t` elements inside `p` elements (`w:` namespace for documents, `a:` for
//! slides), so one reader serves both.

use std::io::{Cursor, Read};

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, Event};
use quick_xml::reader::Reader;
use tracing::debug;
use zip::ZipArchive;

use crate::error::{IngestError, Result};

type Archive<'a> = ZipArchive<Cursor<&'a [u8]>>;

const DOCUMENT_PART: &str = "word/document.xml";
const SLIDE_PREFIX: &str = "ppt/slides/slide";
const NOTES_RELATIONSHIP: &str = "/notesSlide";

/// Extract paragraph text from a WordprocessingML document.
pub(crate) fn docx_text(name: &str, bytes: &[u8]) -> Result<String> {
    let mut archive = open(name, bytes)?;
    let xml = read_part(&mut archive, name, DOCUMENT_PART)?;
    let paragraphs = read_paragraphs(&xml).map_err(|e| IngestError::unreadable(name, e))?;
    Ok(paragraphs.join("\n"))
}

/// Extract slide text and speaker notes from a PresentationML deck.
///
/// Each slide with text becomes a `[Slide n]` block; notes follow under a
/// `[Notes]` line.
pub(crate) fn pptx_text(name: &str, bytes: &[u8]) -> Result<String> {
    let mut archive = open(name, bytes)?;

    let mut slides: Vec<usize> = archive
        .file_names()
        .filter_map(|part| {
            part.strip_prefix(SLIDE_PREFIX)?
                .strip_suffix(".xml")?
                .parse()
                .ok()
        })
        .collect();
    slides.sort_unstable();
    debug!(file = name, slides = slides.len(), "reading presentation");

    let mut chunks = Vec::new();
    for number in slides {
        let xml = read_part(&mut archive, name, &format!("{SLIDE_PREFIX}{number}.xml"))?;
        let mut bits: Vec<String> = read_paragraphs(&xml)
            .map_err(|e| IngestError::unreadable(name, e))?
            .into_iter()
            .filter(|paragraph| !paragraph.is_empty())
            .collect();

        if let Some(notes) = slide_notes(&mut archive, name, number)?
            && !notes.is_empty()
        {
            bits.push(format!("[Notes]\n{notes}"));
        }

        if !bits.is_empty() {
            chunks.push(format!("[Slide {number}]\n{}", bits.join("\n")));
        }
    }
    Ok(chunks.join("\n\n"))
}

fn open<'a>(name: &str, bytes: &'a [u8]) -> Result<Archive<'a>> {
    ZipArchive::new(Cursor::new(bytes)).map_err(|e| IngestError::unreadable(name, e))
}

fn read_part(archive: &mut Archive<'_>, name: &str, part: &str) -> Result<Vec<u8>> {
    let mut file = archive
        .by_name(part)
        .map_err(|e| IngestError::unreadable(name, format!("{part}: {e}")))?;
    let mut xml = Vec::new();
    file.read_to_end(&mut xml)
        .map_err(|e| IngestError::unreadable(name, format!("{part}: {e}")))?;
    Ok(xml)
}

/// Notes text for a slide, found through the slide's relationships part.
fn slide_notes(archive: &mut Archive<'_>, name: &str, number: usize) -> Result<Option<String>> {
    let rels_part = format!("ppt/slides/_rels/slide{number}.xml.rels");
    if archive.index_for_name(&rels_part).is_none() {
        return Ok(None);
    }
    let rels = read_part(archive, name, &rels_part)?;
    let Some(target) = notes_target(&rels).map_err(|e| IngestError::unreadable(name, e))? else {
        return Ok(None);
    };

    let part = match target.strip_prefix("../") {
        Some(relative) => format!("ppt/{relative}"),
        None => target,
    };
    let xml = read_part(archive, name, &part)?;
    let paragraphs = read_paragraphs(&xml).map_err(|e| IngestError::unreadable(name, e))?;
    let text: Vec<String> = paragraphs
        .into_iter()
        .filter(|paragraph| !paragraph.is_empty())
        .collect();
    Ok(Some(text.join("\n")))
}

fn notes_target(rels: &[u8]) -> std::result::Result<Option<String>, quick_xml::Error> {
    let mut reader = Reader::from_reader(rels);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"Relationship" => {
                let is_notes = e
                    .try_get_attribute("Type")?
                    .is_some_and(|kind| kind.value.ends_with(NOTES_RELATIONSHIP.as_bytes()));
                if is_notes && let Some(target) = e.try_get_attribute("Target")? {
                    return Ok(Some(String::from_utf8_lossy(&target.value).into_owned()));
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}

/// Collect the text of every `p` element, in document order.
fn read_paragraphs(xml: &[u8]) -> std::result::Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_text = true,
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                _ => {}
            },
            Event::Text(text) if in_text => current.push_str(&text.decode()?),
            Event::GeneralRef(reference) if in_text => push_reference(&mut current, &reference)?,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }
    Ok(paragraphs)
}

fn push_reference(
    out: &mut String,
    reference: &BytesRef<'_>,
) -> std::result::Result<(), quick_xml::Error> {
    if let Some(ch) = reference.resolve_char_ref()? {
        out.push(ch);
        return Ok(());
    }
    let name = reference.decode()?;
    if let Some(value) = resolve_predefined_entity(&name) {
        out.push_str(value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_and_entities() {
        let xml = br#"<w:document xmlns:w="w"><w:body>
            <w:p><w:r><w:t>Cells &amp; tissues</w:t></w:r></w:p>
            <w:p><w:r><w:t xml:space="preserve">Part </w:t><w:tab/><w:t>two</w:t></w:r></w:p>
            <w:p/>
        </w:body></w:document>"#;
        let paragraphs = read_paragraphs(xml).unwrap();
        assert_eq!(paragraphs, vec!["Cells & tissues", "Part \ttwo"]);
    }

    #[test]
    fn test_text_outside_t_is_ignored() {
        let xml = br#"<a:p xmlns:a="a"><a:rPr lang="en"/>noise<a:t>kept</a:t></a:p>"#;
        assert_eq!(read_paragraphs(xml).unwrap(), vec!["kept"]);
    }

    #[test]
    fn test_notes_target_found() {
        let rels = br#"<Relationships>
            <Relationship Id="rId1" Type="http://x/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>
            <Relationship Id="rId2" Type="http://x/notesSlide" Target="../notesSlides/notesSlide3.xml"/>
        </Relationships>"#;
        assert_eq!(
            notes_target(rels).unwrap().as_deref(),
            Some("../notesSlides/notesSlide3.xml")
        );
    }

    #[test]
    fn test_invalid_archive_is_unreadable() {
        let result = docx_text("broken.docx", b"not a zip");
        assert!(matches!(result, Err(IngestError::Unreadable { .. })));
    }
}

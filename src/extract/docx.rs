//! DOCX text extraction from the `word/document.xml` part.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::ExtractionError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Join top-level body paragraphs with newlines.
///
/// Paragraphs nested in tables are skipped, as is text-box content
/// anchored inside a paragraph.
pub(super) fn extract_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ExtractionError::Docx(e.to_string()))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Docx(format!("{}: {}", DOCUMENT_PART, e)))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Docx(e.to_string()))?;

    Ok(collect_paragraphs(&xml)?.join("\n"))
}

fn collect_paragraphs(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut table_depth = 0usize;
    let mut text_box_depth = 0usize;
    let mut in_text = false;

    loop {
        let nested = table_depth > 0 || text_box_depth > 0;
        match reader.read_event_into(&mut buf) {
            Err(e) => {
                return Err(ExtractionError::Docx(format!("XML parsing error: {}", e)));
            }
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:tbl" => table_depth += 1,
                b"w:txbxContent" => text_box_depth += 1,
                b"w:p" if !nested => current = Some(String::new()),
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                b"w:txbxContent" => text_box_depth = text_box_depth.saturating_sub(1),
                b"w:p" if !nested => {
                    if let Some(paragraph) = current.take() {
                        paragraphs.push(paragraph);
                    }
                }
                b"w:t" => in_text = false,
                _ => {}
            },
            Ok(Event::Empty(ref e)) if !nested => match e.name().as_ref() {
                b"w:p" => paragraphs.push(String::new()),
                b"w:tab" => push_to(&mut current, "\t"),
                b"w:br" | b"w:cr" => push_to(&mut current, "\n"),
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_text && !nested => {
                let text = e
                    .unescape()
                    .map_err(|e| ExtractionError::Docx(format!("XML text error: {}", e)))?;
                push_to(&mut current, &text);
            }
            Ok(Event::Eof) => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

fn push_to(current: &mut Option<String>, text: &str) {
    if let Some(paragraph) = current.as_mut() {
        paragraph.push_str(text);
    }
}

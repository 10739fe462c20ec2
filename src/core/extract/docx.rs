//! Word-processing container (docx) extractor.
//!
//! A docx file is a zip archive whose main body lives in
//! `word/document.xml`. Text runs (`w:t`) are concatenated in
//! document order; each paragraph ends with a newline, tabs and
//! breaks are kept as whitespace. A body that turns malformed
//! partway through yields the text read up to that point.

use super::TextExtractor;
use crate::core::error::{DocsiftError, Result};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extracts paragraph text from docx containers
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let file = File::open(path).map_err(|e| {
            DocsiftError::ExtractionFailed(format!("Failed to open {path:?}: {e}"))
        })?;

        let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|e| {
            DocsiftError::ExtractionFailed(format!("Malformed docx container {path:?}: {e}"))
        })?;

        let part = archive.by_name(DOCUMENT_PART).map_err(|e| {
            DocsiftError::ExtractionFailed(format!("Missing {DOCUMENT_PART} in {path:?}: {e}"))
        })?;

        match paragraphs_text(BufReader::new(part)) {
            (text, None) => Ok(text),
            (text, Some(e)) if !text.trim().is_empty() => {
                tracing::warn!("Partial text from {:?}, body is malformed: {}", path, e);
                Ok(text)
            }
            (_, Some(e)) => Err(DocsiftError::ExtractionFailed(format!(
                "Malformed document body in {path:?}: {e}"
            ))),
        }
    }
}

/// Collect run text from a WordprocessingML body
///
/// Returns the text read so far together with the error that
/// stopped parsing, if any.
fn paragraphs_text<R: std::io::BufRead>(source: R) -> (String, Option<String>) {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_run_text = true;
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_run_text => match t.unescape() {
                Ok(unescaped) => text.push_str(&unescaped),
                Err(e) => return (text, Some(e.to_string())),
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                let error = format!("XML error at position {}: {e}", reader.buffer_position());
                return (text, Some(error));
            }
            _ => {}
        }
        buf.clear();
    }

    (text, None)
}

use crate::error::ParseError;
use crate::reader::{FileKind, TextExtractor};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read, Seek};
use zip::ZipArchive;

const DEFAULT_DOCUMENT_PART: &str = "word/document.xml";
const PACKAGE_RELS: &str = "_rels/.rels";
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";

/// Pulls paragraph text out of a DOCX archive, ignoring all formatting.
///
/// Every `w:t` inside a paragraph counts, whatever wraps it: tracked
/// insertions, content controls, hyperlinks, smart tags. Deleted text lives in
/// `w:delText` and is skipped.
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ParseError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(extraction_failed)?;
        let part = main_document_part(&mut archive)?;
        let xml = read_part(&mut archive, &part)?;
        let paragraphs = document_paragraphs(&xml)?;

        // Double break so the segmenter sees paragraph boundaries as blank lines
        Ok(paragraphs.join("\n\n"))
    }
}

fn extraction_failed(err: impl std::fmt::Display) -> ParseError {
    ParseError::ExtractionFailed {
        kind: FileKind::Docx,
        cause: err.to_string(),
    }
}

fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<String, ParseError> {
    let mut file = archive
        .by_name(name)
        .map_err(|e| extraction_failed(format!("cannot find {}: {}", name, e)))?;

    let mut xml = String::new();
    file.read_to_string(&mut xml).map_err(extraction_failed)?;
    Ok(xml)
}

/// Follow the package relationships to the main document, falling back to
/// the conventional `word/document.xml`.
fn main_document_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<String, ParseError> {
    if archive.index_for_name(PACKAGE_RELS).is_none() {
        return Ok(DEFAULT_DOCUMENT_PART.to_string());
    }

    let rels = read_part(archive, PACKAGE_RELS)?;
    let mut reader = Reader::from_str(&rels);

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e))
                if e.name().as_ref() == b"Relationship" =>
            {
                let mut rel_type = None;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    let value = attr.unescape_value().map_err(extraction_failed)?.into_owned();
                    match attr.key.as_ref() {
                        b"Type" => rel_type = Some(value),
                        b"Target" => target = Some(value),
                        _ => {}
                    }
                }
                if let (Some(rel_type), Some(target)) = (rel_type, target) {
                    if rel_type.ends_with(OFFICE_DOCUMENT_REL) {
                        return Ok(target.trim_start_matches('/').to_string());
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(extraction_failed(format!("invalid {}: {}", PACKAGE_RELS, e)));
            }
            _ => {}
        }
    }

    Ok(DEFAULT_DOCUMENT_PART.to_string())
}

/// Text of every paragraph in document order, one entry per `</w:p>`.
/// Paragraphs without text stay as "" to keep blank-line spacing.
fn document_paragraphs(xml: &str) -> Result<Vec<String>, ParseError> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:p" => {
                paragraphs.push(std::mem::take(&mut current));
            }
            Ok(Event::Text(e)) if in_text => {
                let text = e.unescape().map_err(extraction_failed)?;
                current.push_str(&text);
            }
            Ok(Event::CData(e)) if in_text => {
                current.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(extraction_failed(format!(
                    "XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(paragraphs: &str) -> String {
        format!(
            concat!(
                r#"<w:document "#,
                r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
                "<w:body>{}<w:sectPr/></w:body></w:document>"
            ),
            paragraphs
        )
    }

    #[test]
    fn collects_text_from_every_run_wrapper() {
        let xml = body(concat!(
            r#"<w:p><w:r><w:t xml:space="preserve">Start </w:t></w:r>"#,
            r#"<w:ins w:id="1" w:author="Ed"><w:r><w:t>INSERTED </w:t></w:r></w:ins>"#,
            "<w:sdt><w:sdtContent><w:r><w:t>SDTRUN </w:t></w:r></w:sdtContent></w:sdt>",
            r#"<w:hyperlink r:id="rId5">"#,
            "<w:r><w:t>LINK1 </w:t></w:r><w:r><w:t>LINK2</w:t></w:r>",
            "</w:hyperlink>",
            r#"<w:smartTag w:element="place">"#,
            r#"<w:r><w:t xml:space="preserve"> SMART</w:t></w:r>"#,
            "</w:smartTag>",
            r#"<w:r><w:t xml:space="preserve"> end</w:t></w:r></w:p>"#,
        ));
        let paragraphs = document_paragraphs(&xml).unwrap();
        assert_eq!(paragraphs, vec!["Start INSERTED SDTRUN LINK1 LINK2 SMART end"]);
    }

    #[test]
    fn deleted_text_and_markup_are_ignored() {
        let xml = body(concat!(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr>"#,
            r#"<w:del w:id="2"><w:r><w:delText>gone</w:delText></w:r></w:del>"#,
            r#"<w:r><w:rPr><w:i/></w:rPr><w:t>kept</w:t></w:r><w:r><w:tab/></w:r></w:p>"#,
        ));
        assert_eq!(document_paragraphs(&xml).unwrap(), vec!["kept"]);
    }

    #[test]
    fn empty_paragraphs_are_preserved() {
        let xml = body(concat!(
            "<w:p><w:r><w:t>one</w:t></w:r></w:p>",
            "<w:p/><w:p></w:p>",
            "<w:p><w:r><w:t>two</w:t></w:r></w:p>",
        ));
        assert_eq!(document_paragraphs(&xml).unwrap(), vec!["one", "", "", "two"]);
    }

    #[test]
    fn table_cell_paragraphs_are_included() {
        let xml = body(concat!(
            "<w:tbl><w:tr><w:tc>",
            "<w:p><w:r><w:t>cell</w:t></w:r></w:p>",
            "</w:tc></w:tr></w:tbl>",
        ));
        assert_eq!(document_paragraphs(&xml).unwrap(), vec!["cell"]);
    }

    #[test]
    fn malformed_xml_fails() {
        let err = document_paragraphs("<w:document><w:p><w:t>open</w:p>").unwrap_err();
        assert!(matches!(err, ParseError::ExtractionFailed { .. }));
    }

    #[test]
    fn rejects_non_zip_buffer() {
        let err = DocxExtractor.extract(b"plain words, not an archive").unwrap_err();
        assert!(matches!(
            err,
            ParseError::ExtractionFailed {
                kind: FileKind::Docx,
                ..
            }
        ));
    }
}

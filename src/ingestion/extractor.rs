//! PDF text extraction with per-page cleaning

use regex::Regex;

use crate::error::{Error, Result};
use crate::types::PageText;

/// Extracts cleaned per-page text from raw PDF bytes.
///
/// Pages with no extractable text (scanned images, blank pages) are skipped
/// rather than emitted as empty entries. A payload that cannot be parsed as
/// a PDF at all yields [`Error::Extraction`]; callers treat that as a
/// document-level processing failure, not a fatal one.
#[derive(Clone)]
pub struct PdfExtractor {
    whitespace: Regex,
}

impl PdfExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self {
            whitespace: Regex::new(r"\s+").expect("static whitespace pattern"),
        }
    }

    /// Extract an ordered sequence of (page number, text) pairs
    pub fn extract(&self, data: &[u8]) -> Result<Vec<PageText>> {
        let raw_pages = pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| Error::Extraction(format!("Failed to parse PDF: {}", e)))?;

        let mut pages = Vec::new();
        for (index, raw) in raw_pages.iter().enumerate() {
            let text = self.clean(raw);
            if text.is_empty() {
                continue;
            }
            pages.push(PageText {
                page: index as u32 + 1,
                text,
            });
        }

        Ok(pages)
    }

    /// Normalize whitespace runs to single spaces, strip non-breaking
    /// spaces, trim.
    fn clean(&self, raw: &str) -> String {
        let no_nbsp = raw.replace('\u{00A0}', " ");
        self.whitespace.replace_all(&no_nbsp, " ").trim().to_string()
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// Build a minimal PDF where each entry is a page; `None` means a page
    /// with no text content.
    fn build_pdf(page_texts: &[Option<&str>]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in page_texts {
            let operations = match text {
                Some(text) => vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
                None => vec![],
            };
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("encode content stream"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).expect("serialize PDF");
        buffer
    }

    #[test]
    fn cleans_whitespace_runs_and_nbsp() {
        let extractor = PdfExtractor::new();
        let cleaned = extractor.clean("  hello\u{00A0}\u{00A0}world \n\t again  ");
        assert_eq!(cleaned, "hello world again");
    }

    #[test]
    fn empty_input_stays_empty() {
        let extractor = PdfExtractor::new();
        assert_eq!(extractor.clean("  \u{00A0} \n "), "");
    }

    #[test]
    fn unparseable_payload_is_an_extraction_error() {
        let extractor = PdfExtractor::new();
        let err = extractor.extract(b"this is not a pdf").unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[test]
    fn skips_pages_without_text() {
        let data = build_pdf(&[Some("First page"), None, Some("Third page")]);
        let extractor = PdfExtractor::new();
        let pages = extractor.extract(&data).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page, 1);
        assert!(pages[0].text.contains("First page"));
        assert_eq!(pages[1].page, 3);
        assert!(pages[1].text.contains("Third page"));
    }
}

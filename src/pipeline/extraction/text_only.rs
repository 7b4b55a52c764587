//! Plain-text input: a UTF-8 export of the scan report.
//!
//! Form feeds (`\x0c`) separate pages, as `pdftotext` writes them.

use super::types::{DocumentText, ExtractionMethod, PageTextSource};
use super::SourceError;

const PAGE_BREAK: char = '\x0c';

pub struct PlainTextSource;

impl PageTextSource for PlainTextSource {
    fn page_texts(&self, bytes: &[u8]) -> Result<DocumentText, SourceError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| SourceError::EncodingError(e.to_string()))?;

        let pages = text
            .split(PAGE_BREAK)
            .map(|p| p.replace("\r\n", "\n"))
            .collect();

        Ok(DocumentText {
            method: ExtractionMethod::PlainTextRead,
            pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_page_without_form_feed() {
        let doc = PlainTextSource.page_texts(b"Zinc Zn 21,4").unwrap();
        assert_eq!(doc.method, ExtractionMethod::PlainTextRead);
        assert_eq!(doc.pages, vec!["Zinc Zn 21,4".to_string()]);
    }

    #[test]
    fn form_feed_splits_pages() {
        let doc = PlainTextSource.page_texts(b"page one\x0cpage two\x0cpage three").unwrap();
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.pages[2], "page three");
    }

    #[test]
    fn crlf_normalized() {
        let doc = PlainTextSource.page_texts(b"Zinc Zn 21,4\r\nLead Pb 0,001").unwrap();
        assert_eq!(doc.pages[0], "Zinc Zn 21,4\nLead Pb 0,001");
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let result = PlainTextSource.page_texts(&[0x5A, 0xFF, 0xFE]);
        assert!(matches!(result, Err(SourceError::EncodingError(_))));
    }
}

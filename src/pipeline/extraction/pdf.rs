use super::types::{DocumentText, ExtractionMethod, PageTextSource};
use super::SourceError;

/// PDF text source using the pdf-extract crate.
/// Handles digital scan reports with an embedded text layer.
pub struct PdfTextSource;

impl PageTextSource for PdfTextSource {
    fn page_texts(&self, bytes: &[u8]) -> Result<DocumentText, SourceError> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| SourceError::PdfParsing(e.to_string()))?;

        let empty = pages.iter().filter(|p| p.trim().is_empty()).count();
        if empty > 0 {
            tracing::warn!(
                pages = pages.len(),
                empty_pages = empty,
                "PDF pages without a text layer; values on them will read as zero"
            );
        }

        Ok(DocumentText {
            method: ExtractionMethod::PdfDirect,
            pages,
        })
    }
}

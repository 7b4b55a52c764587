use serde::Serialize;

use super::SourceError;

/// How page texts were obtained.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    PdfDirect,
    PlainTextRead,
}

/// Ordered page texts of one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentText {
    pub method: ExtractionMethod,
    pub pages: Vec<String>,
}

impl DocumentText {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All pages in order, joined with a newline.
    pub fn full_text(&self) -> String {
        join_pages(&self.pages)
    }
}

/// Join page texts with a newline, preserving page order.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut full = String::new();
    for page in pages {
        full.push_str(page.as_ref());
        full.push('\n');
    }
    full
}

/// Document-to-text abstraction (allows mocking for tests).
pub trait PageTextSource {
    fn page_texts(&self, bytes: &[u8]) -> Result<DocumentText, SourceError>;
}

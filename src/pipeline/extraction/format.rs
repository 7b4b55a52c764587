use std::path::Path;

use serde::Serialize;

use super::pdf::PdfTextSource;
use super::text_only::PlainTextSource;
use super::types::{DocumentText, PageTextSource};
use super::SourceError;

/// Broad input categories we handle.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    Pdf,
    PlainText,
    Unsupported,
}

impl InputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::PlainText => "plain_text",
            Self::Unsupported => "unsupported",
        }
    }
}

const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024; // 50MB

/// Detect format from magic bytes, not the file extension.
pub fn detect_format(bytes: &[u8]) -> InputFormat {
    match bytes {
        // PDF: starts with %PDF
        [0x25, 0x50, 0x44, 0x46, ..] => InputFormat::Pdf,
        _ if is_likely_text(bytes) => InputFormat::PlainText,
        _ => InputFormat::Unsupported,
    }
}

/// UTF-8 on the first chunk and no NUL bytes.
fn is_likely_text(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(8192)];
    if head.contains(&0) {
        return false;
    }
    match std::str::from_utf8(head) {
        Ok(_) => true,
        // A multi-byte char cut at the chunk boundary is still text.
        Err(e) => e.error_len().is_none(),
    }
}

/// Read a document from disk and hand it to the matching page source.
pub fn read_document(path: &Path) -> Result<DocumentText, SourceError> {
    let size = std::fs::metadata(path)?.len();
    if size > MAX_FILE_SIZE {
        return Err(SourceError::TooLarge(size));
    }

    let bytes = std::fs::read(path)?;
    let format = detect_format(&bytes);

    tracing::info!(
        path = %path.display(),
        format = format.as_str(),
        size_bytes = size,
        "Reading scan document"
    );

    match format {
        InputFormat::Pdf => PdfTextSource.page_texts(&bytes),
        InputFormat::PlainText => PlainTextSource.page_texts(&bytes),
        InputFormat::Unsupported => Err(SourceError::UnsupportedFormat(
            path.display().to_string(),
        )),
    }
}

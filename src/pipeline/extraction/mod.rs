pub mod types;
pub mod format;
pub mod pdf;
pub mod text_only;
pub mod extractor;

pub use types::*;
pub use format::*;
pub use pdf::*;
pub use text_only::*;
pub use extractor::*;

use thiserror::Error;

/// Failures turning a document into page texts. Extraction of analyte values
/// from text never fails; only the document adapters can.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("Text encoding error: {0}")]
    EncodingError(String),

    #[error("Unsupported format for extraction: {0}")]
    UnsupportedFormat(String),

    #[error("File too large: {0} bytes")]
    TooLarge(u64),
}

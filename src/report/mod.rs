//! Report rendering and export.
//!
//! Renderers receive a fully computed `PipelineReport` and only format it.
//! PDF output goes through `printpdf`; text and JSON are for the terminal
//! and for downstream tooling.

pub mod sanitize;
pub mod view;
pub mod pdf;
pub mod text;

pub use pdf::PdfReportRenderer;
pub use text::TextReportRenderer;
pub use view::ReportView;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::pipeline::PipelineReport;
use crate::registry::AnalyteRegistry;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("Cannot write report to {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Report serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Output formatter for a processed scan.
pub trait ReportRenderer {
    fn render(
        &self,
        registry: &AnalyteRegistry,
        report: &PipelineReport,
    ) -> Result<Vec<u8>, ReportError>;

    /// File extension for exported output, without the dot.
    fn extension(&self) -> &'static str;
}

/// Full report as pretty-printed JSON.
pub struct JsonReportRenderer;

impl ReportRenderer for JsonReportRenderer {
    fn render(
        &self,
        _registry: &AnalyteRegistry,
        report: &PipelineReport,
    ) -> Result<Vec<u8>, ReportError> {
        let mut bytes = serde_json::to_vec_pretty(report)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

/// `"<patient>_Adjusted_OligoScan.<ext>"`, with the name made filesystem-safe.
pub fn default_filename(patient_name: &str, extension: &str) -> String {
    format!(
        "{}_Adjusted_OligoScan.{extension}",
        sanitize::filename_stem(patient_name)
    )
}

/// Write report bytes into `dir`, creating it when needed.
pub fn export_report_to_file(
    bytes: &[u8],
    filename: &str,
    dir: &Path,
) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(dir).map_err(|e| ReportError::Io {
        path: dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let path = dir.join(filename);
    std::fs::write(&path, bytes).map_err(|e| ReportError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    tracing::info!(path = %path.display(), size_bytes = bytes.len(), "Report exported");
    Ok(path)
}

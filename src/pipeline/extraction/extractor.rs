//! Analyte value extraction from report text.
//!
//! Each registry pattern is searched once, case-insensitively, against the
//! whole document. The first hit wins. A miss or an unparseable capture is
//! recorded as 0.0; extraction never fails.

use crate::models::{AnalyteDefinition, RawRecord};
use crate::registry::AnalyteRegistry;

/// Outcome of reading a single analyte.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueRead {
    Found(f64),
    NotFound,
    Unparseable,
}

impl ValueRead {
    pub fn value(&self) -> f64 {
        match self {
            Self::Found(v) => *v,
            Self::NotFound | Self::Unparseable => 0.0,
        }
    }
}

/// Parse a captured number, accepting `,` as the decimal separator.
pub fn parse_decimal(captured: &str) -> Option<f64> {
    let normalized = captured.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Locate and parse one analyte in `text`.
pub fn read_value(definition: &AnalyteDefinition, text: &str) -> ValueRead {
    match definition.pattern.find(text) {
        None => ValueRead::NotFound,
        Some(captured) => match parse_decimal(captured) {
            Some(v) => ValueRead::Found(v),
            None => ValueRead::Unparseable,
        },
    }
}

/// Build a complete RawRecord from document text.
pub fn extract(registry: &AnalyteRegistry, document_text: &str) -> RawRecord {
    let mut record = RawRecord::zeroed(registry);
    let mut found = 0usize;

    for definition in registry.iter() {
        let read = read_value(definition, document_text);
        match read {
            ValueRead::Found(_) => found += 1,
            ValueRead::NotFound => {
                tracing::debug!(analyte = %definition.name, "No match in document text");
            }
            ValueRead::Unparseable => {
                tracing::debug!(analyte = %definition.name, "Matched text is not a number");
            }
        }
        record.insert(definition.name.clone(), read.value());
    }

    tracing::info!(
        analytes = registry.len(),
        found,
        missing = registry.len() - found,
        text_chars = document_text.len(),
        "Extraction complete"
    );

    record
}

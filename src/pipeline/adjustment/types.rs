use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{AdjustedRecord, Classification, MetalStatus};

use super::detox::DetoxAssessment;
use super::ratios::Ratio;

// ---------------------------------------------------------------------------
// SkinCategory
// ---------------------------------------------------------------------------

/// Fitzpatrick band of the scanned skin. Drives the optical correction.
///
/// Any label outside the three bands is kept as `Other` and treated as
/// neutral rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinCategory {
    /// Fitzpatrick I-II.
    Pale,
    /// Fitzpatrick III-IV.
    Medium,
    /// Fitzpatrick V-VI.
    Dark,
    Other(String),
}

impl SkinCategory {
    /// Lenient parse: `pale`, `I-II`, `I-II (Pale)` and similar all map to
    /// the same band.
    pub fn from_label(label: &str) -> Self {
        let lower = label.trim().to_lowercase();
        let band = lower
            .split(|c: char| c == '(' || c == ')' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .find_map(|token| match token {
                "pale" | "i-ii" | "i/ii" | "1-2" => Some(Self::Pale),
                "medium" | "iii-iv" | "iii/iv" | "3-4" => Some(Self::Medium),
                "dark" | "v-vi" | "v/vi" | "5-6" => Some(Self::Dark),
                _ => None,
            });
        band.unwrap_or_else(|| Self::Other(label.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pale => "I-II (Pale)",
            Self::Medium => "III-IV (Medium)",
            Self::Dark => "V-VI (Dark)",
            Self::Other(label) => label,
        }
    }

    pub fn is_pale(&self) -> bool {
        matches!(self, Self::Pale)
    }
}

impl std::fmt::Display for SkinCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AdjustmentContext
// ---------------------------------------------------------------------------

/// Per-run inputs. The patient name is carried for display only.
#[derive(Debug, Clone, Serialize)]
pub struct AdjustmentContext {
    pub skin: SkinCategory,
    pub patient_name: String,
}

impl AdjustmentContext {
    pub fn new(skin: SkinCategory, patient_name: impl Into<String>) -> Self {
        Self {
            skin,
            patient_name: patient_name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AdjustmentOutcome
// ---------------------------------------------------------------------------

/// Everything the engine derives from one raw record. Fully computed before
/// it is handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustmentOutcome {
    pub adjusted: AdjustedRecord,
    pub classifications: BTreeMap<String, Classification>,
    pub ratios: Vec<Ratio>,
    /// Ordered: blockage flags, optical notes, ratio inferences.
    pub flags: Vec<String>,
    pub detox: DetoxAssessment,
    pub metal_statuses: BTreeMap<String, MetalStatus>,
    pub optical_factor: f64,
}

impl AdjustmentOutcome {
    pub fn ratio(&self, name: &str) -> Option<&Ratio> {
        self.ratios.iter().find(|r| r.name == name)
    }

    pub fn classification(&self, analyte: &str) -> Option<Classification> {
        self.classifications.get(analyte).copied()
    }
}

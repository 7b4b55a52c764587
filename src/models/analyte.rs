use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::enums::{Compartment, LabelGap};

/// Analyte keys the adjustment rules address directly.
pub const SULFUR: &str = "Sulfur";
pub const MAGNESIUM: &str = "Magnesium";
pub const ZINC: &str = "Zinc";
pub const CALCIUM: &str = "Calcium";
pub const SODIUM: &str = "Sodium";
pub const POTASSIUM: &str = "Potassium";
pub const COPPER: &str = "Copper";
pub const VIT_B6: &str = "Vit_B6";
pub const VIT_B12: &str = "Vit_B12";

/// Numeric capture: integer part plus an optional fraction after `.` or `,`.
const NUMBER_CAPTURE: &str = r"(\d+(?:[.,]\d+)?)";

/// Whitespace and an optional colon, never a line break.
const PLAIN_GAP: &str = r"[^\S\n]*:?[^\S\n]*";

/// Plain gap plus an optional one- or two-letter symbol such as `Pb` or `(S)`.
/// Running words never fit, so prose that mentions an analyte is not read.
const SYMBOL_GAP: &str = r"[^\S\n]*:?[^\S\n]*(?:\(?[a-z]{1,2}\)?[^\S\n]*:?[^\S\n]*)?";

/// Symbol gap plus an optional short parenthetical without digits, as in
/// `Vitamin B9 (Folate)`.
const ANNOTATED_GAP: &str =
    r"[^\S\n]*:?[^\S\n]*(?:\(?[a-z]{1,2}\)?[^\S\n]*:?[^\S\n]*)?(?:\([^()\d\n]{1,24}\)[^\S\n]*)?";

const PERCENT_SUFFIX: &str = r"[^\S\n]*%";

/// One row of the analyte table as it is stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyteRow {
    pub name: String,
    pub compartment: Compartment,
    /// Case-insensitive regex fragment for the printed label.
    pub label: String,
    /// What may sit between label and value.
    #[serde(default)]
    pub gap: LabelGap,
    #[serde(default)]
    pub percent: bool,
    pub unit: String,
    #[serde(default)]
    pub reference_min: Option<f64>,
    #[serde(default)]
    pub reference_max: Option<f64>,
}

/// Compiled text-search rule for one analyte.
#[derive(Debug, Clone)]
pub struct AnalytePattern {
    percent: bool,
    regex: Regex,
}

impl AnalytePattern {
    pub fn compile(label: &str, gap: LabelGap, percent: bool) -> Result<Self, regex::Error> {
        let gap = match gap {
            LabelGap::Plain => PLAIN_GAP,
            LabelGap::Symbol => SYMBOL_GAP,
            LabelGap::Annotated => ANNOTATED_GAP,
        };
        let suffix = if percent { PERCENT_SUFFIX } else { "" };
        let source = format!(r"\b(?:{label})\b{gap}{NUMBER_CAPTURE}{suffix}");
        let regex = RegexBuilder::new(&source).case_insensitive(true).build()?;
        Ok(Self { percent, regex })
    }

    /// First captured number in `text`, as printed (separator not yet normalized).
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    pub fn percent(&self) -> bool {
        self.percent
    }
}

/// Reference interval used only for classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub min: f64,
    pub max: f64,
}

/// Immutable description of one analyte: where to find it and how to treat it.
#[derive(Debug, Clone)]
pub struct AnalyteDefinition {
    pub name: String,
    pub compartment: Compartment,
    pub pattern: AnalytePattern,
    pub unit: String,
    pub reference: Option<ReferenceRange>,
}

impl AnalyteDefinition {
    pub fn is_percent(&self) -> bool {
        self.pattern.percent()
    }
}

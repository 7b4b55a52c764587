use std::collections::BTreeMap;

use crate::models::{AdjustedRecord, Classification};
use crate::registry::AnalyteRegistry;

/// Seven-band position of `value` against `[min, max]`.
pub fn classify(value: f64, min: f64, max: f64) -> Classification {
    if value <= 0.0 {
        return Classification::NotAvailable;
    }

    let third = (max - min) / 3.0;

    if value < min * 0.9 {
        Classification::VeryLow
    } else if value < min {
        Classification::Low
    } else if value < min + third {
        Classification::LowerEndNormal
    } else if value < min + 2.0 * third {
        Classification::Normal
    } else if value <= max {
        Classification::HighEndNormal
    } else if value < max * 1.1 {
        Classification::High
    } else {
        Classification::VeryHigh
    }
}

/// Classify every adjusted value whose analyte carries reference bounds.
pub fn classify_record(
    registry: &AnalyteRegistry,
    adjusted: &AdjustedRecord,
) -> BTreeMap<String, Classification> {
    registry
        .iter()
        .filter_map(|def| {
            def.reference.map(|range| {
                (
                    def.name.clone(),
                    classify(adjusted.get(&def.name), range.min, range.max),
                )
            })
        })
        .collect()
}

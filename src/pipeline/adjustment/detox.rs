use serde::Serialize;

use crate::models::{RawRecord, SULFUR, VIT_B12, VIT_B6};

use super::rules::AdjustmentRules;

const STATUS_OPTIMAL: &str = "OPTIMAL";
const STATUS_BLOCKED: &str = "BLOCKED (False Negatives Likely)";

/// Detox blockage precondition, computed once per record.
///
/// Sulfur reads 0.0 when missing. B6 and B12 read the missing-vitamin
/// default only when the key is absent; an extracted 0.0 counts as deficient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetoxAssessment {
    pub blocked: bool,
    pub sulfur_blockage: bool,
    pub methylation_failure: bool,
    pub sulfur: f64,
    pub vit_b6: f64,
    pub vit_b12: f64,
}

impl DetoxAssessment {
    pub fn evaluate(raw: &RawRecord, rules: &AdjustmentRules) -> Self {
        let sulfur = raw.get(SULFUR);
        let vit_b6 = raw.value(VIT_B6).unwrap_or(rules.missing_vitamin_default);
        let vit_b12 = raw.value(VIT_B12).unwrap_or(rules.missing_vitamin_default);

        let sulfur_blockage = sulfur < rules.sulfur_blockage_threshold;
        let methylation_failure =
            vit_b6 < rules.methylation_threshold || vit_b12 < rules.methylation_threshold;

        Self {
            blocked: sulfur_blockage || methylation_failure,
            sulfur_blockage,
            methylation_failure,
            sulfur,
            vit_b6,
            vit_b12,
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.blocked {
            STATUS_BLOCKED
        } else {
            STATUS_OPTIMAL
        }
    }

    /// Standing flags raised when detox is blocked; empty otherwise.
    pub fn flags(&self) -> Vec<String> {
        if !self.blocked {
            return Vec::new();
        }
        vec![
            format!(
                "CRITICAL: Detox is blocked (Sulfur: {}, B6: {}%, B12: {}%).",
                self.sulfur, self.vit_b6, self.vit_b12
            ),
            "Warning: 'Normal' heavy metal readings are likely FALSE NEGATIVES due to retention."
                .to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sulfur: f64, b6: f64, b12: f64) -> RawRecord {
        RawRecord::new()
            .with(SULFUR, sulfur)
            .with(VIT_B6, b6)
            .with(VIT_B12, b12)
    }

    #[test]
    fn low_sulfur_blocks() {
        let d = DetoxAssessment::evaluate(&record(40.0, 100.0, 100.0), &AdjustmentRules::default());
        assert!(d.blocked);
        assert!(d.sulfur_blockage);
        assert!(!d.methylation_failure);
    }

    #[test]
    fn sulfur_threshold_is_exclusive() {
        let rules = AdjustmentRules::default();
        assert!(!DetoxAssessment::evaluate(&record(48.1, 100.0, 100.0), &rules).blocked);
        assert!(DetoxAssessment::evaluate(&record(48.09, 100.0, 100.0), &rules).blocked);
    }

    #[test]
    fn low_b6_or_b12_blocks() {
        let rules = AdjustmentRules::default();
        let b6 = DetoxAssessment::evaluate(&record(50.0, 59.0, 100.0), &rules);
        assert!(b6.blocked && b6.methylation_failure);
        let b12 = DetoxAssessment::evaluate(&record(50.0, 100.0, 59.9), &rules);
        assert!(b12.blocked && b12.methylation_failure);
        let edge = DetoxAssessment::evaluate(&record(50.0, 60.0, 60.0), &rules);
        assert!(!edge.blocked);
    }

    #[test]
    fn absent_vitamins_read_as_sufficient() {
        let raw = RawRecord::new().with(SULFUR, 50.0);
        let d = DetoxAssessment::evaluate(&raw, &AdjustmentRules::default());
        assert_eq!(d.vit_b6, 100.0);
        assert_eq!(d.vit_b12, 100.0);
        assert!(!d.blocked);
    }

    #[test]
    fn extracted_zero_vitamin_is_deficient() {
        let d = DetoxAssessment::evaluate(&record(50.0, 0.0, 100.0), &AdjustmentRules::default());
        assert!(d.blocked);
    }

    #[test]
    fn missing_sulfur_reads_zero_and_blocks() {
        let raw = RawRecord::new().with(VIT_B6, 100.0).with(VIT_B12, 100.0);
        let d = DetoxAssessment::evaluate(&raw, &AdjustmentRules::default());
        assert_eq!(d.sulfur, 0.0);
        assert!(d.blocked);
    }

    #[test]
    fn flags_only_when_blocked() {
        let rules = AdjustmentRules::default();
        let ok = DetoxAssessment::evaluate(&record(50.0, 100.0, 100.0), &rules);
        assert!(ok.flags().is_empty());
        assert_eq!(ok.status_label(), "OPTIMAL");

        let blocked = DetoxAssessment::evaluate(&record(40.0, 72.0, 58.0), &rules);
        let flags = blocked.flags();
        assert_eq!(flags.len(), 2);
        assert_eq!(flags[0], "CRITICAL: Detox is blocked (Sulfur: 40, B6: 72%, B12: 58%).");
        assert!(flags[1].contains("FALSE NEGATIVES"));
        assert_eq!(blocked.status_label(), "BLOCKED (False Negatives Likely)");
    }
}

//! Derived mineral ratios and the inferences drawn from them.
//!
//! Ratios are computed from adjusted values only, never from raw readings.

use serde::Serialize;

use crate::models::{round_to, AdjustedRecord, CALCIUM, COPPER, MAGNESIUM, POTASSIUM, SODIUM, ZINC};

use super::rules::{AdjustmentRules, RatioThresholds};

pub const CA_MG: &str = "Ca/Mg";
pub const NA_K: &str = "Na/K";
pub const ZN_CU: &str = "Zn/Cu";

/// Numerator and denominator analytes of one ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatioDefinition {
    pub name: &'static str,
    pub numerator: &'static str,
    pub denominator: &'static str,
}

pub const STANDARD_RATIOS: &[RatioDefinition] = &[
    RatioDefinition {
        name: CA_MG,
        numerator: CALCIUM,
        denominator: MAGNESIUM,
    },
    RatioDefinition {
        name: NA_K,
        numerator: SODIUM,
        denominator: POTASSIUM,
    },
    RatioDefinition {
        name: ZN_CU,
        numerator: ZINC,
        denominator: COPPER,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ratio {
    pub name: String,
    pub numerator: String,
    pub denominator: String,
    pub value: f64,
}

/// `numerator / denominator` rounded to `decimals`, 0 when the denominator
/// is zero or absent.
pub fn compute_ratio(definition: &RatioDefinition, adjusted: &AdjustedRecord, decimals: u32) -> Ratio {
    let numerator = adjusted.get(definition.numerator);
    let denominator = adjusted.get(definition.denominator);
    let value = if denominator == 0.0 {
        0.0
    } else {
        round_to(numerator / denominator, decimals)
    };

    Ratio {
        name: definition.name.to_string(),
        numerator: definition.numerator.to_string(),
        denominator: definition.denominator.to_string(),
        value,
    }
}

pub fn compute_ratios(
    definitions: &[RatioDefinition],
    adjusted: &AdjustedRecord,
    rules: &AdjustmentRules,
) -> Vec<Ratio> {
    definitions
        .iter()
        .map(|d| compute_ratio(d, adjusted, rules.ratio_decimals))
        .collect()
}

/// Threshold inferences, in ratio order. Ca/Mg raises at most one flag.
pub fn infer_from_ratios(ratios: &[Ratio], thresholds: &RatioThresholds) -> Vec<String> {
    let mut flags = Vec::new();

    for ratio in ratios {
        let v = ratio.value;
        match ratio.name.as_str() {
            CA_MG => {
                if v > thresholds.ca_mg_high {
                    flags.push(format!(
                        "Ca/Mg ratio {v} is above {}: sympathetic dominance signal (fast oxidation, stress-driven metabolism).",
                        thresholds.ca_mg_high
                    ));
                } else if v < thresholds.ca_mg_low {
                    flags.push(format!(
                        "Ca/Mg ratio {v} is below {}: parasympathetic slump signal (slow oxidation, low energy).",
                        thresholds.ca_mg_low
                    ));
                }
            }
            NA_K => {
                if v < thresholds.na_k_low {
                    flags.push(format!(
                        "Na/K ratio {v} is below {}: adrenal stress signal.",
                        thresholds.na_k_low
                    ));
                }
            }
            ZN_CU => {
                if v < thresholds.zn_cu_low {
                    flags.push(format!(
                        "Zn/Cu ratio {v} is below {}: immune vulnerability signal.",
                        thresholds.zn_cu_low
                    ));
                }
            }
            _ => {}
        }
    }

    flags
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn adjusted(pairs: &[(&str, f64)]) -> AdjustedRecord {
        let values: BTreeMap<String, f64> =
            pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        AdjustedRecord::from_unrounded(values, 4)
    }

    fn ratio(name: &str, value: f64) -> Ratio {
        Ratio {
            name: name.into(),
            numerator: String::new(),
            denominator: String::new(),
            value,
        }
    }

    #[test]
    fn ratio_rounds_to_two_places() {
        let rec = adjusted(&[(CALCIUM, 300.0), (MAGNESIUM, 45.0)]);
        let r = compute_ratio(&STANDARD_RATIOS[0], &rec, 2);
        assert_eq!(r.name, "Ca/Mg");
        assert_eq!(r.value, 6.67);
    }

    #[test]
    fn zero_denominator_yields_zero() {
        let rec = adjusted(&[(CALCIUM, 300.0), (MAGNESIUM, 0.0)]);
        assert_eq!(compute_ratio(&STANDARD_RATIOS[0], &rec, 2).value, 0.0);
    }

    #[test]
    fn absent_denominator_yields_zero() {
        let rec = adjusted(&[(SODIUM, 40.0)]);
        assert_eq!(compute_ratio(&STANDARD_RATIOS[1], &rec, 2).value, 0.0);
    }

    #[test]
    fn standard_set_in_order() {
        let rec = adjusted(&[]);
        let names: Vec<String> = compute_ratios(STANDARD_RATIOS, &rec, &AdjustmentRules::default())
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Ca/Mg", "Na/K", "Zn/Cu"]);
    }

    #[test]
    fn ca_mg_high_fires_once() {
        let flags = infer_from_ratios(&[ratio(CA_MG, 9.1)], &RatioThresholds::default());
        assert_eq!(flags.len(), 1);
        assert!(flags[0].contains("sympathetic dominance"));
    }

    #[test]
    fn ca_mg_low_fires() {
        let flags = infer_from_ratios(&[ratio(CA_MG, 2.5)], &RatioThresholds::default());
        assert_eq!(flags.len(), 1);
        assert!(flags[0].contains("parasympathetic slump"));
    }

    #[test]
    fn ca_mg_thresholds_are_exclusive() {
        let t = RatioThresholds::default();
        assert!(infer_from_ratios(&[ratio(CA_MG, 8.0)], &t).is_empty());
        assert!(infer_from_ratios(&[ratio(CA_MG, 3.0)], &t).is_empty());
        assert!(infer_from_ratios(&[ratio(CA_MG, 5.5)], &t).is_empty());
    }

    #[test]
    fn na_k_and_zn_cu_thresholds() {
        let t = RatioThresholds::default();
        let flags = infer_from_ratios(&[ratio(NA_K, 1.49), ratio(ZN_CU, 0.69)], &t);
        assert_eq!(flags.len(), 2);
        assert!(flags[0].contains("adrenal stress"));
        assert!(flags[1].contains("immune vulnerability"));

        assert!(infer_from_ratios(&[ratio(NA_K, 1.5), ratio(ZN_CU, 0.7)], &t).is_empty());
    }

    #[test]
    fn unknown_ratio_raises_nothing() {
        assert!(infer_from_ratios(&[ratio("Fe/Cu", 0.0)], &RatioThresholds::default()).is_empty());
    }
}

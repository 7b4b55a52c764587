use std::collections::BTreeMap;

use crate::models::{
    AdjustedRecord, AnalyteDefinition, Compartment, MetalStatus, RawRecord, MAGNESIUM, ZINC,
};
use crate::registry::AnalyteRegistry;

use super::classify::classify_record;
use super::detox::DetoxAssessment;
use super::ratios::{compute_ratios, infer_from_ratios, STANDARD_RATIOS};
use super::rules::AdjustmentRules;
use super::types::{AdjustmentContext, AdjustmentOutcome, SkinCategory};

/// Applies the correction rules to a raw record.
///
/// Holds no per-run state: `adjust` is a pure function of its inputs and
/// the engine may be shared across threads.
pub struct AdjustmentEngine<'r> {
    registry: &'r AnalyteRegistry,
    rules: AdjustmentRules,
}

/// Result of the mineral transform for one analyte.
struct MineralValue {
    value: f64,
    zinc_override: bool,
}

impl<'r> AdjustmentEngine<'r> {
    pub fn new(registry: &'r AnalyteRegistry, rules: AdjustmentRules) -> Self {
        Self { registry, rules }
    }

    pub fn rules(&self) -> &AdjustmentRules {
        &self.rules
    }

    pub fn registry(&self) -> &AnalyteRegistry {
        self.registry
    }

    pub fn adjust(&self, raw: &RawRecord, context: &AdjustmentContext) -> AdjustmentOutcome {
        let optical_factor = self.rules.optical_factor(&context.skin);
        let detox = DetoxAssessment::evaluate(raw, &self.rules);
        let mut flags = detox.flags();

        if detox.blocked {
            tracing::info!(
                sulfur_blockage = detox.sulfur_blockage,
                methylation_failure = detox.methylation_failure,
                "Detox blockage detected; projecting low metal readings"
            );
        }

        let mut values = BTreeMap::new();
        let mut metal_statuses = BTreeMap::new();
        let mut zinc_override = false;

        for definition in self.registry.iter() {
            let raw_value = raw.get(&definition.name);
            let value = match definition.compartment {
                Compartment::Intracellular | Compartment::Extracellular => {
                    let mineral =
                        self.adjust_mineral(definition, raw_value, optical_factor, &context.skin);
                    zinc_override |= mineral.zinc_override;
                    mineral.value
                }
                Compartment::Metal => {
                    let status = self.metal_status(raw_value, &detox);
                    metal_statuses.insert(definition.name.clone(), status);
                    self.project_metal(raw_value, status)
                }
                Compartment::Vitamin => raw_value,
            };
            values.insert(definition.name.clone(), value);
        }

        if zinc_override {
            flags.push(optical_note(self.rules.zinc_pale_factor));
        }

        let adjusted = AdjustedRecord::from_unrounded(values, self.rules.value_decimals);
        let classifications = classify_record(self.registry, &adjusted);
        let ratios = compute_ratios(STANDARD_RATIOS, &adjusted, &self.rules);
        flags.extend(infer_from_ratios(&ratios, &self.rules.ratio_thresholds));

        tracing::info!(
            analytes = adjusted.len(),
            optical_factor,
            blocked = detox.blocked,
            flags = flags.len(),
            "Adjustment complete"
        );

        AdjustmentOutcome {
            adjusted,
            classifications,
            ratios,
            flags,
            detox,
            metal_statuses,
            optical_factor,
        }
    }

    /// Optical factor, then the Magnesium serum correlation, then the Zinc
    /// pale-skin override. The override replaces the optical factor outright.
    fn adjust_mineral(
        &self,
        definition: &AnalyteDefinition,
        raw_value: f64,
        optical_factor: f64,
        skin: &SkinCategory,
    ) -> MineralValue {
        let mut value = raw_value * optical_factor;

        if definition.name == MAGNESIUM {
            value *= self.rules.magnesium_serum_factor;
        }

        // Kept separate from the optical table even though both read 0.90.
        if definition.name == ZINC && skin.is_pale() {
            return MineralValue {
                value: raw_value * self.rules.zinc_pale_factor,
                zinc_override: true,
            };
        }

        MineralValue {
            value,
            zinc_override: false,
        }
    }

    fn metal_status(&self, raw_value: f64, detox: &DetoxAssessment) -> MetalStatus {
        if !detox.blocked {
            MetalStatus::Measured
        } else if raw_value < self.rules.metal_retention_threshold {
            MetalStatus::HiddenRisk
        } else {
            MetalStatus::ConfirmedHigh
        }
    }

    fn project_metal(&self, raw_value: f64, status: MetalStatus) -> f64 {
        match status {
            MetalStatus::HiddenRisk => raw_value * self.rules.metal_retention_multiplier,
            MetalStatus::Measured | MetalStatus::ConfirmedHigh => raw_value,
        }
    }
}

fn optical_note(factor: f64) -> String {
    let percent = ((factor - 1.0) * 100.0).round();
    let direction = if percent < 0.0 { "down" } else { "up" };
    format!("Zinc adjusted {direction} ({percent:+}%) for pale skin reflectance.")
}

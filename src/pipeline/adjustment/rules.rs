//! Adjustment constants.
//!
//! Every number the engine applies lives here. `Default` carries the
//! documented values; a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::SkinCategory;

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("Cannot read rules file {0}: {1}")]
    Io(String, String),

    #[error("Rules file is not valid JSON: {0}")]
    Parse(String),
}

/// Optical correction per Fitzpatrick band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpticalFactors {
    pub pale: f64,
    pub medium: f64,
    pub dark: f64,
    /// Applied for labels outside the three bands.
    pub neutral: f64,
}

impl Default for OpticalFactors {
    fn default() -> Self {
        Self {
            pale: 0.90,
            medium: 1.10,
            dark: 1.25,
            neutral: 1.00,
        }
    }
}

/// Inference thresholds on the derived ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatioThresholds {
    /// Ca/Mg strictly above: sympathetic dominance.
    pub ca_mg_high: f64,
    /// Ca/Mg strictly below: parasympathetic slump.
    pub ca_mg_low: f64,
    /// Na/K strictly below: adrenal stress.
    pub na_k_low: f64,
    /// Zn/Cu strictly below: immune vulnerability.
    pub zn_cu_low: f64,
}

impl Default for RatioThresholds {
    fn default() -> Self {
        Self {
            ca_mg_high: 8.0,
            ca_mg_low: 3.0,
            na_k_low: 1.5,
            zn_cu_low: 0.7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentRules {
    pub optical: OpticalFactors,
    /// Serum-correlation multiplier for Magnesium, on top of optics.
    pub magnesium_serum_factor: f64,
    /// Zinc on pale skin: replaces the optical factor, does not compound.
    /// Deliberately separate from `optical.pale`.
    pub zinc_pale_factor: f64,
    /// Sulfur strictly below this blocks detox. Independent of the Sulfur
    /// reference minimum in the analyte table.
    pub sulfur_blockage_threshold: f64,
    /// B6 or B12 percent strictly below this blocks detox.
    pub methylation_threshold: f64,
    /// Vitamin percent assumed when the key is absent from the record.
    pub missing_vitamin_default: f64,
    /// Metal readings strictly below this are projected when blocked.
    pub metal_retention_threshold: f64,
    pub metal_retention_multiplier: f64,
    pub ratio_thresholds: RatioThresholds,
    pub value_decimals: u32,
    pub ratio_decimals: u32,
}

impl Default for AdjustmentRules {
    fn default() -> Self {
        Self {
            optical: OpticalFactors::default(),
            magnesium_serum_factor: 1.35,
            zinc_pale_factor: 0.90,
            sulfur_blockage_threshold: 48.1,
            methylation_threshold: 60.0,
            missing_vitamin_default: 100.0,
            metal_retention_threshold: 0.02,
            metal_retention_multiplier: 3.5,
            ratio_thresholds: RatioThresholds::default(),
            value_decimals: 4,
            ratio_decimals: 2,
        }
    }
}

impl AdjustmentRules {
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        serde_json::from_str(json).map_err(|e| RulesError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| RulesError::Io(path.display().to_string(), e.to_string()))?;
        let rules = Self::from_json(&json)?;
        if rules != Self::default() {
            tracing::info!(path = %path.display(), "Using non-default adjustment rules");
        }
        Ok(rules)
    }

    /// Table lookup; unrecognized bands get the neutral factor.
    pub fn optical_factor(&self, skin: &SkinCategory) -> f64 {
        match skin {
            SkinCategory::Pale => self.optical.pale,
            SkinCategory::Medium => self.optical.medium,
            SkinCategory::Dark => self.optical.dark,
            SkinCategory::Other(_) => self.optical.neutral,
        }
    }
}

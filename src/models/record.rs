use std::collections::BTreeMap;

use serde::Serialize;

use crate::registry::AnalyteRegistry;

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Values as read from the scan, one per registry analyte.
///
/// Values are never negative: anything negative or non-finite is stored as 0.0.
/// Lookups of unknown names read as 0.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawRecord {
    values: BTreeMap<String, f64>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record holding 0.0 for every analyte in `registry`.
    pub fn zeroed(registry: &AnalyteRegistry) -> Self {
        Self {
            values: registry.iter().map(|d| (d.name.clone(), 0.0)).collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let value = if value.is_finite() && value > 0.0 { value } else { 0.0 };
        self.values.insert(name.into(), value);
    }

    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> f64 {
        self.value(name).unwrap_or(0.0)
    }

    /// `None` when the key is absent, as opposed to present with 0.0.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Corrected values. Rounded once on construction and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AdjustedRecord {
    values: BTreeMap<String, f64>,
}

impl AdjustedRecord {
    pub(crate) fn from_unrounded(values: BTreeMap<String, f64>, decimals: u32) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k, round_to(v, decimals)))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> f64 {
        self.values.get(name).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

//! Analyte registry: the table of every analyte the scan reports.
//!
//! The table is data, not code. The bundled copy lives in
//! `resources/analytes.json` and is embedded at build time; a replacement
//! table with the same shape can be loaded at runtime. Adding an analyte
//! never touches extraction or adjustment logic.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{AnalyteDefinition, AnalytePattern, AnalyteRow, Compartment, ReferenceRange};

const BUILTIN_TABLE: &str = include_str!("../resources/analytes.json");

static BUILTIN: LazyLock<AnalyteRegistry> = LazyLock::new(|| {
    AnalyteRegistry::from_json(BUILTIN_TABLE).expect("bundled analyte table is valid")
});

/// Process-wide registry built from the bundled table.
pub fn builtin() -> &'static AnalyteRegistry {
    &BUILTIN
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Cannot read analyte table {0}: {1}")]
    Io(String, String),

    #[error("Analyte table is not valid JSON: {0}")]
    Parse(String),

    #[error("Analyte table is empty")]
    Empty,

    #[error("Duplicate analyte name: {0}")]
    DuplicateAnalyte(String),

    #[error("Invalid label pattern for {name}: {reason}")]
    InvalidPattern { name: String, reason: String },

    #[error("Invalid reference range for {name}: {reason}")]
    InvalidRange { name: String, reason: String },
}

#[derive(Debug, Deserialize)]
struct AnalyteTable {
    analytes: Vec<AnalyteRow>,
}

/// Read-only analyte table, iterated in file order.
#[derive(Debug, Clone)]
pub struct AnalyteRegistry {
    definitions: Vec<AnalyteDefinition>,
    index: HashMap<String, usize>,
}

impl AnalyteRegistry {
    /// Build from table rows, validating names, patterns and ranges.
    pub fn from_rows(rows: Vec<AnalyteRow>) -> Result<Self, RegistryError> {
        if rows.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        let mut definitions = Vec::with_capacity(rows.len());

        for row in rows {
            if !seen.insert(row.name.clone()) {
                return Err(RegistryError::DuplicateAnalyte(row.name));
            }

            let pattern = AnalytePattern::compile(&row.label, row.gap, row.percent)
                .map_err(|e| RegistryError::InvalidPattern {
                    name: row.name.clone(),
                    reason: e.to_string(),
                })?;

            let reference = match (row.reference_min, row.reference_max) {
                (Some(min), Some(max)) if min < max => Some(ReferenceRange { min, max }),
                (Some(min), Some(max)) => {
                    return Err(RegistryError::InvalidRange {
                        name: row.name,
                        reason: format!("min {min} is not below max {max}"),
                    })
                }
                (None, None) => None,
                _ => {
                    return Err(RegistryError::InvalidRange {
                        name: row.name,
                        reason: "both bounds or neither must be given".into(),
                    })
                }
            };

            definitions.push(AnalyteDefinition {
                name: row.name,
                compartment: row.compartment,
                pattern,
                unit: row.unit,
                reference,
            });
        }

        let index = definitions
            .iter()
            .enumerate()
            .map(|(i, d)| (d.name.clone(), i))
            .collect();

        Ok(Self { definitions, index })
    }

    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let table: AnalyteTable =
            serde_json::from_str(json).map_err(|e| RegistryError::Parse(e.to_string()))?;
        Self::from_rows(table.analytes)
    }

    /// Load a replacement table from disk.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| RegistryError::Io(path.display().to_string(), e.to_string()))?;
        let registry = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            analytes = registry.len(),
            "Loaded analyte table"
        );
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<&AnalyteDefinition> {
        self.index.get(name).map(|&i| &self.definitions[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnalyteDefinition> {
        self.definitions.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.name.as_str())
    }

    pub fn in_compartment(
        &self,
        compartment: Compartment,
    ) -> impl Iterator<Item = &AnalyteDefinition> {
        self.definitions
            .iter()
            .filter(move |d| d.compartment == compartment)
    }

    /// Definitions grouped by compartment (Intracellular, Extracellular,
    /// Metal, Vitamin), file order within each group.
    pub fn grouped(&self) -> Vec<(Compartment, Vec<&AnalyteDefinition>)> {
        Compartment::ALL
            .iter()
            .map(|&c| (c, self.in_compartment(c).collect::<Vec<_>>()))
            .filter(|(_, defs)| !defs.is_empty())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LabelGap, CALCIUM, COPPER, MAGNESIUM, POTASSIUM, SODIUM, SULFUR, VIT_B12, VIT_B6, ZINC};

    fn row(name: &str, compartment: Compartment) -> AnalyteRow {
        AnalyteRow {
            name: name.into(),
            compartment,
            label: name.into(),
            gap: LabelGap::Symbol,
            percent: false,
            unit: "µg/g".into(),
            reference_min: None,
            reference_max: None,
        }
    }

    #[test]
    fn builtin_table_loads() {
        let registry = builtin();
        assert!(registry.len() >= 30);
        for name in [SULFUR, MAGNESIUM, ZINC, CALCIUM, SODIUM, POTASSIUM, COPPER, VIT_B6, VIT_B12] {
            assert!(registry.contains(name), "bundled table lacks {name}");
        }
    }

    #[test]
    fn builtin_compartments() {
        let registry = builtin();
        assert_eq!(registry.get("Lead").unwrap().compartment, Compartment::Metal);
        assert_eq!(registry.get(VIT_B6).unwrap().compartment, Compartment::Vitamin);
        assert!(registry.get(VIT_B6).unwrap().is_percent());
        assert_eq!(registry.get(MAGNESIUM).unwrap().compartment, Compartment::Intracellular);
        assert_eq!(registry.get(SULFUR).unwrap().compartment, Compartment::Extracellular);
    }

    #[test]
    fn builtin_sulfur_reference_is_independent_entry() {
        let range = builtin().get(SULFUR).unwrap().reference.unwrap();
        assert_eq!(range.min, 48.1);
    }

    #[test]
    fn iteration_order_is_stable() {
        let first: Vec<&str> = builtin().names().collect();
        let second: Vec<&str> = builtin().names().collect();
        assert_eq!(first, second);
        assert_eq!(first[0], MAGNESIUM);
    }

    #[test]
    fn grouped_follows_compartment_order() {
        let registry = AnalyteRegistry::from_rows(vec![
            row("Lead", Compartment::Metal),
            row("Calcium", Compartment::Extracellular),
            row("Zinc", Compartment::Intracellular),
            row("Copper", Compartment::Intracellular),
        ])
        .unwrap();

        let groups = registry.grouped();
        let order: Vec<Compartment> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            order,
            vec![Compartment::Intracellular, Compartment::Extracellular, Compartment::Metal]
        );
        let intra: Vec<&str> = groups[0].1.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(intra, vec!["Zinc", "Copper"]);
    }

    #[test]
    fn duplicate_name_rejected() {
        let err = AnalyteRegistry::from_rows(vec![
            row("Zinc", Compartment::Intracellular),
            row("Zinc", Compartment::Intracellular),
        ])
        .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateAnalyte(ref n) if n == "Zinc"));
    }

    #[test]
    fn invalid_pattern_rejected() {
        let mut bad = row("Zinc", Compartment::Intracellular);
        bad.label = "Zinc[".into();
        let err = AnalyteRegistry::from_rows(vec![bad]).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidPattern { .. }));
    }

    #[test]
    fn inverted_range_rejected() {
        let mut bad = row("Zinc", Compartment::Intracellular);
        bad.reference_min = Some(30.0);
        bad.reference_max = Some(10.0);
        let err = AnalyteRegistry::from_rows(vec![bad]).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidRange { .. }));
    }

    #[test]
    fn half_range_rejected() {
        let mut bad = row("Zinc", Compartment::Intracellular);
        bad.reference_min = Some(30.0);
        let err = AnalyteRegistry::from_rows(vec![bad]).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidRange { .. }));
    }

    #[test]
    fn empty_table_rejected() {
        assert!(matches!(
            AnalyteRegistry::from_json(r#"{"analytes": []}"#),
            Err(RegistryError::Empty)
        ));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            AnalyteRegistry::from_json("{not json"),
            Err(RegistryError::Parse(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        std::fs::write(
            &path,
            r#"{"analytes":[{"name":"Zinc","compartment":"intracellular","label":"Zinc","unit":"µg/g","reference_min":18.0,"reference_max":32.0}]}"#,
        )
        .unwrap();
        let registry = AnalyteRegistry::load(&path).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("Zinc").unwrap().reference.unwrap().max, 32.0);
    }

    #[test]
    fn load_missing_file_fails() {
        let err = AnalyteRegistry::load(Path::new("/nonexistent/analytes.json")).unwrap_err();
        assert!(matches!(err, RegistryError::Io(..)));
    }
}

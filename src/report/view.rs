//! Renderer-neutral rows derived from a pipeline report.
//!
//! Both renderers walk the same rows so the PDF and the terminal summary
//! never disagree on content or order.

use crate::models::{Classification, Compartment, MetalStatus, ReferenceRange};
use crate::pipeline::PipelineReport;
use crate::registry::AnalyteRegistry;

pub const METALS_HEADING: &str = "Heavy Metal Projections";
pub const VITAMINS_HEADING: &str = "Vitamin Levels";
pub const RATIOS_HEADING: &str = "Mineral Ratios";
pub const FLAGS_HEADING: &str = "Clinical Notes & Flags";
pub const BLOCKAGE_NOTE: &str = "NOTE: Patient lacks Methylation cofactors (B6/B12) or Sulfur \
    needed to mobilize metals. Low scan readings are likely false negatives.";
pub const DISCLAIMER: &str = "Adjusted values are projections computed from the scan, not \
    laboratory measurements. Discuss them with a qualified practitioner.";

#[derive(Debug, Clone, PartialEq)]
pub struct MetalRow {
    pub name: String,
    pub scan: f64,
    pub adjusted: f64,
    pub status: MetalStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MineralRow {
    pub name: String,
    pub unit: String,
    pub scan: f64,
    pub adjusted: f64,
    pub reference: Option<ReferenceRange>,
    pub classification: Option<Classification>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MineralGroup {
    pub compartment: Compartment,
    pub rows: Vec<MineralRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    pub title: String,
    pub detox_status: String,
    pub blocked: bool,
    pub skin: String,
    pub optical_factor: f64,
    pub metals: Vec<MetalRow>,
    pub minerals: Vec<MineralGroup>,
    pub vitamins: Vec<MineralRow>,
    pub ratios: Vec<(String, f64)>,
    pub flags: Vec<String>,
}

impl ReportView {
    pub fn build(registry: &AnalyteRegistry, report: &PipelineReport) -> Self {
        let outcome = &report.outcome;
        let mut metals = Vec::new();
        let mut minerals = Vec::new();
        let mut vitamins = Vec::new();

        for (compartment, definitions) in registry.grouped() {
            let rows = definitions.iter().map(|def| MineralRow {
                name: def.name.clone(),
                unit: def.unit.clone(),
                scan: report.raw.get(&def.name),
                adjusted: outcome.adjusted.get(&def.name),
                reference: def.reference,
                classification: outcome.classification(&def.name),
            });

            match compartment {
                c if c.is_mineral() => minerals.push(MineralGroup {
                    compartment,
                    rows: rows.collect(),
                }),
                Compartment::Metal => metals.extend(rows.map(|row| MetalRow {
                    status: outcome
                        .metal_statuses
                        .get(&row.name)
                        .copied()
                        .unwrap_or(MetalStatus::Measured),
                    name: row.name,
                    scan: row.scan,
                    adjusted: row.adjusted,
                })),
                _ => vitamins.extend(rows),
            }
        }

        Self {
            title: format!("Clinical Adjustment Report: {}", report.patient_name),
            detox_status: outcome.detox.status_label().to_string(),
            blocked: outcome.detox.blocked,
            skin: report.skin.to_string(),
            optical_factor: outcome.optical_factor,
            metals,
            minerals,
            vitamins,
            ratios: outcome
                .ratios
                .iter()
                .map(|r| (r.name.clone(), r.value))
                .collect(),
            flags: outcome.flags.clone(),
        }
    }
}

/// Shortest decimal form of a value, as stored.
pub fn format_value(value: f64) -> String {
    format!("{value}")
}

pub fn format_reference(reference: Option<ReferenceRange>) -> String {
    match reference {
        Some(r) => format!("{} - {}", r.min, r.max),
        None => "-".to_string(),
    }
}

pub fn format_classification(classification: Option<Classification>) -> &'static str {
    classification.map(|c| c.as_str()).unwrap_or("-")
}

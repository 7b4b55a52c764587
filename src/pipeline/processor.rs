//! Scan processing orchestrator.
//!
//! Drives the core pipeline for one document:
//! page texts → join → extract → adjust.
//!
//! Document reading and report rendering stay outside; the orchestrator only
//! sees page texts and returns a fully computed report.

use serde::Serialize;

use crate::models::RawRecord;
use crate::pipeline::adjustment::{
    AdjustmentContext, AdjustmentEngine, AdjustmentOutcome, AdjustmentRules, SkinCategory,
};
use crate::pipeline::extraction::{extract, join_pages, DocumentText};
use crate::registry::AnalyteRegistry;

/// Everything a renderer needs for one scan.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub patient_name: String,
    pub skin: SkinCategory,
    pub page_count: usize,
    pub raw: RawRecord,
    pub outcome: AdjustmentOutcome,
}

pub struct ScanPipeline<'r> {
    registry: &'r AnalyteRegistry,
    engine: AdjustmentEngine<'r>,
}

impl<'r> ScanPipeline<'r> {
    pub fn new(registry: &'r AnalyteRegistry, rules: AdjustmentRules) -> Self {
        Self {
            registry,
            engine: AdjustmentEngine::new(registry, rules),
        }
    }

    pub fn registry(&self) -> &AnalyteRegistry {
        self.registry
    }

    pub fn engine(&self) -> &AdjustmentEngine<'r> {
        &self.engine
    }

    /// Run extraction and adjustment over ordered page texts.
    pub fn run<S: AsRef<str>>(&self, pages: &[S], context: &AdjustmentContext) -> PipelineReport {
        let text = join_pages(pages);
        let raw = extract(self.registry, &text);
        let outcome = self.engine.adjust(&raw, context);

        tracing::info!(
            pages = pages.len(),
            skin = %context.skin,
            blocked = outcome.detox.blocked,
            "Scan processed"
        );

        PipelineReport {
            patient_name: context.patient_name.clone(),
            skin: context.skin.clone(),
            page_count: pages.len(),
            raw,
            outcome,
        }
    }

    pub fn run_document(&self, document: &DocumentText, context: &AdjustmentContext) -> PipelineReport {
        self.run(&document.pages, context)
    }
}

//! PDF clinical report via `printpdf` built-in fonts.
//!
//! A4 portrait, one layer per page. Long reports continue on new pages;
//! every string passes through `clean_text` before it reaches the page.

use std::io::BufWriter;

use chrono::NaiveDate;
use printpdf::*;

use crate::models::MetalStatus;
use crate::pipeline::PipelineReport;
use crate::registry::AnalyteRegistry;

use super::sanitize::{clean_text, wrap_text};
use super::view::{
    format_classification, format_reference, format_value, ReportView, BLOCKAGE_NOTE,
    DISCLAIMER, FLAGS_HEADING, METALS_HEADING, RATIOS_HEADING, VITAMINS_HEADING,
};
use super::{ReportError, ReportRenderer};

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const TOP_MM: f32 = 280.0;
const BOTTOM_MM: f32 = 18.0;
const MARGIN_MM: f32 = 20.0;
const INDENT_MM: f32 = 25.0;

pub struct PdfReportRenderer {
    generated_on: NaiveDate,
}

impl PdfReportRenderer {
    pub fn new(generated_on: NaiveDate) -> Self {
        Self { generated_on }
    }

    pub fn today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    mono: IndirectFontRef,
}

/// Writes lines top to bottom, starting a new page when the next line
/// would cross the bottom margin.
struct PageWriter<'d> {
    doc: &'d PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
    pages: usize,
}

impl<'d> PageWriter<'d> {
    fn new(doc: &'d PdfDocumentReference, layer: PdfLayerReference) -> Self {
        Self {
            doc,
            layer,
            y: TOP_MM,
            pages: 1,
        }
    }

    fn reserve(&mut self, height: f32) {
        if self.y - height < BOTTOM_MM {
            let (page, layer) = self.doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP_MM;
            self.pages += 1;
        }
    }

    fn text(&mut self, text: &str, size: f32, x: f32, font: &IndirectFontRef, advance: f32) {
        self.reserve(advance);
        self.layer
            .use_text(clean_text(text), size, Mm(x), Mm(self.y), font);
        self.y -= advance;
    }

    fn heading(&mut self, text: &str, font: &IndirectFontRef) {
        // Keep a heading together with at least two rows below it.
        self.reserve(6.0 + 2.0 * 4.0);
        self.text(text, 12.0, MARGIN_MM, font, 7.0);
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }
}

fn status_marker(status: MetalStatus) -> String {
    match status {
        MetalStatus::Measured => status.as_str().to_string(),
        MetalStatus::HiddenRisk => format!("⚠️ {}", status.as_str()),
        MetalStatus::ConfirmedHigh => format!("🔴 {}", status.as_str()),
    }
}

impl PdfReportRenderer {
    fn write_header(&self, w: &mut PageWriter<'_>, fonts: &Fonts, view: &ReportView) {
        w.text(&view.title, 16.0, MARGIN_MM, &fonts.bold, 8.0);
        let meta = format!(
            "Generated: {}    Skin type: {}    Optical factor: {}",
            self.generated_on.format("%Y-%m-%d"),
            view.skin,
            view.optical_factor
        );
        w.text(&meta, 9.0, MARGIN_MM, &fonts.regular, 10.0);

        let marker = if view.blocked { "⛔" } else { "✅" };
        w.text(
            &format!("Detox Status: {marker} {}", view.detox_status),
            12.0,
            MARGIN_MM,
            &fonts.bold,
            7.0,
        );
        if view.blocked {
            for line in wrap_text(BLOCKAGE_NOTE, 95) {
                w.text(&line, 9.0, MARGIN_MM, &fonts.regular, 4.5);
            }
        }
        w.gap(5.0);
    }

    fn write_metals(&self, w: &mut PageWriter<'_>, fonts: &Fonts, view: &ReportView) {
        w.heading(&format!("{METALS_HEADING}:"), &fonts.bold);
        let header = format!("{:<14} {:>12} {:>12}  {}", "Metal", "Scan", "Adjusted", "Status");
        w.text(&header, 8.0, INDENT_MM, &fonts.mono, 4.5);
        for row in &view.metals {
            let line = format!(
                "{:<14} {:>12} {:>12}  {}",
                row.name,
                format_value(row.scan),
                format_value(row.adjusted),
                status_marker(row.status)
            );
            w.text(&line, 8.0, INDENT_MM, &fonts.mono, 4.0);
        }
        w.gap(5.0);
    }

    fn write_minerals(&self, w: &mut PageWriter<'_>, fonts: &Fonts, view: &ReportView) {
        for group in &view.minerals {
            w.heading(&format!("{} Minerals:", group.compartment), &fonts.bold);
            let header = format!(
                "{:<12} {:>10} {:>10} {:<5} {:>14}  {}",
                "Mineral", "Scan", "Adjusted", "Unit", "Reference", "Class"
            );
            w.text(&header, 8.0, INDENT_MM, &fonts.mono, 4.5);
            for row in &group.rows {
                let line = format!(
                    "{:<12} {:>10} {:>10} {:<5} {:>14}  {}",
                    row.name,
                    format_value(row.scan),
                    format_value(row.adjusted),
                    row.unit,
                    format_reference(row.reference),
                    format_classification(row.classification)
                );
                w.text(&line, 8.0, INDENT_MM, &fonts.mono, 4.0);
            }
            w.gap(5.0);
        }
    }

    fn write_vitamins(&self, w: &mut PageWriter<'_>, fonts: &Fonts, view: &ReportView) {
        w.heading(&format!("{VITAMINS_HEADING}:"), &fonts.bold);
        for row in &view.vitamins {
            let line = format!("{:<12} {:>10}%", row.name, format_value(row.adjusted));
            w.text(&line, 8.0, INDENT_MM, &fonts.mono, 4.0);
        }
        w.gap(5.0);
    }

    fn write_ratios(&self, w: &mut PageWriter<'_>, fonts: &Fonts, view: &ReportView) {
        w.heading(&format!("{RATIOS_HEADING}:"), &fonts.bold);
        for (name, value) in &view.ratios {
            let line = format!("{:<12} {:>10}", name, format_value(*value));
            w.text(&line, 8.0, INDENT_MM, &fonts.mono, 4.0);
        }
        w.gap(5.0);
    }

    fn write_flags(&self, w: &mut PageWriter<'_>, fonts: &Fonts, view: &ReportView) {
        if view.flags.is_empty() {
            return;
        }
        w.heading(&format!("{FLAGS_HEADING}:"), &fonts.bold);
        for flag in &view.flags {
            for line in wrap_text(&format!("- {flag}"), 95) {
                w.text(&line, 9.0, INDENT_MM, &fonts.regular, 4.5);
            }
            w.gap(1.5);
        }
        w.gap(4.0);
    }
}

impl ReportRenderer for PdfReportRenderer {
    fn render(
        &self,
        registry: &AnalyteRegistry,
        report: &PipelineReport,
    ) -> Result<Vec<u8>, ReportError> {
        let view = ReportView::build(registry, report);

        let (doc, page1, layer1) =
            PdfDocument::new(clean_text(&view.title), PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| ReportError::Pdf(format!("PDF font error: {e}")))?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| ReportError::Pdf(format!("PDF font error: {e}")))?,
            mono: doc
                .add_builtin_font(BuiltinFont::Courier)
                .map_err(|e| ReportError::Pdf(format!("PDF font error: {e}")))?,
        };

        let pages = {
            let mut w = PageWriter::new(&doc, doc.get_page(page1).get_layer(layer1));
            self.write_header(&mut w, &fonts, &view);
            self.write_metals(&mut w, &fonts, &view);
            self.write_minerals(&mut w, &fonts, &view);
            self.write_vitamins(&mut w, &fonts, &view);
            self.write_ratios(&mut w, &fonts, &view);
            self.write_flags(&mut w, &fonts, &view);
            for line in wrap_text(DISCLAIMER, 110) {
                w.text(&line, 7.0, MARGIN_MM, &fonts.regular, 3.5);
            }
            w.pages
        };

        let mut buf = BufWriter::new(Vec::new());
        doc.save(&mut buf)
            .map_err(|e| ReportError::Pdf(format!("PDF save error: {e}")))?;
        let bytes = buf
            .into_inner()
            .map_err(|e| ReportError::Pdf(format!("PDF buffer error: {e}")))?;

        tracing::info!(pages, size_bytes = bytes.len(), "PDF report rendered");
        Ok(bytes)
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }
}

use std::fmt::Write as _;

use crate::pipeline::PipelineReport;
use crate::registry::AnalyteRegistry;

use super::view::{
    format_classification, format_reference, format_value, ReportView, BLOCKAGE_NOTE,
    FLAGS_HEADING, METALS_HEADING, RATIOS_HEADING, VITAMINS_HEADING,
};
use super::{ReportError, ReportRenderer};

/// Plain-text summary for the terminal. Out-of-range classifications are
/// marked with `*`; unmeasured (`N/A`) rows are not.
pub struct TextReportRenderer;

impl TextReportRenderer {
    pub fn render_string(&self, view: &ReportView) -> String {
        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}", view.title);
        let _ = writeln!(
            out,
            "Skin type: {}  (optical factor {})",
            view.skin, view.optical_factor
        );
        let _ = writeln!(out, "Detox status: {}", view.detox_status);
        if view.blocked {
            let _ = writeln!(out, "{BLOCKAGE_NOTE}");
        }

        let _ = writeln!(out, "\n{METALS_HEADING}");
        for row in &view.metals {
            let _ = writeln!(
                out,
                "  {:<14} {:>12} -> {:>12}  {}",
                row.name,
                format_value(row.scan),
                format_value(row.adjusted),
                row.status
            );
        }

        for group in &view.minerals {
            let _ = writeln!(out, "\n{} Minerals", group.compartment);
            for row in &group.rows {
                let marker = match row.classification {
                    Some(c) if c.is_out_of_range() => "*",
                    _ => " ",
                };
                let _ = writeln!(
                    out,
                    "  {:<12} {:>10} -> {:>10} {:<5} [{}] {}{}",
                    row.name,
                    format_value(row.scan),
                    format_value(row.adjusted),
                    row.unit,
                    format_reference(row.reference),
                    marker,
                    format_classification(row.classification)
                );
            }
        }

        let _ = writeln!(out, "\n{VITAMINS_HEADING}");
        for row in &view.vitamins {
            let _ = writeln!(out, "  {:<12} {:>10}%", row.name, format_value(row.adjusted));
        }

        let _ = writeln!(out, "\n{RATIOS_HEADING}");
        for (name, value) in &view.ratios {
            let _ = writeln!(out, "  {:<12} {:>10}", name, format_value(*value));
        }

        if !view.flags.is_empty() {
            let _ = writeln!(out, "\n{FLAGS_HEADING}");
            for flag in &view.flags {
                let _ = writeln!(out, "  - {flag}");
            }
        }

        out
    }
}

impl ReportRenderer for TextReportRenderer {
    fn render(
        &self,
        registry: &AnalyteRegistry,
        report: &PipelineReport,
    ) -> Result<Vec<u8>, ReportError> {
        let view = ReportView::build(registry, report);
        Ok(self.render_string(&view).into_bytes())
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}

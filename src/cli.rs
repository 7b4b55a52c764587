//! Command-line surface: read a scan, adjust it, write a report.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use crate::config;
use crate::error::AppError;
use crate::pipeline::adjustment::{AdjustmentContext, AdjustmentRules, SkinCategory};
use crate::pipeline::extraction::read_document;
use crate::pipeline::ScanPipeline;
use crate::registry::{self, AnalyteRegistry};
use crate::report::{
    default_filename, export_report_to_file, JsonReportRenderer, PdfReportRenderer,
    ReportRenderer, TextReportRenderer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text summary
    Text,
    /// Full outcome as JSON
    Json,
    /// Clinical PDF report
    Pdf,
}

#[derive(Parser, Debug)]
#[command(name = "oligoadjust")]
#[command(version)]
#[command(about = "Correct OligoScan tissue-mineral readings for skin optics and detox blockage")]
pub struct Cli {
    /// Scan report to process (PDF or plain text)
    pub input: PathBuf,

    /// Fitzpatrick skin category: pale, medium, dark, or a label such as "I-II (Pale)"
    #[arg(short, long, default_value = config::DEFAULT_SKIN)]
    pub skin: String,

    /// Patient name shown on the report
    #[arg(short, long, default_value = config::DEFAULT_PATIENT_NAME)]
    pub patient: String,

    /// JSON file overriding any subset of the adjustment constants
    #[arg(long, env = config::RULES_ENV)]
    pub rules: Option<PathBuf>,

    /// JSON analyte table replacing the built-in one
    #[arg(long, env = config::ANALYTES_ENV)]
    pub analytes: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pdf)]
    pub format: OutputFormat,

    /// Output file or directory. Text and JSON go to stdout when omitted;
    /// PDF goes to the exports directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Where rendered bytes go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File { dir: PathBuf, filename: String },
}

impl Cli {
    pub fn renderer(&self) -> Box<dyn ReportRenderer> {
        match self.format {
            OutputFormat::Text => Box::new(TextReportRenderer),
            OutputFormat::Json => Box::new(JsonReportRenderer),
            OutputFormat::Pdf => Box::new(PdfReportRenderer::today()),
        }
    }

    pub fn destination(&self, extension: &str) -> Destination {
        match &self.output {
            Some(path) if path.is_dir() => Destination::File {
                dir: path.clone(),
                filename: default_filename(&self.patient, extension),
            },
            Some(path) => Destination::File {
                dir: path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from(".")),
                filename: path
                    .file_name()
                    .map(|f| f.to_string_lossy().into_owned())
                    .unwrap_or_else(|| default_filename(&self.patient, extension)),
            },
            None if self.format == OutputFormat::Pdf => Destination::File {
                dir: config::exports_dir(),
                filename: default_filename(&self.patient, extension),
            },
            None => Destination::Stdout,
        }
    }
}

/// Run one scan end to end. Returns the written path, if any.
pub fn execute(cli: &Cli) -> Result<Option<PathBuf>, AppError> {
    let loaded;
    let registry: &AnalyteRegistry = match &cli.analytes {
        Some(path) => {
            loaded = AnalyteRegistry::load(path)?;
            &loaded
        }
        None => registry::builtin(),
    };

    let rules = match &cli.rules {
        Some(path) => AdjustmentRules::load(path)?,
        None => AdjustmentRules::default(),
    };

    let document = read_document(&cli.input)?;
    let context = AdjustmentContext::new(SkinCategory::from_label(&cli.skin), cli.patient.clone());
    if let SkinCategory::Other(label) = &context.skin {
        tracing::warn!(skin = %label, "Unrecognized skin category; no optical correction applied");
    }

    let report = ScanPipeline::new(registry, rules).run_document(&document, &context);

    let renderer = cli.renderer();
    let bytes = renderer.render(registry, &report)?;

    match cli.destination(renderer.extension()) {
        Destination::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&bytes)
                .and_then(|_| stdout.flush())
                .map_err(|e| AppError::Stdout(e.to_string()))?;
            Ok(None)
        }
        Destination::File { dir, filename } => {
            let path = export_report_to_file(&bytes, &filename, &dir)?;
            Ok(Some(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCAN: &str = "OligoScan\nCalcium Ca 301,2\nMagnesium Mg 41,7\nZinc Zn 19,8\n\
        Sulphur S 47,9\nLead Pb 0,0012\nVitamin B6 72 %\nVitamin B12 58 %\n";

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["oligoadjust"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn defaults_when_flags_omitted() {
        let cli = cli(&["scan.pdf"]);
        assert_eq!(cli.skin, "pale");
        assert_eq!(cli.patient, "John Doe");
        assert_eq!(cli.format, OutputFormat::Pdf);
        assert!(cli.output.is_none());
        assert_eq!(cli.skin, config::DEFAULT_SKIN);
        assert_eq!(cli.patient, config::DEFAULT_PATIENT_NAME);
    }

    #[test]
    fn table_overrides_read_from_environment() {
        use clap::CommandFactory;

        let command = Cli::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|a| a.get_id() == id)
                .and_then(|a| a.get_env())
                .and_then(|e| e.to_str())
                .map(str::to_owned)
        };
        assert_eq!(env_of("rules").as_deref(), Some(config::RULES_ENV));
        assert_eq!(env_of("analytes").as_deref(), Some(config::ANALYTES_ENV));
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["oligoadjust"]).is_err());
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["oligoadjust", "scan.pdf", "--format", "docx"]).is_err());
    }

    #[test]
    fn destination_rules() {
        let text = cli(&["scan.txt", "--format", "text"]);
        assert_eq!(text.destination("txt"), Destination::Stdout);

        let pdf = cli(&["scan.pdf", "--patient", "Jane Roe"]);
        assert_eq!(
            pdf.destination("pdf"),
            Destination::File {
                dir: config::exports_dir(),
                filename: "Jane Roe_Adjusted_OligoScan.pdf".into(),
            }
        );

        let file = cli(&["scan.pdf", "--output", "out/report.pdf"]);
        assert_eq!(
            file.destination("pdf"),
            Destination::File {
                dir: PathBuf::from("out"),
                filename: "report.pdf".into(),
            }
        );

        let bare = cli(&["scan.pdf", "--output", "report.pdf"]);
        assert_eq!(
            bare.destination("pdf"),
            Destination::File {
                dir: PathBuf::from("."),
                filename: "report.pdf".into(),
            }
        );
    }

    #[test]
    fn output_directory_gets_default_filename() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();
        let cli = cli(&["scan.pdf", "--output", dir]);
        assert_eq!(
            cli.destination("pdf"),
            Destination::File {
                dir: tmp.path().to_path_buf(),
                filename: "John Doe_Adjusted_OligoScan.pdf".into(),
            }
        );
    }

    #[test]
    fn execute_writes_pdf_report() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("scan.txt");
        std::fs::write(&input, SCAN).unwrap();
        let out_dir = tmp.path().join("reports");
        std::fs::create_dir_all(&out_dir).unwrap();

        let cli = cli(&[
            input.to_str().unwrap(),
            "--skin",
            "I-II (Pale)",
            "--output",
            out_dir.to_str().unwrap(),
        ]);
        let path = execute(&cli).unwrap().unwrap();

        assert!(path.ends_with("John Doe_Adjusted_OligoScan.pdf"));
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..4], b"%PDF");
    }

    #[test]
    fn execute_writes_json_with_custom_rules() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("scan.txt");
        std::fs::write(&input, SCAN).unwrap();
        let rules = tmp.path().join("rules.json");
        std::fs::write(&rules, r#"{"magnesium_serum_factor": 1.0}"#).unwrap();
        let output = tmp.path().join("out.json");

        let cli = cli(&[
            input.to_str().unwrap(),
            "--skin",
            "medium",
            "--format",
            "json",
            "--rules",
            rules.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ]);
        execute(&cli).unwrap();

        let json: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&output).unwrap()).unwrap();
        // 41.7 * 1.10, no serum factor
        assert_eq!(json["outcome"]["adjusted"]["Magnesium"], 45.87);
        assert_eq!(json["skin"], "medium");
    }

    #[test]
    fn execute_missing_input_fails() {
        let cli = cli(&["/nonexistent/scan.pdf", "--format", "text"]);
        assert!(matches!(execute(&cli), Err(AppError::Source(_))));
    }

    #[test]
    fn execute_bad_rules_fails_before_reading_input() {
        let tmp = tempfile::tempdir().unwrap();
        let rules = tmp.path().join("rules.json");
        std::fs::write(&rules, "not json").unwrap();

        let cli = cli(&["/nonexistent/scan.pdf", "--rules", rules.to_str().unwrap()]);
        assert!(matches!(execute(&cli), Err(AppError::Rules(_))));
    }
}

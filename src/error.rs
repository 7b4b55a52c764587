use thiserror::Error;

use crate::pipeline::adjustment::RulesError;
use crate::pipeline::extraction::SourceError;
use crate::registry::RegistryError;
use crate::report::ReportError;

/// Top-level failure for a command-line run. The core never fails; every
/// variant comes from an edge adapter.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Analyte table error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Adjustment rules error: {0}")]
    Rules(#[from] RulesError),

    #[error("Document error: {0}")]
    Source(#[from] SourceError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Cannot write to stdout: {0}")]
    Stdout(String),
}

use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "OligoAdjust";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable naming a replacement adjustment rules file.
pub const RULES_ENV: &str = "OLIGOADJUST_RULES";
/// Environment variable naming a replacement analyte table.
pub const ANALYTES_ENV: &str = "OLIGOADJUST_ANALYTES";

pub const DEFAULT_PATIENT_NAME: &str = "John Doe";
pub const DEFAULT_SKIN: &str = "pale";

/// Used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "oligoadjust=info,oligoadjust_lib=info"
}

/// Get the application data directory
/// ~/OligoAdjust/ on all platforms, falling back to the working directory
/// when no home directory is known.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Where reports land when no `--output` is given.
pub fn exports_dir() -> PathBuf {
    app_data_dir().join("exports")
}

//! Error types for the run driver.

use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file: {path}")]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(String),

    #[error("Config validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Tides(#[from] adc_tides::TideError),

    #[error("Output error: {0}")]
    Output(#[from] adc_outputs::OutputError),

    #[error("Invalid value: {0}")]
    Numeric(#[from] adc_core::AdcError),

    #[error("Mesh file not found: {path}")]
    MeshNotFound { path: PathBuf },

    #[error("Run directory is not empty: {path} (pass overwrite to reuse it)")]
    RunDirNotEmpty { path: PathBuf },

    #[error("Checksum mismatch for {path}: expected {expected}, found {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("Failed to launch {program}")]
    Launch {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    ProcessFailed { program: PathBuf, status: ExitStatus },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DriverResult<T> = Result<T, DriverError>;

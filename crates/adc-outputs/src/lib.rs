//! adc-outputs: typed access to ADCIRC ASCII output files.
//!
//! Every output file type shares one layout, so a single reader,
//! [`SurfaceOutput`], is configured with an [`OutputKind`] naming the file
//! and the dataset it exposes.

pub mod kind;
pub mod reader;

pub use kind::{DatasetSlot, OutputKind};
pub use reader::{DRY_VALUE, Dataset, MAX_DATASET_VALUES, OutputHeader, SurfaceOutput};

use std::path::PathBuf;

pub type OutputResult<T> = Result<T, OutputError>;

#[derive(thiserror::Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output file not found: {path}")]
    MissingFile { path: PathBuf },

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("{kind} has no dataset {index} ({available} available)")]
    MissingDataset {
        kind: OutputKind,
        index: usize,
        available: usize,
    },

    #[error("Unknown output file type: {0}")]
    UnknownKind(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] adc_core::AdcError),
}

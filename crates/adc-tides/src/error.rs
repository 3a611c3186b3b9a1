//! Tidal constituent errors.

use thiserror::Error;

/// Result type for registry and selection operations.
pub type TideResult<T> = Result<T, TideError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TideError {
    /// Name is not in the constituent table. Names are matched exactly.
    #[error("Unknown tidal constituent: {name}")]
    UnknownConstituent { name: String },
}

impl TideError {
    pub fn unknown(name: impl Into<String>) -> Self {
        TideError::UnknownConstituent { name: name.into() }
    }
}

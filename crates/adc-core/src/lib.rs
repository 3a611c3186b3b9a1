//! adc-core: shared foundation for the ADCIRC toolkit crates.
//!
//! Contains:
//! - units (uom SI types for frequencies and periods)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::AdcError;
pub use numeric::*;
pub use units::*;

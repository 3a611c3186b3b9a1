//! Run driver for the ADCIRC toolkit.
//!
//! Loads and validates run configurations, prepares run directories with the
//! tidal forcing hand-off, and launches the external ADCIRC binary when one is
//! available on `PATH`.

pub mod checksum;
pub mod config;
pub mod error;
pub mod launcher;
pub mod run_service;

pub use checksum::{sha256_file, verify_checksum};
pub use config::{
    GwceSolutionScheme, OutputRequest, RunConfig, load_config, save_config, validate_config,
};
pub use error::{DriverError, DriverResult};
pub use launcher::{Launcher, find_executable, find_launcher, find_launcher_in};
pub use run_service::{
    PreparedRun, RunOptions, RunOutcome, available_outputs, build_selection, execute,
    prepare_run, run, run_with,
};

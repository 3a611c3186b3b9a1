//! Run directory preparation and solver launch.

use std::fs;
use std::path::{Path, PathBuf};

use adc_outputs::OutputKind;
use adc_tides::{ActiveForcingSelection, TidalForcingSpec};
use tracing::{debug, info, warn};

use crate::checksum::verify_checksum;
use crate::config::{RunConfig, save_config, validate_config};
use crate::error::{DriverError, DriverResult};
use crate::launcher::{Launcher, find_launcher};

pub const MESH_FILE: &str = "fort.14";
pub const FORCING_FILE: &str = "tidal_forcing.json";
pub const CONFIG_FILE: &str = "run.yaml";

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Reuse a non-empty run directory, replacing files written here
    pub overwrite: bool,
    pub nproc: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            overwrite: false,
            nproc: 1,
        }
    }
}

/// A run directory holding everything the solver and input writer need.
#[derive(Debug, Clone)]
pub struct PreparedRun {
    pub run_dir: PathBuf,
    pub mesh_path: PathBuf,
    pub forcing_path: PathBuf,
    pub config_path: PathBuf,
    pub forcing: TidalForcingSpec,
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    Executed {
        prepared: PreparedRun,
        program: PathBuf,
        outputs: Vec<OutputKind>,
    },
    /// No solver available; inputs were written for a later run.
    WrittenOnly { prepared: PreparedRun },
}

impl RunOutcome {
    pub fn prepared(&self) -> &PreparedRun {
        match self {
            RunOutcome::Executed { prepared, .. } | RunOutcome::WrittenOnly { prepared } => prepared,
        }
    }
}

/// Resolve the configured constituents into a forcing selection.
pub fn build_selection(config: &RunConfig) -> DriverResult<ActiveForcingSelection<'static>> {
    Ok(ActiveForcingSelection::from_names(&config.constituents)?)
}

pub fn prepare_run(config: &RunConfig, run_dir: &Path, overwrite: bool) -> DriverResult<PreparedRun> {
    validate_config(config)?;

    if run_dir.exists() && fs::read_dir(run_dir)?.next().is_some() && !overwrite {
        return Err(DriverError::RunDirNotEmpty {
            path: run_dir.to_path_buf(),
        });
    }

    if !config.mesh.is_file() {
        return Err(DriverError::MeshNotFound {
            path: config.mesh.clone(),
        });
    }
    if let Some(expected) = &config.mesh_sha256 {
        verify_checksum(&config.mesh, expected)?;
    }

    fs::create_dir_all(run_dir)?;

    let mesh_path = run_dir.join(MESH_FILE);
    if is_same_file(&config.mesh, &mesh_path) {
        debug!(mesh = %mesh_path.display(), "mesh already in run directory");
    } else {
        fs::copy(&config.mesh, &mesh_path)?;
    }

    let forcing = build_selection(config)?.forcing_spec();
    let forcing_path = run_dir.join(FORCING_FILE);
    fs::write(&forcing_path, forcing.to_json_pretty()?)?;

    let mut resolved = config.clone();
    resolved.mesh = PathBuf::from(MESH_FILE);
    let config_path = run_dir.join(CONFIG_FILE);
    save_config(&config_path, &resolved)?;

    info!(
        run_dir = %run_dir.display(),
        constituents = forcing.constituents.len(),
        days = config.run_days(),
        "run directory prepared"
    );

    Ok(PreparedRun {
        run_dir: run_dir.to_path_buf(),
        mesh_path,
        forcing_path,
        config_path,
        forcing,
    })
}

// Copying a file onto itself truncates it.
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Run the solver in a prepared directory and report which outputs it wrote.
pub fn execute(prepared: &PreparedRun, launcher: &Launcher) -> DriverResult<Vec<OutputKind>> {
    let program = launcher.program().to_path_buf();
    info!(program = %program.display(), run_dir = %prepared.run_dir.display(), "launching solver");

    let status = launcher
        .command(&prepared.run_dir)
        .status()
        .map_err(|e| DriverError::Launch {
            program: program.clone(),
            source: e,
        })?;

    if !status.success() {
        return Err(DriverError::ProcessFailed { program, status });
    }
    Ok(available_outputs(&prepared.run_dir))
}

pub fn run(config: &RunConfig, run_dir: &Path, options: RunOptions) -> DriverResult<RunOutcome> {
    run_with(config, run_dir, options, find_launcher(options.nproc))
}

pub fn run_with(
    config: &RunConfig,
    run_dir: &Path,
    options: RunOptions,
    launcher: Option<Launcher>,
) -> DriverResult<RunOutcome> {
    let prepared = prepare_run(config, run_dir, options.overwrite)?;

    match launcher {
        Some(launcher) => {
            let outputs = execute(&prepared, &launcher)?;
            Ok(RunOutcome::Executed {
                prepared,
                program: launcher.program().to_path_buf(),
                outputs,
            })
        }
        None => {
            warn!("ADCIRC binaries were not found in PATH; wrote input files only");
            Ok(RunOutcome::WrittenOnly { prepared })
        }
    }
}

/// Output kinds whose file exists in a run directory.
pub fn available_outputs(run_dir: &Path) -> Vec<OutputKind> {
    OutputKind::ALL
        .into_iter()
        .filter(|kind| run_dir.join(kind.file_name()).is_file())
        .collect()
}

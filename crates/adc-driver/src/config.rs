//! Run configuration file format and validation.

use std::path::{Path, PathBuf};

use adc_core::constants::{SECONDS_PER_DAY, SECONDS_PER_MINUTE};
use adc_core::{ensure_finite, nearly_equal, Tolerances};
use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::checksum::is_sha256_hex;
use crate::error::{DriverError, DriverResult};
use crate::run_service::build_selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GwceSolutionScheme {
    SemiImplicitLegacy,
    #[default]
    SemiImplicit,
    Explicit,
}

/// Surface output request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputRequest {
    pub sampling_minutes: f64,
}

impl OutputRequest {
    pub fn sampling_s(&self) -> f64 {
        self.sampling_minutes * SECONDS_PER_MINUTE
    }

    /// Time steps between written records.
    pub fn spool(&self, timestep_s: f64) -> usize {
        (self.sampling_s() / timestep_s).round() as usize
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Mesh file, copied into the run directory as `fort.14`
    pub mesh: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh_sha256: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub timestep_s: f64,
    #[serde(default)]
    pub dramp_days: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toutge: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toutgv: Option<f64>,
    #[serde(default = "default_smagorinsky")]
    pub smagorinsky: bool,
    #[serde(default = "default_horizontal_mixing_coefficient")]
    pub horizontal_mixing_coefficient: f64,
    #[serde(default)]
    pub gwce_solution_scheme: GwceSolutionScheme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_output: Option<OutputRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity_output: Option<OutputRequest>,
    /// Tidal constituents to force with, in order
    #[serde(default)]
    pub constituents: Vec<String>,
}

fn default_smagorinsky() -> bool {
    true
}

fn default_horizontal_mixing_coefficient() -> f64 {
    10.0
}

impl RunConfig {
    pub fn duration(&self) -> TimeDelta {
        self.end_date - self.start_date
    }

    pub fn run_days(&self) -> f64 {
        self.duration().num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY
    }

    /// Mesh path with relative paths resolved against `base`.
    pub fn resolved_mesh(&self, base: &Path) -> PathBuf {
        if self.mesh.is_relative() {
            base.join(&self.mesh)
        } else {
            self.mesh.clone()
        }
    }
}

/// Load a run configuration from YAML.
///
/// A relative mesh path is resolved against the directory holding the file.
pub fn load_config(path: &Path) -> DriverResult<RunConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DriverError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut config: RunConfig = serde_yaml::from_str(&content)
        .map_err(|e| DriverError::ConfigParse(format!("{}: {}", path.display(), e)))?;

    if let Some(dir) = path.parent() {
        config.mesh = config.resolved_mesh(dir);
    }
    Ok(config)
}

pub fn save_config(path: &Path, config: &RunConfig) -> DriverResult<()> {
    let content = serde_yaml::to_string(config)
        .map_err(|e| DriverError::ConfigParse(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(path, content).map_err(|e| DriverError::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

pub fn validate_config(config: &RunConfig) -> DriverResult<()> {
    let dt = ensure_finite(config.timestep_s, "timestep")?;
    if dt <= 0.0 {
        return Err(DriverError::Validation(format!(
            "timestep must be positive, got {dt}"
        )));
    }

    if config.end_date <= config.start_date {
        return Err(DriverError::Validation(format!(
            "end date {} must be after start date {}",
            config.end_date, config.start_date
        )));
    }

    if ensure_finite(config.dramp_days, "ramp duration")? < 0.0 {
        return Err(DriverError::Validation(
            "ramp duration must not be negative".to_string(),
        ));
    }

    if ensure_finite(config.horizontal_mixing_coefficient, "horizontal mixing")? < 0.0 {
        return Err(DriverError::Validation(
            "horizontal mixing coefficient must not be negative".to_string(),
        ));
    }

    for (what, request) in [
        ("elevation", &config.elevation_output),
        ("velocity", &config.velocity_output),
    ] {
        if let Some(request) = request {
            validate_output_request(what, request, dt)?;
        }
    }

    if let Some(hash) = &config.mesh_sha256
        && !is_sha256_hex(hash.trim())
    {
        return Err(DriverError::Validation(format!(
            "mesh_sha256 must be 64 hex characters, got '{hash}'"
        )));
    }

    build_selection(config)?;
    Ok(())
}

fn validate_output_request(what: &str, request: &OutputRequest, dt: f64) -> DriverResult<()> {
    let sampling = ensure_finite(request.sampling_s(), "output sampling")?;
    if sampling < dt {
        return Err(DriverError::Validation(format!(
            "{what} output sampling ({sampling} s) is shorter than the timestep ({dt} s)"
        )));
    }
    let steps = sampling / dt;
    let tol = Tolerances {
        abs: 1e-9,
        rel: 1e-9,
    };
    if !nearly_equal(steps, steps.round(), tol) {
        return Err(DriverError::Validation(format!(
            "{what} output sampling ({sampling} s) is not a multiple of the timestep ({dt} s)"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHINNECOCK: &str = r#"
mesh: fort.14
start_date: 2015-12-14T00:00:00
end_date: 2015-12-19T00:00:00
timestep_s: 6.0
dramp_days: 2.0
toutge: 3.8
toutgv: 3.8
smagorinsky: false
horizontal_mixing_coefficient: 5.0
gwce_solution_scheme: semi-implicit-legacy
elevation_output:
  sampling_minutes: 30
velocity_output:
  sampling_minutes: 30
constituents: [M2, N2, S2, K1, O1]
"#;

    fn shinnecock() -> RunConfig {
        serde_yaml::from_str(SHINNECOCK).unwrap()
    }

    #[test]
    fn parses_full_config() {
        let config = shinnecock();
        assert_eq!(config.gwce_solution_scheme, GwceSolutionScheme::SemiImplicitLegacy);
        assert!(!config.smagorinsky);
        assert_eq!(config.constituents, ["M2", "N2", "S2", "K1", "O1"]);
        assert_eq!(config.run_days(), 5.0);
        assert_eq!(config.elevation_output.unwrap().spool(config.timestep_s), 300);
        validate_config(&config).unwrap();
    }

    #[test]
    fn defaults_apply() {
        let config: RunConfig = serde_yaml::from_str(
            "mesh: m.14\nstart_date: 2020-01-01T00:00:00\nend_date: 2020-01-02T00:00:00\ntimestep_s: 2.0\n",
        )
        .unwrap();
        assert!(config.smagorinsky);
        assert_eq!(config.horizontal_mixing_coefficient, 10.0);
        assert_eq!(config.gwce_solution_scheme, GwceSolutionScheme::SemiImplicit);
        assert!(config.constituents.is_empty());
        validate_config(&config).unwrap();
    }

    #[test]
    fn rejects_reversed_dates() {
        let mut config = shinnecock();
        std::mem::swap(&mut config.start_date, &mut config.end_date);
        assert!(matches!(
            validate_config(&config),
            Err(DriverError::Validation(_))
        ));
    }

    #[test]
    fn rejects_sampling_off_timestep() {
        let mut config = shinnecock();
        config.timestep_s = 7.0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("not a multiple"));
    }

    #[test]
    fn rejects_unknown_constituent() {
        let mut config = shinnecock();
        config.constituents.push("m2".to_string());
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, DriverError::Tides(_)));
        assert_eq!(err.to_string(), "Unknown tidal constituent: m2");
    }

    #[test]
    fn rejects_malformed_checksum() {
        let mut config = shinnecock();
        config.mesh_sha256 = Some("abc".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn relative_mesh_resolves_against_base() {
        let config = shinnecock();
        assert_eq!(
            config.resolved_mesh(Path::new("/data/shinnecock")),
            PathBuf::from("/data/shinnecock/fort.14")
        );
    }
}

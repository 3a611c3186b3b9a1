use adc_driver::*;
use adc_outputs::OutputKind;
use adc_tides::TidalForcingSpec;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn config_with_mesh(dir: &Path) -> RunConfig {
    let mesh = dir.join("shinnecock.14");
    fs::write(&mesh, "Shinnecock Inlet\n0 0\n").unwrap();

    let start = NaiveDate::from_ymd_opt(2015, 12, 14)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    RunConfig {
        mesh,
        mesh_sha256: None,
        start_date: start,
        end_date: start + chrono::TimeDelta::days(5),
        timestep_s: 6.0,
        dramp_days: 2.0,
        toutge: Some(3.8),
        toutgv: Some(3.8),
        smagorinsky: false,
        horizontal_mixing_coefficient: 5.0,
        gwce_solution_scheme: GwceSolutionScheme::SemiImplicitLegacy,
        elevation_output: Some(OutputRequest {
            sampling_minutes: 30.0,
        }),
        velocity_output: Some(OutputRequest {
            sampling_minutes: 30.0,
        }),
        constituents: ["M2", "N2", "S2", "K1", "O1"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

#[test]
fn writes_inputs_when_no_solver_is_available() {
    let dir = scratch("adc_driver_written_only");
    let config = config_with_mesh(&dir);
    let run_dir = dir.join("run");

    let outcome = run_with(&config, &run_dir, RunOptions::default(), None).unwrap();
    assert!(matches!(outcome, RunOutcome::WrittenOnly { .. }));

    let prepared = outcome.prepared();
    assert!(prepared.mesh_path.is_file());

    let forcing =
        TidalForcingSpec::from_json(&fs::read_to_string(&prepared.forcing_path).unwrap()).unwrap();
    let names: Vec<_> = forcing.constituents.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["M2", "N2", "S2", "K1", "O1"]);

    let saved = load_config(&prepared.config_path).unwrap();
    assert_eq!(saved.mesh, run_dir.join("fort.14"));
    assert_eq!(saved.constituents, config.constituents);
    assert_eq!(saved.start_date, config.start_date);
}

#[test]
fn refuses_non_empty_run_dir_without_overwrite() {
    let dir = scratch("adc_driver_overwrite");
    let config = config_with_mesh(&dir);
    let run_dir = dir.join("run");

    prepare_run(&config, &run_dir, false).unwrap();
    let err = prepare_run(&config, &run_dir, false).unwrap_err();
    assert!(matches!(err, DriverError::RunDirNotEmpty { .. }));

    prepare_run(&config, &run_dir, true).unwrap();
}

#[test]
fn reprepare_from_saved_config_keeps_mesh() {
    let dir = scratch("adc_driver_reprepare");
    let config = config_with_mesh(&dir);
    let run_dir = dir.join("run");

    let first = prepare_run(&config, &run_dir, false).unwrap();
    let mesh_before = fs::read(&first.mesh_path).unwrap();
    assert!(!mesh_before.is_empty());

    let saved = load_config(&first.config_path).unwrap();
    let second = prepare_run(&saved, &run_dir, true).unwrap();
    assert_eq!(fs::read(&second.mesh_path).unwrap(), mesh_before);
}

#[test]
fn unknown_constituent_fails_before_writing() {
    let dir = scratch("adc_driver_unknown_constituent");
    let mut config = config_with_mesh(&dir);
    config.constituents.push("X7".to_string());
    let run_dir = dir.join("run");

    let err = prepare_run(&config, &run_dir, false).unwrap_err();
    assert!(matches!(err, DriverError::Tides(_)));
    assert!(!run_dir.exists());
}

#[test]
fn mesh_checksum_is_enforced() {
    let dir = scratch("adc_driver_checksum");
    let mut config = config_with_mesh(&dir);
    let digest = sha256_file(&config.mesh).unwrap();

    config.mesh_sha256 = Some("f".repeat(64));
    let err = prepare_run(&config, &dir.join("bad"), false).unwrap_err();
    assert!(matches!(err, DriverError::ChecksumMismatch { .. }));

    config.mesh_sha256 = Some(digest);
    prepare_run(&config, &dir.join("good"), false).unwrap();
}

#[test]
fn missing_mesh_is_reported() {
    let dir = scratch("adc_driver_missing_mesh");
    let mut config = config_with_mesh(&dir);
    config.mesh = dir.join("nope.14");

    let err = prepare_run(&config, &dir.join("run"), false).unwrap_err();
    assert!(matches!(err, DriverError::MeshNotFound { .. }));
}

#[cfg(unix)]
#[test]
fn launches_serial_solver_from_path() {
    use std::os::unix::fs::PermissionsExt;

    let dir = scratch("adc_driver_launch");
    let bin = dir.join("bin");
    fs::create_dir_all(&bin).unwrap();

    let script = bin.join("adcirc");
    fs::write(
        &script,
        "#!/bin/sh\nprintf 'elev\\n1 1 60.0 10 1\\n60.0 10\\n1 0.5\\n' > fort.63\n",
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let launcher = find_launcher_in(bin.as_os_str(), 2).unwrap();
    assert_eq!(
        launcher,
        Launcher::Serial {
            adcirc: script.clone()
        }
    );

    let config = config_with_mesh(&dir);
    let outcome = run_with(&config, &dir.join("run"), RunOptions::default(), Some(launcher)).unwrap();
    match outcome {
        RunOutcome::Executed { outputs, program, .. } => {
            assert_eq!(program, script);
            assert_eq!(outputs, [OutputKind::ElevationSurface]);
        }
        other => panic!("expected execution, got {other:?}"),
    }

    let failing = bin.join("failing");
    fs::write(&failing, "#!/bin/sh\nexit 3\n").unwrap();
    fs::set_permissions(&failing, fs::Permissions::from_mode(0o755)).unwrap();
    let launcher = Launcher::Serial { adcirc: failing };
    let err = run_with(
        &config,
        &dir.join("run_failing"),
        RunOptions::default(),
        Some(launcher),
    )
    .unwrap_err();
    assert!(matches!(err, DriverError::ProcessFailed { .. }));
}

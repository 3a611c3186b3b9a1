use adc_driver::{
    DriverResult, RunOptions, RunOutcome, load_config, prepare_run, run, validate_config,
};
use adc_outputs::{OutputKind, SurfaceOutput};
use adc_tides::{ORBITAL_FREQUENCY_UNITS, TidalSpecies, audit_tidal_potentials, registry};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "adc-cli")]
#[command(about = "ADCIRC toolkit - tidal forcing setup, run driver and output inspection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List known tidal constituents
    Constituents {
        /// Only list one species (e.g. diurnal, semidiurnal, long-period)
        #[arg(long)]
        species: Option<TidalSpecies>,
        /// Report suspicious tidal potential entries
        #[arg(long)]
        audit: bool,
    },
    /// Show the constants of one constituent
    Show {
        /// Constituent name (case-sensitive, e.g. M2)
        name: String,
    },
    /// Validate a run configuration file
    Validate {
        /// Path to the run YAML file
        config_path: PathBuf,
    },
    /// Write the run directory without launching the solver
    Write {
        /// Path to the run YAML file
        config_path: PathBuf,
        /// Run directory to create
        out_dir: PathBuf,
        /// Reuse a non-empty run directory
        #[arg(long)]
        overwrite: bool,
    },
    /// Write the run directory and launch ADCIRC if it is on PATH
    Run {
        /// Path to the run YAML file
        config_path: PathBuf,
        /// Run directory to create
        out_dir: PathBuf,
        /// Reuse a non-empty run directory
        #[arg(long)]
        overwrite: bool,
        /// MPI process count for padcirc
        #[arg(long, default_value_t = 1)]
        nproc: usize,
    },
    /// Summarize an output file of a finished run
    Inspect {
        /// Run directory
        run_dir: PathBuf,
        /// Output file type (fort63, maxele, time_of_maxvel, ...)
        kind: OutputKind,
    },
}

fn main() -> DriverResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Constituents { species, audit } => cmd_constituents(species, audit),
        Commands::Show { name } => cmd_show(&name),
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Write {
            config_path,
            out_dir,
            overwrite,
        } => cmd_write(&config_path, &out_dir, overwrite),
        Commands::Run {
            config_path,
            out_dir,
            overwrite,
            nproc,
        } => cmd_run(&config_path, &out_dir, RunOptions { overwrite, nproc }),
        Commands::Inspect { run_dir, kind } => cmd_inspect(&run_dir, kind),
    }
}

fn cmd_constituents(species: Option<TidalSpecies>, audit: bool) -> DriverResult<()> {
    println!(
        "{:<8} {:>20} {:>8} {:>12}  potential",
        "name",
        format!("frequency ({ORBITAL_FREQUENCY_UNITS})"),
        "doodson",
        "period (h)"
    );
    for record in registry().records() {
        if species.is_some_and(|s| record.species() != Some(s)) {
            continue;
        }
        let potential = match record.tidal_potential {
            Some(p) => format!("{} m x {}", p.amplitude, p.reduction_factor),
            None => "-".to_string(),
        };
        println!(
            "{:<8} {:>20.16} {:>8} {:>12.4}  {}",
            record.name,
            record.orbital_frequency,
            record.doodson_coefficient,
            record.period_hours(),
            potential
        );
    }

    if audit {
        let findings = audit_tidal_potentials(registry());
        if findings.is_empty() {
            println!("\n✓ No suspicious tidal potential entries");
        } else {
            println!("\nTidal potential audit:");
            for finding in findings {
                println!("  ! {}", finding);
            }
        }
    }
    Ok(())
}

fn cmd_show(name: &str) -> DriverResult<()> {
    let record = registry().lookup(name)?;
    println!("Constituent: {}", record.name);
    println!(
        "  Orbital frequency: {} {}",
        record.orbital_frequency, ORBITAL_FREQUENCY_UNITS
    );
    println!("  Speed:             {:.7} deg/h", record.speed());
    println!("  Period:            {:.4} h", record.period_hours());
    println!("  Doodson number:    {}", record.doodson_coefficient);
    if let Some(species) = record.species() {
        println!("  Species:           {}", species);
    }
    match record.tidal_potential {
        Some(p) => {
            println!("  Potential amplitude: {} m", p.amplitude);
            println!("  Reduction factor:    {}", p.reduction_factor);
        }
        None => println!("  No equilibrium tidal potential data"),
    }
    Ok(())
}

fn cmd_validate(config_path: &Path) -> DriverResult<()> {
    println!("Validating run config: {}", config_path.display());
    let config = load_config(config_path)?;
    validate_config(&config)?;
    println!("✓ Config is valid");
    println!("  Mesh: {}", config.mesh.display());
    println!(
        "  Period: {} to {} ({:.2} days)",
        config.start_date,
        config.end_date,
        config.run_days()
    );
    if config.constituents.is_empty() {
        println!("  Tidal forcing: off");
    } else {
        println!("  Tidal forcing: {}", config.constituents.join(", "));
    }
    Ok(())
}

fn cmd_write(config_path: &Path, out_dir: &Path, overwrite: bool) -> DriverResult<()> {
    let config = load_config(config_path)?;
    let prepared = prepare_run(&config, out_dir, overwrite)?;
    println!("✓ Wrote run directory: {}", prepared.run_dir.display());
    println!("  Mesh:    {}", prepared.mesh_path.display());
    println!("  Forcing: {}", prepared.forcing_path.display());
    println!("  Config:  {}", prepared.config_path.display());
    Ok(())
}

fn cmd_run(config_path: &Path, out_dir: &Path, options: RunOptions) -> DriverResult<()> {
    let config = load_config(config_path)?;
    match run(&config, out_dir, options)? {
        RunOutcome::Executed {
            prepared,
            program,
            outputs,
        } => {
            println!("✓ {} finished in {}", program.display(), prepared.run_dir.display());
            if outputs.is_empty() {
                println!("  No output files found");
            }
            for kind in outputs {
                println!("  {:<16} {}", kind.tag(), kind.description());
            }
        }
        RunOutcome::WrittenOnly { prepared } => {
            println!("ADCIRC binaries were not found in PATH; ADCIRC was not run.");
            println!("✓ Input files written to {}", prepared.run_dir.display());
        }
    }
    Ok(())
}

fn cmd_inspect(run_dir: &Path, kind: OutputKind) -> DriverResult<()> {
    let output = SurfaceOutput::open(run_dir, kind)?;
    let header = output.header();

    println!("{} ({})", kind.description(), kind.file_name());
    println!("  Title:    {}", header.title);
    println!("  Points:   {}", header.n_points);
    println!(
        "  Datasets: {} of {} announced",
        output.datasets().len(),
        header.n_datasets
    );

    let dataset = output.values()?;
    println!("  Record time: {:.1} s (step {})", dataset.time_s, dataset.iteration);
    match dataset.extrema() {
        Some((lo, hi)) => println!("  Range: {:.4} .. {:.4}", lo, hi),
        None => println!("  Range: all points dry"),
    }
    println!("  Dry points: {}", dataset.dry_count());
    Ok(())
}

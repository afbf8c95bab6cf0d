//! Command-line front-end for the fpsim simulation engine

use std::fs::File;
use std::io::{BufReader, BufWriter, Write, stdout};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use fpsim_core::calibration::{CalibFlags, Calibration, CalibrationData, FitConfig};
use fpsim_core::interventions::ScenarioSpec;
use fpsim_core::locations;
use fpsim_core::scenarios::Scenarios;
use fpsim_core::simulation::Sim;

#[derive(Parser, Debug)]
#[command(name = "fpsim")]
#[command(about = "Individual-based contraceptive-choice and fertility simulator")]
struct Args {
    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a single simulation and print a summary
    Run {
        /// Built-in location parameter set
        #[arg(long, default_value = "kenya")]
        location: String,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        agents: Option<usize>,
        /// Write the full result (including per-agent state) as JSON
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run intervention scenarios from a JSON specification file
    Scenarios {
        #[arg(long, default_value = "kenya")]
        location: String,
        /// JSON file holding an array of scenario specifications
        #[arg(long)]
        file: PathBuf,
        #[arg(long, default_value_t = 3)]
        repeats: usize,
        /// Default intervention year for scenarios without their own
        #[arg(long)]
        year: Option<f64>,
        /// Analysis window start (defaults to the intervention year)
        #[arg(long)]
        from: Option<f64>,
        /// Analysis window end (defaults to the end of the simulation)
        #[arg(long)]
        to: Option<f64>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Calibrate a location against reference data and print the mismatch
    Calibrate {
        #[arg(long, default_value = "kenya")]
        location: String,
        /// JSON file holding the parsed reference tables
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct RunSummary {
    location: String,
    seed: u64,
    total_births: u64,
    total_deaths: u64,
    final_pop_size: f64,
    final_mcpr: f64,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(&args.log_level);

    match args.command {
        Command::Run {
            location,
            seed,
            agents,
            output,
        } => run(&location, seed, agents, output),
        Command::Scenarios {
            location,
            file,
            repeats,
            year,
            from,
            to,
            output,
        } => run_scenarios(&location, &file, repeats, year, from, to, output),
        Command::Calibrate {
            location,
            data,
            output,
        } => calibrate(&location, &data, output),
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(
    location: &str,
    seed: Option<u64>,
    agents: Option<usize>,
    output: Option<PathBuf>,
) -> color_eyre::Result<()> {
    let mut pars = locations::make_pars(location)?;
    if let Some(seed) = seed {
        pars.seed = seed;
    }
    if let Some(agents) = agents {
        pars.n_agents = agents;
    }

    tracing::info!(location, seed = pars.seed, agents = pars.n_agents, "starting run");
    let result = Sim::new(pars, vec![])?.run()?;

    let summary = RunSummary {
        location: location.to_string(),
        seed: result.seed,
        total_births: result.total_births(),
        total_deaths: result.deaths.iter().map(|&d| u64::from(d)).sum(),
        final_pop_size: result.pop_size.last().copied().unwrap_or(0.0),
        final_mcpr: result.mcpr.last().copied().unwrap_or(0.0),
    };
    write_json(&summary, None)?;

    if let Some(path) = output {
        write_json(&result, Some(path.as_path()))?;
        tracing::info!(path = %path.display(), "full result written");
    }
    Ok(())
}

fn run_scenarios(
    location: &str,
    file: &PathBuf,
    repeats: usize,
    year: Option<f64>,
    from: Option<f64>,
    to: Option<f64>,
    output: Option<PathBuf>,
) -> color_eyre::Result<()> {
    let pars = locations::make_pars(location)?;
    let end_year = f64::from(pars.end_year);

    let reader = BufReader::new(File::open(file)?);
    let specs: Vec<ScenarioSpec> = serde_json::from_reader(reader)?;

    let mut scens = Scenarios::new(pars, repeats, year);
    for spec in specs {
        scens.add_scen(spec, None);
    }

    let results = scens.run()?;
    let start = from.or(year).unwrap_or(end_year - 10.0);
    let end = to.unwrap_or(end_year);
    let summaries = results.analyze(start, end);

    write_json(&summaries, output.as_deref())?;
    Ok(())
}

#[derive(Serialize)]
struct CalibrationSummary {
    mismatch: f64,
    mismatches: std::collections::BTreeMap<String, f64>,
}

fn calibrate(location: &str, data: &PathBuf, output: Option<PathBuf>) -> color_eyre::Result<()> {
    let pars = locations::make_pars(location)?;
    let reader = BufReader::new(File::open(data)?);
    let data: CalibrationData = serde_json::from_reader(reader)?;

    let calib = Calibration::new(pars, data, CalibFlags::default());
    let results = calib.run()?;
    let fit = results.compute_fit(FitConfig::default())?;

    let summary = CalibrationSummary {
        mismatch: fit.mismatch,
        mismatches: fit.mismatches.iter().map(|(k, v)| (k.clone(), *v)).collect(),
    };
    write_json(&summary, output.as_deref())?;
    Ok(())
}

fn write_json<T: Serialize>(value: &T, path: Option<&std::path::Path>) -> color_eyre::Result<()> {
    match path {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush()?;
        }
        None => {
            let mut out = stdout().lock();
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

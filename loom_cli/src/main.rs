//! # Loomcalc CLI
//!
//! Terminal front end for the production calculation engine. Builds a
//! `ProductionInputs` record from a JSON file and/or flags, runs the
//! orchestrator and the pile-height sweep, and prints a report.
//!
//! ```text
//! loom                                  # reference quality, text report
//! loom --input run.json --json          # full results as JSON
//! loom --pile-height 7 --colors 6 -v    # overrides with debug logging
//! ```

mod report;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

use loom_core::calculations::{cost, optimization};
use loom_core::{orchestrate, CalcError, PlannerSettings, ProductionInputs};

use crate::report::Report;

#[derive(Parser, Debug)]
#[command(name = "loom")]
#[command(version, about = "Yarn consumption, time, creel and cost planner for face-to-face carpet")]
struct Cli {
    /// Production inputs as JSON (defaults to the reference quality)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Planner settings as JSON (sweep step, step count, sale markup)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Override pile height (mm)
    #[arg(long)]
    pile_height: Option<f64>,

    /// Override total length to weave (m)
    #[arg(long)]
    length: Option<f64>,

    /// Override carpet width (m)
    #[arg(long)]
    width: Option<f64>,

    /// Override number of colors
    #[arg(long)]
    colors: Option<u32>,

    /// Sale price per m² for the margin preview (defaults to cost × markup)
    #[arg(long)]
    sale_price: Option<f64>,

    /// Print results as JSON instead of a text report
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("Cannot read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Calc(#[from] CalcError),
}

/// Install the log subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })
}

fn load_inputs(cli: &Cli) -> Result<ProductionInputs, CliError> {
    let mut inputs = match &cli.input {
        Some(path) => {
            let json = read_file(path)?;
            serde_json::from_str(&json).map_err(|source| CliError::Parse {
                path: path.display().to_string(),
                source,
            })?
        }
        None => ProductionInputs::default(),
    };

    if let Some(pile_height) = cli.pile_height {
        inputs.pile_height_mm = pile_height;
    }
    if let Some(length) = cli.length {
        inputs.length_m = length;
    }
    if let Some(width) = cli.width {
        inputs.width_m = width;
    }
    if let Some(colors) = cli.colors {
        inputs.color_count = colors;
    }
    Ok(inputs)
}

fn load_settings(cli: &Cli) -> Result<PlannerSettings, CliError> {
    match &cli.settings {
        Some(path) => Ok(PlannerSettings::from_json_str(&read_file(path)?)?),
        None => Ok(PlannerSettings::default()),
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let inputs = load_inputs(cli)?;
    let settings = load_settings(cli)?;
    tracing::debug!(?settings, "planner settings loaded");

    let results = orchestrate(&inputs)?;
    let sweep = optimization::simulate(
        &inputs.optimization_input(settings.optimization_step_mm, settings.optimization_steps)?,
    )?;
    let sale_price = cli
        .sale_price
        .unwrap_or_else(|| settings.suggested_sale_price(results.cost.cost_per_m2));
    let margin = cost::calculate_margin(&results.cost, inputs.area_m2(), sale_price)?;

    let report = Report::new(&inputs, &results, &margin, &sweep);

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!("failed to serialize report: {}", e),
        }
    } else {
        print!("{}", report);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let CliError::Calc(calc) = &e {
                if let Ok(json) = serde_json::to_string_pretty(calc) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["loom", "--pile-height", "7", "--colors", "6", "--width", "3.5"]);
        let inputs = load_inputs(&cli).unwrap();
        assert_eq!(inputs.pile_height_mm, 7.0);
        assert_eq!(inputs.color_count, 6);
        assert_eq!(inputs.width_m, 3.5);
        assert_eq!(inputs.length_m, ProductionInputs::default().length_m);
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::parse_from(["loom", "-vv", "--json"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
        assert!(cli.sale_price.is_none());
    }

    #[test]
    fn test_missing_input_file() {
        let cli = Cli::parse_from(["loom", "--input", "/nonexistent/loom-inputs.json"]);
        let err = load_inputs(&cli).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }

    #[test]
    fn test_engine_error_propagates() {
        let cli = Cli::parse_from(["loom", "--length", "0"]);
        let err = run(&cli).unwrap_err();
        match err {
            CliError::Calc(calc) => assert_eq!(calc.field(), "length_m"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_nan_flags_rejected() {
        let cli = Cli::parse_from(["loom", "--width", "NaN"]);
        match run(&cli).unwrap_err() {
            CliError::Calc(calc) => assert_eq!(calc.field(), "width_m"),
            other => panic!("unexpected error: {other}"),
        }

        let cli = Cli::parse_from(["loom", "--sale-price", "NaN"]);
        match run(&cli).unwrap_err() {
            CliError::Calc(calc) => assert_eq!(calc.field(), "sale_price_per_m2"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

mod curves;
mod report;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use qre_core::{Registry, compare_codes_with, evaluate, solve_for_n_with};
use qre_io::config::EstimatorConfig;
use qre_io::parser::{parse_count, parse_probability, parse_quantity};
use std::path::PathBuf;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "qre")]
#[command(version)]
#[command(about = "Physical-qubit resource estimates for quantum error correction codes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML file overriding solver, curve and slider tunables
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the registered codes
    Codes,

    /// Logical error rate of a code at a given qubit budget
    Eval {
        #[arg(long)]
        code: String,
        #[arg(short, long, value_parser = parse_probability)]
        p: f64,
        #[arg(short, long, value_parser = parse_count)]
        n: u64,
        #[arg(short, long, default_value = "1", value_parser = parse_count)]
        k: u64,
    },

    /// Physical qubits needed to reach a target logical error rate
    Solve {
        #[arg(long)]
        code: String,
        #[arg(short, long, value_parser = parse_probability)]
        p: f64,
        #[arg(short, long, default_value = "1", value_parser = parse_count)]
        k: u64,
        /// Target logical error rate, or a quop regime such as `mega`
        #[arg(short, long, value_parser = parse_probability)]
        target: f64,
    },

    /// Required physical qubits versus physical error rate
    Curve {
        #[arg(long, required_unless_present = "all", conflicts_with = "all")]
        code: Option<String>,
        /// Sample every registered code concurrently
        #[arg(long)]
        all: bool,
        #[arg(short, long, value_parser = parse_probability)]
        target: f64,
        #[arg(short, long, default_value = "1", value_parser = parse_count)]
        k: u64,
    },

    /// Compare every code at one operating point
    Table {
        #[arg(short, long, value_parser = parse_probability)]
        p: f64,
        #[arg(short, long, default_value = "1", value_parser = parse_count)]
        k: u64,
        #[arg(short, long, value_parser = parse_probability)]
        target: f64,
    },

    /// Map between slider positions and logarithmic values
    Scale {
        /// Use the configured bounds of a named slider
        #[arg(long, value_enum)]
        slider: Option<Slider>,
        #[arg(long, value_parser = parse_quantity, required_unless_present = "slider")]
        min: Option<f64>,
        #[arg(long, value_parser = parse_quantity, required_unless_present = "slider")]
        max: Option<f64>,
        /// Value to convert into a 0..100 position
        #[arg(long, value_parser = parse_quantity, conflicts_with = "position")]
        value: Option<f64>,
        /// Position in 0..100 to convert into a value
        #[arg(long, required_unless_present = "value")]
        position: Option<f64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Slider {
    PhysicalErrorRate,
    PhysicalQubits,
    LogicalErrorRate,
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let config =
        EstimatorConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(path) = &cli.config {
        info!(path = %path.display(), "Loaded configuration");
    }

    let registry = Registry::standard();

    match cli.command {
        Commands::Codes => report::print_codes(&registry, cli.json)?,
        Commands::Eval { code, p, n, k } => {
            let model = registry.lookup(&code)?;
            let estimate = evaluate(model, p, n, k)?;
            if !estimate.is_below_threshold(model) {
                warn!(
                    code = model.id(),
                    p,
                    threshold = model.threshold,
                    "p is at or above threshold; the estimate does not describe suppression"
                );
            }
            report::print_estimate(model, &estimate, None, cli.json)?;
        }
        Commands::Solve { code, p, k, target } => {
            let model = registry.lookup(&code)?;
            let estimate = solve_for_n_with(model, p, k, target, &config.solver_config())
                .with_context(|| format!("Failed to solve {} at p = {p:e}", model.id()))?;
            if !estimate.meets_target(target) {
                warn!(
                    code = model.id(),
                    n = estimate.n,
                    epsilon_l = estimate.epsilon_l,
                    target,
                    "Closest candidate misses the target; consider widening the solver bracket"
                );
            }
            report::print_estimate(model, &estimate, Some(target), cli.json)?;
        }
        Commands::Curve {
            code,
            all,
            target,
            k,
        } => {
            let models = match (code, all) {
                (_, true) => registry.iter().collect(),
                (Some(id), false) => vec![registry.lookup(&id)?],
                (None, false) => bail!("either --code or --all is required"),
            };
            let sampled = curves::sample_curves(&models, target, k, &config.sampler_config())?;
            report::print_curves(&sampled, cli.json)?;
        }
        Commands::Table { p, k, target } => {
            let rows = compare_codes_with(&registry, p, k, target, &config.solver_config());
            report::print_table(&rows, p, target, cli.json)?;
        }
        Commands::Scale {
            slider,
            min,
            max,
            value,
            position,
        } => {
            let scale = match slider {
                Some(Slider::PhysicalErrorRate) => config.sliders.physical_error_rate()?,
                Some(Slider::PhysicalQubits) => config.sliders.physical_qubits()?,
                Some(Slider::LogicalErrorRate) => config.sliders.logical_error_rate()?,
                None => match (min, max) {
                    (Some(min), Some(max)) => qre_core::LogScale::new(min, max)?,
                    _ => bail!("--min and --max are required without --slider"),
                },
            };
            report::print_scale(&scale, value, position, cli.json)?;
        }
    }

    Ok(())
}

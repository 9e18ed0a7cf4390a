use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use galaxy_align_core::{ParameterInput, Session, SimulationConfig};

mod report;

/// Galaxy Align - intrinsic alignment and lensing shear of galaxy orientations
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file (defaults are used for missing keys)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the generated galaxy population
    Population {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Evaluate one parameter set and print the resulting frame
    Evaluate {
        #[command(flatten)]
        params: ParamArgs,

        /// Include orientation vectors
        #[arg(long)]
        vectors: bool,

        /// Also print the per-galaxy model terms
        #[arg(long)]
        breakdown: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the orientation histogram as a bar chart
    Histogram {
        #[command(flatten)]
        params: ParamArgs,
    },

    /// Print the effective configuration as TOML
    Config,
}

/// Alignment parameters as exposed on the command line
#[derive(Args, Debug, Clone)]
struct ParamArgs {
    /// Intrinsic-alignment strength [0, 1]
    #[arg(long, default_value_t = 0.0)]
    ia_strength: f64,

    /// Lensing shear strength [0, 1]
    #[arg(long, default_value_t = 0.0)]
    shear_strength: f64,

    /// Preferred alignment angle in degrees [0, 180]
    #[arg(long, default_value_t = 45.0)]
    preferred_angle: f64,

    /// Shear direction in degrees [0, 180]
    #[arg(long, default_value_t = 90.0)]
    shear_angle: f64,

    /// Shear pattern: uniform, radial or tangential
    #[arg(long, default_value = "uniform")]
    pattern: String,
}

impl From<ParamArgs> for ParameterInput {
    fn from(args: ParamArgs) -> Self {
        ParameterInput::new()
            .with_intrinsic(args.ia_strength, args.preferred_angle)
            .with_shear(args.shear_strength, args.shear_angle, args.pattern)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<SimulationConfig> {
    match path {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(SimulationConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_ref())?;
    tracing::debug!(?config, "effective configuration");

    match cli.command {
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
        }
        Commands::Population { json } => {
            let session = Session::new(config).context("starting session")?;
            if json {
                println!("{}", serde_json::to_string_pretty(session.population())?);
            } else {
                report::print_population(session.population());
            }
        }
        Commands::Evaluate {
            params,
            vectors,
            breakdown,
            json,
        } => {
            let session = Session::new(config).context("starting session")?;
            let input = ParameterInput::from(params);
            let frame = session.evaluate(&input, vectors).context("evaluating frame")?;
            let terms = breakdown.then(|| {
                session
                    .model()
                    .breakdown(session.population(), &input.to_parameters())
            });
            match (json, terms) {
                (true, Some(terms)) => {
                    let output = serde_json::json!({ "frame": frame, "breakdown": terms });
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                (true, None) => println!("{}", serde_json::to_string_pretty(&frame)?),
                (false, terms) => {
                    report::print_summary(&frame);
                    if let Some(terms) = terms {
                        report::print_breakdown(&terms);
                    }
                    report::print_histogram(&frame.histogram);
                }
            }
        }
        Commands::Histogram { params } => {
            let session = Session::new(config).context("starting session")?;
            let input = ParameterInput::from(params);
            let frame = session.evaluate(&input, false).context("evaluating frame")?;
            println!("{}", frame.title);
            report::print_histogram(&frame.histogram);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_evaluate_defaults_match_dashboard() {
        let cli = Cli::parse_from(["galaxy-align", "evaluate"]);
        let Commands::Evaluate {
            params,
            vectors,
            breakdown,
            json,
        } = cli.command
        else {
            panic!("expected evaluate");
        };
        assert!(!vectors);
        assert!(!breakdown);
        assert!(!json);
        assert_eq!(ParameterInput::from(params), ParameterInput::default());
    }

    #[test]
    fn test_param_flags() {
        let cli = Cli::parse_from([
            "galaxy-align",
            "--verbose",
            "histogram",
            "--ia-strength",
            "0.6",
            "--pattern",
            "radial",
            "--shear-angle",
            "30",
        ]);
        assert!(cli.verbose);
        let Commands::Histogram { params } = cli.command else {
            panic!("expected histogram");
        };
        let input = ParameterInput::from(params);
        assert_eq!(input.ia_strength, 0.6);
        assert_eq!(input.shear_angle_deg, 30.0);
        assert_eq!(input.shear_pattern, "radial");
    }

    #[test]
    fn test_breakdown_flag_lines_up_with_frame() {
        let cli = Cli::parse_from([
            "galaxy-align",
            "evaluate",
            "--breakdown",
            "--ia-strength",
            "0.5",
            "--pattern",
            "tangential",
            "--shear-strength",
            "0.3",
        ]);
        let Commands::Evaluate {
            params, breakdown, ..
        } = cli.command
        else {
            panic!("expected evaluate");
        };
        assert!(breakdown);

        let session = Session::new(SimulationConfig::new().with_galaxies(12)).unwrap();
        let input = ParameterInput::from(params);
        let frame = session.evaluate(&input, false).unwrap();
        let terms = session
            .model()
            .breakdown(session.population(), &input.to_parameters());
        let finals: Vec<f64> = terms.iter().map(|t| t.final_angle).collect();
        assert_eq!(finals.as_slice(), frame.orientations.angles());
    }
}

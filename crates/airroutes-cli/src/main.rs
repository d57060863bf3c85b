mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use airroutes_cli::output::OutputFormat;
use airroutes_lib::{load_config, GeoPoint};

use commands::route::RouteCommandArgs;

#[derive(Parser, Debug)]
#[command(author, version, about = "Airline route explorer and great-circle calculator")]
struct Cli {
    /// Override the dataset directory or routes file path.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Path to a JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List airports that have at least one outgoing route.
    Sources,
    /// List destinations reachable from a source airport.
    Destinations {
        /// Source airport code.
        #[arg(long = "from")]
        from: String,
    },
    /// Resolve a route between two airports and estimate its flight time.
    Route {
        /// Source airport code.
        #[arg(long = "from")]
        from: String,
        /// Destination airport code.
        #[arg(long = "to")]
        to: String,
        /// Cruise speed in km/h (overrides configuration).
        #[arg(long)]
        cruise_speed: Option<f64>,
        /// Multiplier for taxi, climb and descent (overrides configuration).
        #[arg(long)]
        overhead_factor: Option<f64>,
    },
    /// Great-circle distance between two LAT,LON points.
    Distance {
        /// Starting point as LAT,LON in decimal degrees.
        #[arg(long = "from", allow_hyphen_values = true)]
        from: GeoPoint,
        /// End point as LAT,LON in decimal degrees.
        #[arg(long = "to", allow_hyphen_values = true)]
        to: GeoPoint,
    },
    /// Per-country airport, route and airline counts.
    Stats {
        /// Number of countries to show per chart (overrides configuration).
        #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        top: Option<usize>,
        /// Only count active airlines.
        #[arg(long)]
        active_only: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    let target = cli.data_dir.as_deref();

    match cli.command {
        Command::Sources => commands::sources::handle_sources_command(target, cli.format),
        Command::Destinations { from } => {
            commands::destinations::handle_destinations_command(target, cli.format, &from)
        }
        Command::Route {
            from,
            to,
            cruise_speed,
            overhead_factor,
        } => {
            let args = RouteCommandArgs {
                from,
                to,
                cruise_speed,
                overhead_factor,
            };
            commands::route::handle_route_command(target, &config, cli.format, &args)
        }
        Command::Distance { from, to } => {
            commands::distance::handle_distance_command(&config.flight, cli.format, from, to)
        }
        Command::Stats { top, active_only } => {
            commands::stats::handle_stats_command(target, &config, cli.format, top, active_only)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

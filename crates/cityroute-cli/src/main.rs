use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cityroute_cli::commands::locations::{handle_cities_command, handle_coordinates_command};
use cityroute_cli::commands::route::{handle_route_command, RouteCommandArgs};
use cityroute_cli::output::OutputFormat;
use cityroute_lib::RouteAlgorithm;

#[derive(Parser, Debug)]
#[command(author, version, about = "Shortest-path routes between cities")]
struct Cli {
    /// Override the dataset file or directory (defaults to CITYROUTE_DATA_PATH).
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest route between two cities.
    Route {
        /// Starting city name.
        #[arg(long = "from")]
        from: String,
        /// Destination city name.
        #[arg(long = "to")]
        to: String,
        /// Search algorithm.
        #[arg(long, value_enum, default_value_t = AlgorithmArg::AStar)]
        algorithm: AlgorithmArg,
        /// Only route through these cities (repeatable).
        #[arg(long = "allow", value_name = "CITY")]
        allow: Vec<String>,
        /// Record the search in the activity history under this identity.
        #[arg(long)]
        user: Option<String>,
    },
    /// List every known location.
    Cities,
    /// List city coordinates.
    Coordinates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    AStar,
    Dijkstra,
}

impl From<AlgorithmArg> for RouteAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::AStar => RouteAlgorithm::AStar,
            AlgorithmArg::Dijkstra => RouteAlgorithm::Dijkstra,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let data = cli.data.as_deref();

    match cli.command {
        Command::Route {
            from,
            to,
            algorithm,
            allow,
            user,
        } => {
            let args = RouteCommandArgs {
                from,
                to,
                algorithm: algorithm.into(),
                allow,
                user,
            };
            handle_route_command(data, &args, cli.format)
        }
        Command::Cities => handle_cities_command(data, cli.format),
        Command::Coordinates => handle_coordinates_command(data, cli.format),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

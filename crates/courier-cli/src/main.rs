use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use courier_cli::commands::{
    dispatch::{handle_dispatch, DispatchCommandArgs},
    distances::handle_distances,
    load_session,
    PresetArg,
    locations::handle_locations,
    route::handle_route,
};
use courier_cli::output::{print_logo, OutputFormat};

#[derive(Parser, Debug)]
#[command(author, version, about = "Courier dispatch and route planning")]
struct Cli {
    /// Network definition (JSON). Falls back to $COURIER_NETWORK, the user
    /// config directory, then the built-in network.
    #[arg(long, global = true)]
    network: Option<PathBuf>,

    /// Use a built-in network instead of a file.
    #[arg(long, value_enum, global = true, conflicts_with = "network")]
    network_preset: Option<PresetArg>,

    /// Extra undirected route `FROM:TO:DISTANCE`, may be repeated.
    #[arg(long = "route", value_name = "FROM:TO:DIST", global = true)]
    routes: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Suppress the banner.
    #[arg(long, global = true)]
    no_logo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the locations in the network.
    Locations,
    /// Shortest distance from one location to every other.
    Distances {
        /// Source location code or name.
        #[arg(long = "from")]
        from: String,
    },
    /// Cheapest route between two locations.
    Route {
        /// Starting location code or name.
        #[arg(long = "from")]
        from: String,
        /// Destination location code or name.
        #[arg(long = "to")]
        to: String,
    },
    /// Queue orders and deliver them in priority order.
    Dispatch {
        /// Locations open for delivery today (default: all).
        #[arg(long = "available", value_delimiter = ',')]
        available: Vec<String>,
        /// Expedited order `NAME@LOCATION`, may be repeated.
        #[arg(long = "expedited", value_name = "NAME@LOC")]
        expedited: Vec<String>,
        /// Standard order `NAME@LOCATION`, may be repeated.
        #[arg(long = "standard", value_name = "NAME@LOC")]
        standard: Vec<String>,
        /// CSV file with `name,tier,location` records.
        #[arg(long = "orders")]
        orders: Option<PathBuf>,
        /// Depot the courier leaves from.
        #[arg(long = "start")]
        start: Option<String>,
        /// Include the visited locations for each leg.
        #[arg(long)]
        show_paths: bool,
        /// Print the queue contents before dispatching.
        #[arg(long)]
        show_queue: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if !cli.no_logo && !cli.format.is_json() {
        print_logo();
    }

    let mut session = load_session(cli.network.as_deref(), cli.network_preset, &cli.routes)?;

    match cli.command {
        Command::Locations => handle_locations(&session, cli.format),
        Command::Distances { from } => handle_distances(&session, &from, cli.format),
        Command::Route { from, to } => handle_route(&session, &from, &to, cli.format),
        Command::Dispatch {
            available,
            expedited,
            standard,
            orders,
            start,
            show_paths,
            show_queue,
        } => {
            let args = DispatchCommandArgs {
                available,
                expedited,
                standard,
                orders,
                start,
                show_paths,
                show_queue,
            };
            handle_dispatch(&mut session, &args, cli.format)
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

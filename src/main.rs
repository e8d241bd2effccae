use clap::{Parser, Subcommand};
use frontline_navigator::commands::*;
use frontline_navigator::core::{
    error::{Result, ViewerError},
    output::print_error_with_hints,
    print_error,
};
use std::env;

#[derive(Parser)]
#[command(name = "frontline-navigator")]
#[command(about = "Step through dated front-line map snapshots")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Data source: base URL or local directory with base.json and dated documents
    #[arg(long, global = true)]
    data: Option<String>,

    /// Number of snapshots kept in memory
    #[arg(long, global = true)]
    cache_capacity: Option<usize>,

    /// Map zoom level used for unit icon sizes
    #[arg(long, global = true)]
    zoom: Option<u8>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every date with data
    Dates,
    /// Show the snapshot for a date (e.g. 2023-01-31)
    Show {
        date: String,
    },
    /// Step through the timeline: first, last, next, previous, next-7, previous-7
    Step {
        direction: String,
        /// Start from this date instead of the latest
        #[arg(long)]
        from: Option<String>,
    },
    /// List units whose name contains the query
    Search {
        query: String,
        /// Search on this date instead of the latest
        #[arg(long)]
        date: Option<String>,
    },
    /// Print a date's layers as GeoJSON
    Export {
        date: String,
        /// Only this layer: frontline, units, geos, fortifications, dragon-teeth
        #[arg(long)]
        layer: Option<String>,
    },
    /// Show the effective configuration
    Config {
        /// Persist the effective values, including any flags given
        #[arg(long)]
        save: bool,
    },
    /// Interactive session reading commands from stdin
    Session,
}

async fn run(command: Commands, options: &GlobalOptions) -> Result<()> {
    match command {
        Commands::Dates => execute_dates(options).await,
        Commands::Show { date } => execute_show(options, &date).await,
        Commands::Step { direction, from } => execute_step(options, &direction, from.as_deref()).await,
        Commands::Search { query, date } => execute_search(options, &query, date.as_deref()).await,
        Commands::Export { date, layer } => execute_export(options, &date, layer.as_deref()).await,
        Commands::Config { save } => execute_config(options, save),
        Commands::Session => execute_session(options).await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let options = GlobalOptions {
        data: cli.data,
        cache_capacity: cli.cache_capacity,
        zoom: cli.zoom,
    };

    if let Err(e) = run(cli.command, &options).await {
        if e.is_fatal() {
            print_error_with_hints(
                &e.to_string(),
                &["Check the data source with --data or `frontline-navigator config`"],
            );
        } else if let ViewerError::DateNotAvailable { .. } = e {
            print_error_with_hints(&e.to_string(), &["Run `frontline-navigator dates` to list them"]);
        } else {
            print_error(&e.to_string());
        }
        std::process::exit(1);
    }
}

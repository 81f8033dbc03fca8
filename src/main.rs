mod calc;
mod cmd;
mod data;
mod error;
mod logging;
mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dayblocks", about = "carve a day into labeled time blocks")]
struct Cli {
    /// Directory holding config.yaml and the log file (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config.yaml into the data directory
    Init {
        /// Replace an existing config.yaml
        #[arg(short, long)]
        force: bool,
    },
    /// Print the configured time range and blocks
    Summary {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the axis markers for a time range
    Markers {
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        start: f64,
        #[arg(long, default_value_t = 24.0, allow_negative_numbers = true)]
        end: f64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Resolve data_dir to an absolute path so the footer and log file location
    // don't depend on later directory changes.
    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    data::persistence::set_data_dir(data_dir.clone());
    logging::init(&data_dir)?;

    match cli.command {
        None => cmd::root::run(),
        Some(Commands::Init { force }) => cmd::init::run(force),
        Some(Commands::Summary { json }) => cmd::summary::run(json),
        Some(Commands::Markers { start, end }) => cmd::markers::run(start, end),
    }
}

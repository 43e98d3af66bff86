#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod command;

use command::{
    CommandStrategy, InitStrategy, ParseInput, ParseStrategy, PatternsStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "spoils")]
#[command(about = "Extract resource gains from game response pages", long_about = None)]
struct Cli {
    /// Log every match and lookup
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the gains from a saved response page
    Parse {
        /// Response page to read
        file: PathBuf,

        /// Only read the panel with this bold title (e.g. "Results:")
        #[arg(short, long)]
        panel: Option<String>,

        /// Character state file to reconcile the gains into
        #[arg(short, long)]
        state: Option<PathBuf>,

        /// Resolve items from the configured catalog instead of the server
        #[arg(long)]
        offline: bool,
    },
    /// List the pattern catalog
    Patterns,
    /// Initialize configuration
    Init {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Parse {
            file,
            panel,
            state,
            offline,
        } => {
            ParseStrategy
                .execute(ParseInput {
                    file,
                    panel,
                    state,
                    offline,
                })
                .await
        }
        Commands::Patterns => PatternsStrategy.execute(()).await,
        Commands::Init { force } => InitStrategy.execute(force).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}

#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use output::OutputMode;
use std::env;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "ladder: company / collaborator hierarchy tracker",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the store (falls back to LADDER_DB, then ./ladder.sqlite3).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }

    /// Resolve the store path: flag, then env, then the working directory.
    fn db_path(&self) -> PathBuf {
        self.db
            .clone()
            .or_else(|| env::var_os("LADDER_DB").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("ladder.sqlite3"))
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage companies.
    #[command(subcommand)]
    Company(cmd::company::CompanyCommand),

    /// Manage collaborators and the management tree.
    #[command(subcommand)]
    Collab(cmd::collab::CollabCommand),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let path = cli.db_path();
    let conn = ladder_core::db::open_store(&path)?;
    tracing::debug!(db = %path.display(), "store opened");

    let mode = cli.output_mode();
    match &cli.command {
        Commands::Company(command) => cmd::company::run(command, &conn, mode),
        Commands::Collab(command) => cmd::collab::run(command, &conn, mode),
    }
}

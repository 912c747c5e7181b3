//! Hotpage CLI - Live reload dev server.
//!
//! Provides commands for:
//! - `serve`: Start the dev server with live reload
//! - `attach`: Attach a preview session to a served page

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AttachArgs, ServeArgs};
use output::Output;

/// Hotpage - Live reload dev server.
#[derive(Parser)]
#[command(name = "hotpage", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dev server.
    Serve(ServeArgs),
    /// Attach a preview session to a served page.
    Attach(AttachArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Check if verbose flag is set
    let verbose = match &cli.command {
        Commands::Serve(args) => args.verbose,
        Commands::Attach(args) => args.verbose,
    };

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let result = match cli.command {
        Commands::Serve(args) => rt.block_on(args.execute()),
        Commands::Attach(args) => rt.block_on(args.execute()),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

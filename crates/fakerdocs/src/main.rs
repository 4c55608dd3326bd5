//! fakerdocs CLI - faker-api documentation shell.
//!
//! Provides commands for:
//! - `serve`: Start the documentation server
//! - `nav`: Print the sidebar navigation
//! - `snippets list|copy`: Inspect and copy page code snippets
//! - `theme get|set`: Read or change the stored theme preference

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{NavArgs, ServeArgs, SnippetsCommand, ThemeCommand, block_on};
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// fakerdocs - faker-api documentation shell.
#[derive(Parser)]
#[command(name = "fakerdocs", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the documentation server.
    Serve(ServeArgs),
    /// Print the sidebar navigation.
    Nav(NavArgs),
    /// Code snippet commands.
    #[command(subcommand)]
    Snippets(SnippetsCommand),
    /// Theme preference commands.
    #[command(subcommand)]
    Theme(ThemeCommand),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => block_on(args.execute(VERSION)),
        Commands::Nav(args) => args.execute(),
        Commands::Snippets(cmd) => cmd.execute(),
        Commands::Theme(cmd) => cmd.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

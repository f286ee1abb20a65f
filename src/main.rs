//! recipebook CLI: browse a recipe catalog and scale ingredients.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "recipebook",
    version,
    about = "Recipe catalog browser with a serving-size ingredient calculator"
)]
struct Cli {
    /// Config file (default: ./recipebook.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: recipebook::cli::Commands,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "recipebook=debug" } else { "recipebook=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = recipebook::cli::dispatch(cli.command, cli.config.as_deref()) {
        tracing::error!(error = %e, "command failed");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

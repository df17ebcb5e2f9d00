//! Feedsmith CLI - cross-compile firmware packages against OpenWrt SDKs
//!
//! Entry point for the feedsmith command-line application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use feedsmith::cli::output::{display_error, OutputConfig};
use feedsmith::cli::Cli;

fn log_level(verbose: u8, quiet: bool) -> tracing::Level {
    match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::WARN,
        (false, 1) => tracing::Level::INFO,
        (false, _) => tracing::Level::DEBUG,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the command-line verbosity
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(log_level(cli.verbose, cli.quiet).into())
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    OutputConfig::new(cli.quiet).apply_global();

    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}

//! `vessel-track` binary

use anyhow::Context;
use clap::Parser;
use std::io::IsTerminal;
use tracing::error;
use tracing_subscriber::EnvFilter;
use vessel_track_downloader::cli::{Cli, Commands};

const DEFAULT_LOG_FILTER: &str = "vessel_track_downloader=info";

/// Install the global subscriber
///
/// `RUST_LOG` overrides the default filter and `LOG_FORMAT=json` switches to
/// JSON lines. Logs go to stderr, without colour codes unless stderr is a
/// terminal; stdout carries only command output.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    match std::env::var("LOG_FORMAT") {
        Ok(format) if format.eq_ignore_ascii_case("json") => builder.json().init(),
        _ => builder.init(),
    }
}

async fn dispatch(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Run(args) => args.execute(cli).await.context("run failed"),
        Commands::Combine(args) => args.execute(cli).await.context("combine failed"),
        Commands::Validate(args) => args.execute(cli).await.context("validation failed"),
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = dispatch(&cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

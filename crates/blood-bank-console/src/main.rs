//! Operator console for the blood bank.

mod config;
mod prompts;
mod render;
mod session;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::ConsoleConfig;
use crate::session::Session;

#[derive(Debug, Parser)]
#[command(name = "blood-bank", version, about = "Blood bank management console")]
struct Cli {
    /// TOML file with credentials, login limits and bank policy
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ConsoleConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ConsoleConfig::default(),
    };

    Session::new(config)?.run()
}

//! UCI front-end for the minimax engine.
//!
//! ## Usage
//!
//! - `uci_engine` - speak UCI on stdin/stdout at the default depth
//! - `uci_engine --depth 6` - search six plies per move
//! - `uci_engine --config engine.toml` - read settings from a TOML file
//!
//! Logs go to stderr; `RUST_LOG` takes precedence over `--log-level`.

mod config;
mod session;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use minimax_engine::MinimaxEngine;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::EngineConfig;
use session::UciSession;

/// Fixed-depth minimax chess engine speaking UCI
#[derive(Parser)]
#[command(name = "uci_engine")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Search depth in plies (1-8)
    #[arg(long)]
    depth: Option<u8>,

    /// Log filter used when RUST_LOG is unset, e.g. "debug"
    #[arg(long, value_name = "FILTER")]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let config = file_config.with_overrides(cli.depth, cli.log_level);

    init_logging(&config.log_level)?;
    info!(depth = config.depth, "engine ready");

    let mut session = UciSession::new(MinimaxEngine::new(), config.depth);
    session::run(&mut session, io::stdin().lock(), io::stdout().lock())
}

/// Stdout belongs to the protocol, so logs are written to stderr.
fn init_logging(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .with_context(|| format!("invalid log filter '{default_filter}'"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

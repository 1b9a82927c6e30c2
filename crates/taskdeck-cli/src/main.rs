//! taskdeck - command-line client for the taskdeck project API.
//!
//! Every invocation restores the persisted session, drops it if it has
//! expired, and routes private commands through the navigation guard.

mod cli;
mod commands;
mod output;

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;
use taskdeck_core::{AppContext, Config};

/// Log file name prefix inside `--log-dir`
const LOG_FILE_PREFIX: &str = "taskdeck.log";

/// Initialize the tracing subscriber for logging.
///
/// `RUST_LOG` wins over `-v`. With a log directory, output goes to a daily
/// file instead of stderr; the returned guard must live until exit.
fn init_tracing(verbosity: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(filter)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr).with_target(false))
                .with(filter)
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let log_guard = init_tracing(cli.verbose, cli.log_dir.as_deref());
    info!("taskdeck starting");

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(url) = cli.api_url.clone() {
        config.api_base_url = url;
    }
    debug!(base_url = %config.api_base_url, storage = ?config.storage, "Configuration loaded");

    let storage = config.open_storage()?;
    let mut context = AppContext::bootstrap(config, storage)?;

    let result = commands::run(&mut context, cli.command, cli.json).await;
    if let Err(e) = result {
        output::error(&format!("{:#}", e));
        drop(log_guard);
        std::process::exit(1);
    }
    Ok(())
}

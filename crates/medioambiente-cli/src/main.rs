//! Medio Ambiente RD - a command-line client for the Ministerio de Medio
//! Ambiente y Recursos Naturales information service.
//!
//! Public content (news, videos, protected areas, measures, services, staff)
//! is available anonymously; regulations and incident reports need a session.

mod app;
mod cli;
mod display;

use std::io;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::{App, OutputMode};
use cli::Cli;
use medioambiente_core::Config;

/// Log file name when `--log-dir` is given
const LOG_FILE: &str = "medioambiente.log";

/// Initialize the tracing subscriber for logging.
/// Use RUST_LOG to control the level (e.g., RUST_LOG=debug).
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .with(filter)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(filter)
                .init();
            None
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let output = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };

    let mut app = App::new(config, output)?;
    app.run(cli.command).await
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = init_tracing(cli.log_dir.as_deref());
    info!("medioambiente starting");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

//! Savewise CLI - a command-line client for the Savewise savings backend.
//!
//! Each invocation runs one command against the API and exits. Sessions are
//! kept in the configured credential store between invocations.

mod app;
mod utils;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::{App, Command};
use savewise_core::{ApiClient, Config, Services, SessionEvent};

/// Set to "1" to also write logs to a daily file in the cache directory
const ENV_LOG_FILE: &str = "SAVEWISE_LOG_FILE";

/// Exit code when the session was terminated mid-command
const EXIT_SESSION_EXPIRED: u8 = 2;

/// Initialize the tracing subscriber for logging.
///
/// Returns the file writer guard, which must be held until exit so buffered
/// lines are flushed.
fn init_tracing(config: &Config) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match std::env::var(ENV_LOG_FILE).as_deref() {
        Ok("1") => match config.cache_dir() {
            Ok(dir) => {
                let appender = tracing_appender::rolling::daily(dir, "savewise.log");
                let (writer, guard) = tracing_appender::non_blocking(appender);
                (
                    Some(fmt::layer().with_writer(writer).with_ansi(false)),
                    Some(guard),
                )
            }
            Err(_) => (None, None),
        },
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    match run().await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    let config = Config::load()?;
    let _log_guard = init_tracing(&config);
    info!(base_url = %config.base_url, demo_mode = config.demo_mode, "Savewise starting");

    let credentials = config.credential_store()?;
    let client = ApiClient::new(&config.base_url, credentials)?;
    let services = Services::new(client, config.demo_mode);

    let mut app = App::new(services, config);
    let mut session_events = app.subscribe();

    let result = app.run(command).await;
    app::flush();

    match session_events.try_recv() {
        Ok(SessionEvent::Terminated) | Err(TryRecvError::Lagged(_)) => {
            eprintln!("Your session has expired. Run `savewise login <phone>` to sign in again.");
            return Ok(ExitCode::from(EXIT_SESSION_EXPIRED));
        }
        Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => {}
    }

    result.map(|_| ExitCode::SUCCESS)
}

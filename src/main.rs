//! Student Directory Editor
//!
//! Fetches one student record from the directory REST API, lets the user edit it
//! in the terminal, and patches the changes back.

mod api;
mod config;
mod errors;
mod models;
mod terminal;
mod view;

use std::process::ExitCode;

use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use api::HttpRecordStore;
use config::Config;
use terminal::{SessionEnd, TerminalNavigator, TerminalNotifier, TerminalSession};
use view::EditView;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(id) = std::env::args().nth(1) else {
        eprintln!("usage: student-edit <id>");
        return Ok(ExitCode::from(2));
    };

    tracing::info!("Records endpoint: {}", config.api_base_url);

    let store = HttpRecordStore::new(config);
    let mut view = EditView::new(store, TerminalNavigator, TerminalNotifier);

    let mut session = TerminalSession::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    let end = session.run(&mut view, &id).await?;
    tracing::debug!("Session ended: {:?}", end);

    Ok(match end {
        SessionEnd::Saved(_) | SessionEnd::Cancelled => ExitCode::SUCCESS,
        SessionEnd::NotFound | SessionEnd::Closed => ExitCode::FAILURE,
    })
}

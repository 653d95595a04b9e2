//! expvar exporter
//!
//! - Loads the YAML config (strict parsing + validate)
//! - Registers one collector per source, once
//! - Serves `/`, `/healthz` and `/metrics`; each `/metrics` request scrapes
//!   every source

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use expvarprom_core::error::{ExporterError, Result};
use expvarprom_exporter::{app_state, cli::Cli, config, router};

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(config = %cli.config, kind = e.kind().as_str(), error = %e, "expvar exporter stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let cfg = config::load_from_file(&cli.config)?;
    let listen = cfg.exporter.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, "expvar exporter listening");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ExporterError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ExporterError::Internal(format!("server failed: {e}")))
}

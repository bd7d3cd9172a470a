//! bankshot-server — payout, tournament and media API for the Bankshot kiosk.
//!
//! Serves the payout calculator at `/api/payouts` (used by the scoreboard
//! spreadsheet and the display), the current tournament at `/api/tournament`,
//! a bracket QR code at `/api/qr` and the media library under `/api/media`.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

mod config;
mod media;
mod payouts;
mod qr;
mod routes;
mod tournament;

use bankshot_payout::PayoutEngine;
use config::Config;
use qr::QrClient;

/// Shared application state passed to every Axum handler.
#[derive(Clone)]
pub struct AppState {
    /// Payout calculator, stateless apart from the minimum field size.
    pub engine: Arc<PayoutEngine>,
    /// Server configuration.
    pub config: Arc<Config>,
    /// Client for the external QR code service.
    pub qr: Arc<QrClient>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let qr = QrClient::new(&config.qr_api, config.qr_size)?;
        Ok(Self {
            engine: Arc::new(PayoutEngine::with_min_players(config.min_players)),
            qr: Arc::new(qr),
            config: Arc::new(config),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("Failed to load server configuration")?;

    info!(
        bind = %config.bind_addr,
        data_dir = %config.data_dir.display(),
        media_dir = %config.media_dir.display(),
        min_players = config.min_players,
        strict_fees = config.strict_fees,
        "Starting bankshot-server"
    );

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config).context("Failed to initialise server state")?;
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {bind_addr}"))?;

    info!("Listening on http://{bind_addr}");

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}

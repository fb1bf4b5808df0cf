//! # sheetapi-server
//!
//! HTTP front end for [`sheetapi_core`]. Exposes spreadsheets, cells and
//! the rendered grid view under `/v1/spreadsheets`.

pub mod config;
pub mod error;
pub mod routes;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use routes::{router, AppState};

use anyhow::{Context, Result};
use sheetapi_core::Store;
use tokio::net::TcpListener;

/// Serve the API until Ctrl-C or SIGTERM
pub async fn serve(config: &Config, store: Store) -> Result<()> {
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    let local = listener.local_addr().context("Failed to read local address")?;
    tracing::info!("Listening on http://{local}");

    axum::serve(listener, router(AppState::new(store)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

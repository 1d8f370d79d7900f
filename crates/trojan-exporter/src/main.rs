//! trojan-exporter
//!
//! - `GET /scrape` (configurable): per-user traffic from Trojan-Go's API
//! - `GET /metrics`: exporter self metrics
//! - one fresh upstream connection per scrape, scrapes serialized

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use trojan_exporter::{app_state, config, router};
use trojan_exporter_core::error::{ExporterError, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let args = config::Args::parse();

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = config::load(&args)?;
    let listen = cfg.listen_addr()?;
    tracing::info!(
        %listen,
        endpoint = %cfg.endpoint,
        metrics_path = %cfg.metrics_path,
        scrape_timeout_secs = cfg.scrape_timeout_secs,
        "trojan-exporter starting"
    );

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ExporterError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ExporterError::Internal(format!("server failed: {e}")))?;

    tracing::info!("trojan-exporter stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
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
    tracing::info!("signal received, starting graceful shutdown");
}

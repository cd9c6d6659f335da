//! Running the HTTP service.

use crate::config::ServerConfig;
use crate::routes::router;
use crate::store::GameStore;
use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, instrument, warn};

/// Binds the configured address and serves until Ctrl+C.
#[instrument(skip_all, fields(addr = %config.bind_addr()))]
pub async fn run(config: &ServerConfig) -> Result<()> {
    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;

    serve(listener, GameStore::new(), shutdown_signal()).await
}

/// Serves the API on an already-bound listener until `shutdown` resolves.
///
/// The store is passed in so tests and embedders can inspect it.
pub async fn serve(
    listener: TcpListener,
    store: GameStore,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let addr = listener.local_addr().context("Listener has no local address")?;
    info!("Server ready at http://{}/", addr);

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

//! HTTP server for the capability publisher.
//!
//! Exposes the UAP discovery surface (`/.well-known/uap` and module
//! documents) together with the hotel API those documents describe.

pub mod routes;

pub use routes::{app_router, ApiError, AppState};

use crate::config::ServerConfig;

/// Bind `config.bind_addr()` and serve until ctrl-c.
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let mut state = AppState::new(config.service_name.clone());
    if let Some(ref base_url) = config.public_base_url {
        state = state.with_public_base_url(base_url.clone());
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("{} listening on {}", config.service_name, listener.local_addr()?);

    axum::serve(listener, app_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

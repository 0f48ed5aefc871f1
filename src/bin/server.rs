//! uap-hotel HTTP server binary.
//!
//! Publishes the UAP discovery document, the booking module and the hotel
//! API behind it.
//!
//! # Environment Variables
//!
//! - `HOST` - bind interface (default: 0.0.0.0)
//! - `PORT` - HTTP port (default: 8000)
//! - `UAP_PUBLIC_BASE_URL` - base URL used in document links (default: derived from `Host`)
//! - `UAP_SERVICE_NAME` - advertised service name (default: "Example Hotel")
//! - `RUST_LOG` - Tracing filter (default: "info,uap_hotel=debug,tower_http=debug")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use uap_hotel::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,uap_hotel=debug,tower_http=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;

    tracing::info!("uap-hotel {} starting on {}", uap_hotel::VERSION, config.bind_addr());
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /.well-known/uap          - discovery document");
    tracing::info!("  GET  /.well-known/booking.json - booking module");
    tracing::info!("  GET  /openapi.json             - OpenAPI document");

    uap_hotel::server::serve(config).await?;
    Ok(())
}

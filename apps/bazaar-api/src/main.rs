//! # Bazaar API
//!
//! HTTP server for the marketplace SPA.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bazaar API Server                                │
//! │                                                                         │
//! │  SPA ───► HTTP (4000) ───► Resolvers ───► MarketStore (in memory)      │
//! │                                │                                        │
//! │                                ▼                                        │
//! │                          JWT + Argon2                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bazaar_api::{router, ApiConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    info!("Starting Bazaar API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        port = config.port,
        seed_data = config.seed_data,
        token_lifetime_secs = config.jwt_lifetime_secs,
        "Configuration loaded"
    );

    // Create shared state
    let addr = config.bind_address();
    let state = AppState::from_config(config)?;

    // Start server
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
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
                error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}

//! Boosting Service API Server
//!
//! Usage:
//!   cargo run --bin boost_api
//!
//! Environment:
//!   PORT          - Server port (default: 8000)
//!   HOST          - Server host (default: 0.0.0.0)
//!   DATABASE_URL  - Document store url, `memory://<name>` (unset: no store)
//!   DATABASE_NAME - Database name override
//!   RUST_LOG      - Log filter (default: info)

use boost_api::api::{create_router, AppState};
use boost_api::{PricingEngine, RateTable, ServerConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = ServerConfig::from_env();

    // A bad DATABASE_URL must not keep the storefront down
    let store = match config.store.open() {
        Ok(Some(store)) => Some(store),
        Ok(None) => {
            warn!("⚠️ DATABASE_URL not set - running without a document store");
            None
        }
        Err(e) => {
            warn!(code = e.code_str(), "⚠️ Document store unavailable: {}", e.message);
            None
        }
    };

    let pricing = PricingEngine::new(RateTable::default());
    let state = Arc::new(AppState::new(pricing, store, config.store.clone()));
    let app = create_router(state);

    let addrs = config.socket_addrs()?;
    let listener = TcpListener::bind(addrs.as_slice()).await?;

    info!(
        "🚀 Boosting Service API starting on http://{}",
        listener.local_addr()?
    );
    info!("Endpoints:");
    info!("  POST /api/calculate     - Price calculator");
    info!("  POST /api/orders        - Submit an order");
    info!("  GET  /api/testimonials  - Customer testimonials");
    info!("  GET  /schema            - Record schemas");
    info!("  GET  /test              - Database diagnostics");

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("👋 Boosting Service API shutdown complete");

    Ok(())
}

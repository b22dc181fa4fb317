//! Block DX statistics server

use dx_stats::api::create_router;
use dx_stats::clients::{http_client, BlocknetDataClient, CoinInfoClient, XBridgeClient};
use dx_stats::config::ServiceConfig;
use dx_stats::service::StatsService;
use dx_stats::AppState;

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║        Block DX - Trade Statistics Backend v{:<13}║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════════════════════════╝");

    let config = ServiceConfig::from_env()?;
    config.log_summary();

    // Collaborators share one HTTP client
    let client = http_client(config.http_timeout);
    let order_book = Arc::new(BlocknetDataClient::new(client.clone(), config.orders_url.clone()));
    let backend = Arc::new(XBridgeClient::new(
        client.clone(),
        config.xbridge_rpc_url.clone(),
        config.xbridge_credentials(),
    ));
    let rates = Arc::new(CoinInfoClient::new(
        client,
        config.coininfo_url.clone(),
        config.coininfo_api_name.clone(),
    ));

    let service = StatsService::new(order_book, backend, rates, config.market_keying);
    let state = Arc::new(AppState { service });

    // Create router with all API endpoints
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Starting API server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}

//! staff-server: employee registry
//!
//! Wiring order: store → service → HTTP transport. Shutdown runs in reverse:
//! stop accepting and drain requests, then close the pool.

use staff_server::{AppState, Config, PgStore, StaffService, api};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "staff_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting staff-server v{}", env!("CARGO_PKG_VERSION"));

    let store = PgStore::connect(&config).await?;
    let state = AppState::new(StaffService::new(store.clone()));
    let app = api::build_app(state);

    let http_addr = config.http_addr();
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("staff-server HTTP listening on {http_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("Database pool closed");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}

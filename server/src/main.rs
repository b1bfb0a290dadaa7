//! ScrolLearn API server.
//!
//! Run from repo root: `cargo run -p scrollearn-server`
//! Configure with `DATABASE_URL`, `BIND_ADDR`, `DB_MAX_CONNECTIONS` and `CORS_ORIGINS` (a `.env` file is honoured).

use scrollearn_api::{app, connect, AppState, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("scrollearn_api=info,scrollearn_server=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let store = connect(&settings).await?;
    store.ensure_schema().await?;
    let state = AppState::new(store);

    let app = app(state, &settings);
    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

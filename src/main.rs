//! Search server: reads settings from the environment, optionally bootstraps the schema, serves the search routes.

use pgroonga_search::{app, ensure_database_exists, ensure_search_schema, AppState, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pgroonga_search=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    if settings.bootstrap {
        ensure_database_exists(&settings.database_url).await?;
    }
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(&settings.database_url)
        .await?;
    if settings.bootstrap {
        ensure_search_schema(&pool, &settings.table).await?;
    }

    let state = AppState::new(pool, settings.table.clone());
    let listener = TcpListener::bind(settings.bind_target()).await?;
    tracing::info!(table = %settings.table, "listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state))
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

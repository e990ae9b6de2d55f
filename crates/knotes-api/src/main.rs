mod cleanup;
mod config;
mod error;
mod routes;
mod service;

use std::sync::Arc;

use knotes_core::db::Database;

use config::AppConfig;
use routes::{app_router, AppState};
use service::NoteService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Only load .env in development; production uses platform-native env injection.
    #[cfg(debug_assertions)]
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("knotes_api=info".parse().expect("valid directive")),
        )
        .init();

    let config = Arc::new(AppConfig::from_env()?);
    tracing::info!("Starting knotes-api with config: {:?}", config);

    let database = Database::open(&config.db_path)?;
    let notes = NoteService::new(database);
    cleanup::spawn_cleanup_task(notes.clone(), config.cleanup_hour);

    let state = AppState::new(config, notes);
    let bind_addr = state.config.bind_addr.clone();
    let router = app_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("knotes-api listening on {}", bind_addr);
    axum::serve(listener, router).await?;
    Ok(())
}

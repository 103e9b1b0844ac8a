mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod routes;
mod schema;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::auth::TelegramVerifier;
use crate::config::AppConfig;
use crate::routes::create_app;
use crate::state::AppState;
use crate::store::{MemoryStore, PgStore, ResourceStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "novel_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenv::dotenv().ok();
    let config = AppConfig::from_env()?;

    tracing::info!("Starting novel backend server");

    let store: Arc<dyn ResourceStore> = match &config.database_url {
        Some(database_url) => {
            let pool = db::establish_connection_pool(database_url)?;
            tracing::info!("Database connection pool initialized");
            Arc::new(PgStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store (data is lost on restart)");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(TelegramVerifier::new(&config.telegram_token), store);
    let app = create_app(state, config.cors_allowed_origins.as_deref());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

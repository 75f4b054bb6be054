mod chat;
mod config;
mod db;
mod error;
mod game;
mod locks;
mod models;
mod presenter;
mod render;
mod routes;
mod sessions;
mod store;

use std::sync::Arc;

use anyhow::Result;
use config::Config;
use game::GameEngine;
use presenter::{LogPresenter, Presenter, WebhookPresenter};
use sessions::SessionRegistry;
use store::{MemoryStore, PgStore, Store};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub engine: GameEngine,
    pub presenter: Arc<dyn Presenter>,
    /// Bot connections made since startup
    pub sessions: SessionRegistry,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oxo_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting oxo backend server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Pick the document store
    let store: Arc<dyn Store> = match config.database_url() {
        Some(url) => {
            let db = db::create_pool(url, config.database.max_connections).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations").run(&db).await?;
            tracing::info!("Database migrations completed");
            Arc::new(PgStore::new(db))
        }
        None => {
            tracing::warn!("DATABASE_URL not set. Games and scores are kept in memory only.");
            Arc::new(MemoryStore::new())
        }
    };

    // Create shared HTTP client for reusing connections
    let http_client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    let presenter: Arc<dyn Presenter> = match &config.chat.presenter_webhook_url {
        Some(url) => {
            tracing::info!("Delivering prompts to {}", url);
            Arc::new(WebhookPresenter::new(url.clone(), http_client))
        }
        None => {
            tracing::warn!("PRESENTER_WEBHOOK_URL not set. Prompts are only logged.");
            Arc::new(LogPresenter)
        }
    };

    // Create application state
    let state = Arc::new(AppState {
        config: config.clone(),
        engine: GameEngine::new(store),
        presenter,
        sessions: SessionRegistry::new(),
    });

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = routes::create_routes()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Chat endpoints: http://{}/api", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

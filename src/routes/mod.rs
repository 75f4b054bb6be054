pub mod commands;
pub mod health;
pub mod interactive;
pub mod teams;

use std::sync::Arc;

use axum::{http::StatusCode, routing::get, routing::post, Router};

use crate::{error::EngineError, AppState};

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/commands", post(commands::slash_command))
        .route("/messages", post(commands::mention_message))
        .route("/interactive", post(interactive::interactive_callback))
        .route("/teams/connect", post(teams::connect_team))
}

/// Status for engine errors that reach an endpoint
pub(crate) fn status_for(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidOpponent | EngineError::InvalidMove(_) => StatusCode::BAD_REQUEST,
        EngineError::GameNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

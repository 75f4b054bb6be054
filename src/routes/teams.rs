use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{render::Reply, AppState};

const GREETING: &str = "Konnichiwa!! I am oxobot that has just joined your team. :robot_face:\n\
                        Please /invite me to a channel so that I can be of use!";

#[derive(Debug, Deserialize)]
pub struct ConnectRequest {
    pub team_id: String,
    pub bot_token: String,
    /// User who installed the bot; greeted on first connection
    pub created_by: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConnectResponse {
    pub connected: bool,
    pub already_connected: bool,
}

/// Register a team's bot connection, once per token for this process
pub async fn connect_team(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ConnectRequest>,
) -> Json<ConnectResponse> {
    let is_new = state.sessions.connect(&request.bot_token, &request.team_id);

    if is_new {
        tracing::info!(
            "Team {} connected ({} active connections)",
            request.team_id,
            state.sessions.connected_count()
        );
        if let Some(user) = &request.created_by {
            let greeting = Reply::private_text(GREETING);
            if let Err(e) = state.presenter.deliver(user, &greeting).await {
                tracing::error!("Failed to greet {}: {}", user, e);
            }
        }
    } else {
        tracing::debug!("Team {} already connected", request.team_id);
    }

    Json(ConnectResponse {
        connected: true,
        already_connected: !is_new,
    })
}

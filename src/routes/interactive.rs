use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Form, Json};
use serde::Deserialize;

use crate::{
    chat::{ActionName, CallbackId},
    error::EngineError,
    presenter,
    render::Reply,
    routes::status_for,
    AppState,
};

/// Interactive callbacks arrive as a form with one JSON `payload` field
#[derive(Debug, Deserialize)]
pub struct InteractiveForm {
    pub payload: String,
}

#[derive(Debug, Deserialize)]
pub struct InteractivePayload {
    pub callback_id: String,
    pub actions: Vec<PayloadAction>,
    pub user: PayloadUser,
}

#[derive(Debug, Deserialize)]
pub struct PayloadAction {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct PayloadUser {
    pub id: String,
}

/// Button click on a board: `cell-<n>` marks a cell, `page-<n>` flips the page
pub async fn interactive_callback(
    State(state): State<Arc<AppState>>,
    Form(form): Form<InteractiveForm>,
) -> Result<Json<Reply>, StatusCode> {
    let payload: InteractivePayload = serde_json::from_str(&form.payload).map_err(|e| {
        tracing::warn!("Malformed interactive payload: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    let CallbackId::Mark(game_id) = payload.callback_id.parse::<CallbackId>().map_err(|e| {
        tracing::warn!("Rejected callback: {}", e);
        StatusCode::BAD_REQUEST
    })?;
    let action = payload
        .actions
        .first()
        .ok_or(StatusCode::BAD_REQUEST)?
        .name
        .parse::<ActionName>()
        .map_err(|e| {
            tracing::warn!("Rejected action: {}", e);
            StatusCode::BAD_REQUEST
        })?;

    match action {
        ActionName::Cell(cell) => {
            match state.engine.apply_move(&game_id, &payload.user.id, cell).await {
                Ok(result) => {
                    if !result.score_failures.is_empty() {
                        tracing::warn!(
                            "Scoreboard out of date for game {}: {:?}",
                            game_id,
                            result.score_failures
                        );
                    }
                    presenter::deliver_prompts(state.presenter.as_ref(), &result.next_prompts)
                        .await;
                    Ok(Json(Reply::replace(result.board)))
                }
                Err(EngineError::InvalidMove(reason)) => {
                    tracing::info!(
                        "Ignored click by {} on game {}: {}",
                        payload.user.id,
                        game_id,
                        reason
                    );
                    Ok(Json(Reply::empty()))
                }
                Err(e) => {
                    tracing::error!("Move on game {} failed: {}", game_id, e);
                    Err(status_for(&e))
                }
            }
        }
        ActionName::Page(page) => match state.engine.get_page(&game_id, page).await {
            Ok(view) => Ok(Json(Reply::replace(view))),
            Err(e) => {
                tracing::error!("Paging game {} failed: {}", game_id, e);
                Err(status_for(&e))
            }
        },
    }
}

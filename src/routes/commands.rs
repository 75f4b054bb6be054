use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Form, Json};
use serde::Deserialize;

use crate::{
    chat::{help_text, resolve_opponent, strip_leading_mention, Command},
    error::EngineError,
    render::{self, Reply},
    routes::status_for,
    AppState,
};

const CHOOSE_OPPONENT: &str = "Choose your opponent. :hankey:";
const ILLEGAL_COMMAND: &str = "Illegal command!! :ghost:\n";

/// Slash command payload (`/oxo challenge <@U123>`)
#[derive(Debug, Deserialize)]
pub struct SlashCommand {
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub text: String,
    pub user_id: String,
    pub team_id: String,
}

/// Message that mentions the bot (`@oxobot beat <@U123>`)
#[derive(Debug, Deserialize)]
pub struct MentionMessage {
    pub user: String,
    pub team: String,
    #[serde(default)]
    pub text: String,
}

pub async fn slash_command(
    State(state): State<Arc<AppState>>,
    Form(payload): Form<SlashCommand>,
) -> Result<Json<Reply>, StatusCode> {
    tracing::info!(
        "Command '{} {}' from {} in team {}",
        payload.command,
        payload.text,
        payload.user_id,
        payload.team_id
    );

    let reply = match Command::parse(&payload.text) {
        Command::Challenge => {
            challenge(&state, &payload.user_id, &payload.team_id, &payload.text).await?
        }
        Command::Rankers => rankers(&state, &payload.team_id).await?,
        Command::Help => Reply::private_text(help_text(&state.config.chat.command_name)),
        Command::Unknown => Reply::private_text(ILLEGAL_COMMAND),
    };
    Ok(Json(reply))
}

pub async fn mention_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MentionMessage>,
) -> Result<Json<Reply>, StatusCode> {
    let text = strip_leading_mention(&payload.text);
    let reply = match Command::parse_mention(text) {
        Some(Command::Challenge) => challenge(&state, &payload.user, &payload.team, text).await?,
        Some(Command::Rankers) => rankers(&state, &payload.team).await?,
        _ => Reply::empty(),
    };
    Ok(Json(reply))
}

async fn challenge(
    state: &AppState,
    user_id: &str,
    team_id: &str,
    text: &str,
) -> Result<Reply, StatusCode> {
    let opponent = resolve_opponent(text, user_id);

    match state
        .engine
        .start_game(user_id, opponent.as_deref(), team_id)
        .await
    {
        Ok(started) => Ok(Reply::public(started.board)),
        Err(EngineError::InvalidOpponent) => Ok(Reply::private_text(CHOOSE_OPPONENT)),
        Err(e) => {
            tracing::error!("Failed to start game for {}: {}", user_id, e);
            Err(status_for(&e))
        }
    }
}

async fn rankers(state: &AppState, team_id: &str) -> Result<Reply, StatusCode> {
    let board = state
        .engine
        .scoreboard()
        .leaderboard(team_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load leaderboard for team {}: {}", team_id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(render::leaderboard(&board))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::Points,
        routes::testing::{app, form, json, send, test_state},
    };
    use serde_json::json;

    #[tokio::test]
    async fn test_challenge_starts_game() {
        let (state, _) = test_state();
        let (status, body) = send(
            app(state),
            form(
                "/api/commands",
                "command=%2Foxo&text=challenge+%3C%40U2%3E&user_id=U1&team_id=T1",
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response_type"], "in_channel");
        assert_eq!(body["view"]["text"], "Get ready to beat <@U2>!!");
        assert!(body["view"]["callback_id"]
            .as_str()
            .unwrap()
            .starts_with("mark-GU1"));
        assert_eq!(body["view"]["actions"][0]["name"], "cell-1");
        assert_eq!(body["view"]["actions"][4]["name"], "page-2");
    }

    #[tokio::test]
    async fn test_challenge_without_opponent() {
        let (state, _) = test_state();
        let (status, body) = send(
            app(state),
            form("/api/commands", "text=challenge&user_id=U1&team_id=T1"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response_type"], "ephemeral");
        assert_eq!(body["text"], CHOOSE_OPPONENT);
        assert!(body.get("view").is_none());
    }

    #[tokio::test]
    async fn test_help_and_unknown_are_private() {
        let (state, _) = test_state();
        let (_, help) = send(
            app(state.clone()),
            form("/api/commands", "text=help&user_id=U1&team_id=T1"),
        )
        .await;
        assert_eq!(help["response_type"], "ephemeral");
        assert!(help["text"].as_str().unwrap().contains("/oxo rankers"));

        let (_, unknown) = send(
            app(state),
            form("/api/commands", "text=dance&user_id=U1&team_id=T1"),
        )
        .await;
        assert_eq!(unknown["text"], ILLEGAL_COMMAND);
    }

    #[tokio::test]
    async fn test_rankers() {
        let (state, _) = test_state();
        let (_, empty) = send(
            app(state.clone()),
            form("/api/commands", "text=rankers&user_id=U1&team_id=T1"),
        )
        .await;
        assert_eq!(empty["text"], "There is no record in your team yet. :ghost:");

        let scores = state.engine.scoreboard();
        scores.record_outcome("T1", "U2", Points::Loss).await.unwrap();
        scores.record_outcome("T1", "U1", Points::Win).await.unwrap();

        let (_, ranked) = send(
            app(state),
            form("/api/commands", "text=rankers&user_id=U1&team_id=T1"),
        )
        .await;
        assert_eq!(ranked["view"]["fields"][0]["value"], "1. <@U1>(SCORE:3)");
        assert_eq!(ranked["view"]["fields"][1]["value"], "2. <@U2>(SCORE:0)");
    }

    #[tokio::test]
    async fn test_mention_messages() {
        let (state, _) = test_state();

        let (_, started) = send(
            app(state.clone()),
            json(
                "/api/messages",
                json!({ "user": "U1", "team": "T1", "text": "<@UBOT> beat me" }),
            ),
        )
        .await;
        assert_eq!(started["view"]["text"], "Get ready to beat <@U1>!!");

        let (_, challenged) = send(
            app(state.clone()),
            json(
                "/api/messages",
                json!({ "user": "U1", "team": "T1", "text": "<@UBOT> challenge <@U2>" }),
            ),
        )
        .await;
        assert_eq!(challenged["view"]["text"], "Get ready to beat <@U2>!!");

        let (_, ignored) = send(
            app(state),
            json(
                "/api/messages",
                json!({ "user": "U1", "team": "T1", "text": "/oxo challenge <@U2>" }),
            ),
        )
        .await;
        assert!(ignored.get("view").is_none());
        assert!(ignored.get("text").is_none());
    }
}

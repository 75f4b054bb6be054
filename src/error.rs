use thiserror::Error;

use crate::models::{GameId, Position};

/// Reasons a move is refused. A refused move never changes the game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("cell #{0} is already marked")]
    CellOccupied(Position),

    #[error("the game is already over")]
    GameComplete,

    #[error("it is not this player's turn")]
    NotYourTurn,

    #[error("'{0}' is not a cell between 1 and 9")]
    InvalidPosition(String),
}

/// Persistence failures reported by a [`crate::store::Store`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to (de)serialize document: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no opponent was given")]
    InvalidOpponent,

    #[error("game {0} not found")]
    GameNotFound(GameId),

    #[error("invalid move: {0}")]
    InvalidMove(#[from] MoveError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Malformed `cell-`/`page-`/`mark-` encodings coming back from a front end.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("unknown action name '{0}'")]
    UnknownAction(String),

    #[error("unknown callback id '{0}'")]
    UnknownCallback(String),

    #[error("invalid page number '{0}'")]
    InvalidPage(String),

    #[error(transparent)]
    InvalidPosition(#[from] MoveError),
}

#[derive(Debug, Error)]
pub enum PresenterError {
    #[error("webhook delivery failed: {0}")]
    Http(#[from] reqwest::Error),
}

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;

use crate::{
    error::{EngineError, MoveError},
    game::{ScoreBoard, WinDetector},
    locks::KeyedLocks,
    models::{Game, GameId, Points, Position, UserId, Winner},
    render::{self, BoardView},
    store::{Store, StoreExt},
};

/// Characters for the random part of game ids. No `-`, so `mark-<id>` stays
/// unambiguous.
pub const GAME_ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
/// Length of the random part of game ids
pub const GAME_ID_SUFFIX_LENGTH: usize = 10;

/// A freshly created game and the board to show its first player
#[derive(Debug, Clone)]
pub struct StartedGame {
    pub game: Game,
    pub board: BoardView,
}

/// A view addressed to one player
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub recipient: UserId,
    pub view: BoardView,
}

#[derive(Debug, Clone)]
pub struct MoveResult {
    pub game: Game,
    /// Public board replacing the clicked message
    pub board: BoardView,
    /// Next turn holder's prompt, or each player's result once the game is over
    pub next_prompts: Vec<Prompt>,
    /// Players whose summary could not be updated
    pub score_failures: Vec<UserId>,
}

/// Owns the lifecycle of every game: creation, moves and scoring.
#[derive(Clone)]
pub struct GameEngine {
    store: Arc<dyn Store>,
    scoreboard: ScoreBoard,
    locks: KeyedLocks,
}

impl GameEngine {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            scoreboard: ScoreBoard::new(store.clone()),
            store,
            locks: KeyedLocks::new(),
        }
    }

    pub fn scoreboard(&self) -> &ScoreBoard {
        &self.scoreboard
    }

    pub async fn start_game(
        &self,
        initiator: &str,
        opponent: Option<&str>,
        team_id: &str,
    ) -> Result<StartedGame, EngineError> {
        let opponent = opponent.ok_or(EngineError::InvalidOpponent)?;

        let game = Game::new(
            generate_game_id(initiator),
            team_id.to_string(),
            initiator.to_string(),
            opponent.to_string(),
        );
        self.store.save_entity(&game).await?;

        tracing::info!(
            "Game {} started in team {}: {} vs {}",
            game.id,
            team_id,
            initiator,
            opponent
        );

        let board = render::game_board(&game, 1);
        Ok(StartedGame { game, board })
    }

    /// Mark `cell` for the current turn holder.
    ///
    /// Runs under the game's lock, so concurrent clicks on one game apply one
    /// at a time against fresh state. A refused move leaves the game untouched.
    pub async fn apply_move(
        &self,
        game_id: &str,
        acting_user: &str,
        cell: Position,
    ) -> Result<MoveResult, EngineError> {
        let _guard = self.locks.lock(game_id).await;
        let mut game = self.get_game(game_id).await?;

        if game.is_complete() {
            return Err(MoveError::GameComplete.into());
        }
        if game.current_player() != acting_user {
            return Err(MoveError::NotYourTurn.into());
        }

        // The move and its outcome are written together, so a failed save
        // leaves the stored game exactly as it was
        let turn = game.current_turn;
        game.cells.place(cell, turn.mark())?;
        game.last_marker = Some(acting_user.to_string());
        game.last_cell = Some(cell);
        game.current_turn = turn.other();
        game.winner = WinDetector::evaluate(&game.cells).winner();
        game.updated_at = Utc::now();
        self.store.save_entity(&game).await?;

        tracing::debug!("{} marked cell #{} in game {}", acting_user, cell, game.id);

        let mut score_failures = Vec::new();
        if let Some(winner) = game.winner {
            tracing::info!("Game {} finished: {:?}", game.id, winner);
            score_failures = self.settle_scores(&game, acting_user, winner).await;
        }

        let board = render::current_board(&game, None);
        let next_prompts = next_prompts(&game);
        Ok(MoveResult {
            game,
            board,
            next_prompts,
            score_failures,
        })
    }

    /// Re-render the current turn holder's prompt at `page`
    pub async fn get_page(&self, game_id: &str, page: u32) -> Result<BoardView, EngineError> {
        let game = self.get_game(game_id).await?;
        Ok(render::game_board(&game, page))
    }

    pub async fn get_game(&self, game_id: &str) -> Result<Game, EngineError> {
        self.store
            .get_entity::<Game>(game_id)
            .await?
            .ok_or_else(|| EngineError::GameNotFound(game_id.to_string()))
    }

    /// Record both players' outcomes. Failures are logged and returned; the
    /// finished game stays as persisted.
    async fn settle_scores(&self, game: &Game, acting_user: &str, winner: Winner) -> Vec<UserId> {
        let opponent = game.current_player();
        if opponent == acting_user {
            tracing::debug!("Game {} was self-play, no score recorded", game.id);
            return Vec::new();
        }

        let outcomes = match winner {
            Winner::Draw => [(acting_user, Points::Draw), (opponent, Points::Draw)],
            Winner::Player(turn) => [
                (game.player(turn), Points::Win),
                (game.player(turn.other()), Points::Loss),
            ],
        };

        let mut failures = Vec::new();
        for (user_id, points) in outcomes {
            if let Err(e) = self
                .scoreboard
                .record_outcome(&game.team_id, user_id, points)
                .await
            {
                tracing::error!(
                    "Failed to record {:?} for {} after game {}: {}",
                    points,
                    user_id,
                    game.id,
                    e
                );
                failures.push(user_id.to_string());
            }
        }
        failures
    }
}

fn next_prompts(game: &Game) -> Vec<Prompt> {
    if !game.is_complete() {
        return vec![Prompt {
            recipient: game.current_player().to_string(),
            view: render::game_board(game, 1),
        }];
    }

    let mut recipients = vec![game.player_1.as_str()];
    if game.player_2 != game.player_1 {
        recipients.push(game.player_2.as_str());
    }
    recipients
        .into_iter()
        .map(|player| Prompt {
            recipient: player.to_string(),
            view: render::current_board(game, Some(player)),
        })
        .collect()
}

/// "G" + initiator id + a random suffix
fn generate_game_id(initiator: &str) -> GameId {
    let mut rng = rand::rng();
    let suffix: String = (0..GAME_ID_SUFFIX_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..GAME_ID_CHARSET.len());
            GAME_ID_CHARSET[idx] as char
        })
        .collect();
    format!("G{}{}", initiator, suffix)
}

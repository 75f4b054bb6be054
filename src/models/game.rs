use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{error::MoveError, game::Board, store::Entity};

pub type GameId = String;
pub type UserId = String;
pub type TeamId = String;

/// A cell on the 3x3 board, numbered 1-9 left to right, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Position(u8);

impl Position {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All positions in increasing order
    pub fn all() -> impl Iterator<Item = Position> {
        (Self::MIN..=Self::MAX).map(Position)
    }

    /// True for the last cell of a row (3, 6, 9)
    pub fn ends_row(self) -> bool {
        self.0 % 3 == 0
    }
}

impl TryFrom<u8> for Position {
    type Error = MoveError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| MoveError::InvalidPosition(value.to_string()))
    }
}

impl From<Position> for u8 {
    fn from(position: Position) -> Self {
        position.0
    }
}

impl FromStr for Position {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| MoveError::InvalidPosition(s.to_string()))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    O,
    X,
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::O => f.write_str("O"),
            Mark::X => f.write_str("X"),
        }
    }
}

/// Whose turn it is. Player 1 always opens and marks `O`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Turn {
    Player1,
    Player2,
}

impl Turn {
    pub fn other(self) -> Self {
        match self {
            Turn::Player1 => Turn::Player2,
            Turn::Player2 => Turn::Player1,
        }
    }

    pub fn mark(self) -> Mark {
        match self {
            Turn::Player1 => Mark::O,
            Turn::Player2 => Mark::X,
        }
    }
}

impl TryFrom<u8> for Turn {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Turn::Player1),
            2 => Ok(Turn::Player2),
            other => Err(format!("invalid turn {}", other)),
        }
    }
}

impl From<Turn> for u8 {
    fn from(turn: Turn) -> Self {
        match turn {
            Turn::Player1 => 1,
            Turn::Player2 => 2,
        }
    }
}

/// Final result of a game. Stored as `1`, `2` or `"DRAW"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    Player(Turn),
    Draw,
}

const DRAW: &str = "DRAW";

impl Serialize for Winner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Winner::Player(turn) => serializer.serialize_u8((*turn).into()),
            Winner::Draw => serializer.serialize_str(DRAW),
        }
    }
}

impl<'de> Deserialize<'de> for Winner {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Player(u8),
            Label(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Player(value) => Turn::try_from(value)
                .map(Winner::Player)
                .map_err(de::Error::custom),
            Repr::Label(label) if label == DRAW => Ok(Winner::Draw),
            Repr::Label(label) => Err(de::Error::custom(format!("invalid winner '{}'", label))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub team_id: TeamId,
    pub player_1: UserId,
    pub player_2: UserId,
    pub current_turn: Turn,
    pub cells: Board,
    pub last_marker: Option<UserId>,
    pub last_cell: Option<Position>,
    pub winner: Option<Winner>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Game {
    pub fn new(id: GameId, team_id: TeamId, player_1: UserId, player_2: UserId) -> Self {
        let now = Utc::now();
        Self {
            id,
            team_id,
            player_1,
            player_2,
            current_turn: Turn::Player1,
            cells: Board::new(),
            last_marker: None,
            last_cell: None,
            winner: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn player(&self, turn: Turn) -> &str {
        match turn {
            Turn::Player1 => &self.player_1,
            Turn::Player2 => &self.player_2,
        }
    }

    /// The player expected to move next
    pub fn current_player(&self) -> &str {
        self.player(self.current_turn)
    }

    pub fn is_complete(&self) -> bool {
        self.winner.is_some()
    }

    pub fn is_player(&self, user_id: &str) -> bool {
        self.player_1 == user_id || self.player_2 == user_id
    }
}

impl Entity for Game {
    const COLLECTION: &'static str = "games";

    fn id(&self) -> &str {
        &self.id
    }
}

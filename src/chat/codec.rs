use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    error::CodecError,
    models::{GameId, Position},
};

const CELL_PREFIX: &str = "cell-";
const PAGE_PREFIX: &str = "page-";
const MARK_PREFIX: &str = "mark-";

/// Machine-readable name of a selectable action: `cell-<n>` or `page-<n>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionName {
    Cell(Position),
    Page(u32),
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionName::Cell(position) => write!(f, "{}{}", CELL_PREFIX, position),
            ActionName::Page(page) => write!(f, "{}{}", PAGE_PREFIX, page),
        }
    }
}

impl FromStr for ActionName {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(cell) = s.strip_prefix(CELL_PREFIX) {
            return Ok(ActionName::Cell(cell.parse()?));
        }
        if let Some(page) = s.strip_prefix(PAGE_PREFIX) {
            return match page.parse::<u32>() {
                Ok(n) if n >= 1 => Ok(ActionName::Page(n)),
                _ => Err(CodecError::InvalidPage(page.to_string())),
            };
        }
        Err(CodecError::UnknownAction(s.to_string()))
    }
}

impl Serialize for ActionName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ActionName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Session identifier attached to an interactive board: `mark-<gameId>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CallbackId {
    Mark(GameId),
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackId::Mark(game_id) => write!(f, "{}{}", MARK_PREFIX, game_id),
        }
    }
}

impl FromStr for CallbackId {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix(MARK_PREFIX) {
            Some(game_id) if !game_id.is_empty() => Ok(CallbackId::Mark(game_id.to_string())),
            _ => Err(CodecError::UnknownCallback(s.to_string())),
        }
    }
}

impl Serialize for CallbackId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

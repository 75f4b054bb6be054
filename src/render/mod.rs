//! Views handed to the presenter: a headline, a titled attachment with the
//! board grid, and the selectable actions.

use serde::Serialize;

use crate::{chat::CallbackId, game::Action};

pub mod board;
pub mod leaderboard;

pub use board::{current_board, game_board};
pub use leaderboard::leaderboard;

/// Color tag of an attachment, in the chat platform's vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Good,
    Danger,
    Draw,
    Victory,
    Muted,
}

impl Color {
    pub fn as_str(self) -> &'static str {
        match self {
            Color::Good => "good",
            Color::Danger => "danger",
            Color::Draw => "#aaa",
            Color::Victory => "#33ccff",
            Color::Muted => "#ccc",
        }
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub short: bool,
}

/// A rendered board or leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub title: String,
    /// Board grid as chat markdown
    pub body: String,
    pub fallback: String,
    pub color: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_id: Option<CallbackId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    InChannel,
    Ephemeral,
}

/// What an endpoint answers and what the presenter delivers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub response_type: ResponseType,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub replace_original: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<BoardView>,
}

impl Reply {
    pub fn public(view: BoardView) -> Self {
        Self {
            response_type: ResponseType::InChannel,
            replace_original: false,
            text: None,
            view: Some(view),
        }
    }

    /// Replace the message the user clicked on
    pub fn replace(view: BoardView) -> Self {
        Self {
            replace_original: true,
            ..Self::public(view)
        }
    }

    pub fn public_text(text: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::InChannel,
            replace_original: false,
            text: Some(text.into()),
            view: None,
        }
    }

    pub fn private_text(text: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Ephemeral,
            ..Self::public_text(text)
        }
    }

    /// Acknowledge without changing anything on screen
    pub fn empty() -> Self {
        Self {
            response_type: ResponseType::Ephemeral,
            replace_original: false,
            text: None,
            view: None,
        }
    }
}

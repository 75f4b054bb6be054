pub mod game;
pub mod summary;

pub use game::{Game, GameId, Mark, Position, TeamId, Turn, UserId, Winner};
pub use summary::{Points, Summary};

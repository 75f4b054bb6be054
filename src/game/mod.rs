pub mod board;
pub mod detector;
pub mod engine;
pub mod paginator;
pub mod scoreboard;

pub use board::Board;
pub use detector::{Outcome, WinDetector};
pub use engine::{GameEngine, MoveResult, Prompt, StartedGame};
pub use paginator::{Action, ActionPaginator};
pub use scoreboard::{Leaderboard, ScoreBoard};

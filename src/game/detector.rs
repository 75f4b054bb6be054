use crate::{
    game::Board,
    models::{Mark, Position, Turn, Winner},
};

/// The 8 winning lines in scan order: rows, columns, then the two diagonals.
pub const LINES: [[u8; 3]; 8] = [
    [1, 2, 3],
    [4, 5, 6],
    [7, 8, 9],
    [1, 4, 7],
    [2, 5, 8],
    [3, 6, 9],
    [1, 5, 9],
    [3, 5, 7],
];

/// No board with fewer marks can hold three of the same mark in a line.
const MIN_DECIDABLE_MARKS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Player1,
    Player2,
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Winner> {
        match self {
            Outcome::Ongoing => None,
            Outcome::Player1 => Some(Winner::Player(Turn::Player1)),
            Outcome::Player2 => Some(Winner::Player(Turn::Player2)),
            Outcome::Draw => Some(Winner::Draw),
        }
    }
}

pub struct WinDetector;

impl WinDetector {
    /// Evaluate a board.
    ///
    /// The first complete line found (in [`LINES`] order) decides the winner.
    /// Without one, the game is a draw once every line holds both marks,
    /// since no remaining move can complete any of them.
    pub fn evaluate(board: &Board) -> Outcome {
        if board.occupied_count() < MIN_DECIDABLE_MARKS {
            return Outcome::Ongoing;
        }

        let mut dead_lines = 0;
        for line in LINES {
            let (o, x) = Self::count_marks(board, line);
            match (o, x) {
                (3, _) => return Outcome::Player1,
                (_, 3) => return Outcome::Player2,
                (o, x) if o > 0 && x > 0 => dead_lines += 1,
                _ => {}
            }
        }

        if dead_lines == LINES.len() {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }

    fn count_marks(board: &Board, line: [u8; 3]) -> (usize, usize) {
        line.iter()
            .filter_map(|&n| Position::new(n).and_then(|p| board.get(p)))
            .fold((0, 0), |(o, x), mark| match mark {
                Mark::O => (o + 1, x),
                Mark::X => (o, x + 1),
            })
    }
}

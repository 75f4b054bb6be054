use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::MoveError,
    models::{Mark, Position},
};

/// Sparse 3x3 grid: only occupied positions have an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: BTreeMap<Position, Mark>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, position: Position) -> Option<Mark> {
        self.cells.get(&position).copied()
    }

    pub fn is_empty(&self, position: Position) -> bool {
        !self.cells.contains_key(&position)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_full(&self) -> bool {
        self.cells.len() == usize::from(Position::MAX)
    }

    /// Empty positions in increasing order
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::all().filter(|p| self.is_empty(*p)).collect()
    }

    /// Mark a cell. Fails without touching the board when the cell is taken.
    pub fn place(&mut self, position: Position, mark: Mark) -> Result<(), MoveError> {
        if !self.is_empty(position) {
            return Err(MoveError::CellOccupied(position));
        }
        self.cells.insert(position, mark);
        Ok(())
    }
}

impl FromIterator<(Position, Mark)> for Board {
    fn from_iter<I: IntoIterator<Item = (Position, Mark)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
pub(crate) fn board_from(cells: &[(u8, Mark)]) -> Board {
    cells
        .iter()
        .map(|(p, m)| (Position::new(*p).expect("test position in range"), *m))
        .collect()
}

use serde::Serialize;

use crate::{
    chat::ActionName,
    game::Board,
    models::Position,
};

/// Upper bound on actions a chat message can carry at once
pub const MAX_ACTIONS_PER_PAGE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStyle {
    Danger,
}

/// One selectable button of a rendered board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub name: ActionName,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ActionStyle>,
}

impl Action {
    pub fn cell(position: Position) -> Self {
        Self {
            name: ActionName::Cell(position),
            text: position.to_string(),
            style: Some(ActionStyle::Danger),
        }
    }

    pub fn previous(page: u32) -> Self {
        Self {
            name: ActionName::Page(page - 1),
            text: "<".to_string(),
            style: None,
        }
    }

    pub fn next(page: u32) -> Self {
        Self {
            name: ActionName::Page(page + 1),
            text: ">".to_string(),
            style: None,
        }
    }
}

pub struct ActionPaginator;

impl ActionPaginator {
    /// Actions for `page` (1-indexed; 0 is read as 1) of the board's empty cells.
    ///
    /// Page 1 starts at the first empty cell, page `p > 1` at the `(3p - 1)`-th.
    /// A `<` control leads every page after the first, and a `>` control ends
    /// the page when more empty cells remain than the page has room for.
    pub fn actions(board: &Board, page: u32) -> Vec<Action> {
        let page = page.max(1);
        let empty = board.empty_positions();
        if empty.is_empty() {
            return Vec::new();
        }

        let mut actions = Vec::with_capacity(MAX_ACTIONS_PER_PAGE);
        if page > 1 {
            actions.push(Action::previous(page));
        }

        let start = Self::window_start(page);
        let slots = MAX_ACTIONS_PER_PAGE - actions.len();
        let remaining = empty.len().saturating_sub(start);
        let need_next = remaining > slots;
        let cell_slots = if need_next { slots - 1 } else { slots };

        actions.extend(
            empty
                .iter()
                .skip(start)
                .take(cell_slots)
                .map(|position| Action::cell(*position)),
        );
        if need_next {
            actions.push(Action::next(page));
        }

        actions
    }

    /// Zero-based index into the empty cells where `page` begins
    fn window_start(page: u32) -> usize {
        if page == 1 {
            0
        } else {
            (page as usize).saturating_mul(3).saturating_sub(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::board_from;
    use crate::models::Mark;

    fn names(actions: &[Action]) -> Vec<String> {
        actions.iter().map(|a| a.name.to_string()).collect()
    }

    fn board_with_mask(mask: u16) -> Board {
        let cells: Vec<(u8, Mark)> = (1..=9u8)
            .filter(|p| mask & (1 << (p - 1)) != 0)
            .map(|p| (p, if p % 2 == 0 { Mark::X } else { Mark::O }))
            .collect();
        board_from(&cells)
    }

    #[test]
    fn test_empty_board_pages() {
        let board = Board::new();

        assert_eq!(
            names(&ActionPaginator::actions(&board, 1)),
            vec!["cell-1", "cell-2", "cell-3", "cell-4", "page-2"]
        );
        assert_eq!(
            names(&ActionPaginator::actions(&board, 2)),
            vec!["page-1", "cell-5", "cell-6", "cell-7", "page-3"]
        );
        assert_eq!(
            names(&ActionPaginator::actions(&board, 3)),
            vec!["page-2", "cell-8", "cell-9"]
        );
    }

    #[test]
    fn test_pages_skip_occupied_cells() {
        // Cells 2 and 5 taken: empties are 1,3,4,6,7,8,9
        let board = board_from(&[(2, Mark::O), (5, Mark::X)]);

        assert_eq!(
            names(&ActionPaginator::actions(&board, 1)),
            vec!["cell-1", "cell-3", "cell-4", "cell-6", "page-2"]
        );
        assert_eq!(
            names(&ActionPaginator::actions(&board, 2)),
            vec!["page-1", "cell-7", "cell-8", "cell-9"]
        );
    }

    #[test]
    fn test_single_page_has_no_navigation() {
        let board = board_from(&[(1, Mark::O), (2, Mark::X), (3, Mark::O), (4, Mark::X)]);
        let actions = ActionPaginator::actions(&board, 1);

        assert_eq!(
            names(&actions),
            vec!["cell-5", "cell-6", "cell-7", "cell-8", "cell-9"]
        );
        assert!(actions.iter().all(|a| matches!(a.name, ActionName::Cell(_))));
    }

    #[test]
    fn test_full_board_has_no_actions() {
        let board = board_with_mask(0b1_1111_1111);
        for page in 1..=3 {
            assert!(ActionPaginator::actions(&board, page).is_empty());
        }
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let board = Board::new();
        assert_eq!(
            ActionPaginator::actions(&board, 0),
            ActionPaginator::actions(&board, 1)
        );
    }

    #[test]
    fn test_every_board_respects_page_bounds() {
        for mask in 0u16..512 {
            let board = board_with_mask(mask);
            let empty = board.empty_positions();
            let mut shown = Vec::new();

            for page in 1..=4u32 {
                let actions = ActionPaginator::actions(&board, page);
                assert!(actions.len() <= MAX_ACTIONS_PER_PAGE, "mask {:b} page {}", mask, page);
                assert_eq!(actions, ActionPaginator::actions(&board, page));

                let has_next = actions
                    .iter()
                    .any(|a| a.name == ActionName::Page(page + 1));
                let cells: Vec<Position> = actions
                    .iter()
                    .filter_map(|a| match a.name {
                        ActionName::Cell(p) => Some(p),
                        ActionName::Page(_) => None,
                    })
                    .collect();
                let start = ActionPaginator::window_start(page);
                let beyond = empty.len() > start + cells.len();
                assert_eq!(has_next, beyond, "mask {:b} page {}", mask, page);

                // Following next controls from page 1 never skips nor repeats a cell
                if page == 1 || shown.len() == start {
                    shown.extend(cells);
                }
                if !has_next {
                    break;
                }
            }

            assert_eq!(shown, empty, "mask {:b}", mask);
        }
    }
}

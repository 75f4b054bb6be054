use crate::{
    chat::CallbackId,
    game::{ActionPaginator, Board},
    models::{Game, Position, Winner},
    render::{BoardView, Color, Field},
};

/// The grid as chat markdown, e.g. "|  O   |  `2`  |  X   |\n" per row
pub fn cell_grid(board: &Board) -> String {
    let mut grid = String::new();
    for position in Position::all() {
        let cell = match board.get(position) {
            Some(mark) => format!("|  {}   ", mark),
            None => format!("|  `{}`  ", position),
        };
        grid.push_str(&cell);
        if position.ends_row() {
            grid.push_str("|\n");
        }
    }
    grid
}

fn last_move_text(game: &Game) -> Option<String> {
    let marker = game.last_marker.as_ref()?;
    let cell = game
        .last_cell
        .map(|c| c.to_string())
        .unwrap_or_default();
    Some(format!("<@{}> marked cell #{}.", marker, cell))
}

/// Prompt for the player whose turn it is, with one page of cell buttons
pub fn game_board(game: &Game, page: u32) -> BoardView {
    let text = last_move_text(game)
        .unwrap_or_else(|| format!("Get ready to beat <@{}>!!", game.player_2));

    BoardView {
        text: Some(text),
        title: format!(
            "Now it's your turn. You are '{}'.",
            game.current_turn.mark()
        ),
        body: cell_grid(&game.cells),
        fallback: "Your turn comes!!".to_string(),
        color: Color::Good,
        callback_id: Some(CallbackId::Mark(game.id.clone())),
        fields: vec![Field {
            title: Some("Select a cell # from buttons below.".to_string()),
            value: None,
            short: false,
        }],
        actions: ActionPaginator::actions(&game.cells, page),
    }
}

/// Board without buttons, as seen by `viewer` (`None` for the channel)
pub fn current_board(game: &Game, viewer: Option<&str>) -> BoardView {
    let (text, title, fallback, color) = match game.winner {
        Some(winner) => {
            let versus = format!("<@{}> VS <@{}>", game.player_1, game.player_2);
            let (title, color) = match winner {
                Winner::Draw => ("DRAW GAME!!".to_string(), Color::Draw),
                Winner::Player(turn) => {
                    let champion = game.player(turn);
                    match viewer {
                        Some(v) if v == champion => {
                            ("Congratulations!! You win!!".to_string(), Color::Victory)
                        }
                        Some(v) if game.is_player(v) => {
                            ("Ooops!! You lose!!".to_string(), Color::Danger)
                        }
                        _ => (format!(" <@{}> won!", champion), Color::Muted),
                    }
                }
            };
            (versus.clone(), title, versus, color)
        }
        None => {
            let turn = game.current_player();
            (
                last_move_text(game).unwrap_or_default(),
                format!("Now <@{}> is thinking... :thinking_face:", turn),
                format!("<@{}> is thinking...", turn),
                Color::Muted,
            )
        }
    };

    BoardView {
        text: Some(text),
        title,
        body: cell_grid(&game.cells),
        fallback,
        color,
        callback_id: None,
        fields: Vec::new(),
        actions: Vec::new(),
    }
}

use crate::{
    game::Leaderboard,
    render::{BoardView, Color, Field, Reply},
};

pub const EMPTY_LEADERBOARD: &str = "There is no record in your team yet. :ghost:";

pub fn leaderboard(board: &Leaderboard) -> Reply {
    let summaries = match board {
        Leaderboard::Empty => return Reply::public_text(EMPTY_LEADERBOARD),
        Leaderboard::Ranked(summaries) => summaries,
    };

    let fields = summaries
        .iter()
        .enumerate()
        .map(|(rank, summary)| Field {
            title: None,
            value: Some(format!(
                "{}. <@{}>(SCORE:{})",
                rank + 1,
                summary.user_id,
                summary.score
            )),
            short: false,
        })
        .collect();

    Reply::public(BoardView {
        text: None,
        title: "oxo leaderboard of your team.".to_string(),
        body: String::new(),
        fallback: "oxo leaderboard of your team.".to_string(),
        color: Color::Good,
        callback_id: None,
        fields,
        actions: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Points, Summary};

    #[test]
    fn test_empty_leaderboard_is_plain_text() {
        let reply = leaderboard(&Leaderboard::Empty);
        assert_eq!(reply.text.as_deref(), Some(EMPTY_LEADERBOARD));
        assert!(reply.view.is_none());
    }

    #[test]
    fn test_ranked_fields() {
        let mut first = Summary::new("T1", "U1");
        first.record(Points::Win);
        let second = Summary::new("T1", "U2");

        let reply = leaderboard(&Leaderboard::Ranked(vec![first, second]));
        let view = reply.view.unwrap();
        let values: Vec<&str> = view
            .fields
            .iter()
            .filter_map(|f| f.value.as_deref())
            .collect();
        assert_eq!(values, vec!["1. <@U1>(SCORE:3)", "2. <@U2>(SCORE:0)"]);
    }
}

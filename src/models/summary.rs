use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    models::{TeamId, UserId},
    store::Entity,
};

/// Points awarded to one player for a concluded game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Points {
    Loss = 0,
    Draw = 1,
    Win = 3,
}

impl Points {
    pub fn value(self) -> u32 {
        self as u32
    }
}

/// Scoreboard row for one player in one team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub id: String,
    pub team_id: TeamId,
    pub user_id: UserId,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub score: u32,
    pub updated_at: DateTime<Utc>,
}

impl Summary {
    pub fn new(team_id: &str, user_id: &str) -> Self {
        Self {
            id: Self::id_for(team_id, user_id),
            team_id: team_id.to_string(),
            user_id: user_id.to_string(),
            wins: 0,
            draws: 0,
            losses: 0,
            score: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn id_for(team_id: &str, user_id: &str) -> String {
        format!("S{}{}", team_id, user_id)
    }

    /// Count one more outcome. Keeps `score = 3*wins + draws`.
    pub fn record(&mut self, points: Points) {
        match points {
            Points::Win => self.wins += 1,
            Points::Draw => self.draws += 1,
            Points::Loss => self.losses += 1,
        }
        self.score += points.value();
        self.updated_at = Utc::now();
    }
}

impl Entity for Summary {
    const COLLECTION: &'static str = "summaries";

    fn id(&self) -> &str {
        &self.id
    }
}

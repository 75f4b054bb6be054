use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::models::TeamId;

#[derive(Debug, Clone)]
pub struct ConnectedTeam {
    pub team_id: TeamId,
    pub connected_at: DateTime<Utc>,
}

/// Bot connections made by this process, keyed by bot token.
///
/// Starts empty, only grows, and is cleared by a restart.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, ConnectedTeam>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection. Returns false when the token was already connected.
    pub fn connect(&self, bot_token: &str, team_id: &str) -> bool {
        let mut inserted = false;
        self.sessions
            .entry(bot_token.to_string())
            .or_insert_with(|| {
                inserted = true;
                ConnectedTeam {
                    team_id: team_id.to_string(),
                    connected_at: Utc::now(),
                }
            });
        inserted
    }

    #[cfg(test)]
    pub fn is_connected(&self, bot_token: &str) -> bool {
        self.sessions.contains_key(bot_token)
    }

    pub fn connected_count(&self) -> usize {
        self.sessions.len()
    }
}

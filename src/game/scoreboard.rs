use std::sync::Arc;

use crate::{
    error::StoreError,
    locks::KeyedLocks,
    models::{Points, Summary},
    store::{Filter, Order, SortSpec, Store, StoreExt},
};

/// Ranked summaries of a team, or nothing recorded yet
#[derive(Debug, Clone, PartialEq)]
pub enum Leaderboard {
    Empty,
    Ranked(Vec<Summary>),
}

#[derive(Clone)]
pub struct ScoreBoard {
    store: Arc<dyn Store>,
    locks: KeyedLocks,
}

impl ScoreBoard {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            locks: KeyedLocks::new(),
        }
    }

    /// Add one outcome to the player's summary, creating it on first use.
    ///
    /// Every call counts; the caller records each concluded game once per player.
    pub async fn record_outcome(
        &self,
        team_id: &str,
        user_id: &str,
        points: Points,
    ) -> Result<Summary, StoreError> {
        let id = Summary::id_for(team_id, user_id);
        let _guard = self.locks.lock(&id).await;

        let mut summary = self
            .summary(team_id, user_id)
            .await?
            .unwrap_or_else(|| Summary::new(team_id, user_id));
        summary.record(points);
        self.store.save_entity(&summary).await?;

        tracing::debug!(
            "Recorded {:?} for {} in team {} (score {})",
            points,
            user_id,
            team_id,
            summary.score
        );
        Ok(summary)
    }

    /// Team summaries by score, then wins, then draws (all descending),
    /// then fewest losses.
    pub async fn leaderboard(&self, team_id: &str) -> Result<Leaderboard, StoreError> {
        let filter = Filter::new().eq("team_id", team_id);
        let sort = SortSpec::new()
            .by("score", Order::Desc)
            .by("wins", Order::Desc)
            .by("draws", Order::Desc)
            .by("losses", Order::Asc);

        let summaries = self.store.query_entities::<Summary>(&filter, &sort).await?;
        if summaries.is_empty() {
            Ok(Leaderboard::Empty)
        } else {
            Ok(Leaderboard::Ranked(summaries))
        }
    }

    pub async fn summary(&self, team_id: &str, user_id: &str) -> Result<Option<Summary>, StoreError> {
        self.store
            .get_entity::<Summary>(&Summary::id_for(team_id, user_id))
            .await
    }
}

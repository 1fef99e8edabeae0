use async_trait::async_trait;
use infra::db::Db;
use infra::repos::{matches, tournament_teams};

use super::service::{MatchScore, Registration, TeamStats};

/// Persistence boundary of the standings recomputation. Implemented over
/// Postgres by [`PgStandingsStore`]; tests supply in-memory doubles.
#[async_trait]
pub trait StandingsStore: Send + Sync {
    /// Every registration of the tournament with its current counters.
    async fn list_registrations(&self, tournament_id: i32)
        -> Result<Vec<Registration>, sqlx::Error>;

    /// Matches whose two participants are both in `team_ids`.
    async fn list_matches_between(&self, team_ids: &[i32])
        -> Result<Vec<MatchScore>, sqlx::Error>;

    async fn write_team_stats(
        &self,
        tournament_id: i32,
        team_id: i32,
        stats: &TeamStats,
    ) -> Result<(), sqlx::Error>;

    async fn write_group_position(
        &self,
        tournament_id: i32,
        team_id: i32,
        position: i32,
    ) -> Result<(), sqlx::Error>;
}

#[derive(Clone)]
pub struct PgStandingsStore {
    db: Db,
}

impl PgStandingsStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StandingsStore for PgStandingsStore {
    async fn list_registrations(
        &self,
        tournament_id: i32,
    ) -> Result<Vec<Registration>, sqlx::Error> {
        let rows = tournament_teams::list_by_tournament(&self.db, tournament_id).await?;
        Ok(rows.into_iter().map(Registration::from).collect())
    }

    async fn list_matches_between(
        &self,
        team_ids: &[i32],
    ) -> Result<Vec<MatchScore>, sqlx::Error> {
        let rows = matches::list_between(&self.db, team_ids).await?;
        Ok(rows.into_iter().map(MatchScore::from).collect())
    }

    async fn write_team_stats(
        &self,
        tournament_id: i32,
        team_id: i32,
        stats: &TeamStats,
    ) -> Result<(), sqlx::Error> {
        // A registration removed mid-pass matches no row; report it like any failed write.
        if tournament_teams::update_standings(&self.db, tournament_id, team_id, (*stats).into())
            .await?
        {
            Ok(())
        } else {
            Err(sqlx::Error::RowNotFound)
        }
    }

    async fn write_group_position(
        &self,
        tournament_id: i32,
        team_id: i32,
        position: i32,
    ) -> Result<(), sqlx::Error> {
        if tournament_teams::update_group_position(&self.db, tournament_id, team_id, position)
            .await?
        {
            Ok(())
        } else {
            Err(sqlx::Error::RowNotFound)
        }
    }
}

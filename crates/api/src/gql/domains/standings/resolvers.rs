use async_graphql::{Context, Object, Result};
use infra::repos::tournament_teams;

use crate::gql::common::helpers::require_tournament;
use crate::gql::error::{DbResultExt, ResultExt};
use crate::state::AppState;

use super::service::refresh_standings;
use super::store::PgStandingsStore;
use super::types::{StandingsReport, TeamStanding};

#[derive(Default)]
pub struct StandingsQuery;

#[Object]
impl StandingsQuery {
    /// Standings of a tournament ordered by group, then group position.
    /// Pass `group` to restrict the table to one group.
    async fn standings(
        &self,
        ctx: &Context<'_>,
        tournament_id: i32,
        group: Option<String>,
    ) -> Result<Vec<TeamStanding>> {
        let state = ctx.data::<AppState>()?;

        let rows = tournament_teams::list_by_tournament(&state.db, tournament_id)
            .await
            .db_err()?;

        Ok(rows
            .into_iter()
            .filter(|row| group.as_ref().map_or(true, |g| &row.team_group == g))
            .map(TeamStanding::from)
            .collect())
    }
}

#[derive(Default)]
pub struct StandingsMutation;

#[Object]
impl StandingsMutation {
    /// Recompute every team's counters from the match results, then rerank each group.
    async fn recompute_standings(
        &self,
        ctx: &Context<'_>,
        tournament_id: i32,
    ) -> Result<StandingsReport> {
        let state = ctx.data::<AppState>()?;
        require_tournament(state, tournament_id).await?;

        let store = PgStandingsStore::new(state.db.clone());
        let report = refresh_standings(&store, tournament_id)
            .await
            .gql_err("Standings recomputation failed")?;

        Ok(report.into())
    }
}

use async_graphql::{Context, Object, Result};
use infra::repos::{
    teams, tournament_teams, CreateTournamentData, TournamentRepo, UpdateTournamentData,
};

use crate::gql::common::helpers::{require_non_empty, require_tournament};
use crate::gql::domains::standings::refresh::refresh_tournaments;
use crate::gql::domains::standings::types::TeamStanding;
use crate::gql::error::{DbResultExt, GqlError};
use crate::gql::types::{PaginatedResponse, PaginationInput};
use crate::state::AppState;

use super::types::{CreateTournamentInput, Tournament, UpdateTournamentInput};

#[derive(Default)]
pub struct TournamentQuery;

#[Object]
impl TournamentQuery {
    /// Tournaments, most recent start date first.
    async fn tournaments(
        &self,
        ctx: &Context<'_>,
        pagination: Option<PaginationInput>,
    ) -> Result<PaginatedResponse<Tournament>> {
        let state = ctx.data::<AppState>()?;
        let repo = TournamentRepo::new(state.db.clone());

        let limit_offset = pagination.unwrap_or_default().to_limit_offset();

        let (rows, total_count) =
            tokio::try_join!(repo.list(Some(limit_offset)), repo.count()).db_err()?;

        let items: Vec<Tournament> = rows.into_iter().map(Tournament::from).collect();
        let page_size = items.len() as i32;
        let offset = limit_offset.offset as i32;
        let has_next_page = (offset + page_size) < total_count as i32;

        Ok(PaginatedResponse {
            items,
            total_count: total_count as i32,
            page_size,
            offset,
            has_next_page,
        })
    }

    async fn tournament(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Tournament>> {
        let state = ctx.data::<AppState>()?;

        let row = TournamentRepo::new(state.db.clone())
            .get(id)
            .await
            .db_err()?;

        Ok(row.map(Tournament::from))
    }

    /// Registered teams with their standings counters.
    async fn tournament_teams(
        &self,
        ctx: &Context<'_>,
        tournament_id: i32,
    ) -> Result<Vec<TeamStanding>> {
        let state = ctx.data::<AppState>()?;

        let rows = tournament_teams::list_by_tournament(&state.db, tournament_id)
            .await
            .db_err()?;

        Ok(rows.into_iter().map(TeamStanding::from).collect())
    }
}

#[derive(Default)]
pub struct TournamentMutation;

#[Object]
impl TournamentMutation {
    async fn create_tournament(
        &self,
        ctx: &Context<'_>,
        input: CreateTournamentInput,
    ) -> Result<Tournament> {
        let state = ctx.data::<AppState>()?;

        let name = require_non_empty(&input.name, "Tournament name")?;
        if input.end_date < input.start_date {
            return Err(GqlError::new("End date must not be before start date").into());
        }

        let row = TournamentRepo::new(state.db.clone())
            .create(CreateTournamentData {
                name,
                start_date: input.start_date,
                end_date: input.end_date,
            })
            .await
            .db_err()?;

        tracing::info!(tournament_id = row.id, "Tournament created");

        Ok(Tournament::from(row))
    }

    async fn update_tournament(
        &self,
        ctx: &Context<'_>,
        id: i32,
        input: UpdateTournamentInput,
    ) -> Result<Tournament> {
        let state = ctx.data::<AppState>()?;
        let existing = require_tournament(state, id).await?;

        let name = input
            .name
            .as_deref()
            .map(|n| require_non_empty(n, "Tournament name"))
            .transpose()?;

        let start_date = input.start_date.unwrap_or(existing.start_date);
        let end_date = input.end_date.unwrap_or(existing.end_date);
        if end_date < start_date {
            return Err(GqlError::new("End date must not be before start date").into());
        }

        let row = TournamentRepo::new(state.db.clone())
            .update(
                id,
                UpdateTournamentData {
                    name,
                    start_date: input.start_date,
                    end_date: input.end_date,
                },
            )
            .await
            .db_err()?
            .ok_or_else(|| GqlError::new("Tournament not found"))?;

        Ok(Tournament::from(row))
    }

    /// Returns `false` when no tournament had this id.
    async fn delete_tournament(&self, ctx: &Context<'_>, id: i32) -> Result<bool> {
        let state = ctx.data::<AppState>()?;

        let deleted = TournamentRepo::new(state.db.clone())
            .delete(id)
            .await
            .db_err()?;

        if deleted {
            tracing::info!(tournament_id = id, "Tournament deleted");
        }

        Ok(deleted)
    }

    /// Register a team, then refresh the tournament's standings so the new
    /// team is counted and ranked within its group.
    async fn add_team_to_tournament(
        &self,
        ctx: &Context<'_>,
        tournament_id: i32,
        team_id: i32,
        #[graphql(default = "A")] group: String,
    ) -> Result<TeamStanding> {
        let state = ctx.data::<AppState>()?;
        require_tournament(state, tournament_id).await?;

        if teams::get_by_id(&state.db, team_id)
            .await
            .db_err()?
            .is_none()
        {
            return Err(GqlError::new("Team not found").into());
        }

        if tournament_teams::get(&state.db, tournament_id, team_id)
            .await
            .db_err()?
            .is_some()
        {
            return Err(GqlError::new("Team is already registered in this tournament").into());
        }

        let group = require_non_empty(&group, "Team group")?;

        let row = tournament_teams::add(&state.db, tournament_id, team_id, &group)
            .await
            .db_err()?;

        tracing::info!(tournament_id, team_id, group = %group, "Team registered");

        refresh_tournaments(&state.db, &[tournament_id]).await;

        // Re-read so the counters and position reflect the refresh.
        let row = tournament_teams::get(&state.db, tournament_id, team_id)
            .await
            .db_err()?
            .unwrap_or(row);

        Ok(TeamStanding::from(row))
    }

    /// Unregister a team. The remaining teams are recomputed and renumbered.
    /// Returns `false` when the team was not registered.
    async fn remove_team_from_tournament(
        &self,
        ctx: &Context<'_>,
        tournament_id: i32,
        team_id: i32,
    ) -> Result<bool> {
        let state = ctx.data::<AppState>()?;

        let removed = tournament_teams::remove(&state.db, tournament_id, team_id)
            .await
            .db_err()?;

        if removed {
            tracing::info!(tournament_id, team_id, "Team unregistered");
            refresh_tournaments(&state.db, &[tournament_id]).await;
        }

        Ok(removed)
    }
}

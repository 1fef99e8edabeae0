use async_graphql::{Context, Object, Result};
use infra::repos::{matches, teams, CreateMatch, UpdateMatchResult};

use crate::gql::common::helpers::require_non_empty;
use crate::gql::error::{DbResultExt, GqlError};
use crate::state::AppState;

use super::service::{self, record_match_result};
use super::types::{CreateMatchInput, DecidedBy, Match, MatchOutcome, MatchResultPayload};

#[derive(Default)]
pub struct MatchQuery;

#[Object]
impl MatchQuery {
    /// All matches ordered by play date.
    async fn matches(&self, ctx: &Context<'_>) -> Result<Vec<Match>> {
        let state = ctx.data::<AppState>()?;
        let rows = matches::list(&state.db).await.db_err()?;
        Ok(rows.into_iter().map(Match::from).collect())
    }

    #[graphql(name = "match")]
    async fn match_by_id(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Match>> {
        let state = ctx.data::<AppState>()?;
        let row = matches::get_by_id(&state.db, id).await.db_err()?;
        Ok(row.map(Match::from))
    }

    async fn matches_by_team(&self, ctx: &Context<'_>, team_id: i32) -> Result<Vec<Match>> {
        let state = ctx.data::<AppState>()?;
        let rows = matches::list_by_team(&state.db, team_id).await.db_err()?;
        Ok(rows.into_iter().map(Match::from).collect())
    }

    /// Matches whose two participants are both registered to the tournament.
    async fn matches_by_tournament(
        &self,
        ctx: &Context<'_>,
        tournament_id: i32,
    ) -> Result<Vec<Match>> {
        let state = ctx.data::<AppState>()?;
        let rows = matches::list_by_tournament(&state.db, tournament_id)
            .await
            .db_err()?;
        Ok(rows.into_iter().map(Match::from).collect())
    }
}

#[derive(Default)]
pub struct MatchMutation;

#[Object]
impl MatchMutation {
    /// Create a match. When it is created with a score, the standings of every
    /// tournament holding both teams are refreshed, as for `updateMatchResult`.
    async fn create_match(
        &self,
        ctx: &Context<'_>,
        input: CreateMatchInput,
    ) -> Result<MatchResultPayload> {
        let state = ctx.data::<AppState>()?;

        if input.team1_id == input.team2_id {
            return Err(GqlError::new("A team cannot play against itself").into());
        }

        let found = teams::get_by_ids(&state.db, &[input.team1_id, input.team2_id])
            .await
            .db_err()?;
        if found.len() != 2 {
            return Err(GqlError::new("Team not found").into());
        }

        let play_stage = require_non_empty(&input.play_stage, "Play stage")?;

        let recorded = service::create_match(
            &state.db,
            CreateMatch {
                play_stage,
                play_date: input.play_date,
                team1_id: input.team1_id,
                team2_id: input.team2_id,
                goal_score: input.goal_score,
                results: input.results.map(|r| r.as_str().to_string()),
                decided_by: input.decided_by.as_str().to_string(),
                audience: input.audience.max(0),
                player_of_match: input.player_of_match,
            },
        )
        .await
        .db_err()?;

        Ok(MatchResultPayload::from(recorded))
    }

    /// Record a final score. The score is stored as given; one that does not
    /// parse is ignored when standings are computed.
    async fn update_match_result(
        &self,
        ctx: &Context<'_>,
        match_id: i32,
        goal_score: String,
        #[graphql(default_with = "MatchOutcome::Win")] results: MatchOutcome,
        #[graphql(default_with = "DecidedBy::Normal")] decided_by: DecidedBy,
        #[graphql(default = true)] update_standings: bool,
    ) -> Result<MatchResultPayload> {
        let state = ctx.data::<AppState>()?;

        let recorded = record_match_result(
            &state.db,
            match_id,
            UpdateMatchResult {
                goal_score,
                results: results.as_str().to_string(),
                decided_by: decided_by.as_str().to_string(),
            },
            update_standings,
        )
        .await
        .db_err()?
        .ok_or_else(|| GqlError::new("Match not found"))?;

        Ok(MatchResultPayload::from(recorded))
    }
}

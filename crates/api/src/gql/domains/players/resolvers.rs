use async_graphql::{Context, Object, Result};
use infra::repos::{goals, player_bookings, players};

use crate::gql::error::DbResultExt;
use crate::gql::types::clamp_limit;
use crate::state::AppState;

use super::types::{CardColor, Goal, Player, PlayerCards, TopScorer};

#[derive(Default)]
pub struct PlayerQuery;

#[Object]
impl PlayerQuery {
    async fn players(&self, ctx: &Context<'_>) -> Result<Vec<Player>> {
        let state = ctx.data::<AppState>()?;
        let rows = players::list(&state.db).await.db_err()?;
        Ok(rows.into_iter().map(Player::from).collect())
    }

    async fn player(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Player>> {
        let state = ctx.data::<AppState>()?;
        let row = players::get_by_id(&state.db, id).await.db_err()?;
        Ok(row.map(Player::from))
    }

    async fn players_by_team(&self, ctx: &Context<'_>, team_id: i32) -> Result<Vec<Player>> {
        let state = ctx.data::<AppState>()?;
        let rows = players::list_by_team(&state.db, team_id).await.db_err()?;
        Ok(rows.into_iter().map(Player::from).collect())
    }

    async fn players_by_tournament(
        &self,
        ctx: &Context<'_>,
        tournament_id: i32,
    ) -> Result<Vec<Player>> {
        let state = ctx.data::<AppState>()?;
        let rows = players::list_by_tournament(&state.db, tournament_id)
            .await
            .db_err()?;
        Ok(rows.into_iter().map(Player::from).collect())
    }

    /// Players ordered by goals scored, then name.
    async fn top_scorers(&self, ctx: &Context<'_>, limit: Option<i32>) -> Result<Vec<TopScorer>> {
        let state = ctx.data::<AppState>()?;
        let rows = goals::top_scorers(&state.db, clamp_limit(limit, 10))
            .await
            .db_err()?;
        Ok(rows.into_iter().map(TopScorer::from).collect())
    }

    async fn players_with_cards(
        &self,
        ctx: &Context<'_>,
        color: CardColor,
    ) -> Result<Vec<PlayerCards>> {
        let state = ctx.data::<AppState>()?;
        let rows = player_bookings::card_counts(&state.db, color.is_sent_off())
            .await
            .db_err()?;
        Ok(rows.into_iter().map(PlayerCards::from).collect())
    }

    async fn goals_by_match(&self, ctx: &Context<'_>, match_id: i32) -> Result<Vec<Goal>> {
        let state = ctx.data::<AppState>()?;
        let rows = goals::list_by_match(&state.db, match_id).await.db_err()?;
        Ok(rows.into_iter().map(Goal::from).collect())
    }
}

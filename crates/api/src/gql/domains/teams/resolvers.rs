use async_graphql::{Context, Object, Result};
use infra::repos::teams;

use crate::gql::common::helpers::require_non_empty;
use crate::gql::error::{DbResultExt, GqlError};
use crate::state::AppState;

use super::types::Team;

#[derive(Default)]
pub struct TeamQuery;

#[Object]
impl TeamQuery {
    async fn teams(&self, ctx: &Context<'_>) -> Result<Vec<Team>> {
        let state = ctx.data::<AppState>()?;
        let rows = teams::list(&state.db).await.db_err()?;
        Ok(rows.into_iter().map(Team::from).collect())
    }

    async fn team(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Team>> {
        let state = ctx.data::<AppState>()?;
        let row = teams::get_by_id(&state.db, id).await.db_err()?;
        Ok(row.map(Team::from))
    }
}

#[derive(Default)]
pub struct TeamMutation;

#[Object]
impl TeamMutation {
    async fn add_team(&self, ctx: &Context<'_>, name: String) -> Result<Team> {
        let state = ctx.data::<AppState>()?;
        let name = require_non_empty(&name, "Team name")?;

        let row = match teams::create(&state.db, &name).await {
            Ok(row) => row,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(GqlError::new("A team with this name already exists").into());
            }
            Err(e) => return Err(GqlError::from(e).into()),
        };
        tracing::info!(team_id = row.id, "Team created");

        Ok(Team::from(row))
    }
}

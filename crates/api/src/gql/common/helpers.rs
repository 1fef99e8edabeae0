use infra::{models::TournamentRow, repos::TournamentRepo};

use crate::gql::error::{DbResultExt, GqlError};
use crate::state::AppState;

pub async fn require_tournament(
    state: &AppState,
    tournament_id: i32,
) -> async_graphql::Result<TournamentRow> {
    TournamentRepo::new(state.db.clone())
        .get(tournament_id)
        .await
        .db_err()?
        .ok_or_else(|| GqlError::new("Tournament not found").into())
}

pub fn require_non_empty(value: &str, field: &str) -> async_graphql::Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GqlError::new(format!("{field} must not be empty")).into());
    }
    Ok(trimmed.to_string())
}

use sqlx::{PgExecutor, Result};

use crate::models::PlayerRow;

pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<PlayerRow>> {
    let rows = sqlx::query_as::<_, PlayerRow>(
        r#"
        SELECT id, name, jersey_no, position_to_play, date_of_birth
        FROM players
        ORDER BY name ASC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: i32) -> Result<Option<PlayerRow>> {
    let row = sqlx::query_as::<_, PlayerRow>(
        r#"
        SELECT id, name, jersey_no, position_to_play, date_of_birth
        FROM players
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

pub async fn get_by_ids<'e>(
    executor: impl PgExecutor<'e>,
    ids: &[i32],
) -> Result<Vec<PlayerRow>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, PlayerRow>(
        r#"
        SELECT id, name, jersey_no, position_to_play, date_of_birth
        FROM players
        WHERE id = ANY($1::int[])
        "#,
    )
    .bind(ids)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

/// Players who were on the team's roster in any tournament.
pub async fn list_by_team<'e>(
    executor: impl PgExecutor<'e>,
    team_id: i32,
) -> Result<Vec<PlayerRow>> {
    let rows = sqlx::query_as::<_, PlayerRow>(
        r#"
        SELECT DISTINCT p.id, p.name, p.jersey_no, p.position_to_play, p.date_of_birth
        FROM players p
        JOIN team_players tp ON tp.player_id = p.id
        WHERE tp.team_id = $1
        ORDER BY p.name ASC
        "#,
    )
    .bind(team_id)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

pub async fn list_by_tournament<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: i32,
) -> Result<Vec<PlayerRow>> {
    let rows = sqlx::query_as::<_, PlayerRow>(
        r#"
        SELECT DISTINCT p.id, p.name, p.jersey_no, p.position_to_play, p.date_of_birth
        FROM players p
        JOIN team_players tp ON tp.player_id = p.id
        WHERE tp.tournament_id = $1
        ORDER BY p.name ASC
        "#,
    )
    .bind(tournament_id)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

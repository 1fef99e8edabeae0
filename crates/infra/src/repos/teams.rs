use sqlx::{PgExecutor, Result};

use crate::models::TeamRow;

pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<TeamRow>> {
    let rows = sqlx::query_as::<_, TeamRow>(
        r#"
        SELECT id, name, created_at
        FROM teams
        ORDER BY name ASC
        "#,
    )
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: i32) -> Result<Option<TeamRow>> {
    let row = sqlx::query_as::<_, TeamRow>(
        r#"
        SELECT id, name, created_at
        FROM teams
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(row)
}

pub async fn get_by_ids<'e>(executor: impl PgExecutor<'e>, ids: &[i32]) -> Result<Vec<TeamRow>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, TeamRow>(
        r#"
        SELECT id, name, created_at
        FROM teams
        WHERE id = ANY($1::int[])
        "#,
    )
    .bind(ids)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

pub async fn create<'e>(executor: impl PgExecutor<'e>, name: &str) -> Result<TeamRow> {
    let row = sqlx::query_as::<_, TeamRow>(
        r#"
        INSERT INTO teams (name)
        VALUES ($1)
        RETURNING id, name, created_at
        "#,
    )
    .bind(name)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

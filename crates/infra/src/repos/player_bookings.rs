use sqlx::{FromRow, PgExecutor, Result};

#[derive(Debug, Clone, FromRow)]
pub struct CardCount {
    pub player_id: i32,
    pub name: String,
    pub team_name: String,
    pub card_count: i64,
}

/// Card tallies per player. `sent_off = true` counts red cards, `false` yellow.
/// Bookings for different teams add up; `team_name` is the first of those
/// teams by name.
pub async fn card_counts<'e>(
    executor: impl PgExecutor<'e>,
    sent_off: bool,
) -> Result<Vec<CardCount>> {
    let rows = sqlx::query_as::<_, CardCount>(
        r#"
        SELECT b.player_id, p.name, MIN(t.name) AS team_name, COUNT(*) AS card_count
        FROM player_bookings b
        JOIN players p ON p.id = b.player_id
        JOIN teams t ON t.id = b.team_id
        WHERE b.sent_off = $1
        GROUP BY b.player_id, p.name
        ORDER BY card_count DESC, p.name ASC
        "#,
    )
    .bind(sent_off)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

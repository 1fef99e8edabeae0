use sqlx::{FromRow, PgExecutor, Result};

use crate::models::GoalRow;

#[derive(Debug, Clone, FromRow)]
pub struct ScorerEntry {
    pub player_id: i32,
    pub name: String,
    pub goal_count: i64,
}

pub async fn list_by_match<'e>(
    executor: impl PgExecutor<'e>,
    match_id: i32,
) -> Result<Vec<GoalRow>> {
    let rows = sqlx::query_as::<_, GoalRow>(
        r#"
        SELECT id, match_id, player_id, team_id, goal_time, goal_type, play_stage,
               goal_schedule, goal_half
        FROM goals
        WHERE match_id = $1
        ORDER BY goal_time ASC, id ASC
        "#,
    )
    .bind(match_id)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

/// Players ranked by goals scored, ties broken by name.
pub async fn top_scorers<'e>(executor: impl PgExecutor<'e>, limit: i64) -> Result<Vec<ScorerEntry>> {
    let rows = sqlx::query_as::<_, ScorerEntry>(
        r#"
        SELECT g.player_id, p.name, COUNT(*) AS goal_count
        FROM goals g
        JOIN players p ON p.id = g.player_id
        GROUP BY g.player_id, p.name
        ORDER BY goal_count DESC, p.name ASC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(executor)
    .await?;

    Ok(rows)
}

use chrono::NaiveDate;
use sqlx::{PgExecutor, Result};

use crate::models::MatchRow;

#[derive(Debug, Clone)]
pub struct CreateMatch {
    pub play_stage: String,
    pub play_date: NaiveDate,
    pub team1_id: i32,
    pub team2_id: i32,
    pub goal_score: Option<String>,
    pub results: Option<String>,
    pub decided_by: String,
    pub audience: i32,
    pub player_of_match: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct UpdateMatchResult {
    pub goal_score: String,
    pub results: String,
    pub decided_by: String,
}

const MATCH_COLUMNS: &str = "id, play_stage, play_date, team1_id, team2_id, goal_score, results, \
     decided_by, audience, player_of_match, stop1_sec, stop2_sec, created_at, updated_at";

pub async fn list<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<MatchRow>> {
    let query = format!("SELECT {MATCH_COLUMNS} FROM matches ORDER BY play_date ASC, id ASC");

    let rows = sqlx::query_as::<_, MatchRow>(&query)
        .fetch_all(executor)
        .await?;

    Ok(rows)
}

pub async fn get_by_id<'e>(executor: impl PgExecutor<'e>, id: i32) -> Result<Option<MatchRow>> {
    let query = format!("SELECT {MATCH_COLUMNS} FROM matches WHERE id = $1");

    let row = sqlx::query_as::<_, MatchRow>(&query)
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(row)
}

pub async fn list_by_team<'e>(
    executor: impl PgExecutor<'e>,
    team_id: i32,
) -> Result<Vec<MatchRow>> {
    let query = format!(
        "SELECT {MATCH_COLUMNS} FROM matches WHERE team1_id = $1 OR team2_id = $1 ORDER BY play_date ASC, id ASC"
    );

    let rows = sqlx::query_as::<_, MatchRow>(&query)
        .bind(team_id)
        .fetch_all(executor)
        .await?;

    Ok(rows)
}

/// Matches whose two participants are both members of `team_ids`.
pub async fn list_between<'e>(
    executor: impl PgExecutor<'e>,
    team_ids: &[i32],
) -> Result<Vec<MatchRow>> {
    if team_ids.is_empty() {
        return Ok(Vec::new());
    }

    let query = format!(
        "SELECT {MATCH_COLUMNS} FROM matches \
         WHERE team1_id = ANY($1::int[]) AND team2_id = ANY($1::int[]) \
         ORDER BY id ASC"
    );

    let rows = sqlx::query_as::<_, MatchRow>(&query)
        .bind(team_ids)
        .fetch_all(executor)
        .await?;

    Ok(rows)
}

/// Matches between two teams that are both registered to the tournament.
pub async fn list_by_tournament<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: i32,
) -> Result<Vec<MatchRow>> {
    let query = format!(
        "SELECT {MATCH_COLUMNS} FROM matches m \
         WHERE EXISTS (SELECT 1 FROM tournament_teams a WHERE a.tournament_id = $1 AND a.team_id = m.team1_id) \
           AND EXISTS (SELECT 1 FROM tournament_teams b WHERE b.tournament_id = $1 AND b.team_id = m.team2_id) \
         ORDER BY m.play_date ASC, m.id ASC"
    );

    let rows = sqlx::query_as::<_, MatchRow>(&query)
        .bind(tournament_id)
        .fetch_all(executor)
        .await?;

    Ok(rows)
}

pub async fn create<'e>(executor: impl PgExecutor<'e>, data: CreateMatch) -> Result<MatchRow> {
    let query = format!(
        r#"
        INSERT INTO matches (play_stage, play_date, team1_id, team2_id, goal_score, results,
                             decided_by, audience, player_of_match)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {MATCH_COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, MatchRow>(&query)
        .bind(data.play_stage)
        .bind(data.play_date)
        .bind(data.team1_id)
        .bind(data.team2_id)
        .bind(data.goal_score)
        .bind(data.results)
        .bind(data.decided_by)
        .bind(data.audience)
        .bind(data.player_of_match)
        .fetch_one(executor)
        .await?;

    Ok(row)
}

/// The score is stored verbatim; standings aggregation decides whether it counts.
pub async fn update_result<'e>(
    executor: impl PgExecutor<'e>,
    id: i32,
    data: UpdateMatchResult,
) -> Result<Option<MatchRow>> {
    let query = format!(
        r#"
        UPDATE matches
        SET goal_score = $2, results = $3, decided_by = $4, updated_at = NOW()
        WHERE id = $1
        RETURNING {MATCH_COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, MatchRow>(&query)
        .bind(id)
        .bind(data.goal_score)
        .bind(data.results)
        .bind(data.decided_by)
        .fetch_optional(executor)
        .await?;

    Ok(row)
}

use sqlx::{PgExecutor, Result};

use crate::models::TournamentTeamRow;

/// The derived counters a standings recomputation overwrites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandingsCounters {
    pub match_played: i32,
    pub won: i32,
    pub draw: i32,
    pub lost: i32,
    pub goal_for: i32,
    pub goal_against: i32,
    pub goal_diff: i32,
    pub points: i32,
}

const SELECT_COLUMNS: &str = r#"
    SELECT tt.tournament_id, tt.team_id, t.name AS team_name, tt.team_group,
           tt.match_played, tt.won, tt.draw, tt.lost, tt.goal_for, tt.goal_against,
           tt.goal_diff, tt.points, tt.group_position, tt.updated_at
    FROM tournament_teams tt
    JOIN teams t ON t.id = tt.team_id
"#;

pub async fn list_by_tournament<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: i32,
) -> Result<Vec<TournamentTeamRow>> {
    let query = format!(
        "{SELECT_COLUMNS} WHERE tt.tournament_id = $1 ORDER BY tt.team_group ASC, tt.group_position ASC, t.name ASC"
    );

    let rows = sqlx::query_as::<_, TournamentTeamRow>(&query)
        .bind(tournament_id)
        .fetch_all(executor)
        .await?;

    Ok(rows)
}

pub async fn get<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: i32,
    team_id: i32,
) -> Result<Option<TournamentTeamRow>> {
    let query = format!("{SELECT_COLUMNS} WHERE tt.tournament_id = $1 AND tt.team_id = $2");

    let row = sqlx::query_as::<_, TournamentTeamRow>(&query)
        .bind(tournament_id)
        .bind(team_id)
        .fetch_optional(executor)
        .await?;

    Ok(row)
}

/// Every tournament in which both teams are registered.
pub async fn tournaments_with_both<'e>(
    executor: impl PgExecutor<'e>,
    team1_id: i32,
    team2_id: i32,
) -> Result<Vec<i32>> {
    let ids = sqlx::query_scalar::<_, i32>(
        r#"
        SELECT a.tournament_id
        FROM tournament_teams a
        JOIN tournament_teams b ON b.tournament_id = a.tournament_id
        WHERE a.team_id = $1 AND b.team_id = $2
        ORDER BY a.tournament_id ASC
        "#,
    )
    .bind(team1_id)
    .bind(team2_id)
    .fetch_all(executor)
    .await?;

    Ok(ids)
}

/// Register a team with all counters at zero. The insert and the name lookup
/// run as one statement so the returned row carries the team name.
pub async fn add<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: i32,
    team_id: i32,
    team_group: &str,
) -> Result<TournamentTeamRow> {
    let row = sqlx::query_as::<_, TournamentTeamRow>(
        r#"
        WITH inserted AS (
            INSERT INTO tournament_teams (tournament_id, team_id, team_group)
            VALUES ($1, $2, $3)
            RETURNING *
        )
        SELECT i.tournament_id, i.team_id, t.name AS team_name, i.team_group,
               i.match_played, i.won, i.draw, i.lost, i.goal_for, i.goal_against,
               i.goal_diff, i.points, i.group_position, i.updated_at
        FROM inserted i
        JOIN teams t ON t.id = i.team_id
        "#,
    )
    .bind(tournament_id)
    .bind(team_id)
    .bind(team_group)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

pub async fn remove<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: i32,
    team_id: i32,
) -> Result<bool> {
    let result =
        sqlx::query("DELETE FROM tournament_teams WHERE tournament_id = $1 AND team_id = $2")
            .bind(tournament_id)
            .bind(team_id)
            .execute(executor)
            .await?;

    Ok(result.rows_affected() > 0)
}

/// Overwrite the derived counters. Returns `false` when no registration matched.
pub async fn update_standings<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: i32,
    team_id: i32,
    counters: StandingsCounters,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE tournament_teams
        SET match_played = $3, won = $4, draw = $5, lost = $6,
            goal_for = $7, goal_against = $8, goal_diff = $9, points = $10,
            updated_at = NOW()
        WHERE tournament_id = $1 AND team_id = $2
        "#,
    )
    .bind(tournament_id)
    .bind(team_id)
    .bind(counters.match_played)
    .bind(counters.won)
    .bind(counters.draw)
    .bind(counters.lost)
    .bind(counters.goal_for)
    .bind(counters.goal_against)
    .bind(counters.goal_diff)
    .bind(counters.points)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn update_group_position<'e>(
    executor: impl PgExecutor<'e>,
    tournament_id: i32,
    team_id: i32,
    group_position: i32,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE tournament_teams
        SET group_position = $3, updated_at = NOW()
        WHERE tournament_id = $1 AND team_id = $2
        "#,
    )
    .bind(tournament_id)
    .bind(team_id)
    .bind(group_position)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

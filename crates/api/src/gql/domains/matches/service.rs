use infra::{
    db::Db,
    models::MatchRow,
    repos::{matches, tournament_teams, CreateMatch, UpdateMatchResult},
};

use crate::gql::domains::standings::refresh::{
    refresh_tournaments, RefreshFailure, RefreshSummary,
};

pub struct RecordedResult {
    pub row: MatchRow,
    pub standings: RefreshSummary,
}

/// Store a match result and, when `update_standings` is set, refresh the
/// standings of every tournament in which both teams are registered.
///
/// Returns `Ok(None)` when the match does not exist. Standings failures do not
/// undo the stored result; they are reported in [`RefreshSummary::failures`].
pub async fn record_match_result(
    db: &Db,
    match_id: i32,
    data: UpdateMatchResult,
    update_standings: bool,
) -> Result<Option<RecordedResult>, sqlx::Error> {
    let Some(row) = matches::update_result(db, match_id, data).await? else {
        return Ok(None);
    };

    tracing::info!(
        match_id,
        goal_score = ?row.goal_score,
        "Match result recorded"
    );

    let standings = if update_standings {
        refresh_for_match(db, &row).await
    } else {
        RefreshSummary::default()
    };

    Ok(Some(RecordedResult { row, standings }))
}

/// Insert a match. One created with a score already counts towards the
/// standings, so those are refreshed the same way as for a recorded result.
pub async fn create_match(db: &Db, data: CreateMatch) -> Result<RecordedResult, sqlx::Error> {
    let row = matches::create(db, data).await?;
    tracing::info!(match_id = row.id, "Match created");

    let standings = if row.goal_score.is_some() {
        refresh_for_match(db, &row).await
    } else {
        RefreshSummary::default()
    };

    Ok(RecordedResult { row, standings })
}

async fn refresh_for_match(db: &Db, row: &MatchRow) -> RefreshSummary {
    match tournament_teams::tournaments_with_both(db, row.team1_id, row.team2_id).await {
        Ok(ids) => refresh_tournaments(db, &ids).await,
        Err(e) => {
            tracing::error!(match_id = row.id, error = %e, "Failed to find tournaments for match");
            RefreshSummary {
                refreshed: Vec::new(),
                failures: vec![RefreshFailure {
                    tournament_id: None,
                    message: "Could not look up tournaments for this match".to_string(),
                }],
            }
        }
    }
}

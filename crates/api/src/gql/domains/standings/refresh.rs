use infra::db::Db;

use super::service::{refresh_standings, StandingsReport};
use super::store::PgStandingsStore;

/// A standings refresh that could not complete.
/// `tournament_id` is `None` when the affected tournaments could not be looked up.
pub struct RefreshFailure {
    pub tournament_id: Option<i32>,
    pub message: String,
}

#[derive(Default)]
pub struct RefreshSummary {
    pub refreshed: Vec<StandingsReport>,
    pub failures: Vec<RefreshFailure>,
}

/// Recompute and rerank each tournament in turn. One tournament failing does
/// not stop the others.
pub async fn refresh_tournaments(db: &Db, tournament_ids: &[i32]) -> RefreshSummary {
    let store = PgStandingsStore::new(db.clone());
    let mut summary = RefreshSummary::default();

    for &tournament_id in tournament_ids {
        match refresh_standings(&store, tournament_id).await {
            Ok(report) => {
                if !report.is_clean() {
                    tracing::warn!(tournament_id, "Standings refreshed with failed writes");
                }
                summary.refreshed.push(report);
            }
            Err(e) => {
                tracing::error!(tournament_id, error = %e, "Standings refresh failed");
                summary.failures.push(RefreshFailure {
                    tournament_id: Some(tournament_id),
                    message: e.to_string(),
                });
            }
        }
    }

    summary
}

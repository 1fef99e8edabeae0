use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use infra::models::TournamentTeamRow;

use super::service;

/// A team's registration in a tournament with its derived standings.
#[derive(SimpleObject, Clone)]
pub struct TeamStanding {
    pub tournament_id: i32,
    pub team_id: i32,
    pub team_name: String,
    pub team_group: String,
    pub match_played: i32,
    pub won: i32,
    pub draw: i32,
    pub lost: i32,
    pub goal_for: i32,
    pub goal_against: i32,
    pub goal_diff: i32,
    pub points: i32,
    pub group_position: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<TournamentTeamRow> for TeamStanding {
    fn from(row: TournamentTeamRow) -> Self {
        TeamStanding {
            tournament_id: row.tournament_id,
            team_id: row.team_id,
            team_name: row.team_name,
            team_group: row.team_group,
            match_played: row.match_played,
            won: row.won,
            draw: row.draw,
            lost: row.lost,
            goal_for: row.goal_for,
            goal_against: row.goal_against,
            goal_diff: row.goal_diff,
            points: row.points,
            group_position: row.group_position,
            updated_at: row.updated_at,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct TeamStatsSummary {
    pub team_id: i32,
    pub match_played: i32,
    pub won: i32,
    pub draw: i32,
    pub lost: i32,
    pub goal_for: i32,
    pub goal_against: i32,
    pub goal_diff: i32,
    pub points: i32,
    /// `None` when ranking did not reach this team.
    pub group_position: Option<i32>,
}

#[derive(SimpleObject, Clone)]
pub struct StandingsWriteFailure {
    pub team_id: i32,
    pub message: String,
}

impl From<service::PersistFailure> for StandingsWriteFailure {
    fn from(f: service::PersistFailure) -> Self {
        StandingsWriteFailure {
            team_id: f.team_id,
            message: f.message,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct StandingsReport {
    pub tournament_id: i32,
    /// True when every counter and position write succeeded.
    pub success: bool,
    pub matches_considered: i32,
    pub teams: Vec<TeamStatsSummary>,
    pub failures: Vec<StandingsWriteFailure>,
}

impl From<service::StandingsReport> for StandingsReport {
    fn from(report: service::StandingsReport) -> Self {
        let success = report.is_clean();
        let ranks = &report.rerank.ranks;

        let teams = report
            .recompute
            .stats
            .iter()
            .map(|(&team_id, stats)| TeamStatsSummary {
                team_id,
                match_played: stats.match_played,
                won: stats.won,
                draw: stats.draw,
                lost: stats.lost,
                goal_for: stats.goal_for,
                goal_against: stats.goal_against,
                goal_diff: stats.goal_diff,
                points: stats.points,
                group_position: ranks.get(&team_id).copied(),
            })
            .collect();

        let failures = report
            .recompute
            .failures
            .into_iter()
            .chain(report.rerank.failures)
            .map(StandingsWriteFailure::from)
            .collect();

        StandingsReport {
            tournament_id: report.recompute.tournament_id,
            success,
            matches_considered: report.recompute.matches_considered as i32,
            teams,
            failures,
        }
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TournamentRow {
    pub id: i32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TeamRow {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A team's registration in one tournament, joined with the team name.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TournamentTeamRow {
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

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MatchRow {
    pub id: i32,
    pub play_stage: String,
    pub play_date: NaiveDate,
    pub team1_id: i32,
    pub team2_id: i32,
    pub goal_score: Option<String>,
    pub results: Option<String>,
    pub decided_by: String,
    pub audience: i32,
    pub player_of_match: Option<i32>,
    pub stop1_sec: i32,
    pub stop2_sec: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PlayerRow {
    pub id: i32,
    pub name: String,
    pub jersey_no: i32,
    pub position_to_play: String,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GoalRow {
    pub id: i32,
    pub match_id: i32,
    pub player_id: i32,
    pub team_id: i32,
    pub goal_time: i32,
    pub goal_type: String,
    pub play_stage: String,
    pub goal_schedule: String,
    pub goal_half: Option<i32>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PlayerBookingRow {
    pub id: i32,
    pub match_id: i32,
    pub team_id: i32,
    pub player_id: i32,
    pub booking_time: i32,
    pub sent_off: bool,
    pub play_schedule: String,
    pub play_half: i32,
}

use async_graphql::dataloader::DataLoader;
use async_graphql::{ComplexObject, Context, Enum, InputObject, SimpleObject};
use chrono::{DateTime, NaiveDate, Utc};
use infra::models::MatchRow;

use crate::gql::domains::standings::types::StandingsReport;
use crate::gql::domains::teams::types::Team;
use crate::gql::error::ResultExt;
use crate::gql::loaders::TeamLoader;

use super::service::RecordedResult;

/// How a match ended for team 1. Stored as `WIN` / `DRAW`.
#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum MatchOutcome {
    Win,
    Draw,
}

impl MatchOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchOutcome::Win => "WIN",
            MatchOutcome::Draw => "DRAW",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "WIN" => Some(MatchOutcome::Win),
            "DRAW" => Some(MatchOutcome::Draw),
            _ => None,
        }
    }
}

/// Stored as `N` (normal time) / `P` (penalty shoot-out).
#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum DecidedBy {
    Normal,
    Penalties,
}

impl DecidedBy {
    pub fn as_str(self) -> &'static str {
        match self {
            DecidedBy::Normal => "N",
            DecidedBy::Penalties => "P",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "N" => Some(DecidedBy::Normal),
            "P" => Some(DecidedBy::Penalties),
            _ => None,
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Match {
    pub id: i32,
    pub play_stage: String,
    pub play_date: NaiveDate,
    pub team1_id: i32,
    pub team2_id: i32,
    /// Final score as entered, e.g. `"2-1"`. Null until a result is recorded.
    pub goal_score: Option<String>,
    pub results: Option<MatchOutcome>,
    pub decided_by: Option<DecidedBy>,
    pub audience: i32,
    pub player_of_match: Option<i32>,
    pub stop1_sec: i32,
    pub stop2_sec: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MatchRow> for Match {
    fn from(row: MatchRow) -> Self {
        Self {
            id: row.id,
            play_stage: row.play_stage,
            play_date: row.play_date,
            team1_id: row.team1_id,
            team2_id: row.team2_id,
            goal_score: row.goal_score,
            results: row.results.as_deref().and_then(MatchOutcome::parse),
            decided_by: DecidedBy::parse(&row.decided_by),
            audience: row.audience,
            player_of_match: row.player_of_match,
            stop1_sec: row.stop1_sec,
            stop2_sec: row.stop2_sec,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[ComplexObject]
impl Match {
    async fn team1(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Team>> {
        let loader = ctx.data::<DataLoader<TeamLoader>>()?;
        let team = loader
            .load_one(self.team1_id)
            .await
            .gql_err("Loading team failed")?;
        Ok(team.map(Team::from))
    }

    async fn team2(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Team>> {
        let loader = ctx.data::<DataLoader<TeamLoader>>()?;
        let team = loader
            .load_one(self.team2_id)
            .await
            .gql_err("Loading team failed")?;
        Ok(team.map(Team::from))
    }
}

#[derive(InputObject)]
pub struct CreateMatchInput {
    /// Defaults to `G` (group stage).
    #[graphql(default = "G")]
    pub play_stage: String,
    pub play_date: NaiveDate,
    pub team1_id: i32,
    pub team2_id: i32,
    pub goal_score: Option<String>,
    pub results: Option<MatchOutcome>,
    #[graphql(default_with = "DecidedBy::Normal")]
    pub decided_by: DecidedBy,
    #[graphql(default)]
    pub audience: i32,
    pub player_of_match: Option<i32>,
}

#[derive(SimpleObject)]
pub struct StandingsRefreshError {
    pub tournament_id: Option<i32>,
    pub message: String,
}

#[derive(SimpleObject)]
pub struct MatchResultPayload {
    #[graphql(name = "match")]
    pub match_row: Match,
    /// One report per tournament whose standings were refreshed.
    pub standings: Vec<StandingsReport>,
    pub standings_errors: Vec<StandingsRefreshError>,
}

impl From<RecordedResult> for MatchResultPayload {
    fn from(recorded: RecordedResult) -> Self {
        MatchResultPayload {
            match_row: Match::from(recorded.row),
            standings: recorded
                .standings
                .refreshed
                .into_iter()
                .map(StandingsReport::from)
                .collect(),
            standings_errors: recorded
                .standings
                .failures
                .into_iter()
                .map(|f| StandingsRefreshError {
                    tournament_id: f.tournament_id,
                    message: f.message,
                })
                .collect(),
        }
    }
}

use async_graphql::dataloader::DataLoader;
use async_graphql::{ComplexObject, Context, Enum, SimpleObject};
use chrono::NaiveDate;
use infra::models::{GoalRow, PlayerRow};
use infra::repos::{CardCount, ScorerEntry};

use crate::gql::domains::teams::types::Team;
use crate::gql::error::ResultExt;
use crate::gql::loaders::{PlayerLoader, TeamLoader};

#[derive(SimpleObject, Clone)]
pub struct Player {
    pub id: i32,
    pub name: String,
    pub jersey_no: i32,
    pub position_to_play: String,
    pub date_of_birth: Option<NaiveDate>,
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            jersey_no: row.jersey_no,
            position_to_play: row.position_to_play,
            date_of_birth: row.date_of_birth,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct TopScorer {
    pub player_id: i32,
    pub name: String,
    pub goal_count: i32,
}

impl From<ScorerEntry> for TopScorer {
    fn from(entry: ScorerEntry) -> Self {
        Self {
            player_id: entry.player_id,
            name: entry.name,
            goal_count: entry.goal_count as i32,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq, Debug)]
pub enum CardColor {
    Red,
    Yellow,
}

impl CardColor {
    /// Red cards are stored as bookings that sent the player off.
    pub fn is_sent_off(self) -> bool {
        matches!(self, CardColor::Red)
    }
}

#[derive(SimpleObject, Clone)]
pub struct PlayerCards {
    pub player_id: i32,
    pub name: String,
    pub team_name: String,
    pub card_count: i32,
}

impl From<CardCount> for PlayerCards {
    fn from(count: CardCount) -> Self {
        Self {
            player_id: count.player_id,
            name: count.name,
            team_name: count.team_name,
            card_count: count.card_count as i32,
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Goal {
    pub id: i32,
    pub match_id: i32,
    pub player_id: i32,
    pub team_id: i32,
    /// Minute of the match.
    pub goal_time: i32,
    pub goal_type: String,
    pub play_stage: String,
    pub goal_schedule: String,
    pub goal_half: Option<i32>,
}

impl From<GoalRow> for Goal {
    fn from(row: GoalRow) -> Self {
        Self {
            id: row.id,
            match_id: row.match_id,
            player_id: row.player_id,
            team_id: row.team_id,
            goal_time: row.goal_time,
            goal_type: row.goal_type,
            play_stage: row.play_stage,
            goal_schedule: row.goal_schedule,
            goal_half: row.goal_half,
        }
    }
}

#[ComplexObject]
impl Goal {
    async fn player(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Player>> {
        let loader = ctx.data::<DataLoader<PlayerLoader>>()?;
        let player = loader
            .load_one(self.player_id)
            .await
            .gql_err("Loading player failed")?;
        Ok(player.map(Player::from))
    }

    async fn team(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<Team>> {
        let loader = ctx.data::<DataLoader<TeamLoader>>()?;
        let team = loader
            .load_one(self.team_id)
            .await
            .gql_err("Loading team failed")?;
        Ok(team.map(Team::from))
    }
}

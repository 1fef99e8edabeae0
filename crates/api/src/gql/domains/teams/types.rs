use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use infra::models::TeamRow;

#[derive(SimpleObject, Clone)]
pub struct Team {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<TeamRow> for Team {
    fn from(row: TeamRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

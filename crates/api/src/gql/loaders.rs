use async_graphql::dataloader::Loader;
use infra::{
    db::Db,
    models::{PlayerRow, TeamRow},
    repos::{players, teams},
};
use std::{collections::HashMap, future::Future, sync::Arc};

// TeamLoader - batch load teams by ID for match and goal participants
#[derive(Clone)]
pub struct TeamLoader {
    pool: Db,
}

impl TeamLoader {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }
}

impl Loader<i32> for TeamLoader {
    type Value = TeamRow;
    type Error = Arc<sqlx::Error>;

    fn load(
        &self,
        keys: &[i32],
    ) -> impl Future<Output = std::result::Result<HashMap<i32, Self::Value>, Self::Error>> + Send
    {
        let pool = self.pool.clone();
        let ids: Vec<i32> = keys.to_vec();

        async move {
            let rows = teams::get_by_ids(&pool, &ids).await.map_err(Arc::new)?;
            Ok(rows.into_iter().map(|r| (r.id, r)).collect())
        }
    }
}

// PlayerLoader - batch load players by ID for goal scorers
#[derive(Clone)]
pub struct PlayerLoader {
    pool: Db,
}

impl PlayerLoader {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }
}

impl Loader<i32> for PlayerLoader {
    type Value = PlayerRow;
    type Error = Arc<sqlx::Error>;

    fn load(
        &self,
        keys: &[i32],
    ) -> impl Future<Output = std::result::Result<HashMap<i32, Self::Value>, Self::Error>> + Send
    {
        let pool = self.pool.clone();
        let ids: Vec<i32> = keys.to_vec();

        async move {
            let rows = players::get_by_ids(&pool, &ids).await.map_err(Arc::new)?;
            Ok(rows.into_iter().map(|r| (r.id, r)).collect())
        }
    }
}

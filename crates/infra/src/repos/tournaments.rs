use chrono::NaiveDate;
use sqlx::Result as SqlxResult;

use crate::{db::Db, models::TournamentRow, pagination::LimitOffset};

#[derive(Debug, Clone)]
pub struct CreateTournamentData {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTournamentData {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct TournamentRepo {
    pool: Db,
}

impl TournamentRepo {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: i32) -> SqlxResult<Option<TournamentRow>> {
        sqlx::query_as::<_, TournamentRow>(
            r#"
            SELECT id, name, start_date, end_date, created_at, updated_at
            FROM tournaments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list(&self, page: Option<LimitOffset>) -> SqlxResult<Vec<TournamentRow>> {
        let p = page.unwrap_or_default();

        sqlx::query_as::<_, TournamentRow>(
            r#"
            SELECT id, name, start_date, end_date, created_at, updated_at
            FROM tournaments
            ORDER BY start_date DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(p.limit)
        .bind(p.offset)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn count(&self) -> SqlxResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tournaments")
            .fetch_one(&self.pool)
            .await
    }

    pub async fn create(&self, data: CreateTournamentData) -> SqlxResult<TournamentRow> {
        sqlx::query_as::<_, TournamentRow>(
            r#"
            INSERT INTO tournaments (name, start_date, end_date)
            VALUES ($1, $2, $3)
            RETURNING id, name, start_date, end_date, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_one(&self.pool)
        .await
    }

    /// Fields left as `None` keep their stored value.
    pub async fn update(
        &self,
        id: i32,
        data: UpdateTournamentData,
    ) -> SqlxResult<Option<TournamentRow>> {
        sqlx::query_as::<_, TournamentRow>(
            r#"
            UPDATE tournaments
            SET name = COALESCE($2, name),
                start_date = COALESCE($3, start_date),
                end_date = COALESCE($4, end_date),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, start_date, end_date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_optional(&self.pool)
        .await
    }

    /// Registrations, team rosters and standings go with it (ON DELETE CASCADE).
    pub async fn delete(&self, id: i32) -> SqlxResult<bool> {
        let result = sqlx::query("DELETE FROM tournaments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

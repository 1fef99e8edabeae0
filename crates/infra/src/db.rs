use sqlx::PgPool;

/// Shared connection handle passed explicitly to every repository call.
pub type Db = PgPool;

use anyhow::{Context, Result};
use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub skip_migrations: bool,
    pub gql_introspection: bool,
    pub request_timeout_secs: u64,
    /// Seconds between rate limiter token refills, per client IP.
    pub rate_limit_replenish_secs: u64,
    pub rate_limit_burst: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 30),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid port number")?,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://localhost:3001".to_string())
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            skip_migrations: flag("SKIP_MIGRATIONS"),
            gql_introspection: flag("GQL_INTROSPECTION"),
            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", 30),
            rate_limit_replenish_secs: parse_or("RATE_LIMIT_REPLENISH_SECS", 2),
            rate_limit_burst: parse_or("RATE_LIMIT_BURST", 30),
        })
    }

    /// Defaults for everything except the database URL. Used by tests that
    /// build a schema directly on top of a pool.
    pub fn for_database(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            database_max_connections: 5,
            port: 8080,
            allowed_origins: vec!["http://localhost:3000".to_string()],
            skip_migrations: true,
            gql_introspection: true,
            request_timeout_secs: 30,
            rate_limit_replenish_secs: 2,
            rate_limit_burst: 30,
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn flag(key: &str) -> bool {
    env::var(key)
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false)
}

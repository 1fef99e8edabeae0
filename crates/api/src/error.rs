use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures of the plain HTTP routes. GraphQL errors travel inside the
/// GraphQL response instead.
#[derive(Debug, Error)]
pub enum AppError {
    /// The health check or another direct query could not reach Postgres.
    #[error("database unavailable")]
    DatabaseUnavailable(#[from] sqlx::Error),

    #[error("could not read request body: {0}")]
    RequestBody(String),

    #[error("invalid GraphQL request: {0}")]
    InvalidGraphqlRequest(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DatabaseUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::RequestBody(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidGraphqlRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::DatabaseUnavailable(_) => "DATABASE_UNAVAILABLE",
            AppError::RequestBody(_) => "REQUEST_BODY",
            AppError::InvalidGraphqlRequest(_) => "INVALID_GRAPHQL_REQUEST",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::DatabaseUnavailable(ref e) = self {
            // The sqlx detail stays in the logs.
            tracing::error!("Database error: {e}");
        }
        (
            self.status(),
            Json(ErrorBody {
                code: self.code(),
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

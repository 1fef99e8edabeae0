use api::error::AppError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::Value;

async fn body_json(error: AppError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_database_error_hides_detail() {
    let error = AppError::from(sqlx::Error::Protocol("password leaked".into()));
    assert_eq!(error.code(), "DATABASE_UNAVAILABLE");
    assert_eq!(error.status(), StatusCode::SERVICE_UNAVAILABLE);

    let (status, body) = body_json(error).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "DATABASE_UNAVAILABLE");
    assert_eq!(body["error"], "database unavailable");
}

#[tokio::test]
async fn test_invalid_graphql_request_is_bad_request() {
    let parse_error = serde_json::from_str::<async_graphql::Request>("{").unwrap_err();
    let (status, body) = body_json(AppError::InvalidGraphqlRequest(parse_error.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_GRAPHQL_REQUEST");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("invalid GraphQL request: "));
}

#[tokio::test]
async fn test_unreadable_body_is_bad_request() {
    let (status, body) = body_json(AppError::RequestBody("length limit exceeded".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "REQUEST_BODY");
    assert_eq!(
        body["error"],
        "could not read request body: length limit exceeded"
    );
}

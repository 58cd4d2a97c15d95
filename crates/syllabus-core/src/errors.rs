//! Application error type with HTTP response conversion.
//!
//! Handlers and services return [`AppError`], which pairs an HTTP status
//! with an [`anyhow::Error`] and renders as `{"error": "<message>"}`.
//! Any error convertible into `anyhow::Error` becomes a 500 through `?`;
//! ordering failures go through [`AppError::from_ordering`] so they keep
//! their 404/400 meaning.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use syllabus_ordering::OrderingError;
use utoipa::ToSchema;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    /// Maps ordering failures: missing item or scope to 404, rejected input
    /// to 400, storage failures to 500.
    pub fn from_ordering(err: OrderingError) -> Self {
        match err {
            OrderingError::NotFound(msg) => Self::not_found(anyhow::anyhow!(msg)),
            OrderingError::InvalidInput(msg) => Self::bad_request(anyhow::anyhow!(msg)),
            err @ OrderingError::Storage(_) => {
                tracing::error!(error = %err, "Ordering transaction failed");
                Self::internal(err)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Storage details stay in the logs.
        let message = if self.status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        };

        let body = Json(json!({ "error": message }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_ordering_error_maps_to_404() {
        let err = AppError::from_ordering(OrderingError::not_found("Lesson not found"));
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Lesson not found");
    }

    #[tokio::test]
    async fn test_invalid_input_ordering_error_maps_to_400() {
        let err = AppError::from_ordering(OrderingError::invalid_input("bad payload"));
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad payload");
    }

    #[tokio::test]
    async fn test_storage_error_hides_details() {
        let err = AppError::from_ordering(OrderingError::storage("deadlock detected"));
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[test]
    fn test_question_mark_conversion_is_internal() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}

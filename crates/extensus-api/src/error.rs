//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use extensus_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// An `AppError` on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code and error code for the wrapped error.
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self.0.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ErrorKind::Authorization => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::Internal | ErrorKind::Database | ErrorKind::Configuration => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status();

        let message = if status.is_server_error() {
            tracing::error!(
                kind = %self.0.kind,
                error = %self.0.message,
                source = ?std::error::Error::source(&self.0),
                "Internal server error"
            );
            "An internal error occurred".to_string()
        } else {
            self.0.message
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use http_body_util::BodyExt;

    async fn body_of(response: Response) -> ApiErrorResponse {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_client_errors_keep_message() {
        let response = ApiError(AppError::conflict("email taken")).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_of(response).await;
        assert_eq!(body.error, "CONFLICT");
        assert_eq!(body.message, "email taken");
    }

    #[tokio::test]
    async fn test_server_errors_hide_details() {
        let response =
            ApiError(AppError::database("password authentication failed for user app")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(response).await;
        assert_eq!(body.error, "INTERNAL_ERROR");
        assert!(!body.message.contains("password"));
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::validation("x"), StatusCode::BAD_REQUEST),
            (AppError::authentication("x"), StatusCode::UNAUTHORIZED),
            (AppError::authorization("x"), StatusCode::FORBIDDEN),
            (AppError::not_found("x"), StatusCode::NOT_FOUND),
            (AppError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::configuration("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).status().0, expected);
        }
    }
}

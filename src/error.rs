// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::auth::AuthError;

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Responses carry a `{"error": message}` body when the message is meaningful
/// to the client, and an empty body otherwise.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request (malformed identifier / schema validation failure)
    BadRequest(Option<String>),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(Option<String>),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message, if there is one worth sending
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::BadRequest(msg) => msg.as_deref(),
            ApiError::Unauthorized(msg) => Some(msg),
            ApiError::NotFound(msg) => msg.as_deref(),
            ApiError::InternalServerError(msg) => Some(msg),
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(Some(message.into()))
    }

    /// Schema validation failure with no message body (missing required field,
    /// malformed identifier)
    pub fn validation_failure() -> Self {
        ApiError::BadRequest(None)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found() -> Self {
        ApiError::NotFound(None)
    }

    pub fn not_found_with(message: impl Into<String>) -> Self {
        ApiError::NotFound(Some(message.into()))
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken | AuthError::MissingToken => {
                ApiError::unauthorized("invalid token")
            }
            AuthError::InvalidSecret => {
                tracing::error!("token secret not configured");
                ApiError::internal_server_error("authentication unavailable")
            }
            AuthError::TokenGeneration(msg) | AuthError::Hashing(msg) => {
                // Log the real error but return a generic message
                tracing::error!("auth primitive error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::not_found(),
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                // Unique violation; the only unique constraint is users.username
                ApiError::bad_request("expected `username` to be unique")
            }
            other => {
                tracing::error!("database error: {}", other);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.message() {
            Some(msg) => write!(f, "{}", msg),
            None => write!(f, "{}", self.status_code()),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        match self.message() {
            Some(msg) => (status, Json(json!({ "error": msg }))).into_response(),
            None => status.into_response(),
        }
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use contactbook_core::error::CoreError;
use serde_json::json;

use crate::auth::AuthError;

/// Generic message for every rejected session token. Which check failed is
/// logged, never returned.
pub const UNAUTHORIZED_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`AuthError`] for the
/// authentication core, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce the `{ "success": false, ... }` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `contactbook_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An error from the authentication core.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- Auth core ---
            AppError::Auth(auth) => match auth {
                AuthError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                AuthError::DuplicateIdentity => (
                    StatusCode::BAD_REQUEST,
                    "DUPLICATE_IDENTITY",
                    auth.to_string(),
                ),
                AuthError::AuthenticationFailure => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", auth.to_string())
                }
                AuthError::InvalidToken | AuthError::ExpiredToken | AuthError::RevokedToken => (
                    StatusCode::UNAUTHORIZED,
                    "UNAUTHORIZED",
                    UNAUTHORIZED_TOKEN_MESSAGE.to_string(),
                ),
                AuthError::StoreUnavailable(msg) => {
                    tracing::error!(error = %msg, "Auth store unavailable");
                    internal()
                }
                AuthError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal auth error");
                    internal()
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "success": false,
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}

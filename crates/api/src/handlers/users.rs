//! Handlers for the `/users` resource (register, login, logout, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use contactbook_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::auth::{AuthUser, BearerToken};
use crate::response::{DataResponse, MessageData};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, message = "must be at least 3 characters"))]
    pub username: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
}

/// Request body for `POST /users/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Serialize)]
pub struct LoginData {
    pub token: String,
    pub expires_at: Timestamp,
}

/// The caller's identity as carried by their token.
#[derive(Debug, Serialize)]
pub struct MeData {
    pub id: DbId,
    pub username: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /users
///
/// Register a new user. A taken username is a 400, not a server fault.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<MessageData>>)> {
    state
        .sessions
        .register(&input.username, &input.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::message("User created successfully.")),
    ))
}

/// POST /users/login
///
/// Exchange username + password for a session token.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<Json<DataResponse<LoginData>>> {
    let issued = state
        .sessions
        .login(&input.username, &input.password)
        .await?;

    Ok(Json(DataResponse::new(LoginData {
        token: issued.token,
        expires_at: issued.expires_at,
    })))
}

/// POST /users/logout
///
/// Revoke the presented token for the rest of its lifetime.
pub async fn logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> AppResult<Json<DataResponse<MessageData>>> {
    state.sessions.logout(&token).await?;
    Ok(Json(DataResponse::message("Logged out successfully.")))
}

/// GET /users/me
pub async fn me(user: AuthUser) -> Json<DataResponse<MeData>> {
    Json(DataResponse::new(MeData {
        id: user.user_id,
        username: user.username,
    }))
}

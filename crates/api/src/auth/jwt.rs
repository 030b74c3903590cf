//! Session token issuing, decoding, and fingerprinting.
//!
//! Session tokens are HS256-signed JWTs containing a [`Claims`] payload. The
//! payload is authenticated, not encrypted. Tokens are never stored
//! server-side; the revocation list only ever sees their SHA-256 fingerprint.

use chrono::Duration;
use contactbook_core::types::{DbId, Timestamp};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::AuthError;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// The user's username at the time of login.
    pub username: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4); keeps tokens issued in the same
    /// second for the same user distinct.
    pub jti: String,
}

/// Configuration for session token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in minutes (default: 60).
    pub expiry_mins: i64,
}

/// Default token expiry in minutes.
const DEFAULT_EXPIRY_MINS: i64 = 60;

/// Longest accepted token lifetime: 30 days.
pub const MAX_EXPIRY_MINS: i64 = 60 * 24 * 30;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var           | Required | Default |
    /// |-------------------|----------|---------|
    /// | `JWT_SECRET`      | **yes**  | --      |
    /// | `JWT_EXPIRY_MINS` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty, or if
    /// `JWT_EXPIRY_MINS` is not an integer in `1..=MAX_EXPIRY_MINS`.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let expiry_mins = std::env::var("JWT_EXPIRY_MINS")
            .map(|raw| parse_expiry_mins(&raw))
            .unwrap_or(Ok(DEFAULT_EXPIRY_MINS))
            .unwrap_or_else(|msg| panic!("{msg}"));

        Self {
            secret,
            expiry_mins,
        }
    }
}

/// Parse a `JWT_EXPIRY_MINS` value, rejecting anything outside
/// `1..=MAX_EXPIRY_MINS`.
fn parse_expiry_mins(raw: &str) -> Result<i64, String> {
    let mins: i64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("JWT_EXPIRY_MINS must be a valid integer: {e}"))?;
    if !(1..=MAX_EXPIRY_MINS).contains(&mins) {
        return Err(format!(
            "JWT_EXPIRY_MINS must be between 1 and {MAX_EXPIRY_MINS}, got {mins}"
        ));
    }
    Ok(mins)
}

/// A freshly issued session token and the instant it stops being valid.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
}

/// Issue a session token for the given user, valid from now.
pub fn issue_token(
    user_id: DbId,
    username: &str,
    config: &JwtConfig,
) -> Result<IssuedToken, AuthError> {
    issue_token_at(user_id, username, config, chrono::Utc::now())
}

/// Issue a session token as if the current time were `now`.
pub fn issue_token_at(
    user_id: DbId,
    username: &str,
    config: &JwtConfig,
    now: Timestamp,
) -> Result<IssuedToken, AuthError> {
    let expires_at = Duration::try_minutes(config.expiry_mins)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| {
            AuthError::Internal(format!(
                "Token expiry of {} minutes is out of range",
                config.expiry_mins
            ))
        })?;

    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    let token = encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AuthError::Internal(format!("Token generation error: {e}")))?;

    Ok(IssuedToken { token, expires_at })
}

/// Check the token's signature and structure and return its [`Claims`].
///
/// Expiry is *not* checked here; [`crate::auth::verifier::TokenVerifier`]
/// does that against its own clock so expired and forged tokens stay
/// distinguishable.
pub fn decode_token(token: &str, config: &JwtConfig) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp"]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "Token failed signature or structure check");
        AuthError::InvalidToken
    })
}

/// Compute the lowercase hex SHA-256 digest of a raw token.
///
/// This is the only form in which a token is ever persisted.
pub fn token_fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

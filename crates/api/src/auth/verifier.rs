//! The per-request token gate.
//!
//! A presented token passes through these checks in order, stopping at the
//! first failure:
//!
//! 1. signature and structure -- [`AuthError::InvalidToken`]
//! 2. `now < exp` -- [`AuthError::ExpiredToken`]
//! 3. fingerprint absent from the revocation store -- [`AuthError::RevokedToken`]
//!
//! The revocation lookup runs on every call; nothing is cached between
//! requests, since a token can be revoked at any point in its lifetime.

use std::sync::Arc;

use super::jwt::{decode_token, token_fingerprint, Claims, JwtConfig};
use super::revocation::RevocationStore;
use super::AuthError;

pub struct TokenVerifier {
    config: JwtConfig,
    revocations: Arc<dyn RevocationStore>,
}

impl TokenVerifier {
    pub fn new(config: JwtConfig, revocations: Arc<dyn RevocationStore>) -> Self {
        Self {
            config,
            revocations,
        }
    }

    pub fn revocations(&self) -> &Arc<dyn RevocationStore> {
        &self.revocations
    }

    /// Verify `token` against the current time.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, chrono::Utc::now().timestamp()).await
    }

    /// Verify `token` as if the current Unix time were `now`.
    pub async fn verify_at(&self, token: &str, now: i64) -> Result<Claims, AuthError> {
        let claims = decode_token(token, &self.config)?;

        if now >= claims.exp {
            tracing::debug!(user_id = claims.sub, exp = claims.exp, "Token expired");
            return Err(AuthError::ExpiredToken);
        }

        if self
            .revocations
            .is_revoked(&token_fingerprint(token))
            .await?
        {
            tracing::debug!(user_id = claims.sub, "Token revoked");
            return Err(AuthError::RevokedToken);
        }

        Ok(claims)
    }
}

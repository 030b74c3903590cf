//! Registration, login and logout.
//!
//! There is no server-side session table: a session is a signed token held
//! by the client. The only server-side state is the user record and the
//! revocation list written by [`SessionService::logout`].

use std::sync::Arc;
use std::time::Duration;

use contactbook_core::types::DbId;
use contactbook_core::validation::validate_credentials;

use super::credentials::CredentialStore;
use super::jwt::{issue_token, token_fingerprint, Claims, IssuedToken, JwtConfig};
use super::password::{burn_verification, hash_password, verify_password};
use super::revocation::RevocationStore;
use super::verifier::TokenVerifier;
use super::AuthError;

/// Orchestrates the credential store, password hasher, token issuer,
/// verifier and revocation store.
///
/// Constructed once at startup with its store handles and shared through
/// `AppState`.
pub struct SessionService {
    credentials: Arc<dyn CredentialStore>,
    verifier: TokenVerifier,
    jwt: JwtConfig,
}

impl SessionService {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        revocations: Arc<dyn RevocationStore>,
        jwt: JwtConfig,
    ) -> Self {
        Self {
            credentials,
            verifier: TokenVerifier::new(jwt.clone(), revocations),
            jwt,
        }
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    pub fn revocations(&self) -> &Arc<dyn RevocationStore> {
        self.verifier.revocations()
    }

    /// Create a user. Input is validated before the store is touched.
    pub async fn register(&self, username: &str, password: &str) -> Result<DbId, AuthError> {
        validate_credentials(username, password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        let password_hash = hash_password(password)
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {e}")))?;

        match self.credentials.create(username, &password_hash).await {
            Ok(user_id) => {
                tracing::info!(user_id, username, "User registered");
                Ok(user_id)
            }
            Err(AuthError::DuplicateIdentity) => {
                tracing::info!(username, "Registration rejected: username taken");
                Err(AuthError::DuplicateIdentity)
            }
            Err(e) => Err(e),
        }
    }

    /// Check credentials and issue a session token.
    ///
    /// Unknown username and wrong password both return
    /// [`AuthError::AuthenticationFailure`], and both cost one password
    /// verification.
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let Some(user) = self.credentials.find_by_username(username).await? else {
            burn_verification(password);
            tracing::info!(username, "Login failed");
            return Err(AuthError::AuthenticationFailure);
        };

        if !verify_password(password, &user.password_hash) {
            tracing::info!(username, "Login failed");
            return Err(AuthError::AuthenticationFailure);
        }

        let issued = issue_token(user.id, &user.username, &self.jwt)?;

        tracing::info!(user_id = user.id, "Login succeeded");
        Ok(issued)
    }

    /// Run the token through the verifier gate.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verifier.verify(token).await
    }

    /// Revoke `token` for the rest of its lifetime.
    ///
    /// Invalid and expired tokens are rejected. A token that is already
    /// revoked is accepted without a second write, so repeated logouts all
    /// succeed.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        self.logout_at(token, chrono::Utc::now().timestamp()).await
    }

    async fn logout_at(&self, token: &str, now: i64) -> Result<(), AuthError> {
        let claims = match self.verifier.verify_at(token, now).await {
            Ok(claims) => claims,
            Err(AuthError::RevokedToken) => {
                tracing::debug!("Logout of an already revoked token");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let remaining = u64::try_from(claims.exp - now).unwrap_or(0);
        self.revocations()
            .revoke(&token_fingerprint(token), Duration::from_secs(remaining))
            .await?;

        tracing::info!(user_id = claims.sub, ttl_secs = remaining, "Token revoked");
        Ok(())
    }
}

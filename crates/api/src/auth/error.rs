/// Failures produced by the authentication core.
///
/// The three token variants are kept apart for logging and tests but are
/// collapsed into a single 401 at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Input failed the credential contract; never reaches a store.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The username is already registered.
    #[error("Username already taken")]
    DuplicateIdentity,

    /// Unknown username or wrong password. Deliberately indistinguishable.
    #[error("Invalid username or password")]
    AuthenticationFailure,

    /// Signature mismatch or malformed token.
    #[error("Invalid token")]
    InvalidToken,

    /// Signature is valid but the token is past its expiry.
    #[error("Token expired")]
    ExpiredToken,

    /// The token was logged out before its expiry.
    #[error("Token revoked")]
    RevokedToken,

    /// A backing store could not be reached or returned an error.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Hashing or signing failed.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Returns `true` for the variants that reject a presented token.
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::ExpiredToken | AuthError::RevokedToken
        )
    }
}

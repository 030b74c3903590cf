//! Durable user records consumed by registration and login.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use contactbook_core::types::DbId;
use contactbook_db::models::user::{CreateUser, User};
use contactbook_db::repositories::user_repo::is_duplicate_username;
use contactbook_db::repositories::UserRepo;
use contactbook_db::DbPool;
use tokio::sync::Mutex;

use super::AuthError;

/// Storage for user identities and their password hashes.
///
/// Implementations must enforce username uniqueness atomically: of N
/// concurrent `create` calls for one username, exactly one succeeds and the
/// rest fail with [`AuthError::DuplicateIdentity`].
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a user and return its id.
    async fn create(&self, username: &str, password_hash: &str) -> Result<DbId, AuthError>;

    /// Look a user up by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), AuthError>;
}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

/// [`CredentialStore`] over the `users` table.
pub struct PgCredentialStore {
    pool: DbPool,
}

impl PgCredentialStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn store_error(err: sqlx::Error) -> AuthError {
    AuthError::StoreUnavailable(err.to_string())
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn create(&self, username: &str, password_hash: &str) -> Result<DbId, AuthError> {
        let input = CreateUser {
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        match UserRepo::create(&self.pool, &input).await {
            Ok(user) => Ok(user.id),
            Err(e) if is_duplicate_username(&e) => Err(AuthError::DuplicateIdentity),
            Err(e) => Err(store_error(e)),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        UserRepo::find_by_username(&self.pool, username)
            .await
            .map_err(store_error)
    }

    async fn ping(&self) -> Result<(), AuthError> {
        contactbook_db::health_check(&self.pool)
            .await
            .map_err(store_error)
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MemoryUsers {
    next_id: DbId,
    by_username: HashMap<String, User>,
}

/// Process-local [`CredentialStore`] for tests and single-node development.
///
/// Check-and-insert happens under one lock, which gives the same
/// one-winner guarantee as the database constraint.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: Mutex<MemoryUsers>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create(&self, username: &str, password_hash: &str) -> Result<DbId, AuthError> {
        let mut users = self.users.lock().await;
        if users.by_username.contains_key(username) {
            return Err(AuthError::DuplicateIdentity);
        }
        users.next_id += 1;
        let id = users.next_id;
        users.by_username.insert(
            username.to_string(),
            User {
                id,
                username: username.to_string(),
                password_hash: password_hash.to_string(),
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        Ok(self.users.lock().await.by_username.get(username).cloned())
    }

    async fn ping(&self) -> Result<(), AuthError> {
        Ok(())
    }
}

//! Revoked-token storage.
//!
//! Logout writes the token's fingerprint under
//! `blacklist:jwt:<hex sha-256>` with a TTL equal to the token's remaining
//! lifetime, so an entry never outlives the token it revokes. Entries are
//! never deleted explicitly; they expire on their own.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use redis::AsyncCommands;
use tokio::sync::RwLock;
use tokio::time::Instant;

use super::AuthError;
use crate::config::RedisConfig;

/// Key prefix for revocation entries. Part of the persisted-state contract;
/// external tooling inspects these keys.
pub const REVOCATION_KEY_PREFIX: &str = "blacklist:jwt:";

/// Value stored under every revocation key.
pub const REVOKED_SENTINEL: &str = "true";

/// Build the store key for a token fingerprint.
pub fn revocation_key(fingerprint: &str) -> String {
    format!("{REVOCATION_KEY_PREFIX}{fingerprint}")
}

/// A negative list of token fingerprints with per-entry expiry.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Mark `fingerprint` as revoked for `ttl`.
    ///
    /// Idempotent: revoking an already-revoked fingerprint overwrites the
    /// entry and succeeds.
    async fn revoke(&self, fingerprint: &str, ttl: Duration) -> Result<(), AuthError>;

    /// Returns `true` if `fingerprint` has an unexpired revocation entry.
    async fn is_revoked(&self, fingerprint: &str) -> Result<bool, AuthError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), AuthError>;
}

// ---------------------------------------------------------------------------
// Redis
// ---------------------------------------------------------------------------

/// Redis connection pool type.
pub type RedisPool = Pool<RedisConnectionManager>;

/// [`RevocationStore`] backed by a pooled Redis connection.
pub struct RedisRevocationStore {
    pool: RedisPool,
    /// Upper bound on a single Redis command, including pool checkout.
    command_timeout: Duration,
}

impl RedisRevocationStore {
    /// Build the pool from `config` and verify connectivity with a PING.
    pub async fn connect(config: &RedisConfig) -> Result<Self, AuthError> {
        let manager = RedisConnectionManager::new(config.url.clone()).map_err(|e| {
            AuthError::StoreUnavailable(format!("Failed to create Redis manager: {e}"))
        })?;

        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build(manager)
            .await
            .map_err(|e| AuthError::StoreUnavailable(format!("Failed to create Redis pool: {e}")))?;

        let store = Self {
            pool,
            command_timeout: Duration::from_millis(config.command_timeout_ms),
        };
        store.ping().await?;

        tracing::info!(
            pool_size = config.pool_size,
            command_timeout_ms = config.command_timeout_ms,
            "Redis revocation store connected"
        );
        Ok(store)
    }

    /// Run `op` under the command timeout.
    async fn with_timeout<F, T>(&self, op: F) -> Result<T, AuthError>
    where
        F: std::future::Future<Output = Result<T, AuthError>>,
    {
        tokio::time::timeout(self.command_timeout, op)
            .await
            .map_err(|_| {
                AuthError::StoreUnavailable(format!(
                    "Redis command timeout ({}ms)",
                    self.command_timeout.as_millis()
                ))
            })?
    }

    async fn get_conn(
        &self,
    ) -> Result<bb8::PooledConnection<'_, RedisConnectionManager>, AuthError> {
        self.pool
            .get()
            .await
            .map_err(|e| AuthError::StoreUnavailable(format!("Failed to get Redis connection: {e}")))
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn revoke(&self, fingerprint: &str, ttl: Duration) -> Result<(), AuthError> {
        let key = revocation_key(fingerprint);
        let seconds = ttl.as_secs().max(1);
        self.with_timeout(async {
            let mut conn = self.get_conn().await?;
            conn.set_ex::<_, _, ()>(key.as_str(), REVOKED_SENTINEL, seconds)
                .await
                .map_err(|e| AuthError::StoreUnavailable(format!("Redis SETEX failed: {e}")))
        })
        .await
    }

    async fn is_revoked(&self, fingerprint: &str) -> Result<bool, AuthError> {
        let key = revocation_key(fingerprint);
        self.with_timeout(async {
            let mut conn = self.get_conn().await?;
            conn.exists::<_, bool>(key.as_str())
                .await
                .map_err(|e| AuthError::StoreUnavailable(format!("Redis EXISTS failed: {e}")))
        })
        .await
    }

    async fn ping(&self) -> Result<(), AuthError> {
        self.with_timeout(async {
            let mut conn = self.get_conn().await?;
            let _: String = conn
                .ping()
                .await
                .map_err(|e| AuthError::StoreUnavailable(format!("Redis ping failed: {e}")))?;
            Ok(())
        })
        .await
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Process-local [`RevocationStore`] for tests and single-node development.
///
/// Entries are keyed exactly as in Redis and carry a deadline; expired
/// entries read as absent and are pruned on the next write.
#[derive(Debug, Default)]
pub struct InMemoryRevocationStore {
    entries: RwLock<HashMap<String, Instant>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of unexpired entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|deadline| **deadline > now)
            .count()
    }

    /// Returns `true` if the raw store `key` is present and unexpired.
    pub async fn contains_key(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .get(key)
            .is_some_and(|deadline| *deadline > now)
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn revoke(&self, fingerprint: &str, ttl: Duration) -> Result<(), AuthError> {
        let now = Instant::now();
        let ttl = ttl.max(Duration::from_secs(1));
        let mut entries = self.entries.write().await;
        entries.retain(|_, deadline| *deadline > now);
        entries.insert(revocation_key(fingerprint), now + ttl);
        Ok(())
    }

    async fn is_revoked(&self, fingerprint: &str) -> Result<bool, AuthError> {
        Ok(self.contains_key(&revocation_key(fingerprint)).await)
    }

    async fn ping(&self) -> Result<(), AuthError> {
        Ok(())
    }
}

//! `UserCache` implementation on Redis via `bb8-redis`.
//!
//! Records are stored as JSON strings under `user:<id>` with no expiry.
//! Existence probes use `KEYS` with glob metacharacters escaped, so a probe
//! only ever matches the exact key.

use std::collections::BTreeSet;
use std::fmt::Display;

use async_trait::async_trait;
use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::Pool;
use bb8_redis::redis;
use tracing::debug;

use crate::domain::ports::{UserCache, UserCacheError, UserCacheKey};
use crate::domain::{UserId, UserRecord};

const KEY_PREFIX: &str = "user:";

/// Redis cache for user records.
#[derive(Clone)]
pub struct RedisUserCache {
    pool: Pool<RedisConnectionManager>,
}

impl RedisUserCache {
    /// Wrap an existing connection pool.
    pub fn new(pool: Pool<RedisConnectionManager>) -> Self {
        Self { pool }
    }

    /// Build a pool for `url` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`UserCacheError::Backend`] when the URL is invalid or the
    /// pool cannot open its first connection.
    pub async fn connect(url: &str) -> Result<Self, UserCacheError> {
        let manager = RedisConnectionManager::new(url).map_err(backend_error)?;
        let pool = Pool::builder()
            .build(manager)
            .await
            .map_err(backend_error)?;
        Ok(Self::new(pool))
    }
}

fn backend_error(error: impl Display) -> UserCacheError {
    debug!(%error, "redis operation failed");
    UserCacheError::backend(error.to_string())
}

fn storage_key(key: &str) -> String {
    format!("{KEY_PREFIX}{key}")
}

/// Escape glob metacharacters so `KEYS` treats the pattern literally.
fn literal_pattern(key: &str) -> String {
    let mut pattern = String::with_capacity(KEY_PREFIX.len() + key.len());
    pattern.push_str(KEY_PREFIX);
    for ch in key.chars() {
        if matches!(ch, '*' | '?' | '[' | ']' | '\\' | '^' | '-') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern
}

#[async_trait]
impl UserCache for RedisUserCache {
    async fn get(&self, key: &UserCacheKey) -> Result<Option<UserRecord>, UserCacheError> {
        let mut conn = self.pool.get().await.map_err(backend_error)?;
        let raw: Option<String> = redis::cmd("GET")
            .arg(storage_key(key.as_str()))
            .query_async(&mut *conn)
            .await
            .map_err(backend_error)?;
        raw.map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(|err| UserCacheError::serialization(err.to_string()))
    }

    async fn set(&self, id: &UserId, record: &UserRecord) -> Result<(), UserCacheError> {
        let json = serde_json::to_string(record)
            .map_err(|err| UserCacheError::serialization(err.to_string()))?;
        let mut conn = self.pool.get().await.map_err(backend_error)?;
        let () = redis::cmd("SET")
            .arg(storage_key(id.as_ref()))
            .arg(json)
            .query_async(&mut *conn)
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    async fn delete(&self, key: &UserCacheKey) -> Result<(), UserCacheError> {
        let mut conn = self.pool.get().await.map_err(backend_error)?;
        let removed: i64 = redis::cmd("DEL")
            .arg(storage_key(key.as_str()))
            .query_async(&mut *conn)
            .await
            .map_err(backend_error)?;
        debug!(key = key.as_str(), removed, "user cache entry evicted");
        Ok(())
    }

    async fn keys_matching(
        &self,
        key: &UserCacheKey,
    ) -> Result<BTreeSet<String>, UserCacheError> {
        let mut conn = self.pool.get().await.map_err(backend_error)?;
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(literal_pattern(key.as_str()))
            .query_async(&mut *conn)
            .await
            .map_err(backend_error)?;
        Ok(keys
            .into_iter()
            .filter_map(|stored| stored.strip_prefix(KEY_PREFIX).map(str::to_owned))
            .collect())
    }
}

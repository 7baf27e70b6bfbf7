//! Cache store port holding disposable copies of user records.
use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::domain::{UserId, UserRecord};

use super::{UserCacheKey, define_port_error};

define_port_error! {
    /// Errors surfaced by the caching adapter.
    pub enum UserCacheError {
        /// Cache backend is unavailable or timing out.
        Backend { message: String } => "user cache backend failure: {message}",
        /// Serialisation or deserialisation of cached content failed.
        Serialization { message: String } => "user cache serialisation failed: {message}",
    }
}

/// Key-value store of user records keyed by identifier.
///
/// Entries never expire on their own. Single-key operations are expected to
/// be atomic in the backing store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCache: Send + Sync {
    /// Read the cached record for a key.
    async fn get(&self, key: &UserCacheKey) -> Result<Option<UserRecord>, UserCacheError>;

    /// Store a record under its identifier, replacing any previous entry.
    async fn set(&self, id: &UserId, record: &UserRecord) -> Result<(), UserCacheError>;

    /// Drop the entry for a key if present.
    async fn delete(&self, key: &UserCacheKey) -> Result<(), UserCacheError>;

    /// Cached keys equal to `key`; empty when nothing is cached.
    async fn keys_matching(&self, key: &UserCacheKey)
    -> Result<BTreeSet<String>, UserCacheError>;
}

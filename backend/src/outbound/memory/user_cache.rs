//! `UserCache` kept in a process-local map.

use std::collections::{BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{UserCache, UserCacheError, UserCacheKey};
use crate::domain::{UserId, UserRecord};

/// Cache keyed by the raw id string. Entries never expire.
#[derive(Debug, Default)]
pub struct InMemoryUserCache {
    entries: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record under an arbitrary key.
    ///
    /// Lets tests plant an entry whose key differs from the record's id.
    pub fn insert_raw(&self, key: &UserCacheKey, record: UserRecord) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.as_str().to_owned(), record);
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserCache for InMemoryUserCache {
    async fn get(&self, key: &UserCacheKey) -> Result<Option<UserRecord>, UserCacheError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key.as_str()).cloned())
    }

    async fn set(&self, id: &UserId, record: &UserRecord) -> Result<(), UserCacheError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.as_ref().to_owned(), record.clone());
        Ok(())
    }

    async fn delete(&self, key: &UserCacheKey) -> Result<(), UserCacheError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key.as_str());
        Ok(())
    }

    async fn keys_matching(
        &self,
        key: &UserCacheKey,
    ) -> Result<BTreeSet<String>, UserCacheError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries
            .keys()
            .filter(|candidate| candidate.as_str() == key.as_str())
            .cloned()
            .collect())
    }
}

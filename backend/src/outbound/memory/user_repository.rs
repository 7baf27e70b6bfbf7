//! `UserRepository` kept in a process-local map.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUserRecord, UserId, UserRecord, Username};

#[derive(Debug, Default)]
struct Store {
    /// Records keyed by id, tagged with their insertion sequence.
    records: HashMap<UserId, (u64, UserRecord)>,
    next_seq: u64,
}

/// Primary store held in memory; contents vanish with the process.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(store: &Store) -> Vec<&(u64, UserRecord)> {
        let mut entries: Vec<_> = store.records.values().collect();
        entries.sort_by_key(|(seq, _)| *seq);
        entries
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> Result<Vec<UserRecord>, UserPersistenceError> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        Ok(Self::sorted(&store)
            .into_iter()
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, UserPersistenceError> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        Ok(store.records.get(id).map(|(_, record)| record.clone()))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserRecord>, UserPersistenceError> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        Ok(Self::sorted(&store)
            .into_iter()
            .find(|(_, record)| record.username() == username)
            .map(|(_, record)| record.clone()))
    }

    async fn insert(&self, user: &NewUserRecord) -> Result<UserRecord, UserPersistenceError> {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        let mut id = UserId::generate();
        while store.records.contains_key(&id) {
            id = UserId::generate();
        }
        let record = user.clone().into_record(id.clone());
        let seq = store.next_seq;
        store.next_seq += 1;
        store.records.insert(id, (seq, record.clone()));
        Ok(record)
    }

    async fn save(&self, user: &UserRecord) -> Result<UserRecord, UserPersistenceError> {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        let seq = match store.records.get(user.id()) {
            Some((seq, _)) => *seq,
            None => {
                let seq = store.next_seq;
                store.next_seq += 1;
                seq
            }
        };
        store.records.insert(user.id().clone(), (seq, user.clone()));
        Ok(user.clone())
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<(), UserPersistenceError> {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        store.records.remove(id);
        Ok(())
    }
}

//! Primary store port for user accounts and its errors.
//!
//! The store does not enforce username uniqueness; callers check for an
//! existing holder before inserting or renaming.

use async_trait::async_trait;

use crate::domain::{NewUserRecord, UserId, UserRecord, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every stored record, oldest first.
    async fn find_all(&self) -> Result<Vec<UserRecord>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserRecord>, UserPersistenceError>;

    /// Fetch a user by login name.
    ///
    /// Should several records share a name the oldest wins.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserRecord>, UserPersistenceError>;

    /// Persist a new record, assigning its identifier.
    async fn insert(&self, user: &NewUserRecord) -> Result<UserRecord, UserPersistenceError>;

    /// Overwrite the record stored under `user.id()`.
    async fn save(&self, user: &UserRecord) -> Result<UserRecord, UserPersistenceError>;

    /// Remove a record. Removing an absent id succeeds.
    async fn delete_by_id(&self, id: &UserId) -> Result<(), UserPersistenceError>;
}

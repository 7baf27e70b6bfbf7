//! Driving port for user account management.
//!
//! Inbound adapters call [`UserAccounts`] with raw request values; the
//! implementation validates them and answers every anticipated condition
//! with a [`ResultEnvelope`]. Only unexpected store, cache or hashing
//! failures surface as [`AccessError`].

use async_trait::async_trait;

use crate::domain::{AccessError, CallerIdentity, ResultEnvelope};

use super::SessionInvalidator;

/// Body of a create request, as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRequest {
    pub username: String,
    pub password: String,
}

/// Body of an update request, as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserRequest {
    pub id: String,
    pub username: String,
    pub password: String,
}

/// Account operations exposed to inbound adapters.
///
/// Futures are not required to be `Send` because session invalidators are
/// commonly bound to a single request thread.
#[async_trait(?Send)]
pub trait UserAccounts: Send + Sync {
    /// Every account as a list of views.
    async fn list_all(&self) -> Result<ResultEnvelope, AccessError>;

    /// A single account, visible only to its owner.
    async fn get_by_id(
        &self,
        id: &str,
        caller: &CallerIdentity,
    ) -> Result<ResultEnvelope, AccessError>;

    /// Register a new account.
    async fn add_user(&self, request: NewUserRequest) -> Result<ResultEnvelope, AccessError>;

    /// Replace the caller's username and password.
    async fn update_by_id(
        &self,
        request: UpdateUserRequest,
        caller: &CallerIdentity,
        session: &dyn SessionInvalidator,
    ) -> Result<ResultEnvelope, AccessError>;

    /// Remove the caller's account.
    async fn delete_by_id(
        &self,
        id: &str,
        caller: &CallerIdentity,
        session: &dyn SessionInvalidator,
    ) -> Result<ResultEnvelope, AccessError>;
}

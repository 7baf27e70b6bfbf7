//! Unexpected failures raised while serving an account operation.

use thiserror::Error;

use super::ports::{PasswordHashError, UserCacheError, UserPersistenceError};

/// A collaborator failed in a way no envelope anticipates.
///
/// Each variant records the operation that was running so the boundary can
/// log a useful line before answering with an internal-error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("{operation}: user store failed: {source}")]
    Store {
        operation: &'static str,
        source: UserPersistenceError,
    },
    #[error("{operation}: user cache failed: {source}")]
    Cache {
        operation: &'static str,
        source: UserCacheError,
    },
    #[error("{operation}: password hashing failed: {source}")]
    Hashing {
        operation: &'static str,
        source: PasswordHashError,
    },
}

impl AccessError {
    /// Name of the operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Store { operation, .. }
            | Self::Cache { operation, .. }
            | Self::Hashing { operation, .. } => operation,
        }
    }

    pub(crate) fn store(operation: &'static str) -> impl FnOnce(UserPersistenceError) -> Self {
        move |source| Self::Store { operation, source }
    }

    pub(crate) fn cache(operation: &'static str) -> impl FnOnce(UserCacheError) -> Self {
        move |source| Self::Cache { operation, source }
    }

    pub(crate) fn hashing(operation: &'static str) -> impl FnOnce(PasswordHashError) -> Self {
        move |source| Self::Hashing { operation, source }
    }
}

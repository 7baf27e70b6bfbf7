//! Port for one-way password hashing.
use async_trait::async_trait;

use crate::domain::{PasswordHash, PlainPassword};

use super::define_port_error;

define_port_error! {
    /// Errors raised by hashing adapters.
    pub enum PasswordHashError {
        /// The hashing primitive rejected its input or failed internally.
        Hashing { message: String } => "password hashing failed: {message}",
        /// The work could not be scheduled.
        Unavailable { message: String } => "password hasher unavailable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted hash of `password`.
    async fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, PasswordHashError>;

    /// Check `password` against a stored hash.
    ///
    /// A malformed stored hash verifies as `false` rather than failing.
    async fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError>;
}

//! bcrypt implementation of the `PasswordHasher` port.
//!
//! bcrypt is CPU bound, so both operations run on tokio's blocking pool.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{PasswordHash, PlainPassword};

/// Hasher using bcrypt with a configurable work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Build a hasher; `cost` must lie within bcrypt's 4..=31 range.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

async fn run_blocking<T, F>(work: F) -> Result<T, PasswordHashError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| PasswordHashError::unavailable(err.to_string()))
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, PasswordHashError> {
        let cost = self.cost;
        let password = password.clone();
        run_blocking(move || bcrypt::hash(password.expose(), cost))
            .await?
            .map(PasswordHash::new)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    async fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let password = password.clone();
        let hash = hash.clone();
        let outcome = run_blocking(move || bcrypt::verify(password.expose(), hash.as_str())).await?;
        Ok(outcome.unwrap_or_else(|err| {
            warn!(error = %err, "stored password hash could not be parsed");
            false
        }))
    }
}

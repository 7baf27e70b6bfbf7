//! Password login backed by the primary store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::domain::ports::{LoginService, PasswordHasher, UserRepository};
use crate::domain::{Error, INTERNAL_ERROR_MESSAGE, LoginCredentials, Username};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// [`LoginService`] that checks a bcrypt-style hash stored with the account.
pub struct PasswordLoginService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> PasswordLoginService<R, H> {
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<R, H> LoginService for PasswordLoginService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Username, Error> {
        let record = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(|err| {
                error!(error = %err, "login lookup failed");
                Error::internal(INTERNAL_ERROR_MESSAGE)
            })?;
        let Some(record) = record else {
            warn!(username = %credentials.username(), "login for unknown user");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let verified = self
            .hasher
            .verify(credentials.password(), record.password_hash())
            .await
            .map_err(|err| {
                error!(error = %err, "password verification failed");
                Error::internal(INTERNAL_ERROR_MESSAGE)
            })?;
        if !verified {
            warn!(username = %credentials.username(), "login with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(record.username().clone())
    }
}

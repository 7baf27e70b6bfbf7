//! Authentication primitives such as passwords, login credentials and the
//! authenticated caller.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

use super::{UserValidationError, Username};

/// Domain error returned when credential values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Plain-text password supplied by a caller.
///
/// ## Invariants
/// - Non-empty; whitespace is preserved.
/// - Zeroed on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct PlainPassword(Zeroizing<String>);

impl PlainPassword {
    pub fn new(password: impl Into<String>) -> Result<Self, CredentialsValidationError> {
        let password = Zeroizing::new(password.into());
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self(password))
    }

    /// Borrow the secret for hashing or verification.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainPassword(<redacted>)")
    }
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use accounts::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("alice", "pw1").unwrap();
/// assert_eq!(creds.username().as_ref(), "alice");
/// assert_eq!(creds.password().expose(), "pw1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: PlainPassword,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username).map_err(|err| match err {
            UserValidationError::EmptyUsername
            | UserValidationError::EmptyId
            | UserValidationError::InvalidId => CredentialsValidationError::EmptyUsername,
        })?;
        let password = PlainPassword::new(password)?;
        Ok(Self { username, password })
    }

    /// Username suitable for user lookups.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &PlainPassword {
        &self.password
    }
}

/// The authenticated principal on whose behalf an operation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity(Username);

impl CallerIdentity {
    pub fn new(username: Username) -> Self {
        Self(username)
    }

    pub fn username(&self) -> &Username {
        &self.0
    }
}

//! Key type used to address entries in the user cache.
use thiserror::Error;

use crate::domain::UserId;

/// Cache key naming a cached user record.
///
/// Keys are the raw identifier text requested by a caller. They are not
/// required to be well-formed ids: a lookup with a malformed key is simply a
/// miss.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserCacheKey(String);

impl UserCacheKey {
    /// Construct a key after validating that it is non-empty and trimmed.
    pub fn new(value: impl Into<String>) -> Result<Self, UserCacheKeyValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(UserCacheKeyValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(UserCacheKeyValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&UserId> for UserCacheKey {
    fn from(id: &UserId) -> Self {
        Self(id.as_ref().to_owned())
    }
}

impl std::fmt::Display for UserCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for UserCacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validation errors returned when constructing [`UserCacheKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserCacheKeyValidationError {
    #[error("user cache key must not be empty")]
    Empty,
    #[error("user cache key must not contain surrounding whitespace")]
    ContainsWhitespace,
}

//! User account data model.
//!
//! [`UserRecord`] is the stored aggregate, including the password hash.
//! [`UserView`] is the only shape that leaves the service boundary.

use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation errors returned by the user value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyUsername,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be 24 hexadecimal characters"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

static USER_ID_RE: OnceLock<Regex> = OnceLock::new();

fn user_id_regex() -> &'static Regex {
    USER_ID_RE.get_or_init(|| {
        Regex::new("^[0-9a-fA-F]{24}$")
            .unwrap_or_else(|error| panic!("user id regex failed to compile: {error}"))
    })
}

static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
static ID_COUNTER: OnceLock<AtomicU32> = OnceLock::new();

/// Stable user identifier: 24 hexadecimal characters.
///
/// Validation is lexical only. Case is preserved, so two ids differing only
/// in letter case are distinct.
///
/// # Examples
/// ```
/// use accounts::domain::UserId;
///
/// let id = UserId::new("507f1f77bcf86cd799439011").expect("valid id");
/// assert_eq!(id.as_ref(), "507f1f77bcf86cd799439011");
/// assert!(UserId::new("not-an-id").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a fresh identifier.
    ///
    /// Layout: four bytes of big-endian Unix seconds, five bytes fixed for the
    /// lifetime of the process and a three-byte wrapping counter.
    pub fn generate() -> Self {
        let seconds = u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX);
        let process = PROCESS_UNIQUE.get_or_init(rand::random::<[u8; 5]>);
        let counter = ID_COUNTER
            .get_or_init(|| AtomicU32::new(rand::random::<u32>()))
            .fetch_add(1, Ordering::Relaxed)
            & 0x00FF_FFFF;

        let mut bytes = [0_u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(process);
        bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);
        Self(hex::encode(bytes))
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if !user_id_regex().is_match(&id) {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Login name, unique across accounts.
///
/// ## Invariants
/// - Stored trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Trim and validate a username.
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Opaque password hash produced by a `PasswordHasher` adapter.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap hash material produced by a hashing adapter or read from storage.
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Borrow the encoded hash.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Stored user account.
///
/// ## Invariants
/// - `id` is assigned once by the primary store and never changes.
/// - `password_hash` never leaves the service; project to [`UserView`]
///   before returning data to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    id: UserId,
    username: Username,
    password_hash: PasswordHash,
}

impl UserRecord {
    /// Assemble a record from its stored parts.
    pub fn new(id: UserId, username: Username, password_hash: PasswordHash) -> Self {
        Self {
            id,
            username,
            password_hash,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Replace the credentials while keeping the identifier.
    pub fn with_credentials(self, username: Username, password_hash: PasswordHash) -> Self {
        Self {
            id: self.id,
            username,
            password_hash,
        }
    }

    /// Project to the externally visible shape.
    pub fn view(&self) -> UserView {
        UserView::from(self)
    }
}

/// Account data awaiting its first save; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    pub username: Username,
    pub password_hash: PasswordHash,
}

impl NewUserRecord {
    pub fn new(username: Username, password_hash: PasswordHash) -> Self {
        Self {
            username,
            password_hash,
        }
    }

    /// Attach an identifier, producing the stored form.
    pub fn into_record(self, id: UserId) -> UserRecord {
        UserRecord::new(id, self.username, self.password_hash)
    }
}

/// Externally visible projection of a [`UserRecord`].
///
/// # Examples
/// ```
/// use accounts::domain::{PasswordHash, UserId, UserRecord, Username, UserView};
///
/// let record = UserRecord::new(
///     UserId::new("507f1f77bcf86cd799439011").unwrap(),
///     Username::new("alice").unwrap(),
///     PasswordHash::new("$2b$04$hash"),
/// );
/// let json = serde_json::to_value(UserView::from(&record)).unwrap();
/// assert_eq!(json, serde_json::json!({
///     "id": "507f1f77bcf86cd799439011",
///     "username": "alice",
/// }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: UserId,
    pub username: Username,
}

impl From<&UserRecord> for UserView {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id.clone(),
            username: record.username.clone(),
        }
    }
}

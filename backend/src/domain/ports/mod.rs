//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_key;
mod login_service;
mod password_hasher;
mod session_invalidator;
mod user_accounts;
mod user_cache;
mod user_repository;

pub use cache_key::{UserCacheKey, UserCacheKeyValidationError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use session_invalidator::MockSessionInvalidator;
pub use session_invalidator::{NoopSessionInvalidator, SessionInvalidator};
pub use user_accounts::{NewUserRequest, UpdateUserRequest, UserAccounts};
#[cfg(test)]
pub use user_cache::MockUserCache;
pub use user_cache::{UserCache, UserCacheError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};

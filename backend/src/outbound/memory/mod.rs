//! In-process adapters used when no database or Redis URL is configured.
//!
//! They honour the same contracts as the networked adapters, which also
//! makes them the backing stores for behaviour tests.

mod user_cache;
mod user_repository;

pub use user_cache::InMemoryUserCache;
pub use user_repository::InMemoryUserRepository;

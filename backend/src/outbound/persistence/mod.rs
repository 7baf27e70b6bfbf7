//! PostgreSQL persistence adapter for user accounts.
//!
//! Diesel row structs (`models.rs`) and the table definition (`schema.rs`)
//! stay private to this module; only the repository, the pool and the
//! migration runner are exported.
//!
//! # Example
//!
//! ```ignore
//! use accounts::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/accounts")).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed user store using Diesel
//! - **cache**: Redis-backed user record cache
//! - **memory**: in-process store and cache for development and tests
//! - **password**: bcrypt password hashing
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod cache;
pub mod memory;
pub mod password;
pub mod persistence;

//! Redis-backed cache adapter for user records.

mod redis_user_cache;

pub use redis_user_cache::RedisUserCache;

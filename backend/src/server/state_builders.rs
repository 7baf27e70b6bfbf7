//! Wiring of the account service over the configured adapters.
//!
//! PostgreSQL and Redis are used when configured; otherwise the in-memory
//! store and cache stand in, so the service runs without infrastructure.

use std::sync::Arc;

use tracing::info;

use accounts::domain::ports::{
    LoginService, PasswordHasher, UserAccounts, UserCache, UserRepository,
};
use accounts::domain::{PasswordLoginService, UserAccessService};
use accounts::inbound::http::state::HttpState;
use accounts::outbound::memory::{InMemoryUserCache, InMemoryUserRepository};
use accounts::outbound::password::BcryptPasswordHasher;
use accounts::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

type Driving = (Arc<dyn UserAccounts>, Arc<dyn LoginService>);

fn services<R, C, H>(users: Arc<R>, cache: Arc<C>, hasher: Arc<H>) -> Driving
where
    R: UserRepository + 'static,
    C: UserCache + 'static,
    H: PasswordHasher + 'static,
{
    let login = PasswordLoginService::new(Arc::clone(&users), Arc::clone(&hasher));
    let accounts = UserAccessService::new(users, cache, hasher);
    (Arc::new(accounts), Arc::new(login))
}

fn with_store<C>(config: &ServerConfig, cache: Arc<C>, hasher: Arc<BcryptPasswordHasher>) -> Driving
where
    C: UserCache + 'static,
{
    match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL user store");
            services(Arc::new(DieselUserRepository::new(pool.clone())), cache, hasher)
        }
        None => {
            info!("using in-memory user store");
            services(Arc::new(InMemoryUserRepository::new()), cache, hasher)
        }
    }
}

/// Build the HTTP state for the configured store, cache and hasher.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let hasher = Arc::new(BcryptPasswordHasher::new(config.bcrypt_cost));
    let (accounts, login) = match &config.redis_cache {
        Some(cache) => {
            info!("using Redis user cache");
            with_store(config, Arc::new(cache.clone()), hasher)
        }
        None => {
            info!("using in-memory user cache");
            with_store(config, Arc::new(InMemoryUserCache::new()), hasher)
        }
    };
    HttpState::new(accounts, login).with_status_policy(config.status_policy)
}

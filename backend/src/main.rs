//! Account service entry-point: loads settings, connects the configured
//! stores and serves the REST API.

mod server;

use actix_web::cookie::SameSite;
use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use accounts::inbound::http::health::HealthState;
use accounts::outbound::cache::RedisUserCache;
use accounts::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let key = settings.session_key().wrap_err("failed to load session key")?;
    let bind_addr = settings.bind_addr()?;

    let mut config = ServerConfig::new(key, settings.cookie_secure, SameSite::Lax, bind_addr)
        .with_bcrypt_cost(settings.bcrypt_cost())
        .with_status_policy(settings.status_policy());

    if let Some(url) = settings.database_url.as_deref() {
        run_migrations(url)
            .await
            .wrap_err("failed to apply database migrations")?;
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }
    if let Some(url) = settings.redis_url.as_deref() {
        let cache = RedisUserCache::connect(url)
            .await
            .wrap_err("failed to connect to redis")?;
        config = config.with_redis_cache(cache);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to start server")?;
    info!(%bind_addr, "accounts service listening");
    server.await.wrap_err("server terminated with an error")
}

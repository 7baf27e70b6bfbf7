//! Application settings and HTTP server configuration.
//!
//! [`AppSettings`] is loaded with OrthoConfig from CLI flags, `ACCOUNTS_*`
//! environment variables and configuration files. [`ServerConfig`] is the
//! resolved form handed to [`super::create_server`].

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

use accounts::inbound::http::envelope::StatusPolicy;
use accounts::outbound::cache::RedisUserCache;
use accounts::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_BCRYPT_COST: u32 = 12;
const SESSION_KEY_MIN_LEN: usize = 64;

/// Settings controlling the account service at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ACCOUNTS")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. The in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Redis URL. The in-memory cache is used when absent.
    pub redis_url: Option<String>,
    /// File holding the session cookie key material.
    pub session_key_file: Option<PathBuf>,
    /// Allow a generated session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark session cookies `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: Option<u32>,
    /// Answer bad input with 400 instead of 500.
    #[ortho_config(default = false)]
    pub strict_status_codes: bool,
}

/// Errors raised while resolving settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    pub fn session_key_file(&self) -> &Path {
        self.session_key_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SESSION_KEY_FILE))
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST)
    }

    pub fn status_policy(&self) -> StatusPolicy {
        StatusPolicy::from_strict(self.strict_status_codes)
    }

    /// Read the session key, falling back to a generated key in debug
    /// builds or when ephemeral keys are explicitly allowed.
    pub fn session_key(&self) -> Result<Key, SettingsError> {
        let path = self.session_key_file();
        let allow_ephemeral = cfg!(debug_assertions) || self.session_allow_ephemeral;
        match std::fs::read(path) {
            Ok(bytes) if bytes.len() >= SESSION_KEY_MIN_LEN => Ok(Key::derive_from(&bytes)),
            Ok(bytes) => Err(SettingsError::KeyTooShort {
                path: path.to_path_buf(),
                length: bytes.len(),
                min_len: SESSION_KEY_MIN_LEN,
            }),
            Err(error) if allow_ephemeral => {
                warn!(path = %path.display(), %error, "using temporary session key");
                Ok(Key::generate())
            }
            Err(source) => Err(SettingsError::KeyRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) bcrypt_cost: u32,
    pub(crate) status_policy: StatusPolicy,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) redis_cache: Option<RedisUserCache>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            status_policy: StatusPolicy::default(),
            db_pool: None,
            redis_cache: None,
        }
    }

    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    #[must_use]
    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.status_policy = policy;
        self
    }

    /// Use PostgreSQL as the primary store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Use Redis as the record cache.
    #[must_use]
    pub fn with_redis_cache(mut self, cache: RedisUserCache) -> Self {
        self.redis_cache = Some(cache);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 8] = [
        "ACCOUNTS_BIND_ADDR",
        "ACCOUNTS_DATABASE_URL",
        "ACCOUNTS_REDIS_URL",
        "ACCOUNTS_SESSION_KEY_FILE",
        "ACCOUNTS_SESSION_ALLOW_EPHEMERAL",
        "ACCOUNTS_COOKIE_SECURE",
        "ACCOUNTS_BCRYPT_COST",
        "ACCOUNTS_STRICT_STATUS_CODES",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("accounts")]).expect("config should load")
    }

    type EnvVars = [(&'static str, Option<String>); VARS.len()];

    fn cleared() -> EnvVars {
        VARS.map(|name| (name, None))
    }

    fn with(overrides: &[(&'static str, &str)]) -> EnvVars {
        let mut vars = cleared();
        for (name, value) in overrides {
            if let Some(slot) = vars.iter_mut().find(|(var, _)| var == name) {
                slot.1 = Some((*value).to_owned());
            }
        }
        vars
    }

    #[rstest]
    fn defaults_are_used_when_missing() {
        let _guard = lock_env(cleared());

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("socket address")
        );
        assert!(settings.database_url.is_none());
        assert!(settings.redis_url.is_none());
        assert_eq!(settings.session_key_file(), Path::new(DEFAULT_SESSION_KEY_FILE));
        assert!(!settings.session_allow_ephemeral);
        assert!(settings.cookie_secure);
        assert_eq!(settings.bcrypt_cost(), 12);
        assert_eq!(settings.status_policy(), StatusPolicy::Legacy);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(with(&[
            ("ACCOUNTS_BIND_ADDR", "127.0.0.1:9000"),
            ("ACCOUNTS_DATABASE_URL", "postgres://localhost/accounts"),
            ("ACCOUNTS_REDIS_URL", "redis://localhost:6379"),
            ("ACCOUNTS_COOKIE_SECURE", "false"),
            ("ACCOUNTS_BCRYPT_COST", "6"),
            ("ACCOUNTS_STRICT_STATUS_CODES", "true"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("socket address")
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/accounts")
        );
        assert_eq!(settings.redis_url.as_deref(), Some("redis://localhost:6379"));
        assert!(!settings.cookie_secure);
        assert_eq!(settings.bcrypt_cost(), 6);
        assert_eq!(settings.status_policy(), StatusPolicy::Strict);
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let _guard = lock_env(with(&[("ACCOUNTS_BIND_ADDR", "not-an-address")]));

        let err = load_from_empty_args().bind_addr().expect_err("invalid address");
        assert!(matches!(err, SettingsError::BindAddr { .. }));
    }

    #[rstest]
    fn short_session_keys_are_rejected() {
        let path = std::env::temp_dir().join(format!("accounts-short-key-{}", std::process::id()));
        std::fs::write(&path, [7u8; 16]).expect("write key");
        let _guard = lock_env(with(&[(
            "ACCOUNTS_SESSION_KEY_FILE",
            path.to_str().expect("utf8 path"),
        )]));

        let result = load_from_empty_args().session_key();
        std::fs::remove_file(&path).expect("remove key");
        assert!(matches!(
            result,
            Err(SettingsError::KeyTooShort { length: 16, .. })
        ));
    }

    #[rstest]
    fn long_enough_session_keys_are_used() {
        let path = std::env::temp_dir().join(format!("accounts-key-{}", std::process::id()));
        std::fs::write(&path, [7u8; 64]).expect("write key");
        let _guard = lock_env(with(&[(
            "ACCOUNTS_SESSION_KEY_FILE",
            path.to_str().expect("utf8 path"),
        )]));

        let first = load_from_empty_args().session_key().expect("key");
        let second = load_from_empty_args().session_key().expect("key");
        std::fs::remove_file(&path).expect("remove key");
        assert_eq!(first.master(), second.master());
    }
}

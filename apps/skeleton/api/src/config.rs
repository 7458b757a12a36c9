use core_config::{AppInfo, ConfigError, FromEnv, app_info, server::ServerConfig};
use database::postgres::PostgresConfig;
use std::str::FromStr;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// `SKELETON_ENABLED`; the plugin default applies when unset
    pub skeleton_enabled: Option<bool>,
    /// `SKELETON_MAX_ITEMS`; the plugin default applies when unset
    pub skeleton_max_items: Option<i64>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if not set
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            skeleton_enabled: env_optional("SKELETON_ENABLED")?,
            skeleton_max_items: env_optional("SKELETON_MAX_ITEMS")?,
        })
    }
}

/// Parse `key` when it is set; an unset variable is `None`, not an error.
fn env_optional<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::ParseError {
                key: key.to_string(),
                details: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

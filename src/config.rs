//! Database settings loaded from the environment (and `.env`, if present).

use sea_orm::ConnectOptions;
use thiserror::Error;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },

    #[error("Failed to load .env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

#[derive(Clone)]
pub struct DatabaseConfig {
    url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub sqlx_logging: bool,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("sqlx_logging", &self.sqlx_logging)
            .finish()
    }
}

impl DatabaseConfig {
    pub fn new(url: String) -> Self {
        Self {
            url,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
            sqlx_logging: true,
        }
    }

    /// Read `DATABASE_URL` and the optional pool settings.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_env_file(dotenvy::dotenv())?;
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let mut config = Self::new(url);
        if let Some(max) = parse(&lookup, "DATABASE_MAX_CONNECTIONS")? {
            config.max_connections = max;
        }
        if let Some(min) = parse(&lookup, "DATABASE_MIN_CONNECTIONS")? {
            config.min_connections = min;
        }
        if let Some(logging) = parse(&lookup, "DATABASE_SQLX_LOGGING")? {
            config.sqlx_logging = logging;
        }

        if config.min_connections > config.max_connections {
            return Err(ConfigError::Invalid {
                key: "DATABASE_MIN_CONNECTIONS",
                value: config.min_connections.to_string(),
            });
        }
        Ok(config)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn connect_options(&self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url.clone());
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .sqlx_logging(self.sqlx_logging);
        opt
    }
}

/// A missing `.env` is fine; a malformed one is not.
fn load_env_file<T>(result: Result<T, dotenvy::Error>) -> Result<(), ConfigError> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn parse<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

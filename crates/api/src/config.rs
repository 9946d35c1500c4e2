use std::str::FromStr;

use axum::http::HeaderValue;
use candy_db::store::{StorageBackend, UnknownBackend};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Insert demo items at start-up when the store is empty.
    pub seed_demo_data: bool,
    /// Record store selection and connection settings.
    pub storage: StorageConfig,
}

/// Which record store backend to open, and how.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Invalid CORS origin '{0}'")]
    InvalidOrigin(String),

    #[error(transparent)]
    Backend(#[from] UnknownBackend),

    #[error("STORAGE_BACKEND=postgres requires DATABASE_URL to be set")]
    MissingDatabaseUrl,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                   |
    /// |------------------------|-------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                 |
    /// | `PORT`                 | `3000`                                    |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`                   |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                      |
    /// | `DATABASE_URL`         | unset                                     |
    /// | `STORAGE_BACKEND`      | `postgres` with a URL, `offline` without  |
    /// | `DB_MAX_CONNECTIONS`   | `20`                                      |
    /// | `SEED_DEMO_DATA`       | `false`                                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_var(&lookup, "PORT", 3000_u16, "u16")?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        // The CORS layer sends credentials, which rules out a wildcard origin.
        if let Some(bad) = cors_origins
            .iter()
            .find(|o| o.as_str() == "*" || HeaderValue::from_str(o).is_err())
        {
            return Err(ConfigError::InvalidOrigin(bad.clone()));
        }

        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30_u64, "u64")?;
        let seed_demo_data = parse_flag(&lookup, "SEED_DEMO_DATA")?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let backend = match lookup("STORAGE_BACKEND").filter(|b| !b.trim().is_empty()) {
            Some(name) => name.parse()?,
            None if database_url.is_some() => StorageBackend::Postgres,
            None => StorageBackend::Offline,
        };
        if backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        let max_connections = parse_var(
            &lookup,
            "DB_MAX_CONNECTIONS",
            candy_db::DEFAULT_MAX_CONNECTIONS,
            "u32",
        )?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            seed_demo_data,
            storage: StorageConfig {
                backend,
                database_url,
                max_connections,
            },
        })
    }
}

fn parse_var<F, T>(
    lookup: &F,
    key: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value,
        }),
        None => Ok(default),
    }
}

fn parse_flag<F>(lookup: &F, key: &'static str) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            expected: "boolean",
            value,
        }),
    }
}

//! Service Configuration Settings
//!
//! Configuration types for the order service, loaded from environment
//! variables. A value that is present but unparseable is an error; an unset
//! or blank value falls back to the default.

use std::str::FromStr;

/// Database connection settings.
#[derive(Clone)]
pub struct DatabaseSettings {
    /// Postgres connection URL.
    pub url: String,
    /// Maximum pooled connections.
    pub max_connections: u32,
    /// Apply embedded migrations at startup.
    pub run_migrations: bool,
}

impl std::fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("run_migrations", &self.run_migrations)
            .finish()
    }
}

/// Listener port settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// HTTP/REST port (also serves `/health` and `/metrics`).
    pub http_port: u16,
    /// GraphQL port.
    pub graphql_port: u16,
    /// gRPC port.
    pub grpc_port: u16,
    /// Start the gRPC listener (requires the `grpc` feature).
    pub grpc_enabled: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            http_port: 8000,
            graphql_port: 8080,
            grpc_port: 50051,
            grpc_enabled: false,
        }
    }
}

/// Complete service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Database settings.
    pub database: DatabaseSettings,
    /// Listener settings.
    pub server: ServerSettings,
}

impl ServiceConfig {
    /// Default pool size.
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or empty, or any other
    /// variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ServiceConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;
        if url.trim().is_empty() {
            return Err(ConfigError::EmptyValue("DATABASE_URL".to_string()));
        }

        let database = DatabaseSettings {
            url,
            max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                Self::DEFAULT_MAX_CONNECTIONS,
            )?,
            run_migrations: parse_bool_or(&lookup, "RUN_MIGRATIONS", true)?,
        };

        let defaults = ServerSettings::default();
        let server = ServerSettings {
            http_port: parse_or(&lookup, "HTTP_PORT", defaults.http_port)?,
            graphql_port: parse_or(&lookup, "GRAPHQL_PORT", defaults.graphql_port)?,
            grpc_port: parse_or(&lookup, "GRPC_PORT", defaults.grpc_port)?,
            grpc_enabled: parse_bool_or(&lookup, "GRPC_ENABLED", defaults.grpc_enabled)?,
        };

        if database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "DATABASE_MAX_CONNECTIONS".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(Self { database, server })
    }
}

/// Configuration error.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// Environment variable has empty value.
    #[error("environment variable {0} cannot be empty")]
    EmptyValue(String),
    /// Environment variable could not be parsed.
    #[error("environment variable {key} has invalid value '{value}'")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Raw value.
        value: String,
    },
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
    }
}

fn parse_bool_or<F>(lookup: &F, key: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_lowercase().as_str() {
        "" => Ok(default),
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
    }
}

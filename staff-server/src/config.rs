//! Server configuration

use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration, read from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL (env: POSTGRES_DSN, falling back to DATABASE_URL)
    pub database_url: String,
    /// HTTP port (env: HTTP_PORT)
    pub http_port: u16,
    /// Pool size (env: DB_MAX_CONNECTIONS)
    pub db_max_connections: u32,
    /// How long a request may wait for a pooled connection (env: DB_ACQUIRE_TIMEOUT_SECS)
    pub db_acquire_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let database_url = std::env::var("POSTGRES_DSN")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or("POSTGRES_DSN (or DATABASE_URL) must be set")?;

        Ok(Self {
            database_url,
            http_port: env_parse("HTTP_PORT")?.unwrap_or(8080),
            db_max_connections: env_parse("DB_MAX_CONNECTIONS")?.unwrap_or(10),
            db_acquire_timeout: Duration::from_secs(
                env_parse("DB_ACQUIRE_TIMEOUT_SECS")?.unwrap_or(5),
            ),
        })
    }

    /// Address the HTTP listener binds to
    pub fn http_addr(&self) -> String {
        format!("0.0.0.0:{}", self.http_port)
    }
}

/// Parse an optional env var; a set-but-unparseable value is an error
fn env_parse<T>(name: &str) -> Result<Option<T>, BoxError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| format!("{name} is invalid ({raw:?}): {e}").into()),
        _ => Ok(None),
    }
}

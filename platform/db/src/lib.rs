//! Database settings and connection bootstrap.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://mcsu.db?mode=rwc";

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing")]
    MissingUrl,
    #[error("failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: DbErr,
    },
}

pub type DbResult<T> = Result<T, DbError>;

#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default)]
    pub log_statements: bool,
}

fn default_max_connections() -> u32 {
    10
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_URL)
    }
}

impl DatabaseSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: default_max_connections(),
            log_statements: false,
        }
    }

    /// Settings from `env_key`, falling back to the local SQLite file.
    pub fn from_env(env_key: &str) -> Self {
        match std::env::var(env_key) {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite:")
    }

    pub fn connect_options(&self) -> DbResult<ConnectOptions> {
        if self.url.trim().is_empty() {
            return Err(DbError::MissingUrl);
        }
        let mut opts = ConnectOptions::new(self.url.clone());
        // In-memory SQLite databases exist per connection.
        let max = if self.url.contains(":memory:") {
            1
        } else {
            self.max_connections
        };
        opts.max_connections(max)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(self.log_statements);
        Ok(opts)
    }
}

pub async fn connect(settings: &DatabaseSettings) -> DbResult<DatabaseConnection> {
    let opts = settings.connect_options()?;
    tracing::info!(sqlite = settings.is_sqlite(), "connecting to database");
    Database::connect(opts).await.map_err(|source| DbError::Connect {
        url: redact(&settings.url),
        source,
    })
}

/// Strip credentials from a connection URL before it reaches logs.
pub fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme), Some(at)) if at > scheme => {
            format!("{}://***{}", &url[..scheme], &url[at..])
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ConnectionTrait;

    #[test]
    fn credentials_are_redacted() {
        assert_eq!(
            redact("postgres://app:hunter2@db:5432/mcsu"),
            "postgres://***@db:5432/mcsu"
        );
        assert_eq!(redact(DEFAULT_DATABASE_URL), DEFAULT_DATABASE_URL);
    }

    #[test]
    fn empty_url_is_rejected() {
        assert!(matches!(
            DatabaseSettings::new("  ").connect_options(),
            Err(DbError::MissingUrl)
        ));
    }

    #[tokio::test]
    async fn connects_to_in_memory_sqlite() {
        let db = connect(&DatabaseSettings::new("sqlite::memory:"))
            .await
            .unwrap();
        db.execute_unprepared("CREATE TABLE scratch (id INTEGER)")
            .await
            .unwrap();
    }
}

use crate::config::DatabaseConfig;
use anyhow::Context;
use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
};
use std::{str::FromStr, time::Duration};
use tracing::{info, warn};

#[derive(Clone)]
pub struct Database {
    pub(crate) pool: Pool<Sqlite>,
}

/// Common methods for the primary database, extensions are implemented separately in every module.
impl Database {
    /// Connects to the database, retrying with a fixed backoff, and applies migrations.
    pub async fn open(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .with_context(|| "Cannot parse database connection string.")?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let mut attempt = 1;
        let pool = loop {
            match SqlitePoolOptions::new().connect_with(options.clone()).await {
                Ok(pool) => break pool,
                Err(err) if attempt < config.connection_attempts => {
                    warn!(
                        db.attempt = attempt,
                        "Failed to connect to the database, retrying in {:?}: {err:?}",
                        config.connection_backoff
                    );
                    attempt += 1;
                    tokio::time::sleep(config.connection_backoff).await;
                }
                Err(err) => {
                    return Err(err).with_context(|| {
                        format!("Failed to connect to the database after {attempt} attempts.")
                    });
                }
            }
        };

        info!("Connected to the database.");
        Self::create(pool).await
    }

    /// Wraps an existing pool, applying migrations first.
    pub async fn create(pool: Pool<Sqlite>) -> anyhow::Result<Self> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .with_context(|| "Failed to migrate database")?;

        Ok(Database { pool })
    }
}

#[cfg(test)]
mod tests {
    use crate::{config::DatabaseConfig, database::Database};
    use std::time::Duration;

    #[tokio::test]
    async fn fails_after_all_attempts() {
        let config = DatabaseConfig {
            url: "sqlite:/nonexistent-keeper-dir/keeper.db".to_string(),
            connection_attempts: 2,
            connection_backoff: Duration::from_millis(10),
        };

        let error = Database::open(&config).await.err().map(|err| err.to_string());
        assert_eq!(
            error.as_deref(),
            Some("Failed to connect to the database after 2 attempts.")
        );
    }
}

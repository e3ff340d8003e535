use serde_derive::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::time::Duration;

/// Configuration for the database connection.
#[serde_as]
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// Connection string of the SQLite database.
    pub url: String,
    /// Number of attempts to connect to the database at startup before giving up.
    pub connection_attempts: u32,
    /// Fixed delay between two connection attempts.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub connection_backoff: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:keeper.db?mode=rwc".to_string(),
            connection_attempts: 10,
            connection_backoff: Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::DatabaseConfig;
    use insta::assert_toml_snapshot;
    use std::time::Duration;

    #[test]
    fn serialization() {
        let config = DatabaseConfig::default();
        assert_toml_snapshot!(config, @r###"
        url = 'sqlite:keeper.db?mode=rwc'
        connection_attempts = 10
        connection_backoff = 1000
        "###);
    }

    #[test]
    fn deserialization() -> anyhow::Result<()> {
        let config: DatabaseConfig = toml::from_str(
            r#"
        url = 'sqlite::memory:'
        connection_attempts = 3
        connection_backoff = 250
    "#,
        )?;
        assert_eq!(
            config,
            DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                connection_attempts: 3,
                connection_backoff: Duration::from_millis(250),
            }
        );

        Ok(())
    }
}

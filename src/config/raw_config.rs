use crate::config::{DatabaseConfig, SecurityConfig, TlsConfig};
use figment::{Figment, Metadata, Profile, Provider, providers, providers::Format, value};
use serde_derive::{Deserialize, Serialize};

/// Raw configuration structure that is used to read the configuration from the file.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RawConfig {
    /// Address (host:port) to listen on.
    pub address: String,
    /// Default log level, used when `RUST_LOG` isn't set.
    pub log_level: String,
    /// Database configuration.
    pub db: DatabaseConfig,
    /// Security configuration (access token signing).
    pub security: SecurityConfig,
    /// TLS configuration, required to serve.
    pub tls: Option<TlsConfig>,
}

impl RawConfig {
    /// Reads the configuration from the file (TOML) and merges it with the default values and
    /// `KEEPERD_` prefixed environment variables.
    pub fn read_from_file(path: &str) -> anyhow::Result<Self> {
        Ok(Figment::from(RawConfig::default())
            .merge(providers::Toml::file(path))
            .merge(providers::Env::prefixed("KEEPERD_").split("__"))
            .extract()?)
    }
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0:9090".to_string(),
            log_level: "info".to_string(),
            db: DatabaseConfig::default(),
            security: SecurityConfig::default(),
            tls: None,
        }
    }
}

impl Provider for RawConfig {
    fn metadata(&self) -> Metadata {
        Metadata::named("keeperd main configuration")
    }

    fn data(&self) -> Result<value::Map<Profile, value::Dict>, figment::Error> {
        providers::Serialized::defaults(Self::default()).data()
    }
}

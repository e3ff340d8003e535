mod database_config;
mod raw_config;
mod security_config;
mod tls_config;

use anyhow::{Context, bail};
use tracing::warn;

pub use self::{
    database_config::DatabaseConfig,
    raw_config::RawConfig,
    security_config::{MIN_JWT_SECRET_LENGTH, SecurityConfig},
    tls_config::TlsConfig,
};

/// Main server config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Address (host:port) to bind the server to.
    pub address: String,
    /// Database configuration.
    pub db: DatabaseConfig,
    /// Security configuration (access token signing).
    pub security: SecurityConfig,
    /// Certificate and key used to terminate TLS.
    pub tls: TlsConfig,
}

impl TryFrom<RawConfig> for Config {
    type Error = anyhow::Error;

    fn try_from(raw_config: RawConfig) -> Result<Self, Self::Error> {
        if raw_config.security.jwt_secret.is_empty() {
            bail!("Access token signing secret (`security.jwt_secret`) is not configured.");
        }

        if raw_config.security.jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            warn!(
                "Access token signing secret is shorter than {MIN_JWT_SECRET_LENGTH} bytes, consider using a longer one."
            );
        }

        let tls = raw_config
            .tls
            .context("TLS certificate and key paths (`tls`) are not configured.")?;

        Ok(Self {
            address: raw_config.address,
            db: raw_config.db,
            security: raw_config.security,
            tls,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Config, RawConfig, SecurityConfig, TlsConfig};
    use insta::assert_debug_snapshot;

    #[test]
    fn requires_secret_and_tls() {
        let error = Config::try_from(RawConfig::default()).unwrap_err();
        assert_debug_snapshot!(error.to_string(), @r###""Access token signing secret (`security.jwt_secret`) is not configured.""###);

        let error = Config::try_from(RawConfig {
            security: SecurityConfig {
                jwt_secret: "short".to_string(),
            },
            ..Default::default()
        })
        .unwrap_err();
        assert_debug_snapshot!(error.to_string(), @r###""TLS certificate and key paths (`tls`) are not configured.""###);
    }

    #[test]
    fn converts_raw_config() -> anyhow::Result<()> {
        let config = Config::try_from(RawConfig {
            security: SecurityConfig {
                jwt_secret: "3024bf8975b03b84e405f36a7bacd1c1".to_string(),
            },
            tls: Some(TlsConfig {
                certificate_path: "server.crt".into(),
                key_path: "server.key".into(),
            }),
            ..Default::default()
        })?;

        assert_eq!(config.address, "0.0.0.0:9090");
        assert_eq!(config.tls.key_path.to_str(), Some("server.key"));

        Ok(())
    }
}

//! HTTP settings for the SOAP transport.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{FmgError, Result};

/// HTTP client configuration.
///
/// ```toml
/// [http]
/// timeout_secs = 60
/// connect_timeout_secs = 5
/// accept_invalid_certs = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Maximum idle connections kept to the appliance.
    #[serde(default = "default_pool_max_idle")]
    pub pool_max_idle_per_host: usize,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Skip TLS certificate verification. Appliances often ship self-signed
    /// certificates.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: default_pool_max_idle(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            accept_invalid_certs: false,
        }
    }
}

impl HttpConfig {
    /// Validates configuration values are within acceptable bounds.
    ///
    /// # Errors
    ///
    /// Returns error if timeout values are outside valid ranges:
    /// - `timeout_secs`: must be 1-300 seconds
    /// - `connect_timeout_secs`: must be 1-60 seconds
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(FmgError::Config("timeout_secs must be between 1 and 300".to_owned()));
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 60 {
            return Err(FmgError::Config(
                "connect_timeout_secs must be between 1 and 60".to_owned(),
            ));
        }
        Ok(())
    }

    /// Returns timeout as Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns connect timeout as Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

const fn default_pool_max_idle() -> usize {
    10
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_connect_timeout_secs() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_config_default() {
        let config = HttpConfig::default();
        assert_eq!(config.pool_max_idle_per_host, 10);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.connect_timeout_secs, 10);
        assert!(!config.accept_invalid_certs);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_http_config_timeout() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_http_config_with_defaults() {
        let config: HttpConfig = toml::from_str("timeout_secs = 60").unwrap();
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.connect_timeout_secs, 10); // default
        assert!(!config.accept_invalid_certs); // default
    }

    #[test]
    fn test_http_config_from_toml() {
        let toml = "
            timeout_secs = 45
            connect_timeout_secs = 15
            accept_invalid_certs = true
        ";

        let config: HttpConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.timeout_secs, 45);
        assert_eq!(config.connect_timeout_secs, 15);
        assert!(config.accept_invalid_certs);
    }

    #[test]
    fn test_http_config_rejects_unknown_field() {
        assert!(toml::from_str::<HttpConfig>("http_version = \"http2\"").is_err());
    }

    #[test]
    fn test_timeout_bounds() {
        let zero = HttpConfig { timeout_secs: 0, ..HttpConfig::default() };
        assert!(matches!(zero.validate(), Err(FmgError::Config(_))));

        let too_long = HttpConfig { timeout_secs: 301, ..HttpConfig::default() };
        assert!(too_long.validate().is_err());

        let edge = HttpConfig { timeout_secs: 300, connect_timeout_secs: 60, ..HttpConfig::default() };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_connect_timeout_bounds() {
        let zero = HttpConfig { connect_timeout_secs: 0, ..HttpConfig::default() };
        let err = zero.validate().unwrap_err();
        assert!(err.to_string().contains("connect_timeout_secs"));

        let too_long = HttpConfig { connect_timeout_secs: 61, ..HttpConfig::default() };
        assert!(too_long.validate().is_err());
    }
}

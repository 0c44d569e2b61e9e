//! Client configuration.
//!
//! ```toml
//! endpoint = "https://fmg.example.com:8080"
//! user_id = "admin"
//! password_env = "FMG_PASSWORD"
//!
//! [http]
//! timeout_secs = 60
//! accept_invalid_certs = true
//! ```

use std::{fmt, path::Path};

use serde::Deserialize;
use url::Url;

use crate::{
    error::{FmgError, Result},
    transport::{HttpConfig, soap::validate_url},
};

/// Namespace of the appliance web service.
pub const DEFAULT_NAMESPACE: &str = "http://r200806.ws.fmg.fortinet.com/";

/// Connection settings for one appliance.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Web service URL, usually `https://<appliance>:8080`.
    pub endpoint: String,

    /// SOAP namespace.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Login name sent in every request.
    pub user_id: String,

    /// Password, inline.
    #[serde(default)]
    pub password: Option<String>,

    /// Environment variable holding the password.
    #[serde(default)]
    pub password_env: Option<String>,

    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("namespace", &self.namespace)
            .field("user_id", &self.user_id)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("password_env", &self.password_env)
            .field("http", &self.http)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a configuration with an inline password and default settings.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for builder methods"
    )]
    pub fn new(
        endpoint: impl Into<String>,
        user_id: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            namespace: default_namespace(),
            user_id: user_id.into(),
            password: Some(password.into()),
            password_env: None,
            http: HttpConfig::default(),
        }
    }

    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FmgError::Config`] if the TOML is invalid or
    /// [`validate`](Self::validate) fails.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| FmgError::Config(format!("invalid TOML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`FmgError::Config`] if the file cannot be read or
    /// [`from_toml`](Self::from_toml) fails.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| FmgError::Config(format!("cannot read config file: {e}")))?;
        Self::from_toml(&content)
    }

    /// Validates the configuration.
    ///
    /// This method checks for:
    /// - endpoint must parse and use HTTPS
    /// - `user_id` must not be empty
    /// - exactly one of `password` and `password_env` is set
    /// - `password_env` is a valid variable name
    /// - HTTP timeouts are in range
    ///
    /// # Errors
    ///
    /// Returns [`FmgError::Config`] describing the first failed check.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            FmgError::Config(format!("invalid endpoint '{}': {e}", self.endpoint))
        })?;
        validate_url(&url)?;

        if self.user_id.trim().is_empty() {
            return Err(FmgError::Config("user_id cannot be empty".to_owned()));
        }
        if self.namespace.trim().is_empty() {
            return Err(FmgError::Config("namespace cannot be empty".to_owned()));
        }

        match (&self.password, &self.password_env) {
            (Some(_), Some(_)) => {
                return Err(FmgError::Config(
                    "set either password or password_env, not both".to_owned(),
                ));
            }
            (None, None) => {
                return Err(FmgError::Config("one of password or password_env is required".to_owned()));
            }
            (None, Some(name)) => validate_env_var_name(name)?,
            (Some(_), None) => {}
        }

        self.http.validate()
    }

    /// Returns the password, reading `password_env` when configured.
    ///
    /// # Errors
    ///
    /// Returns [`FmgError::Config`] if the variable is unset or no password
    /// source is configured.
    pub fn resolve_password(&self) -> Result<String> {
        if let Some(password) = &self.password {
            return Ok(password.clone());
        }
        let name = self
            .password_env
            .as_deref()
            .ok_or_else(|| FmgError::Config("no password configured".to_owned()))?;
        std::env::var(name)
            .map_err(|e| FmgError::Config(format!("cannot read password from ${name}: {e}")))
    }
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_owned()
}

fn validate_env_var_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(FmgError::Config("environment variable name cannot be empty".to_owned()));
    };
    if !first.is_ascii_alphabetic() && first != '_' {
        return Err(FmgError::Config(format!(
            "environment variable name must start with letter or underscore: {name}"
        )));
    }
    if let Some(ch) = chars.find(|ch| !ch.is_ascii_alphanumeric() && *ch != '_') {
        return Err(FmgError::Config(format!(
            "environment variable name contains invalid character '{ch}': {name}"
        )));
    }
    Ok(())
}

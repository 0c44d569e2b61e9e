//! Error types for the FMG XML API client.
//!
//! Every fallible call in this crate returns [`Result`], whose error side is
//! [`FmgError`]. Errors are grouped by where they arise in the call pipeline:
//!
//! - **Input errors** ([`FmgError::Validation`]): raised by option validation
//!   and message building, always before any network activity
//! - **Network errors** ([`FmgError::Transport`], [`FmgError::Http`]): the
//!   SOAP round-trip itself failed
//! - **Remote errors** ([`FmgError::Api`]): the appliance answered, but the
//!   response carried a non-zero error code
//! - **Shape errors** ([`FmgError::Parse`]): the response did not have the
//!   envelope shape the operation catalog expects
//! - **Setup errors** ([`FmgError::Config`]): the client configuration is invalid
//!
//! # Examples
//!
//! ```
//! use fmg_xml_api::error::{FmgError, Result};
//!
//! fn require_adom(adom: &str) -> Result<&str> {
//!     if adom.is_empty() {
//!         return Err(FmgError::Validation("missing required option 'adom'".to_owned()));
//!     }
//!     Ok(adom)
//! }
//!
//! assert!(require_adom("").is_err());
//! ```

use thiserror::Error;

/// Result type alias for FMG API operations.
pub type Result<T> = std::result::Result<T, FmgError>;

/// Errors that can occur while calling the FMG XML API.
///
/// # Error Recovery
///
/// - **Input errors** ([`Validation`](Self::Validation)): fix the options and call again
/// - **Network errors** ([`Transport`](Self::Transport), [`Http`](Self::Http)): the call
///   was attempted once and is never retried by this crate
/// - **Remote errors** ([`Api`](Self::Api)): inspect `code` and `message` returned by the
///   appliance
/// - **Shape errors** ([`Parse`](Self::Parse)): usually an appliance firmware mismatch
/// - **Setup errors** ([`Config`](Self::Config)): fix the configuration file
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum FmgError {
    /// Caller input was missing, unknown, or contradictory.
    ///
    /// Raised by option validation and message building. No request has been
    /// sent when this error is returned. The message names the offending
    /// option key, or the entry slot and 1-based entry position.
    ///
    /// # Examples
    ///
    /// ```
    /// use fmg_xml_api::error::FmgError;
    ///
    /// let err = FmgError::Validation("missing required option 'name'".to_owned());
    /// assert!(err.to_string().contains("'name'"));
    /// ```
    #[error("invalid options: {0}")]
    Validation(String),

    /// The SOAP exchange failed.
    ///
    /// Covers SOAP faults, non-success HTTP status codes and response bodies that
    /// are not well-formed XML.
    ///
    /// # Recovery
    ///
    /// Verify the endpoint URL, credentials and that the XML API is enabled on the
    /// appliance's management interface.
    #[error("transport failure: {0}")]
    Transport(String),

    /// HTTP request failed.
    ///
    /// Wraps [`reqwest::Error`]: connection refused, DNS failures, TLS errors and
    /// timeouts (default: 30 seconds).
    ///
    /// # Recovery
    ///
    /// Check network reachability of the appliance. Self-signed certificates need
    /// `accept_invalid_certs = true` in the `[http]` configuration section.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The appliance reported an error for the call.
    ///
    /// The response envelope carried an `error_msg` block with a non-zero
    /// `error_code`. This takes precedence over any payload in the same response.
    ///
    /// # Examples
    ///
    /// ```
    /// use fmg_xml_api::error::FmgError;
    ///
    /// let err = FmgError::Api { code: 1, message: "bad adom".to_owned() };
    /// assert_eq!(err.to_string(), "API error 1: bad adom");
    /// ```
    #[error("API error {code}: {message}")]
    Api {
        /// Vendor error code (never zero).
        code: i64,
        /// Vendor error text.
        message: String,
    },

    /// The response did not match the expected envelope.
    ///
    /// Raised when the operation's container or payload key is absent, or when
    /// an embedded `error_code` is not a number.
    #[error("unexpected response shape: {0}")]
    Parse(String),

    /// The client configuration is invalid.
    ///
    /// # Recovery
    ///
    /// Ensure the configuration:
    /// - Uses an HTTPS endpoint (`https://`)
    /// - Names a non-empty `user_id`
    /// - Keeps timeouts within their documented bounds
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl FmgError {
    /// Short machine-readable category, used as a structured log field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Transport(_) | Self::Http(_) => "transport",
            Self::Api { .. } => "api",
            Self::Parse(_) => "parse",
            Self::Config(_) => "config",
        }
    }

    /// Returns true if the request never left the client.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let error = FmgError::Validation("unknown option 'foo'".to_owned());
        assert_eq!(error.to_string(), "invalid options: unknown option 'foo'");
    }

    #[test]
    fn test_api_error_display() {
        let error = FmgError::Api { code: -3, message: "object not found".to_owned() };
        assert_eq!(error.to_string(), "API error -3: object not found");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(FmgError::Validation(String::new()).kind(), "validation");
        assert_eq!(FmgError::Transport(String::new()).kind(), "transport");
        assert_eq!(FmgError::Api { code: 1, message: String::new() }.kind(), "api");
        assert_eq!(FmgError::Parse(String::new()).kind(), "parse");
        assert_eq!(FmgError::Config(String::new()).kind(), "config");
    }

    #[test]
    fn test_is_local() {
        assert!(FmgError::Validation("x".to_owned()).is_local());
        assert!(FmgError::Config("x".to_owned()).is_local());
        assert!(!FmgError::Parse("x".to_owned()).is_local());
    }
}

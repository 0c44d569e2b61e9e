//! Transport abstraction.
//!
//! A [`Transport`] sends one operation with its [`WireMessage`] body and
//! returns the response body as a snake-cased [`Value`] tree (see
//! [`xml::parse_soap_body`]). Each call makes exactly one attempt.
//!
//! [`SoapTransport`] is the shipped implementation. Tests substitute their
//! own recording transports.
//!
//! # Examples
//!
//! ```rust,no_run
//! use fmg_xml_api::{
//!     message::{FieldMap, WireMessage},
//!     transport::{HttpConfig, SoapTransport, Transport},
//! };
//!
//! # async fn example() -> fmg_xml_api::error::Result<()> {
//! let transport = SoapTransport::new(
//!     "https://fmg.example.com:8080",
//!     "http://r200806.ws.fmg.fortinet.com/",
//!     "admin",
//!     "secret",
//!     &HttpConfig::default(),
//! )?;
//!
//! let response = transport.call("getAdomList", &WireMessage::Map(FieldMap::new())).await?;
//! println!("{response}");
//! # Ok(())
//! # }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;

use serde_json::Value;

use crate::{error::Result, message::WireMessage};

pub mod config;
pub mod soap;
pub mod xml;

pub use config::HttpConfig;
pub use soap::SoapTransport;

/// Sends a request and returns the parsed response body.
pub trait Transport: Send + Sync {
    /// Sends `message` as the body of `operation` (its wire name).
    ///
    /// # Errors
    ///
    /// Returns [`FmgError::Transport`](crate::error::FmgError::Transport) or
    /// [`FmgError::Http`](crate::error::FmgError::Http) on network failure,
    /// a non-success status, malformed XML or a SOAP fault.
    fn call<'a>(
        &'a self,
        operation: &'a str,
        message: &'a WireMessage,
    ) -> impl Future<Output = Result<Value>> + Send + 'a;

    /// Returns the protocol name for logging.
    fn protocol_name(&self) -> &'static str;
}

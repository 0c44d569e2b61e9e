//! FortiManager / FortiAnalyzer XML API client.
//!
//! Wraps the appliance's SOAP web service behind a typed operation catalog.
//! Each call goes through the same pipeline:
//!
//! 1. [`validate`](validate::validate) checks the caller's [`OptionBag`]
//!    against the operation's request description, fills defaults and drops
//!    malformed soft filters with a warning.
//! 2. [`build`](message::build) maps option keys to wire names (renames,
//!    camel case, casing exceptions) and produces a [`WireMessage`].
//! 3. A [`Transport`] sends the message and returns the snake-cased response
//!    tree.
//! 4. [`unwrap`](response::unwrap) checks the embedded error block and
//!    extracts the payload.
//!
//! Failures at any step are passed once to an [`ErrorReporter`] and returned
//! as [`FmgError`].
//!
//! # Examples
//!
//! ```no_run
//! use fmg_xml_api::{ClientConfig, Entries, FmgClient, OptionBag};
//!
//! # async fn example() -> fmg_xml_api::error::Result<()> {
//! let config = ClientConfig::from_file("fmg.toml")?;
//! let client = FmgClient::from_config(&config)?;
//!
//! let devices = Entries::Many(vec![
//!     OptionBag::new().with("serial_number", "FGVM11111111").with("vdom_name", "vdomA"),
//!     OptionBag::new().with("dev_id", "234").with("vdom_id", "2178"),
//! ]);
//! client.add_adom(&OptionBag::new().with("name", "adomA"), Some(devices)).await?;
//!
//! let status = client.get_system_status().await?;
//! println!("{:?}", status.version);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest"
)]

pub mod casing;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod message;
mod operations;
pub mod options;
pub mod report;
pub mod response;
pub mod transport;
pub mod validate;

pub use catalog::Operation;
pub use client::FmgClient;
pub use config::ClientConfig;
pub use error::{FmgError, Result};
pub use message::WireMessage;
pub use options::{Entries, OptionBag, OptionValue};
pub use report::{ErrorReporter, TracingReporter};
pub use response::{Payload, SystemStatus};
pub use transport::{SoapTransport, Transport};

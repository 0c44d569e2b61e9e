//! Operation execution.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    catalog::Operation,
    config::ClientConfig,
    error::{FmgError, Result},
    message::build,
    options::OptionBag,
    report::{ErrorReporter, TracingReporter},
    response::{self, Payload},
    transport::{SoapTransport, Transport},
    validate::validate,
};

/// Client for one appliance.
///
/// Every call runs validation, message building, a single transport
/// attempt and payload extraction. A failure at any step is handed to the
/// reporter once and returned as `Err`. Invalid options never reach the
/// transport.
///
/// # Examples
///
/// ```rust,no_run
/// use fmg_xml_api::{ClientConfig, FmgClient, OptionBag};
///
/// # async fn example() -> fmg_xml_api::error::Result<()> {
/// let config = ClientConfig::new("https://fmg.example.com:8080", "admin", "secret");
/// let client = FmgClient::from_config(&config)?;
///
/// let adoms = client.get_adom_list().await?;
/// let created = client.add_adom(&OptionBag::new().with("name", "adomA"), None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FmgClient<T = SoapTransport, R = TracingReporter> {
    transport: T,
    reporter: R,
}

impl FmgClient<SoapTransport, TracingReporter> {
    /// Creates a SOAP client from configuration, reporting through `tracing`.
    ///
    /// # Errors
    ///
    /// Returns [`FmgError::Config`] if the configuration is invalid or the
    /// password cannot be resolved.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let password = config.resolve_password()?;
        let transport = SoapTransport::new(
            &config.endpoint,
            &config.namespace,
            &config.user_id,
            &password,
            &config.http,
        )?;
        Ok(Self::new(transport, TracingReporter))
    }
}

impl<T: Transport, R: ErrorReporter> FmgClient<T, R> {
    /// Creates a client from its parts.
    pub const fn new(transport: T, reporter: R) -> Self {
        Self { transport, reporter }
    }

    /// Replaces the reporter.
    pub fn with_reporter<R2: ErrorReporter>(self, reporter: R2) -> FmgClient<T, R2> {
        FmgClient { transport: self.transport, reporter }
    }

    /// Returns the transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Executes `operation` with `options`.
    ///
    /// # Errors
    ///
    /// - [`FmgError::Validation`] for bad options, before any network activity
    /// - [`FmgError::Transport`] or [`FmgError::Http`] for network and SOAP failures
    /// - [`FmgError::Api`] for errors reported by the appliance
    /// - [`FmgError::Parse`] for unexpected response shapes
    #[instrument(
        skip_all,
        fields(
            operation = %operation,
            request_id = %Uuid::new_v4(),
            protocol = self.transport.protocol_name()
        )
    )]
    pub async fn execute(&self, operation: Operation, options: &OptionBag) -> Result<Payload> {
        let result = self.run(operation, options).await;
        match &result {
            Ok(_) => info!("operation completed"),
            Err(error) => self.report(operation, error),
        }
        result
    }

    async fn run(&self, operation: Operation, options: &OptionBag) -> Result<Payload> {
        let descriptor = operation.descriptor();
        let validated = validate(descriptor.request, options)?;
        let message = build(descriptor.request, &validated)?;
        debug!(wire_name = descriptor.wire_name, "calling transport");
        let raw = self.transport.call(descriptor.wire_name, &message).await?;
        response::unwrap(descriptor, &raw)
    }

    fn report(&self, operation: Operation, error: &FmgError) {
        let reported =
            panic::catch_unwind(AssertUnwindSafe(|| self.reporter.report(operation, error)));
        if reported.is_err() {
            warn!("error reporter panicked");
        }
    }
}

//! SOAP 1.1 over HTTPS using reqwest.

use std::fmt;

use quick_xml::escape::escape;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use super::{Transport, config::HttpConfig, xml};
use crate::{
    error::{FmgError, Result},
    message::WireMessage,
};

const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Validates the appliance endpoint.
///
/// Only HTTPS is accepted since every request carries credentials.
pub(crate) fn validate_url(url: &Url) -> Result<()> {
    if url.scheme() != "https" {
        return Err(FmgError::Config(format!("endpoint must use https, got '{}'", url.scheme())));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(FmgError::Config("endpoint has no host".to_owned()));
    }
    Ok(())
}

/// SOAP transport for the appliance web service.
///
/// Every request authenticates with a `servicePass` block. The password is
/// never logged and is redacted from `Debug` output.
pub struct SoapTransport {
    client: Client,
    endpoint: Url,
    namespace: String,
    user_id: String,
    password: String,
}

impl fmt::Debug for SoapTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoapTransport")
            .field("endpoint", &self.endpoint.as_str())
            .field("namespace", &self.namespace)
            .field("user_id", &self.user_id)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl SoapTransport {
    /// Creates a transport for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`FmgError::Config`] if the endpoint is not an HTTPS URL or
    /// the HTTP settings are out of range, and [`FmgError::Http`] if the
    /// HTTP client cannot be built.
    pub fn new(
        endpoint: &str,
        namespace: &str,
        user_id: &str,
        password: &str,
        http: &HttpConfig,
    ) -> Result<Self> {
        http.validate()?;
        let endpoint = Url::parse(endpoint)
            .map_err(|e| FmgError::Config(format!("invalid endpoint '{endpoint}': {e}")))?;
        validate_url(&endpoint)?;

        let client = Client::builder()
            .pool_max_idle_per_host(http.pool_max_idle_per_host)
            .timeout(http.timeout())
            .connect_timeout(http.connect_timeout())
            .danger_accept_invalid_certs(http.accept_invalid_certs)
            .build()
            .map_err(FmgError::Http)?;

        Ok(Self {
            client,
            endpoint,
            namespace: namespace.to_owned(),
            user_id: user_id.to_owned(),
            password: password.to_owned(),
        })
    }

    /// Returns the appliance endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Wraps `message` in a SOAP envelope for `operation`.
    ///
    /// The `servicePass` block is always the first child of the operation
    /// element.
    #[must_use]
    pub fn envelope(&self, operation: &str, message: &WireMessage) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <soapenv:Envelope xmlns:soapenv=\"{SOAP_ENVELOPE_NS}\" xmlns:ns=\"{namespace}\">\
             <soapenv:Header/>\
             <soapenv:Body>\
             <ns:{operation}>\
             <servicePass><userID>{user}</userID><password>{password}</password></servicePass>\
             {body}\
             </ns:{operation}>\
             </soapenv:Body>\
             </soapenv:Envelope>",
            namespace = escape(self.namespace.as_str()),
            user = escape(self.user_id.as_str()),
            password = escape(self.password.as_str()),
            body = message.to_xml(),
        )
    }

    #[instrument(skip(self, message), fields(endpoint = %self.endpoint))]
    async fn send(&self, operation: &str, message: &WireMessage) -> Result<Value> {
        let envelope = self.envelope(operation, message);
        debug!(bytes = envelope.len(), "sending SOAP request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", format!("\"{operation}\""))
            .body(envelope)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.map_err(FmgError::Http)?;
        debug!(status = status.as_u16(), bytes = body.len(), "received SOAP response");

        let parsed = xml::parse_soap_body(&body);
        if !status.is_success() {
            // SOAP 1.1 faults arrive with HTTP 500.
            return Err(match parsed {
                Err(FmgError::Transport(detail)) if detail.starts_with("SOAP fault") => {
                    FmgError::Transport(detail)
                }
                _ => FmgError::Transport(format!(
                    "appliance returned HTTP status {}",
                    status.as_u16()
                )),
            });
        }
        parsed
    }
}

impl Transport for SoapTransport {
    async fn call<'a>(&'a self, operation: &'a str, message: &'a WireMessage) -> Result<Value> {
        self.send(operation, message).await
    }

    fn protocol_name(&self) -> &'static str {
        "soap/1.1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{FieldMap, Node};

    fn transport() -> SoapTransport {
        SoapTransport::new(
            "https://fmg.example.com:8080",
            "http://r200806.ws.fmg.fortinet.com/",
            "admin",
            "s3cr<t&",
            &HttpConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_envelope_layout() {
        let mut map = FieldMap::new();
        map.insert("name".to_owned(), Node::Text("adomA".to_owned())).unwrap();
        let xml = transport().envelope("addAdom", &WireMessage::Map(map));

        assert!(xml.contains("xmlns:ns=\"http://r200806.ws.fmg.fortinet.com/\""));
        assert!(xml.contains(
            "<ns:addAdom><servicePass><userID>admin</userID>\
             <password>s3cr&lt;t&amp;</password></servicePass><name>adomA</name></ns:addAdom>"
        ));
        assert!(xml.ends_with("</soapenv:Envelope>"));
    }

    #[test]
    fn test_envelope_is_parseable() {
        let xml = transport().envelope("getAdomList", &WireMessage::Map(FieldMap::new()));
        let body = xml::parse_soap_body(&xml).unwrap();
        assert_eq!(body["get_adom_list"]["service_pass"]["user_id"], "admin");
    }

    #[test]
    fn test_debug_redacts_password() {
        let debug = format!("{:?}", transport());
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("s3cr"));
    }

    #[test]
    fn test_rejects_plain_http() {
        let err = SoapTransport::new(
            "http://fmg.example.com:8080",
            "urn:x",
            "admin",
            "",
            &HttpConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FmgError::Config(_)));
    }

    #[test]
    fn test_rejects_unparseable_endpoint() {
        let err = SoapTransport::new("not a url", "urn:x", "admin", "", &HttpConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("invalid endpoint"));
    }

    #[test]
    fn test_rejects_bad_timeouts() {
        let http = HttpConfig { timeout_secs: 0, ..HttpConfig::default() };
        assert!(SoapTransport::new("https://fmg.example.com", "urn:x", "admin", "", &http).is_err());
    }

    #[test]
    fn test_protocol_name() {
        assert_eq!(transport().protocol_name(), "soap/1.1");
        assert_eq!(transport().endpoint().host_str(), Some("fmg.example.com"));
    }
}

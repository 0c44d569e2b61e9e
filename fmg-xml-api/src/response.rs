//! Response payload extraction.
//!
//! The transport hands back a snake-cased [`Value`] tree. [`unwrap`] finds the
//! operation's response container, turns an embedded `error_msg` block with a
//! non-zero code into [`FmgError::Api`], and returns the payload named by the
//! catalog entry.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    catalog::{OperationDescriptor, ResponseShape},
    error::{FmgError, Result},
};

/// Appliance identity returned by `get_system_status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatus {
    /// Hardware or VM platform.
    pub platform_type: Option<String>,
    /// Firmware version string.
    pub version: Option<String>,
    /// Appliance serial number.
    pub serial_number: Option<String>,
    /// BIOS version.
    pub bios_version: Option<String>,
    /// Host name.
    pub host_name: Option<String>,
    /// Licensed ADOM count.
    pub max_num_admin_domains: Option<String>,
    /// Licensed device group count.
    pub max_num_device_group: Option<String>,
    /// ADOM mode switch.
    pub admin_domain_conf: Option<String>,
    /// FIPS mode switch.
    pub fips_mode: Option<String>,
}

impl SystemStatus {
    fn from_block(block: &Map<String, Value>) -> Self {
        let field = |key: &str| block.get(key).and_then(scalar_text);
        Self {
            platform_type: field("platform_type"),
            version: field("version"),
            serial_number: field("serial_number"),
            bios_version: field("bios_version"),
            host_name: field("host_name"),
            max_num_admin_domains: field("max_num_admin_domains"),
            max_num_device_group: field("max_num_device_group"),
            admin_domain_conf: field("admin_domain_conf"),
            fips_mode: field("fips_mode"),
        }
    }

    /// Converts the status into a JSON object. Absent fields become `null`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let fields = [
            ("platform_type", &self.platform_type),
            ("version", &self.version),
            ("serial_number", &self.serial_number),
            ("bios_version", &self.bios_version),
            ("host_name", &self.host_name),
            ("max_num_admin_domains", &self.max_num_admin_domains),
            ("max_num_device_group", &self.max_num_device_group),
            ("admin_domain_conf", &self.admin_domain_conf),
            ("fips_mode", &self.fips_mode),
        ];
        let map = fields
            .into_iter()
            .map(|(key, value)| {
                (key.to_owned(), value.as_ref().map_or(Value::Null, |v| Value::String(v.clone())))
            })
            .collect::<Map<String, Value>>();
        Value::Object(map)
    }
}

/// Successful result of one operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Payload subtree of the response.
    Value(Value),
    /// System status fields.
    Status(SystemStatus),
    /// Fixed success value for operations whose response carries nothing.
    Constant(&'static str),
}

impl Payload {
    /// Converts the payload into a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Value(value) => value,
            Self::Status(status) => status.to_value(),
            Self::Constant(constant) => Value::String(constant.to_owned()),
        }
    }

    /// Returns the payload subtree, if this is a [`Value`](Self::Value).
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Status(_) | Self::Constant(_) => None,
        }
    }
}

/// Extracts the payload of `raw` for `descriptor`.
///
/// # Errors
///
/// - [`FmgError::Api`] if the container holds an `error_msg` block with a
///   non-zero `error_code`, even when a payload is also present.
/// - [`FmgError::Parse`] if the container or payload is missing, or the error
///   code is not an integer.
pub fn unwrap(descriptor: &OperationDescriptor, raw: &Value) -> Result<Payload> {
    match descriptor.response {
        ResponseShape::Constant(constant) => Ok(Payload::Constant(constant)),
        ResponseShape::Status => {
            let block = raw
                .get(descriptor.container)
                .and_then(Value::as_object)
                .or_else(|| raw.as_object())
                .ok_or_else(|| FmgError::Parse("system status response is not an object".to_owned()))?;
            check_error(block)?;
            Ok(Payload::Status(SystemStatus::from_block(block)))
        }
        ResponseShape::Standard(path) => {
            let block = raw.get(descriptor.container).and_then(Value::as_object).ok_or_else(|| {
                FmgError::Parse(format!("response has no '{}' element", descriptor.container))
            })?;
            check_error(block)?;

            let (first, rest) = path.split_first().ok_or_else(|| {
                FmgError::Parse(format!("no payload path for '{}'", descriptor.wire_name))
            })?;
            let mut current = block.get(*first);
            for key in rest {
                current = current.and_then(|v| v.get(*key));
            }
            current.cloned().map(Payload::Value).ok_or_else(|| {
                FmgError::Parse(format!(
                    "'{}' has no '{}' payload",
                    descriptor.container,
                    path.join(".")
                ))
            })
        }
    }
}

fn check_error(block: &Map<String, Value>) -> Result<()> {
    let Some(error) = block.get("error_msg").and_then(Value::as_object) else {
        return Ok(());
    };
    let Some(code) = error.get("error_code") else {
        return Ok(());
    };
    let code = match code {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| FmgError::Parse(format!("error code {code} is not an integer")))?;

    if code == 0 {
        return Ok(());
    }
    let message = error.get("error_msg").and_then(scalar_text).unwrap_or_default();
    Err(FmgError::Api { code, message })
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::catalog::Operation;

    fn unwrap_op(op: Operation, raw: &Value) -> Result<Payload> {
        unwrap(op.descriptor(), raw)
    }

    #[test]
    fn test_standard_payload() {
        let raw = json!({
            "get_adoms_response": {
                "error_msg": {"error_code": "0", "error_msg": ""},
                "adom_detail": {"name": "root", "oid": "3"}
            }
        });
        let payload = unwrap_op(Operation::GetAdomByName, &raw).unwrap();
        assert_eq!(payload.as_value().unwrap()["name"], "root");
    }

    #[test]
    fn test_error_block_wins_over_payload() {
        let raw = json!({
            "get_adoms_response": {
                "error_msg": {"error_code": "1", "error_msg": "bad adom"},
                "adom_detail": {"name": "root"}
            }
        });
        let err = unwrap_op(Operation::GetAdomByName, &raw).unwrap_err();
        assert!(matches!(err, FmgError::Api { code: 1, .. }));
        assert!(err.to_string().contains("bad adom"));
    }

    #[test]
    fn test_numeric_error_code() {
        let raw = json!({
            "delete_device_response": {"error_msg": {"error_code": -3, "error_msg": "no such device"}}
        });
        let err = unwrap_op(Operation::DeleteDevice, &raw).unwrap_err();
        assert!(matches!(err, FmgError::Api { code: -3, .. }));
    }

    #[test]
    fn test_error_msg_payload_with_zero_code() {
        let raw = json!({"add_adom_response": {"error_msg": {"error_code": "0", "error_msg": "ok"}}});
        let payload = unwrap_op(Operation::AddAdom, &raw).unwrap();
        assert_eq!(payload.as_value().unwrap()["error_code"], "0");
    }

    #[test]
    fn test_unparseable_error_code() {
        let raw = json!({"add_adom_response": {"error_msg": {"error_code": "oops"}}});
        let err = unwrap_op(Operation::AddAdom, &raw).unwrap_err();
        assert!(matches!(err, FmgError::Parse(_)));
    }

    #[test]
    fn test_missing_container() {
        let raw = json!({"something_else": {}});
        let err = unwrap_op(Operation::GetAdomList, &raw).unwrap_err();
        assert!(err.to_string().contains("get_adom_list_response"));
    }

    #[test]
    fn test_missing_payload() {
        let raw = json!({"get_adom_list_response": {}});
        let err = unwrap_op(Operation::GetAdomList, &raw).unwrap_err();
        assert!(matches!(err, FmgError::Parse(_)));
        assert!(err.to_string().contains("adom_info"));
    }

    #[test]
    fn test_log_search_nested_path() {
        let raw = json!({
            "search_faz_log_response": {"logs": {"data": "H4sIAAAA", "total": "1"}}
        });
        let payload = unwrap_op(Operation::SearchFazLog, &raw).unwrap();
        assert_eq!(payload.into_value(), json!("H4sIAAAA"));
    }

    #[test]
    fn test_delete_script_ignores_body() {
        let payload = unwrap_op(Operation::DeleteScript, &json!({})).unwrap();
        assert_eq!(payload, Payload::Constant("0"));
        assert_eq!(payload.into_value(), json!("0"));
    }

    #[test]
    fn test_system_status_from_container() {
        let raw = json!({
            "get_system_status_response": {
                "platform_type": "FMG-VM64",
                "version": "v5.0-build0300",
                "serial_number": "FMG-VM0000000001",
                "host_name": "fmg1",
                "max_num_admin_domains": 10
            }
        });
        let Payload::Status(status) = unwrap_op(Operation::GetSystemStatus, &raw).unwrap() else {
            panic!("expected status payload");
        };
        assert_eq!(status.platform_type.as_deref(), Some("FMG-VM64"));
        assert_eq!(status.host_name.as_deref(), Some("fmg1"));
        assert_eq!(status.max_num_admin_domains.as_deref(), Some("10"));
        assert!(status.fips_mode.is_none());
    }

    #[test]
    fn test_system_status_top_level_fallback() {
        let raw = json!({"version": "v5.2", "fips_mode": "0"});
        let Payload::Status(status) = unwrap_op(Operation::GetSystemStatus, &raw).unwrap() else {
            panic!("expected status payload");
        };
        assert_eq!(status.version.as_deref(), Some("v5.2"));
        assert_eq!(status.fips_mode.as_deref(), Some("0"));
    }

    #[test]
    fn test_system_status_payload_into_value() {
        let status = SystemStatus {
            host_name: Some("fmg1".to_owned()),
            version: Some("v5.0-build0300".to_owned()),
            ..SystemStatus::default()
        };
        let value = Payload::Status(status.clone()).into_value();
        assert_eq!(value["host_name"], "fmg1");
        assert_eq!(value["version"], "v5.0-build0300");
        assert_eq!(value["fips_mode"], Value::Null);
        assert_eq!(value.as_object().map(Map::len), Some(9));
        assert_eq!(value, serde_json::to_value(&status).unwrap());
    }

    #[test]
    fn test_system_status_error_block() {
        let raw = json!({
            "get_system_status_response": {"error_msg": {"error_code": "-6", "error_msg": "denied"}}
        });
        let err = unwrap_op(Operation::GetSystemStatus, &raw).unwrap_err();
        assert_eq!(err.kind(), "api");
    }
}

//! Option validation.
//!
//! [`validate`] checks an [`OptionBag`] against an operation's [`RequestSpec`]
//! and produces [`ValidatedOptions`]: the ordered list of fields to send, the
//! sub-entry slots and the client-side flags. It runs before any message is
//! built, so a rejected call never reaches the network.
//!
//! Hard failures (unknown keys, missing required keys, contradictory
//! alternatives) return [`FmgError::Validation`]. Soft rules never fail: a
//! malformed or inverted date or number filter is logged with `warn!` and
//! dropped, and the call proceeds without it.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::{
    catalog::{EntrySpec, Pick, RequestSpec, SoftRule},
    error::{FmgError, Result},
    options::{Entries, OptionBag, OptionValue},
};

/// Wire date format for every date filter.
const WIRE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S",
    "%Y%m%d%H%M%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d"];

/// Options accepted for one call, in wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedOptions {
    fields: Vec<(String, OptionValue)>,
    entries: Vec<(&'static EntrySpec, Entries)>,
    flags: OptionBag,
}

impl ValidatedOptions {
    /// Fields to send, keyed by option key (before renaming and casing).
    #[must_use]
    pub fn fields(&self) -> &[(String, OptionValue)] {
        &self.fields
    }

    /// Returns the value of a field that will be sent.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == key).and_then(|(_, v)| v.as_str())
    }

    /// Sub-entry slots that were supplied.
    #[must_use]
    pub fn entries(&self) -> &[(&'static EntrySpec, Entries)] {
        &self.entries
    }

    /// Returns the value of a client-side flag.
    #[must_use]
    pub fn flag(&self, key: &str) -> Option<&str> {
        self.flags.get_str(key)
    }

    fn push(&mut self, key: &str, value: OptionValue) -> Result<()> {
        if matches!(value, OptionValue::List(_)) {
            return Err(FmgError::Validation(format!(
                "option '{key}' does not accept a list of entries"
            )));
        }
        if self.fields.iter().any(|(k, _)| k == key) {
            return Err(FmgError::Validation(format!("option '{key}' given more than once")));
        }
        self.fields.push((key.to_owned(), value));
        Ok(())
    }

    fn push_text(&mut self, key: &str, value: &str) -> Result<()> {
        self.push(key, OptionValue::Scalar(value.to_owned()))
    }
}

/// Validates `opts` against `spec`.
///
/// # Errors
///
/// Returns [`FmgError::Validation`] naming the offending key(s) when:
/// - a key is not recognised by the operation
/// - a required key is missing or empty
/// - no key of a required choice group is present
/// - several keys of an exclusive choice group are present
/// - only one key of a co-required pair is present
/// - an entry slot holds a scalar, or a required entry slot is empty
pub fn validate(spec: &RequestSpec, opts: &OptionBag) -> Result<ValidatedOptions> {
    let unknown: Vec<&str> = opts.keys().filter(|k| !spec.accepts(k)).collect();
    if !unknown.is_empty() {
        return Err(FmgError::Validation(format!("unknown option(s) {}", quoted(&unknown))));
    }

    let missing: Vec<&str> = spec.required.iter().copied().filter(|k| !opts.has(k)).collect();
    if !missing.is_empty() {
        return Err(FmgError::Validation(format!(
            "missing required option(s) {}",
            quoted(&missing)
        )));
    }

    let mut out = ValidatedOptions::default();

    for (key, default) in spec.defaults {
        match opts.get_present(key) {
            Some(value) => out.push(key, value.clone())?,
            None => out.push_text(key, default)?,
        }
    }

    for key in spec.required {
        if let Some(value) = opts.get_present(key) {
            out.push(key, value.clone())?;
        }
    }

    for choice in spec.choices {
        let present: Vec<&str> = choice.keys.iter().copied().filter(|k| opts.has(k)).collect();
        let selected: &[&str] = match (choice.pick, present.len()) {
            (Pick::OptionalFirst, 0) => &[],
            (Pick::All, 0) => {
                return Err(FmgError::Validation(format!(
                    "at least one of {} is required",
                    quoted(choice.keys)
                )));
            }
            (_, 0) => {
                return Err(FmgError::Validation(format!(
                    "one of {} is required",
                    quoted(choice.keys)
                )));
            }
            (Pick::Exclusive, n) if n > 1 => {
                return Err(FmgError::Validation(format!(
                    "options {} are mutually exclusive",
                    quoted(&present)
                )));
            }
            (Pick::All, _) => &present,
            (Pick::First | Pick::OptionalFirst | Pick::Exclusive, _) => &present[..1],
        };
        for key in selected {
            if let Some(value) = opts.get_present(key) {
                out.push(key, value.clone())?;
            }
        }
    }

    for pair in spec.co_required {
        let [first, second] = pair.keys;
        match (opts.get_present(first), opts.get_present(second)) {
            (Some(a), Some(b)) => {
                out.push(first, a.clone())?;
                out.push(second, b.clone())?;
            }
            (Some(_), None) => {
                return Err(FmgError::Validation(format!(
                    "option '{second}' is required when '{first}' is given"
                )));
            }
            (None, Some(_)) => {
                return Err(FmgError::Validation(format!(
                    "option '{first}' is required when '{second}' is given"
                )));
            }
            (None, None) => {
                if let Some([a, b]) = pair.default {
                    out.push_text(first, a)?;
                    out.push_text(second, b)?;
                }
            }
        }
    }

    for key in spec.optional {
        if let Some(value) = opts.get_present(key) {
            out.push(key, value.clone())?;
        }
    }

    for rule in spec.soft {
        apply_soft_rule(rule, opts, &mut out)?;
    }

    for (key, value) in spec.fixed {
        out.push_text(key, value)?;
    }

    for entry in spec.entries {
        match opts.get_present(entry.key) {
            Some(value) => {
                let entries = value.to_entries().ok_or_else(|| {
                    FmgError::Validation(format!(
                        "option '{}' must be a table or a list of tables",
                        entry.key
                    ))
                })?;
                out.entries.push((entry, entries));
            }
            None if entry.required => {
                return Err(FmgError::Validation(format!(
                    "missing required option(s) '{}'",
                    entry.key
                )));
            }
            None => {}
        }
    }

    for flag in spec.flags {
        if let Some(value) = opts.get_present(flag) {
            out.flags.insert(*flag, value.clone());
        }
    }

    Ok(out)
}

fn apply_soft_rule(rule: &SoftRule, opts: &OptionBag, out: &mut ValidatedOptions) -> Result<()> {
    match *rule {
        SoftRule::DateRange { min, max, strict, require_both } => {
            let lo = opts.get_str(min).filter(|s| !s.is_empty());
            let hi = opts.get_str(max).filter(|s| !s.is_empty());
            match (lo, hi) {
                (Some(lo), Some(hi)) => match (parse_date(lo), parse_date(hi)) {
                    (Some(lo_date), Some(hi_date)) => {
                        let ordered = if strict { hi_date > lo_date } else { hi_date >= lo_date };
                        if ordered {
                            out.push_text(min, &lo_date.format(WIRE_DATE_FORMAT).to_string())?;
                            out.push_text(max, &hi_date.format(WIRE_DATE_FORMAT).to_string())?;
                        } else {
                            warn!(min, max, "'{max}' precedes '{min}', sending without date filter");
                        }
                    }
                    _ => warn!(min, max, "invalid date in '{min}' or '{max}', sending without date filter"),
                },
                (Some(_), None) | (None, Some(_)) if require_both => {
                    warn!(min, max, "date filter needs both '{min}' and '{max}', sending without it");
                }
                (Some(single), None) | (None, Some(single)) => {
                    let key = if lo.is_some() { min } else { max };
                    match parse_date(single) {
                        Some(date) => out.push_text(key, &date.format(WIRE_DATE_FORMAT).to_string())?,
                        None => warn!(key, "invalid date in '{key}', sending without it"),
                    }
                }
                (None, None) => {}
            }
        }
        SoftRule::NumberRange { min, max } => {
            let lo = opts.get_str(min).filter(|s| !s.is_empty());
            let hi = opts.get_str(max).filter(|s| !s.is_empty());
            match (lo, hi) {
                (Some(lo), Some(hi)) => match (parse_int(lo), parse_int(hi)) {
                    (Some(lo_n), Some(hi_n)) if hi_n >= lo_n => {
                        out.push_text(min, &lo_n.to_string())?;
                        out.push_text(max, &hi_n.to_string())?;
                    }
                    (Some(_), Some(_)) => {
                        warn!(min, max, "'{max}' is less than '{min}', sending without range filter");
                    }
                    _ => warn!(min, max, "'{min}' and '{max}' must be integers, sending without range filter"),
                },
                (Some(single), None) | (None, Some(single)) => {
                    let key = if lo.is_some() { min } else { max };
                    match parse_int(single) {
                        Some(n) => out.push_text(key, &n.to_string())?,
                        None => warn!(key, "'{key}' must be an integer, sending without it"),
                    }
                }
                (None, None) => {}
            }
        }
        SoftRule::Floor { key, floor, fallback } => {
            match opts.get_str(key).filter(|s| !s.is_empty()) {
                Some(given) => match parse_int(given) {
                    Some(n) if n >= floor => out.push_text(key, &n.to_string())?,
                    _ => {
                        warn!(key, given, fallback, "'{key}' must be at least {floor}, using fallback");
                        out.push_text(key, fallback)?;
                    }
                },
                None => out.push_text(key, fallback)?,
            }
        }
    }
    Ok(())
}

/// Parses a caller-supplied date or date-time.
///
/// Accepts RFC 3339 (the wall-clock part is kept), the common ISO-like
/// date-time layouts and bare dates (taken as midnight).
#[must_use]
pub fn parse_date(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_local());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn parse_int(input: &str) -> Option<i64> {
    input.trim().parse().ok()
}

fn quoted(keys: &[&str]) -> String {
    keys.iter().map(|k| format!("'{k}'")).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Operation;

    fn bag(pairs: &[(&str, &str)]) -> OptionBag {
        pairs.iter().copied().collect()
    }

    fn check(op: Operation, opts: &OptionBag) -> Result<ValidatedOptions> {
        validate(op.descriptor().request, opts)
    }

    #[test]
    fn test_missing_required_key() {
        let err = check(Operation::AddDevice, &bag(&[("ip", "10.0.0.1")])).unwrap_err();
        assert!(matches!(err, FmgError::Validation(_)));
        assert!(err.to_string().contains("'name'"));
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let err = check(Operation::DeleteScript, &bag(&[("name", "")])).unwrap_err();
        assert!(err.to_string().contains("'name'"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = check(Operation::GetAdomList, &bag(&[("adom", "root")])).unwrap_err();
        assert!(err.to_string().contains("unknown option(s) 'adom'"));
    }

    #[test]
    fn test_defaults_applied() {
        let v = check(Operation::AddDevice, &bag(&[("ip", "10.0.0.1"), ("name", "fw1")])).unwrap();
        assert_eq!(v.field("adom"), Some("root"));
        assert_eq!(v.field("admin_user"), Some("admin"));
        assert_eq!(v.field("password"), Some(""));
        assert_eq!(v.field("description"), None);
    }

    #[test]
    fn test_given_value_overrides_default() {
        let v = check(
            Operation::AddDevice,
            &bag(&[("ip", "10.0.0.1"), ("name", "fw1"), ("adom", "branch")]),
        )
        .unwrap();
        assert_eq!(v.field("adom"), Some("branch"));
    }

    #[test]
    fn test_co_required_joint_default() {
        let v = check(Operation::AddAdom, &bag(&[("name", "adomA")])).unwrap();
        assert_eq!(v.field("version"), Some("500"));
        assert_eq!(v.field("mr"), Some("0"));
        assert_eq!(v.field("is_backup_mode"), Some("0"));
    }

    #[test]
    fn test_co_required_half_pair() {
        let err = check(Operation::AddAdom, &bag(&[("name", "adomA"), ("version", "600")]))
            .unwrap_err();
        assert!(err.to_string().contains("'mr' is required when 'version' is given"));

        let err =
            check(Operation::EditAdom, &bag(&[("name", "adomA"), ("mr", "2")])).unwrap_err();
        assert!(err.to_string().contains("'version' is required when 'mr' is given"));
    }

    #[test]
    fn test_co_required_without_default_is_omitted() {
        let v = check(Operation::EditAdom, &bag(&[("name", "adomA")])).unwrap();
        assert_eq!(v.field("version"), None);
        assert_eq!(v.field("mr"), None);
    }

    #[test]
    fn test_exclusive_device_pair() {
        let both = bag(&[("serial_number", "FGVM1"), ("dev_id", "234")]);
        let err = check(Operation::GetScriptLogSummary, &both).unwrap_err();
        assert!(err.to_string().contains("mutually exclusive"));

        let err = check(Operation::GetScriptLogSummary, &OptionBag::new()).unwrap_err();
        assert!(err.to_string().contains("one of 'serial_number', 'dev_id' is required"));

        let v = check(Operation::GetScriptLogSummary, &bag(&[("dev_id", "234")])).unwrap();
        assert_eq!(v.field("dev_id"), Some("234"));
        assert_eq!(v.field("max_logs"), Some("1000"));
    }

    #[test]
    fn test_first_choice_keeps_first_present() {
        let v = check(Operation::DeleteAdom, &bag(&[("adom_oid", "7"), ("adom_name", "a1")]))
            .unwrap();
        assert_eq!(v.field("adom_name"), Some("a1"));
        assert_eq!(v.field("adom_oid"), None);
    }

    #[test]
    fn test_all_choice_keeps_every_present_key() {
        let v = check(Operation::GetInstlog, &bag(&[("serial_number", "FGVM1"), ("dev_id", "9")]))
            .unwrap();
        assert_eq!(v.field("dev_id"), Some("9"));
        assert_eq!(v.field("serial_number"), Some("FGVM1"));

        let err = check(Operation::EditGroupMembership, &bag(&[("grp_name", "g1")])).unwrap_err();
        assert!(err.to_string().contains("at least one of"));
    }

    #[test]
    fn test_optional_choice_may_be_absent() {
        let v = check(Operation::AddGroup, &bag(&[("name", "g1")])).unwrap();
        assert_eq!(v.field("device_sn"), None);
        assert_eq!(v.field("device_id"), None);
    }

    #[test]
    fn test_fixed_field_always_sent() {
        let v = check(Operation::GetDeviceList, &OptionBag::new()).unwrap();
        assert_eq!(v.field("detail"), Some("1"));
        let err = check(Operation::GetDeviceList, &bag(&[("detail", "0")])).unwrap_err();
        assert!(err.to_string().contains("'detail'"));
    }

    #[test]
    fn test_inverted_date_range_omits_both() {
        let opts = bag(&[
            ("serial_number", "FGVM1"),
            ("min_checkin_date", "2024-05-01"),
            ("max_checkin_date", "2024-01-01"),
        ]);
        let v = check(Operation::GetConfigRevisionHistory, &opts).unwrap();
        assert_eq!(v.field("min_checkin_date"), None);
        assert_eq!(v.field("max_checkin_date"), None);
        assert_eq!(v.field("serial_number"), Some("FGVM1"));
    }

    #[test]
    fn test_date_range_normalized() {
        let opts = bag(&[
            ("dev_id", "3"),
            ("min_checkin_date", "2024-01-01"),
            ("max_checkin_date", "2024-02-03 04:05:06"),
        ]);
        let v = check(Operation::GetConfigRevisionHistory, &opts).unwrap();
        assert_eq!(v.field("min_checkin_date"), Some("2024-01-01T00:00:00"));
        assert_eq!(v.field("max_checkin_date"), Some("2024-02-03T04:05:06"));
    }

    #[test]
    fn test_unparseable_date_omits_both() {
        let opts = bag(&[
            ("dev_id", "3"),
            ("min_checkin_date", "yesterday"),
            ("max_checkin_date", "2024-02-03"),
        ]);
        let v = check(Operation::GetConfigRevisionHistory, &opts).unwrap();
        assert_eq!(v.field("min_checkin_date"), None);
        assert_eq!(v.field("max_checkin_date"), None);
    }

    #[test]
    fn test_single_date_bound_kept_when_allowed() {
        let opts = bag(&[("dev_id", "3"), ("max_checkin_date", "2024-03-01T10:00:00Z")]);
        let v = check(Operation::GetConfigRevisionHistory, &opts).unwrap();
        assert_eq!(v.field("max_checkin_date"), Some("2024-03-01T10:00:00"));
    }

    #[test]
    fn test_report_dates_need_both_and_strict_order() {
        let single = bag(&[("start_date", "2024-01-01")]);
        let v = check(Operation::ListFazGeneratedReports, &single).unwrap();
        assert_eq!(v.field("start_date"), None);

        let equal = bag(&[("start_date", "2024-01-01"), ("end_date", "2024-01-01")]);
        let v = check(Operation::ListFazGeneratedReports, &equal).unwrap();
        assert_eq!(v.field("start_date"), None);
        assert_eq!(v.field("end_date"), None);

        let ordered = bag(&[("start_date", "2024-01-01"), ("end_date", "2024-01-02")]);
        let v = check(Operation::ListFazGeneratedReports, &ordered).unwrap();
        assert_eq!(v.field("end_date"), Some("2024-01-02T00:00:00"));
    }

    #[test]
    fn test_number_range() {
        let inverted = bag(&[
            ("dev_id", "3"),
            ("min_revision_number", "9"),
            ("max_revision_number", "2"),
        ]);
        let v = check(Operation::GetConfigRevisionHistory, &inverted).unwrap();
        assert_eq!(v.field("min_revision_number"), None);
        assert_eq!(v.field("max_revision_number"), None);

        let ok = bag(&[("dev_id", "3"), ("min_revision_number", "2"), ("max_revision_number", "2")]);
        let v = check(Operation::GetConfigRevisionHistory, &ok).unwrap();
        assert_eq!(v.field("min_revision_number"), Some("2"));
        assert_eq!(v.field("max_revision_number"), Some("2"));
    }

    #[test]
    fn test_floor_falls_back() {
        let opts = bag(&[
            ("device_name", "fw1"),
            ("search_criteria", "srcip=10.0.2.15"),
            ("max_num_matches", "0"),
        ]);
        let v = check(Operation::SearchFazLog, &opts).unwrap();
        assert_eq!(v.field("max_num_matches"), Some("10"));
        assert_eq!(v.field("start_index"), Some("1"));

        let opts = bag(&[
            ("device_name", "fw1"),
            ("search_criteria", "srcip=10.0.2.15"),
            ("max_num_matches", "250"),
            ("start_index", "5"),
        ]);
        let v = check(Operation::SearchFazLog, &opts).unwrap();
        assert_eq!(v.field("max_num_matches"), Some("250"));
        assert_eq!(v.field("start_index"), Some("5"));
    }

    #[test]
    fn test_entry_slot_collected() {
        let opts = OptionBag::new().with("name", "adomA").with(
            "devices",
            vec![OptionBag::new().with("serial_number", "FGVM1").with("vdom_name", "root")],
        );
        let v = check(Operation::AddAdom, &opts).unwrap();
        assert_eq!(v.entries().len(), 1);
        assert_eq!(v.entries()[0].0.key, "devices");
        assert!(matches!(v.entries()[0].1, Entries::Many(_)));
    }

    #[test]
    fn test_entry_slot_rejects_scalar() {
        let opts = bag(&[("name", "adomA"), ("devices", "FGVM1")]);
        let err = check(Operation::AddAdom, &opts).unwrap_err();
        assert!(err.to_string().contains("'devices' must be a table"));
    }

    #[test]
    fn test_required_entry_slot() {
        let err = check(Operation::AssignGlobalPolicy, &OptionBag::new()).unwrap_err();
        assert!(err.to_string().contains("'targets'"));
    }

    #[test]
    fn test_list_outside_entry_slot_rejected() {
        let opts = OptionBag::new().with("name", vec![OptionBag::new().with("a", "b")]);
        let err = check(Operation::DeleteScript, &opts).unwrap_err();
        assert!(err.to_string().contains("does not accept a list"));
    }

    #[test]
    fn test_flags_are_not_fields() {
        let opts = bag(&[("policy_package_name", "pp1"), ("fg_is_not_vdom_mode", "1")]);
        let v = check(Operation::AddPolicyPackage, &opts).unwrap();
        assert_eq!(v.flag("fg_is_not_vdom_mode"), Some("1"));
        assert_eq!(v.field("fg_is_not_vdom_mode"), None);
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date("2024-01-02").is_some());
        assert!(parse_date("20240102").is_some());
        assert!(parse_date("2024-01-02T03:04:05+02:00").is_some());
        assert!(parse_date("20240102T030405").is_some());
        assert!(parse_date("not a date").is_none());
        assert!(parse_date("2024-13-40").is_none());
    }
}

//! Identifier normalization between option keys and wire field names.
//!
//! Option keys are snake case (`serial_number`). Wire names are lower camel
//! case (`serialNumber`), except where the appliance uses its own spelling for
//! acronyms (`SN`, `ID`, `vdomID`, `deviceSNVdom`, `runOnDB`). Those spellings
//! are kept as per-operation [`CasingTable`]s of `(pattern, replacement)`
//! pairs, applied after the camel-case rule.
//!
//! Response tags travel the other way and are mapped to snake case.
//!
//! ```
//! use fmg_xml_api::casing::{ADOM_DEVICES, camel_case, snake_case};
//!
//! assert_eq!(camel_case("serial_number"), "serialNumber");
//! assert_eq!(ADOM_DEVICES.normalize("serial_number"), "SN");
//! assert_eq!(ADOM_DEVICES.normalize("vdom_id"), "vdomID");
//! assert_eq!(snake_case("hostName"), "host_name");
//! ```

use std::borrow::Cow;

/// Maps field names between the caller's and the appliance's spelling.
pub trait FieldMapper: Send + Sync {
    /// Maps an option key to its wire field name.
    fn map_request_field<'a>(&self, option_key: &'a str) -> Cow<'a, str>;

    /// Maps a wire tag to its snake-case response key.
    fn map_response_field<'a>(&self, wire_name: &'a str) -> Cow<'a, str>;
}

/// Ordered table of exact-substring casing exceptions.
///
/// Every replacement holds fewer lowercase letters than its pattern, so
/// [`fixup`](Self::fixup) always reaches a fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CasingTable {
    pairs: &'static [(&'static str, &'static str)],
}

impl CasingTable {
    /// Table with no exceptions.
    pub const EMPTY: Self = Self::new(&[]);

    /// Creates a table from `(pattern, replacement)` pairs, applied in order.
    #[must_use]
    pub const fn new(pairs: &'static [(&'static str, &'static str)]) -> Self {
        Self { pairs }
    }

    /// Returns the exception pairs.
    #[must_use]
    pub const fn pairs(&self) -> &'static [(&'static str, &'static str)] {
        self.pairs
    }

    /// Applies the exceptions to `text` as exact substring replacement.
    ///
    /// Pairs are applied in order and the pass is repeated until no pattern
    /// matches, so `fixup(fixup(x)) == fixup(x)` holds for every input.
    #[must_use]
    pub fn fixup<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut current = Cow::Borrowed(text);
        loop {
            let mut changed = false;
            for (pattern, replacement) in self.pairs {
                if current.contains(pattern) {
                    current = Cow::Owned(current.replace(pattern, replacement));
                    changed = true;
                }
            }
            if !changed {
                return current;
            }
        }
    }

    /// Camel-cases an option key, then applies the exceptions.
    #[must_use]
    pub fn normalize<'a>(&self, key: &'a str) -> Cow<'a, str> {
        match camel_case(key) {
            Cow::Borrowed(borrowed) => self.fixup(borrowed),
            Cow::Owned(owned) => Cow::Owned(self.fixup(&owned).into_owned()),
        }
    }
}

impl FieldMapper for CasingTable {
    fn map_request_field<'a>(&self, option_key: &'a str) -> Cow<'a, str> {
        self.normalize(option_key)
    }

    fn map_response_field<'a>(&self, wire_name: &'a str) -> Cow<'a, str> {
        Cow::Owned(snake_case(wire_name))
    }
}

/// ADOM device entries: `deviceSNVdom`, `deviceIDVdom` and their fields.
pub const ADOM_DEVICES: CasingTable = CasingTable::new(&[
    ("addDeviceIdVdom", "addDeviceIDVdom"),
    ("addDeviceSnVdom", "addDeviceSNVdom"),
    ("deviceIdVdom", "deviceIDVdom"),
    ("deviceSnVdom", "deviceSNVdom"),
    ("serialNumber", "SN"),
    ("devId", "ID"),
    ("vdomId", "vdomID"),
]);

/// Group membership change lists.
pub const GROUP_MEMBERSHIP: CasingTable =
    CasingTable::new(&[("GroupId", "GroupID"), ("DeviceId", "DeviceID"), ("DeviceSn", "DeviceSN")]);

/// Group creation with a member device.
pub const GROUP_DEVICE: CasingTable =
    CasingTable::new(&[("deviceId", "deviceID"), ("deviceSn", "deviceSN")]);

/// Device VDOM listing.
pub const DEVICE_VDOM: CasingTable = CasingTable::new(&[("devId", "devID")]);

/// Script execution.
pub const RUN_SCRIPT: CasingTable = CasingTable::new(&[("runOnDb", "runOnDB")]);

/// Log search.
pub const LOG_SEARCH: CasingTable = CasingTable::new(&[("dlpArchiveType", "DLPArchiveType")]);

/// Every table shipped with the operation catalog.
pub const ALL_TABLES: [&CasingTable; 6] =
    [&ADOM_DEVICES, &GROUP_MEMBERSHIP, &GROUP_DEVICE, &DEVICE_VDOM, &RUN_SCRIPT, &LOG_SEARCH];

/// Converts a snake-case key to lower camel case.
///
/// The first word is kept as written; every later word has its first
/// character uppercased. Empty words (doubled underscores) are skipped.
#[must_use]
pub fn camel_case(key: &str) -> Cow<'_, str> {
    if !key.contains('_') {
        return Cow::Borrowed(key);
    }

    let mut out = String::with_capacity(key.len());
    for word in key.split('_').filter(|w| !w.is_empty()) {
        if out.is_empty() {
            out.push_str(word);
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    Cow::Owned(out)
}

/// Converts a wire tag to snake case.
///
/// Any namespace prefix (`ns1:`) is dropped. Acronym runs stay together:
/// `DLPArchiveType` becomes `dlp_archive_type` and `deviceSNVdom` becomes
/// `device_sn_vdom`.
#[must_use]
pub fn snake_case(tag: &str) -> String {
    let local = tag.rsplit_once(':').map_or(tag, |(_, local)| local);
    let chars: Vec<char> = local.chars().collect();
    let mut out = String::with_capacity(local.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' {
            out.push('_');
            continue;
        }
        if !c.is_ascii_uppercase() {
            out.push(c);
            continue;
        }

        let prev = i.checked_sub(1).and_then(|p| chars.get(p));
        let next = chars.get(i + 1);
        let boundary = match prev {
            Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
            Some(p) if p.is_ascii_uppercase() => next.is_some_and(char::is_ascii_lowercase),
            _ => false,
        };
        if boundary && !out.ends_with('_') {
            out.push('_');
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

#[cfg(test)]
mod tests;

//! Static request and response descriptions.
//!
//! Each catalog entry is plain data. Validation and message building read it.
//! Nothing here holds behaviour of its own.

use crate::casing::CasingTable;

/// How a choice group selects among alternative keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// At least one key is required. The first present key in declaration
    /// order is sent and the rest are dropped.
    First,
    /// Exactly one key is required. Supplying several is an error.
    Exclusive,
    /// At least one key is required. Every present key is sent.
    All,
    /// Like [`First`](Self::First), but supplying none is allowed.
    OptionalFirst,
}

/// A group of alternative option keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    /// Alternative keys, in priority order.
    pub keys: &'static [&'static str],
    /// Selection rule.
    pub pick: Pick,
}

/// A pair of keys that must be given together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoRequired {
    /// The two keys.
    pub keys: [&'static str; 2],
    /// Values used for both keys when neither is given.
    pub default: Option<[&'static str; 2]>,
}

/// A filter that is dropped with a warning instead of failing the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftRule {
    /// Lower and upper date bounds.
    DateRange {
        /// Lower bound key.
        min: &'static str,
        /// Upper bound key.
        max: &'static str,
        /// Upper bound must be strictly after the lower bound.
        strict: bool,
        /// A lone bound is dropped rather than sent.
        require_both: bool,
    },
    /// Lower and upper integer bounds.
    NumberRange {
        /// Lower bound key.
        min: &'static str,
        /// Upper bound key.
        max: &'static str,
    },
    /// Integer with a lower floor. Out-of-range or missing values fall back.
    Floor {
        /// Option key.
        key: &'static str,
        /// Smallest accepted value.
        floor: i64,
        /// Value sent when the given one is rejected or absent.
        fallback: &'static str,
    },
}

impl SoftRule {
    /// Option keys governed by this rule.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        let (first, second) = match *self {
            Self::DateRange { min, max, .. } | Self::NumberRange { min, max } => (min, Some(max)),
            Self::Floor { key, .. } => (key, None),
        };
        std::iter::once(first).chain(second)
    }
}

/// How the element name of each sub-entry is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryTag {
    /// Every entry uses the same element name.
    Fixed(&'static str),
    /// The first `(key, tag)` pair whose key is present in the entry wins.
    ByKey(&'static [(&'static str, &'static str)]),
    /// The entry has a single top-level key. That key names the element and its
    /// nested bag is the element content.
    KeyName,
}

/// Shape rule checked against every sub-entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRule {
    /// No shape check.
    Any,
    /// Each group must have at least one present key. Dotted keys reach into
    /// nested bags.
    AnyOfEach(&'static [&'static [&'static str]]),
    /// Policy package install target (`dev` or `grp`).
    InstallTarget,
}

/// A slot for one-or-many sub-entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntrySpec {
    /// Option key the entries are passed under.
    pub key: &'static str,
    /// Element enclosing all entries, if any.
    pub wrapper: Option<&'static str>,
    /// Element name selection.
    pub tag: EntryTag,
    /// Allowed top-level keys inside an entry.
    pub fields: &'static [&'static str],
    /// Shape rule.
    pub rule: EntryRule,
    /// At least one entry must be supplied.
    pub required: bool,
}

/// Request description of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestSpec {
    /// Keys that must be present.
    pub required: &'static [&'static str],
    /// Keys with a value used when the caller gives none.
    pub defaults: &'static [(&'static str, &'static str)],
    /// Keys sent only when given.
    pub optional: &'static [&'static str],
    /// Fields always sent with a constant value. Not caller-settable.
    pub fixed: &'static [(&'static str, &'static str)],
    /// Alternative-key groups.
    pub choices: &'static [Choice],
    /// Keys that must be given together.
    pub co_required: &'static [CoRequired],
    /// Filters that degrade instead of failing.
    pub soft: &'static [SoftRule],
    /// Client-side switches consulted during validation, never sent.
    pub flags: &'static [&'static str],
    /// Option key to wire key renames, applied before casing.
    pub renames: &'static [(&'static str, &'static str)],
    /// Sub-entry slots.
    pub entries: &'static [EntrySpec],
    /// Casing exceptions for every element name of the message.
    pub casing: CasingTable,
}

impl RequestSpec {
    /// Spec with no options at all.
    pub const EMPTY: Self = Self {
        required: &[],
        defaults: &[],
        optional: &[],
        fixed: &[],
        choices: &[],
        co_required: &[],
        soft: &[],
        flags: &[],
        renames: &[],
        entries: &[],
        casing: CasingTable::EMPTY,
    };

    /// Returns true if callers may pass `key`.
    #[must_use]
    pub fn accepts(&self, key: &str) -> bool {
        self.required.contains(&key)
            || self.optional.contains(&key)
            || self.flags.contains(&key)
            || self.defaults.iter().any(|(k, _)| *k == key)
            || self.choices.iter().any(|c| c.keys.contains(&key))
            || self.co_required.iter().any(|c| c.keys.contains(&key))
            || self.soft.iter().any(|r| r.keys().any(|k| k == key))
            || self.entries.iter().any(|e| e.key == key)
    }

    /// Returns the wire key for an option key, before casing.
    #[must_use]
    pub fn rename<'a>(&self, key: &'a str) -> &'a str {
        self.renames.iter().find(|(from, _)| *from == key).map_or(key, |(_, to)| *to)
    }

    /// Returns the entry slot named `key`.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&'static EntrySpec> {
        self.entries.iter().find(|e| e.key == key)
    }
}

/// How the payload is extracted from a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Payload found by walking this key path inside the container.
    Standard(&'static [&'static str]),
    /// System status fields read one by one.
    Status,
    /// The response body is ignored and this value returned.
    Constant(&'static str),
}

/// Complete catalog entry for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDescriptor {
    /// SOAP operation name (`getAdoms`).
    pub wire_name: &'static str,
    /// Snake-case response container key (`get_adoms_response`).
    pub container: &'static str,
    /// Payload extraction.
    pub response: ResponseShape,
    /// Request description.
    pub request: &'static RequestSpec,
}

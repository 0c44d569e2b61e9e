//! Caller-supplied option bags.
//!
//! Operations take their arguments as an [`OptionBag`]: an insertion-ordered
//! map from snake-case option keys to [`OptionValue`]s. A value is either a
//! scalar, a nested bag (a single sub-entry) or a list of bags (repeated
//! sub-entries, such as several install targets).
//!
//! Bags deserialize from TOML or JSON. Scalars may be written as strings,
//! integers, floats or booleans; they are kept as their string form since the
//! wire format is text.
//!
//! ```
//! use fmg_xml_api::options::{Entries, OptionBag};
//!
//! let opts = OptionBag::new().with("name", "adomA").with("version", "500");
//! assert_eq!(opts.get_str("name"), Some("adomA"));
//!
//! let devices = Entries::Many(vec![
//!     OptionBag::new().with("serial_number", "FGVM1").with("vdom_name", "vdomA"),
//! ]);
//! assert_eq!(devices.len(), 1);
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

/// A single option value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawValue")]
pub enum OptionValue {
    /// Text value.
    Scalar(String),
    /// Nested key/value structure.
    Bag(OptionBag),
    /// Ordered list of nested structures.
    List(Vec<OptionBag>),
}

impl OptionValue {
    /// Returns the text of a scalar value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::Bag(_) | Self::List(_) => None,
        }
    }

    /// Returns the nested bag of a [`Bag`](Self::Bag) value.
    #[must_use]
    pub const fn as_bag(&self) -> Option<&OptionBag> {
        match self {
            Self::Bag(bag) => Some(bag),
            Self::Scalar(_) | Self::List(_) => None,
        }
    }

    /// Returns true unless the value is an empty string, empty bag or empty list.
    ///
    /// Empty values are treated as absent by validation.
    #[must_use]
    pub fn is_present(&self) -> bool {
        match self {
            Self::Scalar(s) => !s.is_empty(),
            Self::Bag(bag) => !bag.is_empty(),
            Self::List(list) => !list.is_empty(),
        }
    }

    /// Interprets the value as sub-entries.
    ///
    /// A bag is a single entry and a list is a repeated-entry sequence.
    /// Scalars cannot be entries.
    #[must_use]
    pub fn to_entries(&self) -> Option<Entries> {
        match self {
            Self::Bag(bag) => Some(Entries::One(bag.clone())),
            Self::List(list) => Some(Entries::Many(list.clone())),
            Self::Scalar(_) => None,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<OptionBag> for OptionValue {
    fn from(value: OptionBag) -> Self {
        Self::Bag(value)
    }
}

impl From<Vec<OptionBag>> for OptionValue {
    fn from(value: Vec<OptionBag>) -> Self {
        Self::List(value)
    }
}

impl From<Entries> for OptionValue {
    fn from(value: Entries) -> Self {
        match value {
            Entries::One(bag) => Self::Bag(bag),
            Entries::Many(list) => Self::List(list),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Bag(OptionBag),
    List(Vec<OptionBag>),
}

impl From<RawValue> for OptionValue {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Text(s) => Self::Scalar(s),
            RawValue::Integer(i) => Self::Scalar(i.to_string()),
            RawValue::Float(f) => Self::Scalar(f.to_string()),
            RawValue::Boolean(b) => Self::Scalar(b.to_string()),
            RawValue::Bag(bag) => Self::Bag(bag),
            RawValue::List(list) => Self::List(list),
        }
    }
}

/// Insertion-ordered map of option keys to values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct OptionBag(IndexMap<String, OptionValue>);

impl OptionBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Parses a bag from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`FmgError::Validation`](crate::error::FmgError::Validation) if the
    /// document is not valid TOML or holds a value that is not a scalar, table or
    /// array of tables.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| {
            crate::error::FmgError::Validation(format!("invalid TOML options: {e}"))
        })
    }

    /// Adds a value and returns the bag, for chained construction.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into is idiomatic for builder methods"
    )]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a value, replacing and returning any previous value for `key`.
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into is idiomatic for builder methods"
    )]
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Option<OptionValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    /// Returns the value for `key` if it is present and non-empty.
    #[must_use]
    pub fn get_present(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key).filter(|v| v.is_present())
    }

    /// Returns the scalar text for `key`.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(OptionValue::as_str)
    }

    /// Looks up a dotted path such as `pkg.oid` through nested bags.
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&OptionValue> {
        let mut parts = path.split('.');
        let mut current = self.get(parts.next()?)?;
        for part in parts {
            current = current.as_bag()?.get(part)?;
        }
        Some(current)
    }

    /// Returns true if `key` holds a non-empty value.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.get_present(key).is_some()
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of keys in the bag.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the bag holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for OptionBag
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// One or many sub-entries for a repeated-element slot.
///
/// A single entry is encoded in map form. Many entries (even a list of one)
/// are encoded as ordered sibling elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entries {
    /// A single sub-entry.
    One(OptionBag),
    /// An ordered sequence of sub-entries.
    Many(Vec<OptionBag>),
}

impl Entries {
    /// Returns the entries as a slice, in input order.
    #[must_use]
    pub fn as_slice(&self) -> &[OptionBag] {
        match self {
            Self::One(bag) => std::slice::from_ref(bag),
            Self::Many(list) => list,
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

//! Wire message tree.
//!
//! A request body is either a unique-name map ([`FieldMap`]) or a map prefix
//! followed by an ordered run of [`Element`]s whose names may repeat. Both
//! serialize through the same recursive writer.

use indexmap::IndexMap;
use quick_xml::escape::escape;

use crate::error::{FmgError, Result};

/// Value stored under a [`FieldMap`] name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Text content.
    Text(String),
    /// Nested unique-name map.
    Map(FieldMap),
}

/// Ordered map of unique wire names.
///
/// Inserting a name twice is an error, never an overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap(IndexMap<String, Node>);

impl FieldMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Inserts `node` under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`FmgError::Validation`] if `name` is already present.
    pub fn insert(&mut self, name: String, node: Node) -> Result<()> {
        if self.0.contains_key(&name) {
            return Err(FmgError::Validation(format!("wire field '{name}' produced twice")));
        }
        self.0.insert(name, node);
        Ok(())
    }

    /// Returns the node stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.0.get(name)
    }

    /// Returns the text stored under `name`.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(Node::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Returns true if `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Iterates over wire names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts the map into elements, keeping order.
    #[must_use]
    pub fn to_elements(&self) -> Vec<Element> {
        self.0
            .iter()
            .map(|(name, node)| match node {
                Node::Text(text) => Element::text(name.clone(), text.clone()),
                Node::Map(map) => Element::parent(name.clone(), map.to_elements()),
            })
            .collect()
    }
}

/// Content of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Text content.
    Text(String),
    /// Ordered child elements. Names may repeat.
    Children(Vec<Element>),
}

/// Named element with ordered content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Wire name.
    pub name: String,
    /// Element content.
    pub content: Content,
}

impl Element {
    /// Creates a text element.
    #[must_use]
    pub fn text(name: String, text: String) -> Self {
        Self { name, content: Content::Text(text) }
    }

    /// Creates an element with child elements.
    #[must_use]
    pub fn parent(name: String, children: Vec<Self>) -> Self {
        Self { name, content: Content::Children(children) }
    }

    /// Returns the child elements, empty for text elements.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match &self.content {
            Content::Children(children) => children,
            Content::Text(_) => &[],
        }
    }

    /// Returns the first child named `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children().iter().find(|c| c.name == name)
    }

    /// Returns the text content, if this is a text element.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Children(_) => None,
        }
    }

    /// Converts a childless-or-unique element into a map node.
    ///
    /// # Errors
    ///
    /// Returns [`FmgError::Validation`] if two children share a name, which a
    /// map cannot hold.
    pub fn into_node(self) -> Result<(String, Node)> {
        match self.content {
            Content::Text(text) => Ok((self.name, Node::Text(text))),
            Content::Children(children) => {
                let mut map = FieldMap::new();
                for child in children {
                    let (name, node) = child.into_node()?;
                    map.insert(name, node)?;
                }
                Ok((self.name, Node::Map(map)))
            }
        }
    }
}

/// Request body for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireMessage {
    /// Unique-name fields only.
    Map(FieldMap),
    /// Unique-name prefix followed by repeated-sibling elements.
    Composed {
        /// Flat fields.
        prefix: FieldMap,
        /// Repeated elements, in input order.
        fragments: Vec<Element>,
    },
}

impl WireMessage {
    /// Returns the unique-name fields.
    #[must_use]
    pub const fn prefix(&self) -> &FieldMap {
        match self {
            Self::Map(map) | Self::Composed { prefix: map, .. } => map,
        }
    }

    /// Returns the repeated elements, empty for the map form.
    #[must_use]
    pub fn fragments(&self) -> &[Element] {
        match self {
            Self::Map(_) => &[],
            Self::Composed { fragments, .. } => fragments,
        }
    }

    /// Returns every top-level element in wire order.
    #[must_use]
    pub fn elements(&self) -> Vec<Element> {
        let mut elements = self.prefix().to_elements();
        elements.extend_from_slice(self.fragments());
        elements
    }

    /// Serializes the body as an XML fragment (no enclosing operation element).
    #[must_use]
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        for element in self.elements() {
            write_element(&mut out, &element);
        }
        out
    }
}

/// Writes `element` and its descendants to `out`.
pub fn write_element(out: &mut String, element: &Element) {
    match &element.content {
        Content::Text(text) => {
            push_tag(out, &element.name, false);
            out.push_str(&escape(text.as_str()));
            push_tag(out, &element.name, true);
        }
        Content::Children(children) => {
            push_tag(out, &element.name, false);
            for child in children {
                write_element(out, child);
            }
            push_tag(out, &element.name, true);
        }
    }
}

fn push_tag(out: &mut String, name: &str, closing: bool) {
    out.push_str(if closing { "</" } else { "<" });
    out.push_str(name);
    out.push('>');
}

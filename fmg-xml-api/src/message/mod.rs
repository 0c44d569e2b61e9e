//! Request message construction.
//!
//! [`build`] maps validated options onto a [`WireMessage`]: a unique-name map,
//! optionally followed by repeated sibling elements for list-valued entry
//! slots. [`WireMessage::to_xml`] renders the body that the transport wraps in
//! the operation element.

mod builder;
mod node;

pub use builder::build;
pub use node::{Content, Element, FieldMap, Node, WireMessage, write_element};

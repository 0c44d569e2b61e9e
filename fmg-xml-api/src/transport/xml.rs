//! SOAP response parsing.
//!
//! Converts response XML into a [`Value`] tree: tags lose their namespace
//! prefix and become snake case, repeated siblings collapse into an array,
//! and leaf text is kept verbatim. An element that carries attributes keeps
//! its text under `"$text"`.

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use serde_json::{Map, Value};

use crate::{
    casing::snake_case,
    error::{FmgError, Result},
};

/// Key holding element text next to attributes or children.
pub const TEXT_KEY: &str = "$text";

struct Frame {
    name: String,
    attributes: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        Ok(Self {
            name: snake_case(&String::from_utf8_lossy(start.local_name().as_ref())),
            attributes: attributes(start)?,
            children: Map::new(),
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        let value = if self.children.is_empty() && self.attributes.is_empty() {
            Value::String(self.text)
        } else {
            let mut object = self.attributes;
            object.extend(self.children);
            if !self.text.trim().is_empty() {
                object.insert(TEXT_KEY.to_owned(), Value::String(self.text));
            }
            Value::Object(object)
        };
        (self.name, value)
    }
}

fn attributes(start: &BytesStart<'_>) -> Result<Map<String, Value>> {
    let mut map = Map::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| malformed(&e))?;
        let key = attribute.key.as_ref();
        if key.starts_with(b"xmlns") || key.starts_with(b"xsi:") {
            continue;
        }
        let name = snake_case(&String::from_utf8_lossy(attribute.key.local_name().as_ref()));
        let value = attribute.unescape_value().map_err(|e| malformed(&e))?;
        map.insert(name, Value::String(value.into_owned()));
    }
    Ok(map)
}

fn malformed(error: &impl std::fmt::Display) -> FmgError {
    FmgError::Transport(format!("malformed response XML: {error}"))
}

/// Inserts `value` under `name`, turning repeated names into an array.
fn insert_child(children: &mut Map<String, Value>, name: String, value: Value) {
    match children.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            children.insert(name, value);
        }
    }
}

/// Parses an XML document into `{ root_name: content }`.
///
/// # Errors
///
/// Returns [`FmgError::Transport`] on malformed or truncated XML.
pub fn parse_document(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root = Map::new();

    loop {
        match reader.read_event().map_err(|e| malformed(&e))? {
            Event::Start(start) => stack.push(Frame::open(&start)?),
            Event::Empty(start) => {
                let (name, value) = Frame::open(&start)?.close();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.children, name, value),
                    None => insert_child(&mut root, name, value),
                }
            }
            Event::End(_) => {
                let frame = stack.pop().ok_or_else(|| malformed(&"unexpected closing tag"))?;
                let (name, value) = frame.close();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.children, name, value),
                    None => insert_child(&mut root, name, value),
                }
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text.unescape().map_err(|e| malformed(&e))?);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(&format!("element '{}' is not closed", open.name)));
    }
    if root.is_empty() {
        return Err(malformed(&"empty document"));
    }
    Ok(Value::Object(root))
}

/// Extracts the SOAP body content from a response document.
///
/// # Errors
///
/// Returns [`FmgError::Transport`] if the XML is malformed, has no SOAP body,
/// or the body holds a SOAP fault.
pub fn parse_soap_body(xml: &str) -> Result<Value> {
    let document = parse_document(xml)?;
    let body = document
        .get("envelope")
        .and_then(|envelope| envelope.get("body"))
        .ok_or_else(|| FmgError::Transport("response has no SOAP body".to_owned()))?;

    if let Some(fault) = body.get("fault") {
        let reason = fault
            .get("faultstring")
            .or_else(|| fault.get("faultcode"))
            .and_then(Value::as_str)
            .unwrap_or("unknown fault");
        return Err(FmgError::Transport(format!("SOAP fault: {reason}")));
    }

    match body {
        Value::Object(_) => Ok(body.clone()),
        _ => Err(FmgError::Transport("SOAP body is empty".to_owned())),
    }
}

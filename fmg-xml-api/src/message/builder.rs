//! Turns validated options into a [`WireMessage`].

use tracing::debug;

use super::node::{Element, FieldMap, Node, WireMessage};
use crate::{
    casing::FieldMapper,
    catalog::{EntryRule, EntrySpec, EntryTag, RequestSpec},
    error::{FmgError, Result},
    options::{Entries, OptionBag, OptionValue},
    validate::ValidatedOptions,
};

/// Builds the request body for `spec` from already validated options.
///
/// Renames apply first, then the operation's casing table. Both touch element
/// names only, never values. A single sub-entry is encoded in map form. A
/// list of entries (even of one) becomes ordered sibling elements after the
/// flat fields.
///
/// # Errors
///
/// Returns [`FmgError::Validation`] when a sub-entry has an unexpected key or
/// fails its shape rule, or when two fields map to the same wire name.
pub fn build(spec: &RequestSpec, options: &ValidatedOptions) -> Result<WireMessage> {
    let mapper = &spec.casing;
    let mut prefix = FieldMap::new();

    for (key, value) in options.fields() {
        let name = mapper.map_request_field(spec.rename(key)).into_owned();
        prefix.insert(name, value_node(key, value, mapper)?)?;
    }

    let mut fragments = Vec::new();
    for (slot, entries) in options.entries() {
        for (index, entry) in entries.as_slice().iter().enumerate() {
            check_entry(slot, entry, index + 1, options)?;
        }
        match entries {
            Entries::One(entry) => {
                let (name, node) = entry_element(slot, entry, 1, mapper)?.into_node()?;
                match slot.wrapper {
                    Some(wrapper) => {
                        let mut inner = FieldMap::new();
                        inner.insert(name, node)?;
                        prefix.insert(mapper.map_request_field(wrapper).into_owned(), Node::Map(inner))?;
                    }
                    None => prefix.insert(name, node)?,
                }
            }
            Entries::Many(list) => {
                let elements = list
                    .iter()
                    .enumerate()
                    .map(|(index, entry)| entry_element(slot, entry, index + 1, mapper))
                    .collect::<Result<Vec<_>>>()?;
                match slot.wrapper {
                    Some(wrapper) => fragments
                        .push(Element::parent(mapper.map_request_field(wrapper).into_owned(), elements)),
                    None => fragments.extend(elements),
                }
            }
        }
    }

    let message = if fragments.is_empty() {
        WireMessage::Map(prefix)
    } else {
        if let Some(clash) = fragments.iter().find(|f| prefix.contains(&f.name)) {
            return Err(FmgError::Validation(format!(
                "wire field '{}' produced twice",
                clash.name
            )));
        }
        WireMessage::Composed { prefix, fragments }
    };

    debug!(
        fields = message.prefix().len(),
        fragments = message.fragments().len(),
        "built request message"
    );
    Ok(message)
}

fn value_node(key: &str, value: &OptionValue, mapper: &impl FieldMapper) -> Result<Node> {
    match value {
        OptionValue::Scalar(text) => Ok(Node::Text(text.clone())),
        OptionValue::Bag(bag) => {
            let mut map = FieldMap::new();
            for (inner_key, inner) in bag.iter() {
                map.insert(
                    mapper.map_request_field(inner_key).into_owned(),
                    value_node(inner_key, inner, mapper)?,
                )?;
            }
            Ok(Node::Map(map))
        }
        OptionValue::List(_) => Err(FmgError::Validation(format!(
            "option '{key}' does not accept a list of entries"
        ))),
    }
}

fn bag_elements(bag: &OptionBag, mapper: &impl FieldMapper) -> Vec<Element> {
    let mut elements = Vec::with_capacity(bag.len());
    for (key, value) in bag.iter() {
        let name = mapper.map_request_field(key).into_owned();
        match value {
            OptionValue::Scalar(text) => elements.push(Element::text(name, text.clone())),
            OptionValue::Bag(inner) => elements.push(Element::parent(name, bag_elements(inner, mapper))),
            OptionValue::List(list) => elements.extend(
                list.iter().map(|inner| Element::parent(name.clone(), bag_elements(inner, mapper))),
            ),
        }
    }
    elements
}

fn entry_element(
    slot: &EntrySpec,
    entry: &OptionBag,
    position: usize,
    mapper: &impl FieldMapper,
) -> Result<Element> {
    match slot.tag {
        EntryTag::Fixed(tag) => {
            Ok(Element::parent(mapper.map_request_field(tag).into_owned(), bag_elements(entry, mapper)))
        }
        EntryTag::ByKey(pairs) => {
            let tag = pairs
                .iter()
                .find(|(key, _)| entry.get_present(key).is_some())
                .map(|(_, tag)| *tag)
                .ok_or_else(|| {
                    let keys: Vec<&str> = pairs.iter().map(|(key, _)| *key).collect();
                    entry_error(slot, position, &format!("needs one of {}", quoted(&keys)))
                })?;
            Ok(Element::parent(mapper.map_request_field(tag).into_owned(), bag_elements(entry, mapper)))
        }
        EntryTag::KeyName => {
            let mut iter = entry.iter();
            match (iter.next(), iter.next()) {
                (Some((key, OptionValue::Bag(inner))), None) => Ok(Element::parent(
                    mapper.map_request_field(key).into_owned(),
                    bag_elements(inner, mapper),
                )),
                (Some((key, _)), None) => {
                    Err(entry_error(slot, position, &format!("'{key}' must be a table")))
                }
                _ => Err(entry_error(
                    slot,
                    position,
                    &format!("must hold exactly one of {}", quoted(slot.fields)),
                )),
            }
        }
    }
}

fn check_entry(
    slot: &EntrySpec,
    entry: &OptionBag,
    position: usize,
    options: &ValidatedOptions,
) -> Result<()> {
    if entry.is_empty() {
        return Err(entry_error(slot, position, "is empty"));
    }
    let unknown: Vec<&str> = entry.keys().filter(|k| !slot.fields.contains(k)).collect();
    if !slot.fields.is_empty() && !unknown.is_empty() {
        return Err(entry_error(slot, position, &format!("unknown key(s) {}", quoted(&unknown))));
    }

    match slot.rule {
        EntryRule::Any => Ok(()),
        EntryRule::AnyOfEach(groups) => {
            for group in groups {
                if !any_present(entry, group) {
                    return Err(entry_error(slot, position, &format!("needs one of {}", quoted(group))));
                }
            }
            Ok(())
        }
        EntryRule::InstallTarget => check_install_target(slot, entry, position, options),
    }
}

fn check_install_target(
    slot: &EntrySpec,
    entry: &OptionBag,
    position: usize,
    options: &ValidatedOptions,
) -> Result<()> {
    if any_present(entry, &["grp.oid", "grp.name"]) {
        return Ok(());
    }
    if entry.has("grp") {
        return Err(entry_error(slot, position, "group target needs 'oid' or 'name'"));
    }
    if !any_present(entry, &["dev.oid", "dev.name"]) {
        return Err(entry_error(slot, position, "device target needs 'oid' or 'name'"));
    }
    if entry.get_path("dev.vdom").is_some_and(OptionValue::is_present) {
        if !any_present(entry, &["dev.vdom.oid", "dev.vdom.name"]) {
            return Err(entry_error(slot, position, "vdom needs 'oid' or 'name'"));
        }
        return Ok(());
    }
    if options.flag("fg_is_not_vdom_mode") == Some("1") {
        Ok(())
    } else {
        Err(entry_error(
            slot,
            position,
            "device target needs a 'vdom' unless 'fg_is_not_vdom_mode' is 1",
        ))
    }
}

fn any_present(entry: &OptionBag, paths: &[&str]) -> bool {
    paths.iter().any(|path| entry.get_path(path).is_some_and(OptionValue::is_present))
}

fn entry_error(slot: &EntrySpec, position: usize, detail: &str) -> FmgError {
    FmgError::Validation(format!("entry {position} of '{}' {detail}", slot.key))
}

fn quoted(keys: &[&str]) -> String {
    keys.iter().map(|k| format!("'{k}'")).collect::<Vec<_>>().join(", ")
}

//! Property enumeration over dynamic values.
//!
//! Maps, sequences and user objects all expose a flat `name -> value` view:
//! maps by key, sequences by stringified index, objects through their own
//! [`PropertyEnumerable`] implementation. Scalars have no properties.
//! Name lookups are case-sensitive.

use crate::value::{AnyValue, effective_value};

/// Capability to list an object's properties in a stable order.
pub trait PropertyEnumerable {
    fn properties_of(&self) -> Vec<(String, AnyValue)>;
}

impl PropertyEnumerable for [AnyValue] {
    fn properties_of(&self) -> Vec<(String, AnyValue)> {
        self.iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item.clone()))
            .collect()
    }
}

impl PropertyEnumerable for [(String, AnyValue)] {
    fn properties_of(&self) -> Vec<(String, AnyValue)> {
        self.to_vec()
    }
}

impl PropertyEnumerable for AnyValue {
    fn properties_of(&self) -> Vec<(String, AnyValue)> {
        get_properties(self).unwrap_or_default()
    }
}

/// Whether the value (after unwrapping) exposes properties at all.
#[must_use]
pub fn is_enumerable(value: &AnyValue) -> bool {
    matches!(
        effective_value(value).as_ref(),
        AnyValue::Array(_) | AnyValue::Map(_) | AnyValue::Object(_)
    )
}

/// Properties of a value, or `None` when the value is a scalar or null.
#[must_use]
pub fn get_properties(value: &AnyValue) -> Option<Vec<(String, AnyValue)>> {
    match effective_value(value).as_ref() {
        AnyValue::Array(items) => Some(items.properties_of()),
        AnyValue::Map(entries) => Some(entries.properties_of()),
        AnyValue::Object(object) => Some(object.properties_of()),
        _ => None,
    }
}

#[must_use]
pub fn get_property_names(value: &AnyValue) -> Vec<String> {
    get_properties(value)
        .unwrap_or_default()
        .into_iter()
        .map(|(name, _)| name)
        .collect()
}

/// Look up a single property by exact name.
#[must_use]
pub fn get_property(value: &AnyValue, name: &str) -> Option<AnyValue> {
    match effective_value(value).as_ref() {
        AnyValue::Array(items) => name
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index).cloned()),
        AnyValue::Map(entries) => entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, v)| v.clone()),
        AnyValue::Object(object) => object
            .properties_of()
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, v)| v),
        _ => None,
    }
}

#[must_use]
pub fn has_property(value: &AnyValue, name: &str) -> bool {
    get_property(value, name).is_some()
}

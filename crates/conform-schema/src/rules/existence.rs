//! Existence rules over a group of properties.

use conform_core::{AnyValue, effective_value, reader};

use super::ValidationRule;
use crate::result::{ValidationResult, codes, display_name};
use crate::schema::Schema;

/// Names from `properties` that are present on `value` with a non-null value.
fn present<'a>(value: &AnyValue, properties: &'a [String]) -> Vec<&'a str> {
    properties
        .iter()
        .filter(|name| {
            reader::get_property(value, name).is_some_and(|v| !effective_value(&v).is_null())
        })
        .map(String::as_str)
        .collect()
}

fn names_json(names: &[impl AsRef<str>]) -> serde_json::Value {
    serde_json::Value::Array(
        names
            .iter()
            .map(|n| serde_json::Value::String(n.as_ref().to_string()))
            .collect(),
    )
}

/// Exactly one of the listed properties must be set.
#[derive(Debug, Clone)]
pub struct OnlyOneExistsRule {
    properties: Vec<String>,
}

impl OnlyOneExistsRule {
    pub fn new<S: Into<String>>(properties: impl IntoIterator<Item = S>) -> Self {
        Self {
            properties: properties.into_iter().map(Into::into).collect(),
        }
    }
}

impl ValidationRule for OnlyOneExistsRule {
    fn apply(
        &self,
        path: &str,
        _schema: &dyn Schema,
        value: &AnyValue,
        results: &mut Vec<ValidationResult>,
    ) {
        let found = present(value, &self.properties);
        let listed = self.properties.join(", ");
        let name = display_name(path);

        let failure = match found.len() {
            1 => return,
            0 => ValidationResult::error(
                path,
                codes::VALUE_NULL,
                format!("{name} must have at least one property from {listed}"),
            ),
            _ => ValidationResult::error(
                path,
                codes::VALUE_ONLY_ONE,
                format!("{name} must have only one property from {listed}"),
            ),
        };
        results.push(
            failure
                .with_expected(names_json(&self.properties))
                .with_actual(names_json(&found)),
        );
    }
}

/// At least one of the listed properties must be set.
#[derive(Debug, Clone)]
pub struct AtLeastOneExistsRule {
    properties: Vec<String>,
}

impl AtLeastOneExistsRule {
    pub fn new<S: Into<String>>(properties: impl IntoIterator<Item = S>) -> Self {
        Self {
            properties: properties.into_iter().map(Into::into).collect(),
        }
    }
}

impl ValidationRule for AtLeastOneExistsRule {
    fn apply(
        &self,
        path: &str,
        _schema: &dyn Schema,
        value: &AnyValue,
        results: &mut Vec<ValidationResult>,
    ) {
        if !present(value, &self.properties).is_empty() {
            return;
        }
        results.push(
            ValidationResult::error(
                path,
                codes::VALUE_NULL,
                format!(
                    "{} must have at least one property from {}",
                    display_name(path),
                    self.properties.join(", ")
                ),
            )
            .with_expected(names_json(&self.properties)),
        );
    }
}

//! Array and map schemas.

use conform_core::{AnyValue, TypeCode, effective_value, reader};

use crate::result::{ValidationResult, child_path, codes, display_name};
use crate::schema::{Schema, SchemaCore, perform_type_validation, schema_builder_methods};
use crate::type_ref::TypeRef;

fn shape_mismatch(
    path: &str,
    expected: &str,
    actual: TypeCode,
    results: &mut Vec<ValidationResult>,
) {
    results.push(
        ValidationResult::error(
            path,
            codes::TYPE_MISMATCH,
            format!(
                "Expected {} to have type {expected} but found {actual}",
                display_name(path)
            ),
        )
        .with_expected(expected)
        .with_actual(actual.as_str()),
    );
}

// ---------------------------------------------------------------------------
// ArraySchema
// ---------------------------------------------------------------------------

/// A sequence whose elements all have the declared type.
///
/// Element `i` is validated at `path.i`.
#[derive(Debug, Clone, Default)]
pub struct ArraySchema {
    core: SchemaCore,
    value_type: Option<TypeRef>,
}

impl ArraySchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value_type(mut self, value_type: impl Into<TypeRef>) -> Self {
        self.value_type = Some(value_type.into());
        self
    }

    #[must_use]
    pub const fn value_type(&self) -> Option<&TypeRef> {
        self.value_type.as_ref()
    }
}

schema_builder_methods!(ArraySchema);

impl Schema for ArraySchema {
    fn core(&self) -> &SchemaCore {
        &self.core
    }

    fn perform_validation(
        &self,
        path: &str,
        value: &AnyValue,
        results: &mut Vec<ValidationResult>,
    ) {
        self.core.perform_validation(self, path, value, results);

        let value = effective_value(value);
        match value.as_ref() {
            AnyValue::Null => {}
            AnyValue::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    let item_path = child_path(path, &index.to_string());
                    perform_type_validation(&item_path, self.value_type.as_ref(), item, results);
                }
            }
            other => shape_mismatch(path, "array", other.type_code(), results),
        }
    }
}

// ---------------------------------------------------------------------------
// MapSchema
// ---------------------------------------------------------------------------

/// A key/value collection with declared key and value types.
///
/// Maps and objects are both accepted; the entry under key `k` is validated
/// at `path.k`.
#[derive(Debug, Clone, Default)]
pub struct MapSchema {
    core: SchemaCore,
    key_type: Option<TypeRef>,
    value_type: Option<TypeRef>,
}

impl MapSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_key_type(mut self, key_type: impl Into<TypeRef>) -> Self {
        self.key_type = Some(key_type.into());
        self
    }

    #[must_use]
    pub fn with_value_type(mut self, value_type: impl Into<TypeRef>) -> Self {
        self.value_type = Some(value_type.into());
        self
    }

    #[must_use]
    pub const fn key_type(&self) -> Option<&TypeRef> {
        self.key_type.as_ref()
    }

    #[must_use]
    pub const fn value_type(&self) -> Option<&TypeRef> {
        self.value_type.as_ref()
    }
}

schema_builder_methods!(MapSchema);

impl Schema for MapSchema {
    fn core(&self) -> &SchemaCore {
        &self.core
    }

    fn perform_validation(
        &self,
        path: &str,
        value: &AnyValue,
        results: &mut Vec<ValidationResult>,
    ) {
        self.core.perform_validation(self, path, value, results);

        let value = effective_value(value);
        match value.as_ref() {
            AnyValue::Null => {}
            AnyValue::Map(_) | AnyValue::Object(_) => {
                for (key, entry) in reader::get_properties(&value).unwrap_or_default() {
                    let entry_path = child_path(path, &key);
                    perform_type_validation(
                        &entry_path,
                        self.key_type.as_ref(),
                        &AnyValue::String(key),
                        results,
                    );
                    perform_type_validation(&entry_path, self.value_type.as_ref(), &entry, results);
                }
            }
            other => shape_mismatch(path, "map", other.type_code(), results),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::ObjectSchema;
    use conform_core::Record;
    use pretty_assertions::assert_eq;

    fn paths(results: &[ValidationResult]) -> Vec<&str> {
        results.iter().map(ValidationResult::path).collect()
    }

    #[test]
    fn array_elements_are_typed() {
        let schema = ArraySchema::new().with_value_type(TypeCode::String);
        assert!(schema.validate(&AnyValue::from(vec!["a", "b"])).is_empty());

        let mixed = AnyValue::Array(vec![
            AnyValue::from("a"),
            AnyValue::from(1),
            AnyValue::Null,
            AnyValue::from(true),
        ]);
        let results = schema.validate(&mixed);
        assert_eq!(paths(&results), vec!["1", "3"]);
        assert_eq!(results[0].message(), "Expected 1 to have type string but found integer");
    }

    #[test]
    fn array_rejects_non_sequences() {
        let results = ArraySchema::new().validate(&AnyValue::from("abc"));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].code(), codes::TYPE_MISMATCH);
        assert_eq!(results[0].expected(), Some(&serde_json::json!("array")));
        assert_eq!(results[0].actual(), Some(&serde_json::json!("string")));
    }

    #[test]
    fn array_of_schemas_nests_paths() {
        let item = ObjectSchema::new().with_required_property("id", TypeCode::Integer, []);
        let schema = ArraySchema::new().with_value_type(TypeRef::schema(item));
        let value = AnyValue::Array(vec![
            AnyValue::map([("id", 1)]),
            AnyValue::map([("id", "x")]),
        ]);
        let mut results = Vec::new();
        schema.perform_validation("items", &value, &mut results);
        assert_eq!(paths(&results), vec!["items.1.id"]);
    }

    #[test]
    fn required_array_reports_null() {
        let results = ArraySchema::new().make_required().validate(&AnyValue::Null);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].code(), codes::VALUE_IS_NULL);
    }

    #[test]
    fn map_checks_keys_and_values() {
        let schema = MapSchema::new()
            .with_key_type(TypeCode::String)
            .with_value_type(TypeCode::Long);
        assert!(schema.validate(&AnyValue::map([("a", 1), ("b", 2)])).is_empty());

        let results = schema.validate(&AnyValue::map([
            ("a", AnyValue::from(1)),
            ("b", AnyValue::from("two")),
        ]));
        assert_eq!(paths(&results), vec!["b"]);
    }

    #[test]
    fn map_accepts_objects() {
        let schema = MapSchema::new().with_value_type(TypeCode::String);
        let record = Record::new("Tags").with_field("env", "prod").with_field("tier", 2);
        let results = schema.validate(&AnyValue::object(record));
        assert_eq!(paths(&results), vec!["tier"]);
    }

    #[test]
    fn map_rejects_sequences() {
        let results = MapSchema::new().validate(&AnyValue::from(vec![1]));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].expected(), Some(&serde_json::json!("map")));
    }
}

//! Object schema: a fixed set of named properties.

use conform_core::{AnyValue, effective_value, reader};

use crate::property::PropertySchema;
use crate::result::{ValidationResult, child_path, codes, display_name};
use crate::schema::{RuleRef, Schema, SchemaCore, schema_builder_methods};
use crate::type_ref::TypeRef;

/// Validates the shape of an object, map or record.
///
/// Every declared property is validated, whether present or not; a missing
/// property is validated as null. Properties the value has but the schema
/// does not declare are reported as `UNEXPECTED_PROPERTY` warnings unless
/// [`allow_undefined`](Self::allow_undefined) is set. Property names are
/// matched case-sensitively.
///
/// A hand-built `AnyValue::Map` may repeat a key. The first entry with a
/// declared name is validated against that property and later entries with
/// the same name are reported as unexpected.
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    core: SchemaCore,
    properties: Vec<PropertySchema>,
    allow_undefined: bool,
}

impl ObjectSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_property(mut self, property: PropertySchema) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn with_required_property(
        self,
        name: impl Into<String>,
        value_type: impl Into<TypeRef>,
        rules: impl IntoIterator<Item = RuleRef>,
    ) -> Self {
        self.with_property(
            PropertySchema::new(name)
                .with_type(value_type)
                .make_required()
                .with_rules(rules),
        )
    }

    #[must_use]
    pub fn with_optional_property(
        self,
        name: impl Into<String>,
        value_type: impl Into<TypeRef>,
        rules: impl IntoIterator<Item = RuleRef>,
    ) -> Self {
        self.with_property(
            PropertySchema::new(name)
                .with_type(value_type)
                .make_optional()
                .with_rules(rules),
        )
    }

    /// Whether undeclared properties are tolerated silently.
    #[must_use]
    pub fn allow_undefined(mut self, allow: bool) -> Self {
        self.allow_undefined = allow;
        self
    }

    #[must_use]
    pub fn properties(&self) -> &[PropertySchema] {
        &self.properties
    }

    #[must_use]
    pub const fn is_undefined_allowed(&self) -> bool {
        self.allow_undefined
    }
}

schema_builder_methods!(ObjectSchema);

impl Schema for ObjectSchema {
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
        if value.is_null() {
            return;
        }

        let Some(mut remaining) = reader::get_properties(&value) else {
            let actual = value.type_code();
            results.push(
                ValidationResult::error(
                    path,
                    codes::TYPE_MISMATCH,
                    format!(
                        "Expected {} to have type object but found {actual}",
                        display_name(path)
                    ),
                )
                .with_expected("object")
                .with_actual(actual.as_str()),
            );
            return;
        };

        for property in &self.properties {
            let found = remaining
                .iter()
                .position(|(key, _)| key == property.name())
                .map(|index| remaining.remove(index).1);
            property.perform_validation(path, &found.unwrap_or_default(), results);
        }

        if self.allow_undefined {
            return;
        }
        for (key, _) in remaining {
            let key_path = child_path(path, &key);
            results.push(ValidationResult::warning(
                &key_path,
                codes::UNEXPECTED_PROPERTY,
                format!("{} contains unexpected property {key}", display_name(path)),
            ));
        }
    }
}

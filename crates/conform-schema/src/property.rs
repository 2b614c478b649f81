//! Schema for one named property of an object.

use conform_core::AnyValue;

use crate::result::{ValidationResult, child_path};
use crate::schema::{Schema, SchemaCore, perform_type_validation, schema_builder_methods};
use crate::type_ref::TypeRef;

/// A named property with an optional declared type.
///
/// The property validates its value at `parent.name`. Its type may be a
/// nested schema, in which case that schema validates the value in place of
/// a type check.
#[derive(Debug, Clone)]
pub struct PropertySchema {
    core: SchemaCore,
    name: String,
    value_type: Option<TypeRef>,
}

impl PropertySchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: SchemaCore::default(),
            name: name.into(),
            value_type: None,
        }
    }

    #[must_use]
    pub fn with_type(mut self, value_type: impl Into<TypeRef>) -> Self {
        self.value_type = Some(value_type.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn value_type(&self) -> Option<&TypeRef> {
        self.value_type.as_ref()
    }
}

schema_builder_methods!(PropertySchema);

impl Schema for PropertySchema {
    fn core(&self) -> &SchemaCore {
        &self.core
    }

    fn perform_validation(
        &self,
        path: &str,
        value: &AnyValue,
        results: &mut Vec<ValidationResult>,
    ) {
        let path = child_path(path, &self.name);
        self.core.perform_validation(self, &path, value, results);
        perform_type_validation(&path, self.value_type.as_ref(), value, results);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::codes;
    use crate::rules::IncludedRule;
    use conform_core::TypeCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn path_is_parent_plus_name() {
        let schema = PropertySchema::new("id").make_required();
        let mut results = Vec::new();
        schema.perform_validation("owner", &AnyValue::Null, &mut results);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path(), "owner.id");
        assert_eq!(results[0].message(), "owner.id must not be null");
    }

    #[test]
    fn type_is_checked_after_rules() {
        let schema = PropertySchema::new("code")
            .with_type(TypeCode::String)
            .with_rule(IncludedRule::new(["AAA"]));
        let codes_seen: Vec<String> = schema
            .validate(&AnyValue::from(5))
            .iter()
            .map(|r| r.code().to_string())
            .collect();
        assert_eq!(
            codes_seen,
            vec![codes::VALUE_NOT_INCLUDED, codes::TYPE_MISMATCH]
        );
    }

    #[test]
    fn untyped_property_accepts_anything() {
        let schema = PropertySchema::new("any");
        assert!(schema.validate(&AnyValue::from(vec![1, 2])).is_empty());
        assert!(schema.value_type().is_none());
    }

    #[test]
    fn rename_keeps_type() {
        let schema = PropertySchema::new("a")
            .with_type(TypeCode::Long)
            .with_name("b");
        assert_eq!(schema.name(), "b");
        assert!(schema.value_type().is_some());
    }
}

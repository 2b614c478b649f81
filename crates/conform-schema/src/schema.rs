//! Schema base: required flag, rules, and the shared validation steps.
//!
//! Every schema kind owns a [`SchemaCore`] and implements [`Schema`]. The
//! core handles the two steps all schemas share: the null check and running
//! rules. Kind-specific checks (property types, element types, object shape)
//! happen after that in each kind's `perform_validation`.

use conform_core::{AnyValue, effective_value};
use std::fmt;
use std::sync::Arc;

use crate::exception::ValidationException;
use crate::matcher;
use crate::result::{ValidationResult, codes, display_name};
use crate::rules::ValidationRule;
use crate::type_ref::TypeRef;

/// Shared handle to a validation rule.
pub type RuleRef = Arc<dyn ValidationRule>;

/// A validator for one value.
///
/// Schemas are built with owned fluent calls and are read-only afterwards,
/// so one schema can validate many values, from many threads.
pub trait Schema: fmt::Debug + Send + Sync {
    fn core(&self) -> &SchemaCore;

    /// Validate `value` located at `path`, appending diagnostics to `results`.
    fn perform_validation(&self, path: &str, value: &AnyValue, results: &mut Vec<ValidationResult>);

    fn is_required(&self) -> bool {
        self.core().is_required()
    }

    fn rules(&self) -> &[RuleRef] {
        self.core().rules()
    }

    /// Validate a root value and return every diagnostic found.
    fn validate(&self, value: &AnyValue) -> Vec<ValidationResult> {
        let mut results = Vec::new();
        self.perform_validation("", value, &mut results);
        tracing::trace!(results = results.len(), "validated value");
        results
    }

    /// Validate and convert failures into an exception, if there are any.
    fn validate_and_return_exception(
        &self,
        correlation_id: Option<&str>,
        value: &AnyValue,
        strict: bool,
    ) -> Option<ValidationException> {
        ValidationException::from_results(correlation_id, &self.validate(value), strict)
    }

    /// Validate and return `Err` when there are failures.
    ///
    /// # Errors
    ///
    /// Returns the `ValidationException` built from the results when they
    /// contain errors, or warnings in strict mode.
    fn validate_and_throw_exception(
        &self,
        correlation_id: Option<&str>,
        value: &AnyValue,
        strict: bool,
    ) -> Result<(), ValidationException> {
        ValidationException::throw_exception_if_needed(
            correlation_id,
            &self.validate(value),
            strict,
        )
    }
}

/// State shared by all schema kinds.
#[derive(Debug, Clone, Default)]
pub struct SchemaCore {
    required: bool,
    rules: Vec<RuleRef>,
}

impl SchemaCore {
    #[must_use]
    pub const fn new(required: bool, rules: Vec<RuleRef>) -> Self {
        Self { required, rules }
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn rules(&self) -> &[RuleRef] {
        &self.rules
    }

    pub const fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub fn push_rule(&mut self, rule: RuleRef) {
        self.rules.push(rule);
    }

    /// Null check, then every rule in order. Rules see the unwrapped value.
    pub fn perform_validation(
        &self,
        schema: &dyn Schema,
        path: &str,
        value: &AnyValue,
        results: &mut Vec<ValidationResult>,
    ) {
        let value = effective_value(value);
        if value.is_null() {
            if self.required {
                results.push(ValidationResult::error(
                    path,
                    codes::VALUE_IS_NULL,
                    format!("{} must not be null", display_name(path)),
                ));
            }
            return;
        }

        for rule in &self.rules {
            rule.apply(path, schema, &value, results);
        }
    }
}

/// Check `value` against a declared type.
///
/// No declaration means no constraint. A nested schema takes over validation
/// entirely. Null is never a type error here; required-ness is checked by the
/// owning schema.
pub fn perform_type_validation(
    path: &str,
    declared: Option<&TypeRef>,
    value: &AnyValue,
    results: &mut Vec<ValidationResult>,
) {
    let Some(declared) = declared else {
        return;
    };

    if let TypeRef::Schema(schema) = declared {
        schema.perform_validation(path, value, results);
        return;
    }

    let value = effective_value(value);
    if value.is_null() {
        return;
    }

    let actual = value.type_code();
    if !matcher::match_type(declared, actual, &value) {
        results.push(
            ValidationResult::error(
                path,
                codes::TYPE_MISMATCH,
                format!(
                    "Expected {} to have type {declared} but found {actual}",
                    display_name(path)
                ),
            )
            .with_expected(declared.to_json())
            .with_actual(actual.as_str()),
        );
    }
}

/// Builder methods shared by every schema kind; expects a `core` field.
macro_rules! schema_builder_methods {
    ($ty:ty) => {
        impl $ty {
            /// Report `VALUE_IS_NULL` for null values.
            #[must_use]
            pub fn make_required(mut self) -> Self {
                self.core.set_required(true);
                self
            }

            /// Let null values pass.
            #[must_use]
            pub fn make_optional(mut self) -> Self {
                self.core.set_required(false);
                self
            }

            #[must_use]
            pub fn with_rule(
                mut self,
                rule: impl $crate::rules::ValidationRule + 'static,
            ) -> Self {
                self.core.push_rule(::std::sync::Arc::new(rule));
                self
            }

            #[must_use]
            pub fn with_rules(
                mut self,
                rules: impl IntoIterator<Item = $crate::schema::RuleRef>,
            ) -> Self {
                for rule in rules {
                    self.core.push_rule(rule);
                }
                self
            }
        }
    };
}

pub(crate) use schema_builder_methods;

/// A schema for a single value with no structural expectations.
#[derive(Debug, Clone, Default)]
pub struct ValueSchema {
    core: SchemaCore,
}

impl ValueSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

schema_builder_methods!(ValueSchema);

impl Schema for ValueSchema {
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
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{FnRule, IncludedRule};
    use conform_core::{TypeCode, ValueWrapper};
    use pretty_assertions::assert_eq;

    #[test]
    fn optional_schema_accepts_null() {
        assert!(ValueSchema::new().validate(&AnyValue::Null).is_empty());
    }

    #[test]
    fn required_schema_reports_null_once() {
        let results = ValueSchema::new().make_required().validate(&AnyValue::Null);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].code(), codes::VALUE_IS_NULL);
        assert_eq!(results[0].message(), "value must not be null");
        assert!(results[0].is_error());
    }

    #[test]
    fn wrapped_null_counts_as_null() {
        let wrapped = AnyValue::object(ValueWrapper::new(AnyValue::Null));
        let results = ValueSchema::new().make_required().validate(&wrapped);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn make_optional_undoes_required() {
        let schema = ValueSchema::new().make_required().make_optional();
        assert!(!schema.is_required());
        assert!(schema.validate(&AnyValue::Null).is_empty());
    }

    #[test]
    fn rules_are_skipped_for_null() {
        let schema = ValueSchema::new().with_rule(IncludedRule::new(["AAA"]));
        assert!(schema.validate(&AnyValue::Null).is_empty());
    }

    #[test]
    fn all_rules_run_in_order() {
        let schema = ValueSchema::new()
            .with_rule(FnRule::new("first", |path, _schema, _value, results| {
                results.push(ValidationResult::error(path, "FIRST", "first"));
            }))
            .with_rule(FnRule::new("second", |path, _schema, _value, results| {
                results.push(ValidationResult::warning(path, "SECOND", "second"));
            }));
        let seen: Vec<String> = schema
            .validate(&AnyValue::from(1))
            .iter()
            .map(|r| r.code().to_string())
            .collect();
        assert_eq!(seen, vec!["FIRST", "SECOND"]);
        assert_eq!(schema.rules().len(), 2);
    }

    #[test]
    fn rules_receive_unwrapped_value() {
        let schema = ValueSchema::new().with_rule(IncludedRule::new(["AAA"]));
        let wrapped = AnyValue::object(ValueWrapper::new("AAA"));
        assert!(schema.validate(&wrapped).is_empty());
    }

    #[test]
    fn type_validation_without_declaration_is_noop() {
        let mut results = Vec::new();
        perform_type_validation("x", None, &AnyValue::from(1), &mut results);
        assert!(results.is_empty());
    }

    #[test]
    fn type_validation_ignores_null() {
        let mut results = Vec::new();
        let declared = TypeRef::from(TypeCode::String);
        perform_type_validation("x", Some(&declared), &AnyValue::Null, &mut results);
        assert!(results.is_empty());
    }

    #[test]
    fn type_mismatch_names_both_types() {
        let mut results = Vec::new();
        let declared = TypeRef::from(TypeCode::String);
        perform_type_validation("id", Some(&declared), &AnyValue::from(1), &mut results);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].code(), codes::TYPE_MISMATCH);
        assert_eq!(
            results[0].message(),
            "Expected id to have type string but found integer"
        );
        assert_eq!(results[0].expected(), Some(&serde_json::json!("string")));
        assert_eq!(results[0].actual(), Some(&serde_json::json!("integer")));
    }

    #[test]
    fn nested_schema_takes_over() {
        let mut results = Vec::new();
        let declared = TypeRef::schema(ValueSchema::new().make_required());
        perform_type_validation("child", Some(&declared), &AnyValue::Null, &mut results);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path(), "child");
        assert_eq!(results[0].code(), codes::VALUE_IS_NULL);
    }
}

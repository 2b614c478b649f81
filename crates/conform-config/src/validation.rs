//! Raise-boundary configuration.

use conform_core::AnyValue;
use conform_schema::{Schema, ValidationException, ValidationResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// Treat warnings as failures when raising.
    #[serde(default)]
    pub strict: bool,
}

impl ValidationConfig {
    /// Exception for `results` under the configured strictness, if any.
    #[must_use]
    pub fn exception_for(
        &self,
        correlation_id: Option<&str>,
        results: &[ValidationResult],
    ) -> Option<ValidationException> {
        ValidationException::from_results(correlation_id, results, self.strict)
    }

    /// # Errors
    ///
    /// Returns the exception when `results` fail under the configured strictness.
    pub fn raise(
        &self,
        correlation_id: Option<&str>,
        results: &[ValidationResult],
    ) -> Result<(), ValidationException> {
        ValidationException::throw_exception_if_needed(correlation_id, results, self.strict)
    }

    /// Validate `value` with `schema` and raise under the configured strictness.
    ///
    /// # Errors
    ///
    /// Returns the exception when validation fails.
    pub fn check(
        &self,
        schema: &dyn Schema,
        correlation_id: Option<&str>,
        value: &AnyValue,
    ) -> Result<(), ValidationException> {
        schema.validate_and_throw_exception(correlation_id, value, self.strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conform_core::TypeCode;
    use conform_schema::ObjectSchema;
    use pretty_assertions::assert_eq;

    fn warnings_only() -> Vec<ValidationResult> {
        vec![ValidationResult::warning(
            "x",
            "UNEXPECTED_PROPERTY",
            "value contains unexpected property x",
        )]
    }

    #[test]
    fn lenient_by_default() {
        let config = ValidationConfig::default();
        assert!(!config.strict);
        assert!(config.exception_for(None, &warnings_only()).is_none());
        assert!(config.raise(None, &warnings_only()).is_ok());
    }

    #[test]
    fn strict_raises_on_warnings() {
        let config = ValidationConfig { strict: true };
        let exception = config.raise(Some("req-1"), &warnings_only()).unwrap_err();
        assert_eq!(exception.correlation_id(), Some("req-1"));
        assert_eq!(exception.warnings().count(), 1);
    }

    #[test]
    fn check_validates_then_raises() {
        let schema = ObjectSchema::new().with_required_property("id", TypeCode::String, []);
        let lenient = ValidationConfig::default();
        let strict = ValidationConfig { strict: true };
        let value = AnyValue::map([("id", "1"), ("extra", "x")]);

        assert!(lenient.check(&schema, None, &value).is_ok());
        assert!(strict.check(&schema, None, &value).is_err());
    }
}

//! Comparison rules: against a constant, or between two properties.

use conform_core::compare::{self, CompareOperator, compile_pattern};
use conform_core::{AnyValue, CoreError, RecursiveObjectReader};
use regex::Regex;

use super::ValidationRule;
use crate::result::{ValidationResult, codes, display_name};
use crate::schema::Schema;

/// Compares the value with a constant, e.g. `GE 0` or `LIKE ^[A-Z]+$`.
#[derive(Debug, Clone)]
pub struct ValueComparisonRule {
    operator: CompareOperator,
    value: AnyValue,
    pattern: Option<Regex>,
}

impl ValueComparisonRule {
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPattern` when `operator` is `LIKE` and
    /// `value` has no text form or is not a valid regular expression.
    pub fn new(operator: CompareOperator, value: impl Into<AnyValue>) -> Result<Self, CoreError> {
        let value = value.into();
        let pattern = if operator == CompareOperator::Like {
            let text = value.to_text().ok_or_else(|| CoreError::InvalidPattern {
                pattern: value.to_json().to_string(),
                reason: format!("a {} value has no text form", value.type_code()),
            })?;
            Some(compile_pattern(&text)?)
        } else {
            None
        };
        Ok(Self {
            operator,
            value,
            pattern,
        })
    }

    /// Parse the operator from text such as `">="` or `"LIKE"`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidOperator` for an unknown operator, or
    /// `CoreError::InvalidPattern` for a bad `LIKE` pattern.
    pub fn parse(operator: &str, value: impl Into<AnyValue>) -> Result<Self, CoreError> {
        Self::new(operator.parse::<CompareOperator>()?, value)
    }

    #[must_use]
    pub const fn operator(&self) -> CompareOperator {
        self.operator
    }
}

impl ValidationRule for ValueComparisonRule {
    fn apply(
        &self,
        path: &str,
        _schema: &dyn Schema,
        value: &AnyValue,
        results: &mut Vec<ValidationResult>,
    ) {
        let passed = match &self.pattern {
            Some(pattern) => compare::matches(value, pattern),
            None => compare::compare(value, self.operator, &self.value),
        };
        if passed {
            return;
        }
        results.push(
            ValidationResult::error(
                path,
                codes::BAD_VALUE,
                format!(
                    "{} must {} {} but found {}",
                    display_name(path),
                    self.operator,
                    self.value.to_text().unwrap_or_else(|| "null".into()),
                    value.to_text().unwrap_or_else(|| "null".into()),
                ),
            )
            .with_expected(self.value.to_json())
            .with_actual(value.to_json()),
        );
    }
}

/// Compares two properties of the value, e.g. `start LE end`.
///
/// Property names may be dotted paths into nested values.
#[derive(Debug, Clone)]
pub struct PropertiesComparisonRule {
    property1: String,
    operator: CompareOperator,
    property2: String,
}

impl PropertiesComparisonRule {
    pub fn new(
        property1: impl Into<String>,
        operator: CompareOperator,
        property2: impl Into<String>,
    ) -> Self {
        Self {
            property1: property1.into(),
            operator,
            property2: property2.into(),
        }
    }
}

impl ValidationRule for PropertiesComparisonRule {
    fn apply(
        &self,
        path: &str,
        _schema: &dyn Schema,
        value: &AnyValue,
        results: &mut Vec<ValidationResult>,
    ) {
        let reader = RecursiveObjectReader::default();
        let left = reader.get_property(value, &self.property1).unwrap_or_default();
        let right = reader.get_property(value, &self.property2).unwrap_or_default();

        if compare::compare(&left, self.operator, &right) {
            return;
        }
        results.push(
            ValidationResult::error(
                path,
                codes::PROPERTIES_NOT_MATCH,
                format!(
                    "Property {} is expected to {} property {}",
                    self.property1, self.operator, self.property2
                ),
            )
            .with_expected(self.operator.as_str())
            .with_actual(serde_json::json!([left.to_json(), right.to_json()])),
        );
    }
}

//! Membership rules: the value must (not) be one of a fixed set.

use conform_core::AnyValue;
use conform_core::compare::are_equal;

use super::{ValidationRule, describe_values};
use crate::result::{ValidationResult, codes, display_name};
use crate::schema::Schema;

fn values_json(values: &[AnyValue]) -> serde_json::Value {
    serde_json::Value::Array(values.iter().map(AnyValue::to_json).collect())
}

/// Passes when the value equals at least one of the allowed values.
#[derive(Debug, Clone)]
pub struct IncludedRule {
    values: Vec<AnyValue>,
}

impl IncludedRule {
    pub fn new<V: Into<AnyValue>>(values: impl IntoIterator<Item = V>) -> Self {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn values(&self) -> &[AnyValue] {
        &self.values
    }
}

impl ValidationRule for IncludedRule {
    fn apply(
        &self,
        path: &str,
        _schema: &dyn Schema,
        value: &AnyValue,
        results: &mut Vec<ValidationResult>,
    ) {
        if self.values.iter().any(|allowed| are_equal(value, allowed)) {
            return;
        }
        results.push(
            ValidationResult::error(
                path,
                codes::VALUE_NOT_INCLUDED,
                format!(
                    "{} must be one of {}",
                    display_name(path),
                    describe_values(&self.values)
                ),
            )
            .with_expected(values_json(&self.values))
            .with_actual(value.to_json()),
        );
    }
}

/// Passes when the value equals none of the forbidden values.
#[derive(Debug, Clone)]
pub struct ExcludedRule {
    values: Vec<AnyValue>,
}

impl ExcludedRule {
    pub fn new<V: Into<AnyValue>>(values: impl IntoIterator<Item = V>) -> Self {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn values(&self) -> &[AnyValue] {
        &self.values
    }
}

impl ValidationRule for ExcludedRule {
    fn apply(
        &self,
        path: &str,
        _schema: &dyn Schema,
        value: &AnyValue,
        results: &mut Vec<ValidationResult>,
    ) {
        if !self.values.iter().any(|forbidden| are_equal(value, forbidden)) {
            return;
        }
        results.push(
            ValidationResult::error(
                path,
                codes::VALUE_NOT_EXCLUDED,
                format!(
                    "{} cannot be one of {}",
                    display_name(path),
                    describe_values(&self.values)
                ),
            )
            .with_expected(values_json(&self.values))
            .with_actual(value.to_json()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ValueSchema;
    use pretty_assertions::assert_eq;

    fn listed() -> Vec<AnyValue> {
        vec![
            AnyValue::from("AAA"),
            AnyValue::from("BBB"),
            AnyValue::from("CCC"),
            AnyValue::Null,
        ]
    }

    fn run(rule: &dyn ValidationRule, value: &AnyValue) -> Vec<ValidationResult> {
        let mut results = Vec::new();
        rule.apply("", &ValueSchema::new(), value, &mut results);
        results
    }

    #[test]
    fn included_accepts_listed_value() {
        let rule = IncludedRule::new(listed());
        assert!(run(&rule, &AnyValue::from("AAA")).is_empty());
    }

    #[test]
    fn included_rejects_unlisted_value() {
        let rule = IncludedRule::new(listed());
        let results = run(&rule, &AnyValue::from("ABC"));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].code(), codes::VALUE_NOT_INCLUDED);
        assert_eq!(results[0].message(), "value must be one of AAA, BBB, CCC, null");
        assert_eq!(
            results[0].expected(),
            Some(&serde_json::json!(["AAA", "BBB", "CCC", null]))
        );
        assert_eq!(results[0].actual(), Some(&serde_json::json!("ABC")));
    }

    #[test]
    fn included_compares_coercively() {
        let rule = IncludedRule::new([1, 2, 3]);
        assert!(run(&rule, &AnyValue::from("2")).is_empty());
        assert!(run(&rule, &AnyValue::from(2_i64)).is_empty());
    }

    #[test]
    fn excluded_rejects_listed_value() {
        let rule = ExcludedRule::new(listed());
        let results = run(&rule, &AnyValue::from("AAA"));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].code(), codes::VALUE_NOT_EXCLUDED);
        assert!(results[0].is_error());
    }

    #[test]
    fn excluded_accepts_unlisted_value() {
        let rule = ExcludedRule::new(listed());
        assert!(run(&rule, &AnyValue::from("ABC")).is_empty());
    }
}

//! Validation rules.
//!
//! A rule is a predicate attached to a schema. It receives the value (already
//! unwrapped and known to be non-null when invoked by a schema) and appends
//! zero or more results. Rules never fail and never short-circuit each other.

mod comparison;
mod existence;
mod logical;
mod membership;

pub use comparison::{PropertiesComparisonRule, ValueComparisonRule};
pub use existence::{AtLeastOneExistsRule, OnlyOneExistsRule};
pub use logical::{AndRule, NotRule, OrRule};
pub use membership::{ExcludedRule, IncludedRule};

use conform_core::AnyValue;
use std::fmt;
use std::sync::Arc;

use crate::result::ValidationResult;
use crate::schema::{RuleRef, Schema};

/// A pluggable check applied by a schema to a candidate value.
pub trait ValidationRule: fmt::Debug + Send + Sync {
    fn apply(
        &self,
        path: &str,
        schema: &dyn Schema,
        value: &AnyValue,
        results: &mut Vec<ValidationResult>,
    );
}

/// Box a rule into a shareable [`RuleRef`].
pub fn rule(rule: impl ValidationRule + 'static) -> RuleRef {
    Arc::new(rule)
}

/// Render values for messages: `AAA, BBB, null`.
pub(crate) fn describe_values(values: &[AnyValue]) -> String {
    values
        .iter()
        .map(|v| v.to_text().unwrap_or_else(|| "null".to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Adapter that turns a closure into a rule.
pub struct FnRule<F> {
    name: String,
    check: F,
}

impl<F> FnRule<F>
where
    F: Fn(&str, &dyn Schema, &AnyValue, &mut Vec<ValidationResult>) + Send + Sync,
{
    pub fn new(name: impl Into<String>, check: F) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

impl<F> fmt::Debug for FnRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule").field("name", &self.name).finish_non_exhaustive()
    }
}

impl<F> ValidationRule for FnRule<F>
where
    F: Fn(&str, &dyn Schema, &AnyValue, &mut Vec<ValidationResult>) + Send + Sync,
{
    fn apply(
        &self,
        path: &str,
        schema: &dyn Schema,
        value: &AnyValue,
        results: &mut Vec<ValidationResult>,
    ) {
        (self.check)(path, schema, value, results);
    }
}

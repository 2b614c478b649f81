//! Rules that combine other rules.

use conform_core::AnyValue;

use super::ValidationRule;
use crate::result::{ValidationResult, codes, display_name};
use crate::schema::{RuleRef, Schema};

/// Every sub-rule must pass; all of their results are kept.
#[derive(Debug, Clone)]
pub struct AndRule {
    rules: Vec<RuleRef>,
}

impl AndRule {
    pub fn new(rules: impl IntoIterator<Item = RuleRef>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }
}

impl ValidationRule for AndRule {
    fn apply(
        &self,
        path: &str,
        schema: &dyn Schema,
        value: &AnyValue,
        results: &mut Vec<ValidationResult>,
    ) {
        for rule in &self.rules {
            rule.apply(path, schema, value, results);
        }
    }
}

/// At least one sub-rule must pass.
///
/// If one passes nothing is reported; otherwise the results of every
/// sub-rule are reported.
#[derive(Debug, Clone)]
pub struct OrRule {
    rules: Vec<RuleRef>,
}

impl OrRule {
    pub fn new(rules: impl IntoIterator<Item = RuleRef>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }
}

impl ValidationRule for OrRule {
    fn apply(
        &self,
        path: &str,
        schema: &dyn Schema,
        value: &AnyValue,
        results: &mut Vec<ValidationResult>,
    ) {
        if self.rules.is_empty() {
            return;
        }

        let mut collected = Vec::new();
        for rule in &self.rules {
            let mut local = Vec::new();
            rule.apply(path, schema, value, &mut local);
            if local.is_empty() {
                return;
            }
            collected.extend(local);
        }
        results.extend(collected);
    }
}

/// Inverts a rule: fails when the inner rule reports nothing.
#[derive(Debug, Clone)]
pub struct NotRule {
    rule: RuleRef,
}

impl NotRule {
    pub const fn new(rule: RuleRef) -> Self {
        Self { rule }
    }
}

impl ValidationRule for NotRule {
    fn apply(
        &self,
        path: &str,
        schema: &dyn Schema,
        value: &AnyValue,
        results: &mut Vec<ValidationResult>,
    ) {
        let mut local = Vec::new();
        self.rule.apply(path, schema, value, &mut local);
        if local.is_empty() {
            results.push(
                ValidationResult::error(
                    path,
                    codes::NOT_FAILED,
                    format!("Negative check for {} failed", display_name(path)),
                )
                .with_actual(value.to_json()),
            );
        }
    }
}

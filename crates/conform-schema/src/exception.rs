//! Exception raised when validation results are not acceptable.

use serde::Serialize;
use thiserror::Error;

use crate::result::ValidationResult;

/// Validation failed for a value.
///
/// Carries every result of the validation run, not just the ones that caused
/// the failure. Non-strict mode fails only on errors; strict mode also fails
/// on warnings.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{message}")]
pub struct ValidationException {
    correlation_id: Option<String>,
    message: String,
    results: Vec<ValidationResult>,
}

impl ValidationException {
    /// Category used by callers that map failures onto request errors.
    pub const CATEGORY: &'static str = "BadRequest";
    pub const CODE: &'static str = "INVALID_DATA";

    /// Build an exception from `results`, or `None` when they are acceptable.
    #[must_use]
    pub fn from_results(
        correlation_id: Option<&str>,
        results: &[ValidationResult],
        strict: bool,
    ) -> Option<Self> {
        let failed = results
            .iter()
            .any(|r| r.is_error() || (strict && r.is_warning()));
        if !failed {
            return None;
        }

        let exception = Self {
            correlation_id: correlation_id.map(str::to_string),
            message: compose_message(results),
            results: results.to_vec(),
        };
        tracing::debug!(
            correlation_id = exception.correlation_id.as_deref().unwrap_or(""),
            errors = exception.errors().count(),
            warnings = exception.warnings().count(),
            "validation failed"
        );
        Some(exception)
    }

    /// `Err` with the exception when `results` are not acceptable.
    ///
    /// # Errors
    ///
    /// Returns the exception built by [`from_results`](Self::from_results).
    pub fn throw_exception_if_needed(
        correlation_id: Option<&str>,
        results: &[ValidationResult],
        strict: bool,
    ) -> Result<(), Self> {
        Self::from_results(correlation_id, results, strict).map_or(Ok(()), Err)
    }

    #[must_use]
    pub const fn category(&self) -> &'static str {
        Self::CATEGORY
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        Self::CODE
    }

    #[must_use]
    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| r.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| r.is_warning())
    }
}

/// `Validation failed with 2 errors and 1 warning: a, b, c`
pub fn compose_message(results: &[ValidationResult]) -> String {
    let errors = results.iter().filter(|r| r.is_error()).count();
    let warnings = results.iter().filter(|r| r.is_warning()).count();

    let mut counts = Vec::new();
    if errors > 0 {
        counts.push(plural(errors, "error"));
    }
    if warnings > 0 {
        counts.push(plural(warnings, "warning"));
    }
    if counts.is_empty() {
        return "Validation failed".to_string();
    }

    let details = results
        .iter()
        .filter(|r| r.is_error() || r.is_warning())
        .map(ValidationResult::message)
        .collect::<Vec<_>>()
        .join(", ");
    format!("Validation failed with {}: {details}", counts.join(" and "))
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

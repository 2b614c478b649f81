//! Validation diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable result codes produced by the built-in schemas and rules.
pub mod codes {
    pub const VALUE_IS_NULL: &str = "VALUE_IS_NULL";
    pub const TYPE_MISMATCH: &str = "TYPE_MISMATCH";
    pub const UNEXPECTED_PROPERTY: &str = "UNEXPECTED_PROPERTY";
    pub const VALUE_NOT_INCLUDED: &str = "VALUE_NOT_INCLUDED";
    pub const VALUE_NOT_EXCLUDED: &str = "VALUE_NOT_EXCLUDED";
    pub const NOT_FAILED: &str = "NOT_FAILED";
    pub const BAD_VALUE: &str = "BAD_VALUE";
    pub const PROPERTIES_NOT_MATCH: &str = "PROPERTIES_NOT_MATCH";
    pub const VALUE_NULL: &str = "VALUE_NULL";
    pub const VALUE_ONLY_ONE: &str = "VALUE_ONLY_ONE";
}

/// Severity of a [`ValidationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationResultType {
    Information,
    Warning,
    Error,
}

impl ValidationResultType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Information => "information",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ValidationResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic produced while validating a value.
///
/// `path` is the dotted location of the value (empty for the root).
/// `expected` and `actual` are free-form payloads chosen by whoever created
/// the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    path: String,
    #[serde(rename = "type")]
    result_type: ValidationResultType,
    code: String,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expected: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    actual: Option<serde_json::Value>,
}

impl ValidationResult {
    pub fn new(
        path: impl Into<String>,
        result_type: ValidationResultType,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            result_type,
            code: code.into(),
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    pub fn error(
        path: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(path, ValidationResultType::Error, code, message)
    }

    pub fn warning(
        path: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(path, ValidationResultType::Warning, code, message)
    }

    pub fn information(
        path: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(path, ValidationResultType::Information, code, message)
    }

    #[must_use]
    pub fn with_expected(mut self, expected: impl Into<serde_json::Value>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    #[must_use]
    pub fn with_actual(mut self, actual: impl Into<serde_json::Value>) -> Self {
        self.actual = Some(actual.into());
        self
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn result_type(&self) -> ValidationResultType {
        self.result_type
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub const fn expected(&self) -> Option<&serde_json::Value> {
        self.expected.as_ref()
    }

    #[must_use]
    pub const fn actual(&self) -> Option<&serde_json::Value> {
        self.actual.as_ref()
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.result_type == ValidationResultType::Error
    }

    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.result_type == ValidationResultType::Warning
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "[{}] (root) {}: {}", self.result_type, self.code, self.message)
        } else {
            write!(
                f,
                "[{}] {} {}: {}",
                self.result_type, self.path, self.code, self.message
            )
        }
    }
}

/// Name used for a value in messages: its path, or `value` at the root.
pub(crate) fn display_name(path: &str) -> &str {
    if path.is_empty() { "value" } else { path }
}

/// Dotted path of a child under `parent`.
pub(crate) fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

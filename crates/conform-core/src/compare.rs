//! Coercive value comparison.
//!
//! Two values are equal when both convert to the same finite number, or
//! failing that, to the same text. Ordering is numeric only. `LIKE` matches
//! the text form of a value against a regular expression.

use regex::Regex;
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;
use crate::value::AnyValue;

/// Comparison operator used by comparison rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOperator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
}

impl CompareOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::Lt => "LT",
            Self::Le => "LE",
            Self::Gt => "GT",
            Self::Ge => "GE",
            Self::Like => "LIKE",
        }
    }
}

impl fmt::Display for CompareOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompareOperator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "=" | "==" | "EQ" => Ok(Self::Eq),
            "!=" | "<>" | "NE" => Ok(Self::Ne),
            "<" | "LT" => Ok(Self::Lt),
            "<=" | "LE" => Ok(Self::Le),
            ">" | "GT" => Ok(Self::Gt),
            ">=" | "GE" => Ok(Self::Ge),
            "LIKE" => Ok(Self::Like),
            _ => Err(CoreError::InvalidOperator(s.to_string())),
        }
    }
}

/// Compile a `LIKE` pattern.
///
/// # Errors
///
/// Returns `CoreError::InvalidPattern` if the pattern is not a valid regex.
pub fn compile_pattern(pattern: &str) -> Result<Regex, CoreError> {
    Regex::new(pattern).map_err(|e| CoreError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Compare `left` with `right` using `operator`.
///
/// For `LIKE` the right-hand side is compiled as a pattern on every call; an
/// invalid pattern never matches. Callers comparing against a constant should
/// compile once and use [`matches`].
#[must_use]
pub fn compare(left: &AnyValue, operator: CompareOperator, right: &AnyValue) -> bool {
    match operator {
        CompareOperator::Eq => are_equal(left, right),
        CompareOperator::Ne => !are_equal(left, right),
        CompareOperator::Lt => is_less(left, right),
        CompareOperator::Le => are_equal(left, right) || is_less(left, right),
        CompareOperator::Gt => is_greater(left, right),
        CompareOperator::Ge => are_equal(left, right) || is_greater(left, right),
        CompareOperator::Like => right.to_text().is_some_and(|pattern| {
            match compile_pattern(&pattern) {
                Ok(regex) => matches(left, &regex),
                Err(error) => {
                    tracing::debug!(%error, "LIKE comparison with invalid pattern");
                    false
                }
            }
        }),
    }
}

/// Null equals only null; otherwise numbers, then text.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn are_equal(left: &AnyValue, right: &AnyValue) -> bool {
    match (left.is_null(), right.is_null()) {
        (true, true) => return true,
        (true, false) | (false, true) => return false,
        (false, false) => {}
    }

    if let (Some(a), Some(b)) = (left.to_f64(), right.to_f64()) {
        return a == b;
    }

    match (left.to_text(), right.to_text()) {
        (Some(a), Some(b)) => a == b,
        _ => left == right,
    }
}

#[must_use]
pub fn is_less(left: &AnyValue, right: &AnyValue) -> bool {
    matches!((left.to_f64(), right.to_f64()), (Some(a), Some(b)) if a < b)
}

#[must_use]
pub fn is_greater(left: &AnyValue, right: &AnyValue) -> bool {
    matches!((left.to_f64(), right.to_f64()), (Some(a), Some(b)) if a > b)
}

/// Whether the text form of `value` matches `pattern`. Null never matches.
#[must_use]
pub fn matches(value: &AnyValue, pattern: &Regex) -> bool {
    value.to_text().is_some_and(|text| pattern.is_match(&text))
}

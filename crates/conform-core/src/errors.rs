//! Cross-cutting error types for conform.
//!
//! These errors are raised while *building* validation machinery (parsing an
//! operator, compiling a pattern). Validation itself never fails: it reports
//! diagnostics instead. The raise-boundary error lives in `conform-schema`.

use thiserror::Error;

/// Errors that can be raised by any conform crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A comparison operator string was not recognised.
    #[error("Unknown comparison operator: {0}")]
    InvalidOperator(String),

    /// A `LIKE` pattern failed to compile.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

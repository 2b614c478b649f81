//! Recursive traversal configuration.

use conform_core::{DEFAULT_MAX_DEPTH, RecursiveObjectReader};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TraversalConfig {
    /// Ceiling on nested objects in flight while flattening a value.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

impl TraversalConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when `max_depth` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "traversal.max_depth".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Reader bounded by the configured ceiling.
    #[must_use]
    pub fn reader(&self) -> RecursiveObjectReader {
        RecursiveObjectReader::new(self.max_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = TraversalConfig::default();
        assert_eq!(config.max_depth, 100);
        assert_eq!(config.reader().max_depth(), 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_depth_is_rejected() {
        let config = TraversalConfig { max_depth: 0 };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "traversal.max_depth"
        ));
    }
}

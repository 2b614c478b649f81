//! # conform-config
//!
//! Layered configuration loading for conform using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CONFORM_*` prefix, `__` as separator)
//! 2. Project-level `.conform/config.toml`
//! 3. User-level `~/.config/conform/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CONFORM_VALIDATION__STRICT` -> `validation.strict` and
//! `CONFORM_TRAVERSAL__MAX_DEPTH` -> `traversal.max_depth`.
//!
//! # Usage
//!
//! ```no_run
//! use conform_config::ConformConfig;
//!
//! let config = ConformConfig::load_with_dotenv().expect("config");
//! let reader = config.traversal.reader();
//! assert!(reader.max_depth() > 0);
//! ```

mod error;
mod traversal;
mod validation;

pub use error::ConfigError;
pub use traversal::TraversalConfig;
pub use validation::ValidationConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "CONFORM_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConformConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub traversal: TraversalConfig,
}

impl ConformConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`load_with_dotenv`](Self::load_with_dotenv)
    /// for `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when a source cannot be read or
    /// extracted, and `ConfigError::InvalidValue` when a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Load defaults, then the given TOML file, then environment variables.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::extract(&figment)
    }

    /// Build the figment provider chain.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                tracing::debug!(path = %global_path.display(), "layering user config");
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".conform/config.toml");
        if local_path.exists() {
            tracing::debug!(path = %local_path.display(), "layering project config");
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check values that deserialize fine but are out of range.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.traversal.validate()
    }

    fn extract(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("conform").join("config.toml"))
    }

    /// Load `.env` from the workspace root, falling back to the current
    /// directory. Does nothing when no `.env` exists.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    if let Err(error) = dotenvy::from_path(&env_path) {
                        tracing::warn!(%error, path = %env_path.display(), "failed to load .env");
                    }
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed working directories and env vars.

use std::io::Write;

use conform_config::{ConfigError, ConformConfig};
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

/// Write `.conform/config.toml` inside the jail's working directory.
fn project_config(contents: &str) -> figment::Result<()> {
    std::fs::create_dir_all(".conform").map_err(|e| e.to_string())?;
    std::fs::write(".conform/config.toml", contents).map_err(|e| e.to_string())?;
    Ok(())
}

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[validation]
strict = true

[traversal]
max_depth = 12
",
        )?;

        let config: ConformConfig = Figment::from(Serialized::defaults(ConformConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.validation.strict);
        assert_eq!(config.traversal.max_depth, 12);
        assert_eq!(config.traversal.reader().max_depth(), 12);
        Ok(())
    });
}

#[test]
fn partial_sections_keep_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[validation]\nstrict = true\n")?;

        let config: ConformConfig = Figment::from(Serialized::defaults(ConformConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.validation.strict);
        assert_eq!(config.traversal.max_depth, 100);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_load() {
    Jail::expect_with(|_jail| {
        project_config("[traversal]\nmax_depth = 7\n")?;

        let config = ConformConfig::load().expect("config loads");
        assert_eq!(config.traversal.max_depth, 7);
        assert!(!config.validation.strict);
        Ok(())
    });
}

#[test]
fn zero_depth_is_rejected_on_load() {
    Jail::expect_with(|_jail| {
        project_config("[traversal]\nmax_depth = 0\n")?;

        let error = ConformConfig::load().unwrap_err();
        assert!(matches!(error, ConfigError::InvalidValue { .. }));
        assert_eq!(
            error.to_string(),
            "Invalid configuration value for 'traversal.max_depth': must be at least 1"
        );
        Ok(())
    });
}

#[test]
fn malformed_values_surface_as_figment_errors() {
    Jail::expect_with(|_jail| {
        project_config("[validation]\nstrict = \"sometimes\"\n")?;

        assert!(matches!(ConformConfig::load(), Err(ConfigError::Figment(_))));
        Ok(())
    });
}

#[test]
fn load_file_reads_explicit_path() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "[validation]\nstrict = true").expect("write config");

    let config = ConformConfig::load_file(file.path()).expect("config loads");
    assert!(config.validation.strict);
    assert_eq!(config.traversal.max_depth, 100);
}

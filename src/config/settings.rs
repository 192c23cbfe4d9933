//! Application settings loaded from `config.toml` and the environment.
//!
//! Every field has a default, so a missing file is not an error. Environment
//! variables win over the file:
//! - `STOCKROOM_CONFIG`: path of the TOML file (default `config.toml`)
//! - `DATABASE_URL`: database connection string
//! - `POPULATOR_DIR`: directory that contains the `populador/` seed files

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use crate::populator::PopulatorConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Top-level application settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Database connection string
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Seed-file settings
    #[serde(default)]
    pub populator: PopulatorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            populator: PopulatorConfig::default(),
        }
    }
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

/// Parses settings from a TOML file.
///
/// # Errors
/// Returns `Error::Config` if the file cannot be read or is not valid TOML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Applies environment overrides on top of file settings.
fn apply_overrides(
    mut config: AppConfig,
    database_url: Option<String>,
    populator_dir: Option<String>,
) -> AppConfig {
    if let Some(url) = database_url {
        config.database_url = url;
    }
    if let Some(dir) = populator_dir {
        config.populator.base_dir = PathBuf::from(dir);
    }
    config
}

/// Loads the settings the installer runs with.
///
/// Reads the TOML file named by `STOCKROOM_CONFIG` (or `config.toml`) when it exists,
/// then applies `DATABASE_URL` and `POPULATOR_DIR` from the environment.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var("STOCKROOM_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let from_file = if Path::new(&path).exists() {
        load_config(&path)?
    } else {
        info!("No configuration file at {}, using defaults", path);
        AppConfig::default()
    };

    let config = apply_overrides(
        from_file,
        std::env::var("DATABASE_URL").ok(),
        std::env::var("POPULATOR_DIR").ok(),
    );
    info!(
        "Using database {} and seed directory {}",
        config.database_url,
        config.populator.base_dir.display()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            database_url = "sqlite://shop.sqlite?mode=rwc"

            [populator]
            base_dir = "/srv/shop"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.database_url, "sqlite://shop.sqlite?mode=rwc");
        assert_eq!(config.populator.base_dir, PathBuf::from("/srv/shop"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.populator.base_dir, PathBuf::from("."));
    }

    #[test]
    fn test_overrides_win() {
        let config = apply_overrides(
            AppConfig::default(),
            Some("sqlite::memory:".to_string()),
            Some("/tmp/seed".to_string()),
        );
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.populator.base_dir, PathBuf::from("/tmp/seed"));

        let untouched = apply_overrides(AppConfig::default(), None, None);
        assert_eq!(untouched, AppConfig::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database_url = \"sqlite::memory:\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.populator, PopulatorConfig::default());
    }

    #[test]
    fn test_load_config_errors() {
        assert!(matches!(
            load_config("/definitely/not/here.toml"),
            Err(Error::Config { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database_url = [").unwrap();
        assert!(matches!(load_config(file.path()), Err(Error::Config { .. })));
    }
}

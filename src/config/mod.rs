/// Database connection and table management
pub mod database;

/// Application settings from config.toml and environment variables
pub mod settings;

pub use settings::{AppConfig, load_app_configuration};

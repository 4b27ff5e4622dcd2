use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Missing sections fall back to the built-in defaults, so a file that only
/// sets `[crawler]` tuning still gets the full category table.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Returns the built-in configuration used when no config file is given
///
/// This is the original scraper's setup: the full Amazon.fr category table,
/// a 10-page window, 3 attempts per page with a 5 second retry delay, and a
/// 2 second pause between rounds.
pub fn default_config() -> Config {
    Config::default()
}

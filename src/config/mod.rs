//! Configuration system for waqtr with validation and hot reload.
//!
//! Handles the TOML configuration file, default value generation on first
//! run, a validation pass with helpful errors, and in-place field updates for
//! the `set` subcommand.
//!
//! ## Configuration Structure
//!
//! ```toml
//! city = "Dhaka"            # City sent to the timings provider
//! country = "Bangladesh"    # Country sent to the timings provider
//! method = 2                # Provider calculation method code
//! notify = false            # Desktop notification at the start of each waqt
//! update_interval = 1       # Main loop tick in seconds (1-60)
//! ```
//!
//! The file lives at `$XDG_CONFIG_HOME/waqtr/waqtr.toml`, overridable with
//! the `--config` flag. All fields are optional in the file; defaults apply
//! through the accessor methods, never at the serde layer.

pub mod watcher;

use anyhow::{Context, Result, anyhow};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::*;

pub use watcher::start_config_watcher;

/// Override for the configuration directory, set once from the CLI.
static CONFIG_DIR_OVERRIDE: OnceCell<PathBuf> = OnceCell::new();

/// Set a custom configuration directory (from `--config`).
///
/// Must be called before the first config load. Later calls are ignored.
pub fn set_config_dir(dir: &str) -> Result<()> {
    let path = PathBuf::from(dir);
    if !path.is_dir() {
        return Err(anyhow!("config directory '{dir}' does not exist"));
    }
    let _ = CONFIG_DIR_OVERRIDE.set(path);
    Ok(())
}

/// Configuration structure for waqtr application settings.
///
/// All fields are optional and fall back to defaults through the accessor
/// methods, so a partially filled or missing file still yields a working
/// setup.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// City whose timetable is fetched from the provider.
    pub city: Option<String>,
    /// Country sent alongside the city.
    pub country: Option<String>,
    /// Provider calculation method code.
    pub method: Option<u8>,
    /// Whether to fire a desktop notification at the start of each waqt.
    pub notify: Option<bool>,
    /// Main loop tick interval in seconds.
    pub update_interval: Option<u64>,
}

impl Config {
    pub fn city(&self) -> &str {
        self.city.as_deref().unwrap_or(DEFAULT_CITY)
    }

    pub fn country(&self) -> &str {
        self.country.as_deref().unwrap_or(DEFAULT_COUNTRY)
    }

    pub fn method(&self) -> u8 {
        self.method.unwrap_or(DEFAULT_METHOD)
    }

    pub fn notify_enabled(&self) -> bool {
        self.notify.unwrap_or(DEFAULT_NOTIFY)
    }

    pub fn update_interval(&self) -> u64 {
        self.update_interval.unwrap_or(DEFAULT_UPDATE_INTERVAL)
    }

    /// Load the configuration, writing a default file on first run.
    pub fn load() -> Result<Self> {
        let path = get_config_path()?;
        if !path.exists() {
            create_default_config(&path)?;
            log_block_start!("Created default configuration");
            log_indented!("{}", path.display());
        }
        Self::load_from_path(&path)
    }

    /// Load and validate a configuration file at an explicit path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validation pass over the loaded values.
    fn validate(&self) -> Result<()> {
        if let Some(city) = &self.city
            && city.trim().is_empty()
        {
            return Err(anyhow!("'city' must not be empty"));
        }
        if let Some(country) = &self.country
            && country.trim().is_empty()
        {
            return Err(anyhow!("'country' must not be empty"));
        }
        if let Some(interval) = self.update_interval
            && !(MINIMUM_UPDATE_INTERVAL..=MAXIMUM_UPDATE_INTERVAL).contains(&interval)
        {
            return Err(anyhow!(
                "'update_interval' must be between {MINIMUM_UPDATE_INTERVAL} and {MAXIMUM_UPDATE_INTERVAL} seconds, got {interval}"
            ));
        }
        Ok(())
    }
}

/// Resolve the path of the active configuration file.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(dir) = CONFIG_DIR_OVERRIDE.get() {
        return Ok(dir.join(CONFIG_FILE_NAME));
    }
    let config_dir = dirs::config_dir()
        .context("could not determine config directory")?
        .join("waqtr");
    Ok(config_dir.join(CONFIG_FILE_NAME))
}

/// Directory holding the config file and persisted tracker state.
pub fn get_config_dir() -> Result<PathBuf> {
    Ok(get_config_path()?
        .parent()
        .context("config path has no parent directory")?
        .to_path_buf())
}

/// Write the default configuration file, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let contents = format!(
        "\
city = \"{DEFAULT_CITY}\"            # City sent to the timings provider\n\
country = \"{DEFAULT_COUNTRY}\"    # Country sent to the timings provider\n\
method = {DEFAULT_METHOD}                # Provider calculation method code\n\
notify = {DEFAULT_NOTIFY}            # Desktop notification at the start of each waqt\n\
update_interval = {DEFAULT_UPDATE_INTERVAL}       # Main loop tick in seconds ({MINIMUM_UPDATE_INTERVAL}-{MAXIMUM_UPDATE_INTERVAL})\n"
    );
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write default config {}", path.display()))?;
    Ok(())
}

/// Update a single field in the config file in place.
///
/// Used by the `set` subcommand. The value is parsed according to the field's
/// type before anything is written, so a bad value leaves the file untouched.
pub fn update_field(path: &Path, field: &str, value: &str) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let mut table: toml::Table = raw
        .parse()
        .with_context(|| format!("failed to parse config file {}", path.display()))?;

    let parsed = match field {
        "city" | "country" => toml::Value::String(value.to_string()),
        "method" | "update_interval" => toml::Value::Integer(
            value
                .parse()
                .with_context(|| format!("'{field}' expects a number, got '{value}'"))?,
        ),
        "notify" => toml::Value::Boolean(
            value
                .parse()
                .with_context(|| format!("'{field}' expects true or false, got '{value}'"))?,
        ),
        _ => {
            return Err(anyhow!(
                "unknown config field '{field}' (expected city, country, method, notify, or update_interval)"
            ));
        }
    };

    table.insert(field.to_string(), parsed);

    // Re-validate the merged result before touching the file
    let merged: Config = table
        .clone()
        .try_into()
        .context("updated configuration is not valid")?;
    merged.validate()?;

    std::fs::write(path, toml::to_string(&toml::Value::Table(table))?)
        .with_context(|| format!("failed to write config file {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults_apply_for_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "");
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.city(), DEFAULT_CITY);
        assert_eq!(config.country(), DEFAULT_COUNTRY);
        assert_eq!(config.method(), DEFAULT_METHOD);
        assert!(!config.notify_enabled());
        assert_eq!(config.update_interval(), DEFAULT_UPDATE_INTERVAL);
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "city = \"Chittagong\"\nnotify = true\nupdate_interval = 5\n",
        );
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.city(), "Chittagong");
        assert!(config.notify_enabled());
        assert_eq!(config.update_interval(), 5);
    }

    #[test]
    fn rejects_out_of_range_interval() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "update_interval = 0\n");
        assert!(Config::load_from_path(&path).is_err());

        let path = write_config(&dir, "update_interval = 3600\n");
        assert!(Config::load_from_path(&path).is_err());
    }

    #[test]
    fn rejects_empty_city() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "city = \"  \"\n");
        assert!(Config::load_from_path(&path).is_err());
    }

    #[test]
    fn rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "city = \n");
        assert!(Config::load_from_path(&path).is_err());
    }

    #[test]
    fn default_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        create_default_config(&path).unwrap();
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.city(), DEFAULT_CITY);
    }

    #[test]
    fn update_field_edits_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "city = \"Dhaka\"\n");

        update_field(&path, "city", "Sylhet").unwrap();
        update_field(&path, "notify", "true").unwrap();
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.city(), "Sylhet");
        assert!(config.notify_enabled());
    }

    #[test]
    fn update_field_rejects_bad_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "city = \"Dhaka\"\n");

        assert!(update_field(&path, "notify", "maybe").is_err());
        assert!(update_field(&path, "update_interval", "never").is_err());
        assert!(update_field(&path, "favourite_color", "green").is_err());

        // A failed update leaves the file untouched
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.city(), "Dhaka");
    }
}

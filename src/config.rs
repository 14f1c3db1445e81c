// Presentation settings loaded from YAML

use crate::filter::Filter;
use chrono::format::{Item, StrftimeItems};
use eyre::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

const CONFIG_DIR: &str = "todostore";
const CONFIG_FILE: &str = "todostore.yml";

/// Settings for the terminal front end. Task state is never stored here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Use ANSI colors and strike-through
    pub color: bool,
    /// chrono format string for "Added at ..."
    pub time_format: String,
    /// Filter selected when a session starts
    pub default_filter: Filter,
    pub prompt: String,
    /// Log level used when no -v flag is given (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: true,
            time_format: "%H:%M:%S".to_string(),
            default_filter: Filter::All,
            prompt: "> ".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load config from an explicit path, or from the default location
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// `<config dir>/todostore/todostore.yml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Reject time formats chrono cannot render and unknown log levels
    pub fn validate(&self) -> Result<()> {
        if StrftimeItems::new(&self.time_format).any(|item| matches!(item, Item::Error)) {
            bail!("Invalid time-format: {}", self.time_format);
        }
        if self.log_level.parse::<LevelFilter>().is_err() {
            bail!(
                "Invalid log-level: {} (expected off, error, warn, info, debug or trace)",
                self.log_level
            );
        }
        Ok(())
    }

    /// Parsed `log_level`; only falls back to WARN for configs that skipped `validate`
    pub fn log_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::WARN)
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }
}

//! Application configuration.
//!
//! Layers, lowest to highest precedence: built-in defaults, the TOML file,
//! `NOVA_*` environment variables (a `.env` file is honoured by the binary),
//! then command-line overrides applied through the `with_*` setters.

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use nova_tictactoe::Difficulty;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "nova_core.toml";

/// Environment variable overriding [`AppConfig::db_path`].
pub const ENV_DB_PATH: &str = "NOVA_DB_PATH";
/// Environment variable overriding [`AppConfig::difficulty`].
pub const ENV_AI_LEVEL: &str = "NOVA_AI_LEVEL";
/// Environment variable overriding [`AppConfig::ai_delay_ms`].
pub const ENV_AI_DELAY_MS: &str = "NOVA_AI_DELAY_MS";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct AppConfig {
    /// SQLite database holding statistics.
    db_path: PathBuf,
    /// AI strength for new games.
    difficulty: Difficulty,
    /// Simulated AI thinking time in milliseconds.
    ai_delay_ms: u64,
    /// Number of records shown on the history screen.
    history_limit: usize,
    /// Default target for save exports and source for imports.
    export_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("nova_core.db"),
            difficulty: Difficulty::Hard,
            ai_delay_ms: 800,
            history_limit: 10,
            export_path: PathBuf::from("nova-core-save.json"),
        }
    }
}

impl AppConfig {
    /// Loads configuration from TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text; missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists, else
    /// defaults; then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an explicitly named file is missing, or any
    /// file or environment value is malformed.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => {
                info!("No config file found, using defaults");
                Self::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok())
    }

    /// Applies `NOVA_*` overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an override value cannot be parsed.
    pub fn apply_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = lookup(ENV_DB_PATH) {
            debug!(path = %path, "db_path overridden from environment");
            self.db_path = PathBuf::from(path);
        }
        if let Some(level) = lookup(ENV_AI_LEVEL) {
            self.difficulty = level.parse().map_err(|_| {
                ConfigError::new(format!("{} must be easy, medium or hard, got '{}'", ENV_AI_LEVEL, level))
            })?;
        }
        if let Some(delay) = lookup(ENV_AI_DELAY_MS) {
            self.ai_delay_ms = delay.parse().map_err(|e| {
                ConfigError::new(format!("{} must be milliseconds: {}", ENV_AI_DELAY_MS, e))
            })?;
        }
        Ok(self)
    }

    /// AI thinking delay.
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml("difficulty = \"easy\"\nhistory_limit = 5\n").unwrap();
        assert_eq!(*config.difficulty(), Difficulty::Easy);
        assert_eq!(*config.history_limit(), 5);
        assert_eq!(*config.ai_delay_ms(), 800);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let err = AppConfig::from_toml("difficulty = \"impossible\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::default()
            .apply_env(|key| match key {
                ENV_AI_LEVEL => Some("medium".to_string()),
                ENV_AI_DELAY_MS => Some("0".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(*config.difficulty(), Difficulty::Medium);
        assert_eq!(config.ai_delay(), Duration::ZERO);

        let err = AppConfig::default()
            .apply_env(|key| (key == ENV_AI_DELAY_MS).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.message.contains(ENV_AI_DELAY_MS));
    }

    #[test]
    fn test_setters() {
        let config = AppConfig::default().with_difficulty(Difficulty::Easy);
        assert_eq!(*config.difficulty(), Difficulty::Easy);
    }
}

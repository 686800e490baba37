//! Configuration management.
//!
//! A single TOML file (`survsim.toml` by default) configures where content
//! lives and how the binary logs. The core reads no environment variables;
//! everything flows from this file plus CLI flags.
//!
//! ```toml
//! [game]
//! content_dir = "data/content"
//! player_hp = 100
//!
//! [logging]
//! level = "info"
//! # file = "survsim.log"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Directory holding items.txt, monsters.txt, and recipes.txt.
    pub content_dir: String,
    /// Player starting hit points. The stock game uses 100.
    #[serde(default = "default_player_hp")]
    pub player_hp: i32,
}

fn default_player_hp() -> i32 {
    crate::game::types::PLAYER_START_HP
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// One of: error, warn, info, debug, trace.
    pub level: String,
    /// Optional log file; when set, log lines go there (and to the console
    /// too when stdout is a TTY).
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            content_dir: "data/content".to_string(),
            player_hp: default_player_hp(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file and validate it.
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration file.
    pub fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.game.content_dir.trim().is_empty() {
            return Err(anyhow!("game.content_dir must not be empty"));
        }
        if self.game.player_hp <= 0 {
            return Err(anyhow!("game.player_hp must be positive"));
        }
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(anyhow!("unknown logging.level '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.game.player_hp, 100);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn create_then_load_round_trips() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join("survsim.toml");
        let path = path.to_str().expect("utf-8 path");

        Config::create_default(path).expect("create");
        let loaded = Config::load(path).expect("load");
        assert_eq!(loaded.game.content_dir, "data/content");
        assert_eq!(loaded.game.player_hp, 100);
    }

    #[test]
    fn bad_values_are_rejected() {
        let mut config = Config::default();
        config.game.player_hp = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }
}

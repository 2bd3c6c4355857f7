use std::path::Path;

use tracing::warn;

use crate::ai::MAX_SKILL;
use crate::error::ConfigError;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub bot: BotConfig,
}

/// Settings for the minimax engine.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Deepest ply, counted from the root move, at which outcomes are still
    /// checked. Anything deeper scores as neutral.
    pub max_depth: usize,
    /// Answer an empty board with the center column instead of searching.
    pub center_opening: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: 9,
            center_opening: true,
        }
    }
}

/// Settings for computer players.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Chance out of 100 that a bot searches instead of playing randomly.
    pub skill: u8,
    /// Fixed seed for tie-breaks and rolls; random when absent.
    pub seed: Option<u64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            skill: MAX_SKILL,
            seed: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.max_depth == 0 {
            return Err(ConfigError::Validation(
                "search.max_depth must be >= 1".into(),
            ));
        }
        if self.bot.skill > MAX_SKILL {
            return Err(ConfigError::Validation(format!(
                "bot.skill must be in [0, {MAX_SKILL}]"
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&AppConfig::default())?)
    }
}

// Configuration module for reading Snake.toml
// This module provides OOP-style configuration management for the Battlesnake bot

use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub appearance: AppearanceConfig,
    pub strategy: StrategyConfig,
    pub search: SearchConfig,
    pub debug: DebugConfig,
}

/// Identity and cosmetics reported on GET /
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub apiversion: String,
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
}

/// Obstacle and fallback policy
#[derive(Debug, Deserialize, Clone)]
pub struct StrategyConfig {
    /// Skip blocking the cells opponent heads could reach next turn
    pub aggressive: bool,
    pub fallback: FallbackPolicy,
}

/// What to do when the distance field covers none of the head's neighbors
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Step toward our own tail among the unblocked neighbors
    TailSeeking,
    /// Pick any unblocked neighbor at random
    Random,
}

/// Round budget for the distance field search
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Boards wider than this get the fixed round cap below instead of `width` rounds
    pub wide_board_threshold: usize,
    pub max_rounds_on_wide_board: usize,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
    /// Dump the board and distance field at debug level every turn
    pub render_field: bool,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            appearance: AppearanceConfig {
                apiversion: "1".to_string(),
                author: "breadcrumb".to_string(),
                color: "#13932f".to_string(),
                head: "all-seeing".to_string(),
                tail: "mouse".to_string(),
            },
            strategy: StrategyConfig {
                aggressive: true,
                fallback: FallbackPolicy::TailSeeking,
            },
            search: SearchConfig {
                wide_board_threshold: 11,
                max_rounds_on_wide_board: 13,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
                render_field: false,
            },
        }
    }

    /// Loads Snake.toml, falling back to the hardcoded defaults when it is
    /// missing or malformed
    pub fn load_or_default() -> Self {
        match Self::load_default() {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using hardcoded defaults", e);
                Self::default_hardcoded()
            }
        }
    }
}

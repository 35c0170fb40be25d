// Configuration module for reading Isolation.toml
// Holds every tunable of the agents, the evaluators and the tournament driver

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::eval::Heuristic;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub search: SearchConfig,
    pub opening: OpeningConfig,
    pub scores: ScoresConfig,
    pub tournament: TournamentConfig,
    pub debug: DebugConfig,
}

/// Search engine constants
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Plies explored by the fixed-depth minimax agent
    pub search_depth: u32,
    /// Search aborts once fewer milliseconds than this remain
    pub timeout_threshold_ms: f64,
}

/// Zero-search opening shortcut
#[derive(Debug, Deserialize, Clone)]
pub struct OpeningConfig {
    pub enabled: bool,
    /// Shortcut fires only when the root has more legal moves than this
    pub trigger_above: usize,
}

/// Evaluation function selection and weights
#[derive(Debug, Deserialize, Clone)]
pub struct ScoresConfig {
    pub heuristic: Heuristic,
    pub opponent_weight: f64,
    pub center_weight: f64,

    // Tiered heuristic
    pub tier_threshold: usize,
    pub relaxed_weight: f64,
    pub aggressive_weight: f64,
}

/// Round-robin driver constants
#[derive(Debug, Deserialize, Clone)]
pub struct TournamentConfig {
    pub board_width: i32,
    pub board_height: i32,
    pub time_limit_ms: u64,
    /// Games per pairing, split evenly between who moves first
    pub num_matches: usize,
    pub seed: u64,
}

/// Match record logging
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Isolation.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let config: Config =
            toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the agents and the tournament cannot run with
    pub fn validate(&self) -> Result<(), String> {
        if self.search.search_depth == 0 {
            return Err("search.search_depth must be at least 1".to_string());
        }
        let threshold = self.search.timeout_threshold_ms;
        if threshold.is_nan() || threshold < 0.0 {
            return Err("search.timeout_threshold_ms must be non-negative".to_string());
        }
        if self.tournament.board_width <= 0 || self.tournament.board_height <= 0 {
            return Err(format!(
                "tournament board must be non-empty, got {}x{}",
                self.tournament.board_width, self.tournament.board_height
            ));
        }
        Ok(())
    }

    /// Loads default configuration from Isolation.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Isolation.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Isolation.toml
    pub fn default_hardcoded() -> Self {
        Config {
            search: SearchConfig {
                search_depth: 3,
                timeout_threshold_ms: 15.0,
            },
            opening: OpeningConfig {
                enabled: true,
                trigger_above: 8,
            },
            scores: ScoresConfig {
                heuristic: Heuristic::Blend,
                opponent_weight: 2.0,
                center_weight: 1.0,
                tier_threshold: 3,
                relaxed_weight: 1.0,
                aggressive_weight: 3.0,
            },
            tournament: TournamentConfig {
                board_width: 7,
                board_height: 7,
                time_limit_ms: 150,
                num_matches: 10,
                seed: 42,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "isolation_matches.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!(
                "Could not load Isolation.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}

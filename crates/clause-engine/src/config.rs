//! Engine configuration
//!
//! Defaults can be overridden from the environment:
//! - `CLAUSE_RULES_FILE`: path to the JSON clause catalog
//! - `CLAUSE_MATCH_THRESHOLD`: fuzzy match threshold, 0..=100

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::matcher::DEFAULT_THRESHOLD;

pub const DEFAULT_RULES_FILE: &str = "config/compliance_rules.json";

pub const RULES_FILE_ENV: &str = "CLAUSE_RULES_FILE";
pub const THRESHOLD_ENV: &str = "CLAUSE_MATCH_THRESHOLD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Where the clause catalog lives
    pub rules_file: PathBuf,
    /// Minimum fuzzy score for a paragraph to count as evidence
    pub match_threshold: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rules_file: PathBuf::from(DEFAULT_RULES_FILE),
            match_threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var(RULES_FILE_ENV) {
            if !path.trim().is_empty() {
                config.rules_file = PathBuf::from(path);
            }
        }

        if let Ok(raw) = std::env::var(THRESHOLD_ENV) {
            config.match_threshold = parse_threshold(&raw)?;
        }

        Ok(config)
    }

    pub fn with_rules_file(mut self, path: impl AsRef<Path>) -> Self {
        self.rules_file = path.as_ref().to_path_buf();
        self
    }

    pub fn with_threshold(mut self, threshold: u8) -> Result<Self, ConfigError> {
        if threshold > 100 {
            return Err(ConfigError::InvalidThreshold(threshold.to_string()));
        }
        self.match_threshold = threshold;
        Ok(self)
    }
}

/// Parse a threshold given as text
pub fn parse_threshold(raw: &str) -> Result<u8, ConfigError> {
    match raw.trim().parse::<u8>() {
        Ok(value) if value <= 100 => Ok(value),
        _ => Err(ConfigError::InvalidThreshold(raw.to_string())),
    }
}

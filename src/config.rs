//! Shuffle and analysis configuration.
//!
//! Settings can be built in code or loaded from a TOML file. Every
//! section is optional in the file and falls back to its defaults.

use crate::analysis::UniformityThresholds;
use crate::entropy::{OsIndexSource, SecureRandomIndexSource, SeededIndexSource};
use crate::permutation::SwapTable;
use crate::shuffler::ShuffleOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for shuffling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShuffleConfig {
    /// Shuffle whitespace-delimited tokens independently.
    pub preserve_spaces: bool,
    /// Selector-to-swap mapping.
    pub swap_table: SwapTable,
    /// Passphrase for a reproducible ChaCha20 source. OS entropy if absent.
    pub seed: Option<String>,
}

impl ShuffleConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if matches!(self.seed.as_deref(), Some(s) if s.is_empty()) {
            return Err(ConfigError::EmptySeed);
        }
        Ok(())
    }

    /// Returns the shuffle options described by this configuration.
    pub fn options(&self) -> ShuffleOptions {
        ShuffleOptions {
            preserve_spaces: self.preserve_spaces,
            swap_table: self.swap_table,
        }
    }

    /// Opens the index source this configuration asks for.
    pub fn index_source(&self) -> Box<dyn SecureRandomIndexSource> {
        match self.seed.as_deref() {
            Some(passphrase) => Box::new(SeededIndexSource::from_passphrase(passphrase)),
            None => Box::new(OsIndexSource::from_os_entropy()),
        }
    }
}

/// Configuration for the distribution analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of shuffles to sample.
    pub trials: usize,
    /// Largest accepted absolute frequency deviation from uniform.
    pub max_deviation: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trials: 10_000,
            max_deviation: 0.04,
        }
    }
}

impl AnalysisConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::InvalidTrials);
        }
        if !(self.max_deviation > 0.0 && self.max_deviation <= 1.0) {
            return Err(ConfigError::InvalidDeviation(self.max_deviation));
        }
        Ok(())
    }

    /// Thresholds matching this configuration.
    pub fn thresholds(&self) -> UniformityThresholds {
        UniformityThresholds {
            min_trials: self.trials,
            max_deviation: self.max_deviation,
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("seed passphrase must not be empty")]
    EmptySeed,
    #[error("trial count must be at least 1")]
    InvalidTrials,
    #[error("invalid max deviation {0} (must be in (0, 1])")]
    InvalidDeviation(f64),
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    /// `[shuffle]` section.
    #[serde(default)]
    pub shuffle: ShuffleConfig,
    /// `[analysis]` section.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Default text used when none is given on the command line.
    #[serde(default)]
    pub text: Option<String>,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.shuffle.validate()?;
        config.analysis.validate()?;
        Ok(config)
    }
}

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::pools;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Cannot generate {requested} unique repositories, only {capacity} names are available")]
    TooManyRepositories { requested: usize, capacity: usize },

    #[error("Pull requests were requested but no repositories will be generated")]
    NoRepositories,

    #[error("{field} must be between 0 and 1, got {value}")]
    InvalidProbability { field: &'static str, value: f64 },

    #[error("window_days must be between 0 and {max}, got {value}")]
    InvalidWindow { value: i64, max: i64 },
}

/// Upper bound on `generation.window_days`, roughly a century.
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// Top-level configuration loaded from .dashboard-seed.toml.
///
/// All fields are optional; the defaults reproduce the stock dashboard dataset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub generation: GeneratorConfig,

    #[serde(default)]
    pub organization: OrganizationConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Knobs for the dataset assembler.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of repositories to create
    pub repositories: usize,
    /// Total pull requests spread across all repositories
    pub pull_requests: usize,
    /// Fixed RNG seed. Unset means OS entropy.
    pub seed: Option<u64>,
    /// Pull requests are created within this many days before now
    pub window_days: i64,
    /// Chance that a pull request is open
    pub open_probability: f64,
    /// Chance that a pull request has an assignee
    pub assignee_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            repositories: 8,
            pull_requests: 75,
            seed: None,
            window_days: 90,
            open_probability: 0.7,
            assignee_probability: 0.7,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrganizationConfig {
    /// Owner prefix used in full names and links (e.g., "secure-corp/auth-core")
    pub name: String,
}

impl Default for OrganizationConfig {
    fn default() -> Self {
        Self {
            name: "secure-corp".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where the JSON document is written
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("mock-data.json"),
        }
    }
}

impl Config {
    /// Load configuration from .dashboard-seed.toml in the current directory.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Config, ConfigError> {
        let path = Path::new(".dashboard-seed.toml");
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load from a specific path (useful for testing).
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }
}

impl GeneratorConfig {
    /// Reject settings the assembler cannot satisfy.
    ///
    /// Asking for more repositories than there are distinct names would make
    /// the collision retry loop spin forever.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let capacity = pools::repository_name_capacity();
        if self.repositories > capacity {
            return Err(ConfigError::TooManyRepositories {
                requested: self.repositories,
                capacity,
            });
        }
        if self.repositories == 0 && self.pull_requests > 0 {
            return Err(ConfigError::NoRepositories);
        }
        for (field, value) in [
            ("open_probability", self.open_probability),
            ("assignee_probability", self.assignee_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { field, value });
            }
        }
        if !(0..=MAX_WINDOW_DAYS).contains(&self.window_days) {
            return Err(ConfigError::InvalidWindow {
                value: self.window_days,
                max: MAX_WINDOW_DAYS,
            });
        }
        Ok(())
    }
}

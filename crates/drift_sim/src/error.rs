//! Error types for scenario setup

use std::path::PathBuf;

use drift_ai::ConfigError;
use thiserror::Error;

/// Scenario setup errors
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid agent or world parameters
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for a simulation
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Scenario name not recognised
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),
}

/// Result type for scenario setup
pub type Result<T> = std::result::Result<T, SimError>;

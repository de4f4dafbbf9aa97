//! Error types for pwconfig

use thiserror::Error;

/// Result type alias using pwconfig Error
pub type Result<T> = std::result::Result<T, Error>;

/// pwconfig error types
///
/// Building a configuration from the environment never fails; these
/// variants cover the edges around it (override files, injected connect
/// options, validation and export).
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Override file parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Override file encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Duplicate project name: {name}")]
    DuplicateProject { name: String },

    #[error("Unknown device preset: {0}")]
    UnknownDevice(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Invalid workers value '{0}': expected a positive integer, a percentage like \"50%\", or \"unbounded\"")]
    InvalidWorkers(String),

    #[error("Invalid reporter '{0}'")]
    InvalidReporter(String),

    #[error("Invalid connect options: {0}")]
    InvalidConnectOptions(String),
}

impl Error {
    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }
}

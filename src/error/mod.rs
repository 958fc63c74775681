//! Error types for configuration, registry and transfer operations
//!
//! Only [`ConfigError`] is fatal to a workflow. Every other error is scoped to
//! the image or tag in progress and is recorded in the run report.

pub mod handlers;

use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, MigratorError>;

/// Configuration fields that must be present before any network or process action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    SourceUrl,
    SourceUsername,
    SourcePassword,
    DestinationNamespace,
    DestinationOAuthToken,
    DestinationUsername,
    DestinationPassword,
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigField::SourceUrl => "source.url",
            ConfigField::SourceUsername => "source.username",
            ConfigField::SourcePassword => "source.password",
            ConfigField::DestinationNamespace => "destination.namespace",
            ConfigField::DestinationOAuthToken => "destination.oauth_token",
            ConfigField::DestinationUsername => "destination.login.username",
            ConfigField::DestinationPassword => "destination.login.password",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration is not complete: {0} is required")]
    MissingField(ConfigField),
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue { field: ConfigField, reason: String },
    #[error("File {} could not be opened or written: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("File could not be deserialized, check that it is valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Network or HTTP failure while talking to the source registry
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },
    #[error("{0}")]
    Status(String),
    #[error("Unable to parse registry response from {url}: {reason}")]
    Decode { url: String, reason: String },
    #[error("Invalid registry URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Destination API call failed or returned a non-success status
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("Error while {operation}: {reason}")]
    Request { operation: String, reason: String },
    #[error("Error while {operation}: Code: {status}")]
    Status { operation: String, status: u16 },
}

/// The container engine failed to pull, tag or push a reference
#[derive(Debug, Clone, thiserror::Error)]
#[error("Error while {operation} image {reference}: {reason}")]
pub struct TransferError {
    pub operation: TransferOperation,
    pub reference: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOperation {
    Pull,
    Tag,
    Push,
}

impl fmt::Display for TransferOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferOperation::Pull => f.write_str("pulling"),
            TransferOperation::Tag => f.write_str("retagging"),
            TransferOperation::Push => f.write_str("pushing"),
        }
    }
}

/// Catalog query failed while building the image list
#[derive(Debug, Clone, thiserror::Error)]
#[error("Failed to populate images from the registry catalog: {0}")]
pub struct PopulationError(#[from] pub TransportError);

/// Top-level error for the command-line workflows
#[derive(Debug, thiserror::Error)]
pub enum MigratorError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Population(#[from] PopulationError),
    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl From<reqwest::Error> for MigratorError {
    fn from(err: reqwest::Error) -> Self {
        MigratorError::Client(err.to_string())
    }
}

//! Migration configuration: source registry, destination namespace and image list
//!
//! The configuration is a JSON document written by `generate-config`, edited
//! by hand, and read back by `validate`, `simulate` and `migrate`.

pub mod validator;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use validator::{ConfigValidator, ConfigWarning, ValidationMode};

pub const DEFAULT_DESTINATION_REGISTRY: &str = "quay.io";
pub const DEFAULT_DESTINATION_API: &str = "https://quay.io";

/// Location and credentials of the private source registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEndpoint {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl RegistryEndpoint {
    pub fn new(url: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Registry host as used in image references, without any scheme
    pub fn normalized_host(&self) -> String {
        let host = self.url.strip_prefix("https://").unwrap_or(&self.url);
        host.strip_prefix("http://").unwrap_or(host).to_string()
    }
}

/// Login credentials for the destination registry, used only when generating a configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// Flat namespace on the destination registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationEndpoint {
    pub namespace: String,
    /// Registry host prefixed to pushed image references
    #[serde(default = "default_destination_registry")]
    pub registry: String,
    /// Base URL of the destination repository API
    #[serde(default = "default_destination_api")]
    pub api_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<LoginCredentials>,
}

impl DestinationEndpoint {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            registry: default_destination_registry(),
            api_url: default_destination_api(),
            oauth_token: None,
            login: None,
        }
    }

    pub fn with_oauth_token(mut self, token: impl Into<String>) -> Self {
        self.oauth_token = Some(token.into());
        self
    }

    pub fn with_login(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.login = Some(LoginCredentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Repository reference for a destination name, e.g. `quay.io/acme/app`
    pub fn repository_reference(&self, dest_name: &str) -> String {
        if self.registry.is_empty() {
            format!("{}/{}", self.namespace, dest_name)
        } else {
            format!("{}/{}/{}", self.registry, self.namespace, dest_name)
        }
    }
}

impl Default for DestinationEndpoint {
    fn default() -> Self {
        Self::new("")
    }
}

fn default_destination_registry() -> String {
    DEFAULT_DESTINATION_REGISTRY.to_string()
}

fn default_destination_api() -> String {
    DEFAULT_DESTINATION_API.to_string()
}

/// One repository to migrate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub source_name: String,
    pub dest_name: String,
    /// Team granted admin on the destination repository; empty means none
    #[serde(default)]
    pub admin_team: String,
    // Absent means public. This exposes hand-added entries by default.
    #[serde(default = "default_public")]
    pub public: bool,
}

impl ImageEntry {
    /// Entry for a source repository with the derived flat destination name
    pub fn from_source(source_name: impl Into<String>) -> Self {
        let source_name = source_name.into();
        let dest_name = crate::naming::flatten_repository_name(&source_name);
        Self {
            source_name,
            dest_name,
            admin_team: String::new(),
            public: true,
        }
    }

    pub fn admin_team(&self) -> Option<&str> {
        if self.admin_team.is_empty() {
            None
        } else {
            Some(&self.admin_team)
        }
    }
}

fn default_public() -> bool {
    true
}

/// Complete migration configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub source: RegistryEndpoint,
    pub destination: DestinationEndpoint,
    #[serde(default)]
    pub images: Vec<ImageEntry>,
}

impl Configuration {
    pub fn new(source: RegistryEndpoint, destination: DestinationEndpoint) -> Self {
        Self {
            source,
            destination,
            images: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a configuration file without validating it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let mut json = self.to_json()?;
        json.push('\n');
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// HTTP client settings shared by the registry and destination clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    pub timeout: u64,
    pub skip_tls: bool,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: 300,
            skip_tls: false,
        }
    }
}

impl HttpSettings {
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_skip_tls(mut self, skip_tls: bool) -> Self {
        self.skip_tls = skip_tls;
        self
    }

    /// Create settings from environment variables and defaults
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(val) = std::env::var("REGISTRY_MIGRATOR_TIMEOUT") {
            if let Ok(timeout) = val.parse() {
                settings.timeout = timeout;
            }
        }
        if let Ok(val) = std::env::var("REGISTRY_MIGRATOR_SKIP_TLS") {
            settings.skip_tls = val.to_lowercase() == "true" || val == "1";
        }

        settings
    }

    /// Build a reqwest client honoring the timeout and TLS settings
    pub fn build_client(&self) -> reqwest::Result<reqwest::Client> {
        let mut builder =
            reqwest::Client::builder().timeout(std::time::Duration::from_secs(self.timeout));
        if self.skip_tls {
            builder = builder
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true);
        }
        builder.build()
    }
}

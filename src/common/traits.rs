//! Interfaces for the external collaborators of the migration engine

use crate::config::RegistryEndpoint;
use crate::error::{ApiError, TransferError, TransportError};
use crate::transfer::ImageReference;
use async_trait::async_trait;
use std::fmt;

/// Source registry catalog query
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Repository names in the order the registry returned them
    async fn list_repositories(
        &self,
        endpoint: &RegistryEndpoint,
    ) -> Result<Vec<String>, TransportError>;
}

/// Source registry tag listing
#[async_trait]
pub trait TagLister: Send + Sync {
    /// Tags of one repository in the order the registry returned them
    async fn list_tags(
        &self,
        endpoint: &RegistryEndpoint,
        repository: &str,
    ) -> Result<Vec<String>, TransportError>;
}

/// Container engine that moves image data between registries
#[async_trait]
pub trait TransferEngine: Send + Sync {
    async fn pull(&self, image: &ImageReference) -> Result<(), TransferError>;

    async fn tag(&self, source: &ImageReference, target: &ImageReference)
    -> Result<(), TransferError>;

    async fn push(&self, image: &ImageReference) -> Result<(), TransferError>;
}

/// Repository role granted to a destination team
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamRole {
    Read,
    Write,
    Admin,
}

impl TeamRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRole::Read => "read",
            TeamRole::Write => "write",
            TeamRole::Admin => "admin",
        }
    }
}

impl fmt::Display for TeamRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Post-transfer configuration of destination repositories
#[async_trait]
pub trait DestinationConfigurator: Send + Sync {
    async fn set_visibility(
        &self,
        namespace: &str,
        repository: &str,
        public: bool,
    ) -> Result<(), ApiError>;

    async fn grant_team_role(
        &self,
        namespace: &str,
        repository: &str,
        team: &str,
        role: TeamRole,
    ) -> Result<(), ApiError>;
}

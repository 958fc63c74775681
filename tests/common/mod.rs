//! Recording fakes for the migration collaborators

#![allow(dead_code)]

use async_trait::async_trait;
use registry_migrator::common::{CatalogClient, DestinationConfigurator, TagLister, TeamRole, TransferEngine};
use registry_migrator::config::{Configuration, DestinationEndpoint, ImageEntry, RegistryEndpoint};
use registry_migrator::error::{ApiError, TransferError, TransferOperation, TransportError};
use registry_migrator::transfer::ImageReference;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Ordered log of every collaborator call, shared between fakes
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn record(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

#[derive(Clone, Default)]
pub struct FakeRegistry {
    pub journal: Journal,
    pub catalog: Vec<String>,
    pub tags: HashMap<String, Vec<String>>,
    pub failing: HashSet<String>,
}

impl FakeRegistry {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            ..Self::default()
        }
    }

    pub fn with_catalog(mut self, repositories: &[&str]) -> Self {
        self.catalog = repositories.iter().map(|name| name.to_string()).collect();
        self
    }

    pub fn with_tags(mut self, repository: &str, tags: &[&str]) -> Self {
        self.tags.insert(
            repository.to_string(),
            tags.iter().map(|tag| tag.to_string()).collect(),
        );
        self
    }

    pub fn failing(mut self, repository: &str) -> Self {
        self.failing.insert(repository.to_string());
        self
    }
}

#[async_trait]
impl TagLister for FakeRegistry {
    async fn list_tags(
        &self,
        _endpoint: &RegistryEndpoint,
        repository: &str,
    ) -> Result<Vec<String>, TransportError> {
        self.journal.record(format!("list_tags {}", repository));
        if self.failing.contains(repository) {
            return Err(TransportError::Status(format!(
                "Resource not found for tag listing: {}",
                repository
            )));
        }
        Ok(self.tags.get(repository).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl CatalogClient for FakeRegistry {
    async fn list_repositories(
        &self,
        _endpoint: &RegistryEndpoint,
    ) -> Result<Vec<String>, TransportError> {
        self.journal.record("list_repositories");
        if self.failing.contains("_catalog") {
            return Err(TransportError::Status("catalog unavailable".to_string()));
        }
        Ok(self.catalog.clone())
    }
}

/// Transfer engine that fails any step whose `"<op> <reference>"` is listed
#[derive(Clone, Default)]
pub struct FakeEngine {
    pub journal: Journal,
    pub failing: HashSet<String>,
}

impl FakeEngine {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            failing: HashSet::new(),
        }
    }

    pub fn failing(mut self, step: &str) -> Self {
        self.failing.insert(step.to_string());
        self
    }

    fn step(&self, operation: TransferOperation, entry: String, reference: String) -> Result<(), TransferError> {
        self.journal.record(entry.clone());
        if self.failing.contains(&entry) {
            Err(TransferError {
                operation,
                reference,
                reason: "exit status: 1".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TransferEngine for FakeEngine {
    async fn pull(&self, image: &ImageReference) -> Result<(), TransferError> {
        self.step(TransferOperation::Pull, format!("pull {}", image), image.to_string())
    }

    async fn tag(&self, source: &ImageReference, target: &ImageReference) -> Result<(), TransferError> {
        self.step(
            TransferOperation::Tag,
            format!("tag {} {}", source, target),
            source.to_string(),
        )
    }

    async fn push(&self, image: &ImageReference) -> Result<(), TransferError> {
        self.step(TransferOperation::Push, format!("push {}", image), image.to_string())
    }
}

#[derive(Clone, Default)]
pub struct FakeDestination {
    pub journal: Journal,
    pub failing: HashSet<String>,
}

impl FakeDestination {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            failing: HashSet::new(),
        }
    }

    pub fn failing(mut self, call: &str) -> Self {
        self.failing.insert(call.to_string());
        self
    }

    fn call(&self, entry: String, operation: &str) -> Result<(), ApiError> {
        self.journal.record(entry.clone());
        if self.failing.contains(&entry) {
            Err(ApiError::Status {
                operation: operation.to_string(),
                status: 403,
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DestinationConfigurator for FakeDestination {
    async fn set_visibility(&self, namespace: &str, repository: &str, public: bool) -> Result<(), ApiError> {
        self.call(
            format!("visibility {}/{} {}", namespace, repository, public),
            "making image public",
        )
    }

    async fn grant_team_role(
        &self,
        namespace: &str,
        repository: &str,
        team: &str,
        role: TeamRole,
    ) -> Result<(), ApiError> {
        self.call(
            format!("team {}/{} {} {}", namespace, repository, team, role),
            "assigning team to image",
        )
    }
}

pub fn image(source_name: &str, dest_name: &str, public: bool, admin_team: &str) -> ImageEntry {
    ImageEntry {
        source_name: source_name.to_string(),
        dest_name: dest_name.to_string(),
        admin_team: admin_team.to_string(),
        public,
    }
}

pub fn config(images: Vec<ImageEntry>) -> Configuration {
    let mut config = Configuration::new(
        RegistryEndpoint::new("https://docker.example.io", "admin", "secret"),
        DestinationEndpoint::new("acme").with_oauth_token("token"),
    );
    config.images = images;
    config
}

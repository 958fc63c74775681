//! Source registry client for the Docker Registry HTTP API v2
//!
//! Implements the read-only calls the migration needs:
//! - Catalog listing (GET /v2/_catalog, following `Link` pagination)
//! - Tag listing (GET /v2/{name}/tags/list)

use crate::common::{CatalogClient, TagLister};
use crate::config::{HttpSettings, RegistryEndpoint};
use crate::error::TransportError;
use crate::error::handlers::{HttpErrorHandler, NetworkErrorHandler};
use crate::logging::Logger;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::LINK;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    repositories: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct TagListResponse {
    #[serde(default)]
    tags: Option<Vec<String>>,
}

#[derive(Clone)]
pub struct SourceRegistryClient {
    client: Client,
    output: Logger,
}

impl SourceRegistryClient {
    pub fn new(client: Client, output: Logger) -> Self {
        Self { client, output }
    }

    pub fn from_settings(settings: &HttpSettings, output: Logger) -> reqwest::Result<Self> {
        Ok(Self::new(settings.build_client()?, output))
    }

    /// Absolute URL for an API path below the registry base URL
    pub fn api_url(endpoint: &RegistryEndpoint, path: &str) -> Result<Url, TransportError> {
        let base = endpoint.url.trim_end_matches('/');
        Url::parse(&format!("{}{}", base, path)).map_err(|e| TransportError::InvalidUrl {
            url: endpoint.url.clone(),
            reason: e.to_string(),
        })
    }

    async fn get(
        &self,
        endpoint: &RegistryEndpoint,
        url: &Url,
        operation: &str,
    ) -> Result<reqwest::Response, TransportError> {
        self.output.detail(&format!("GET {}", url));

        let response = self
            .client
            .get(url.clone())
            .basic_auth(&endpoint.username, Some(&endpoint.password))
            .send()
            .await
            .map_err(|e| NetworkErrorHandler::handle_network_error(&e, url.as_str(), operation))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            Err(HttpErrorHandler::handle_registry_error(
                status,
                &error_text,
                operation,
            ))
        }
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        url: &Url,
    ) -> Result<T, TransportError> {
        let body = response.text().await.map_err(|e| TransportError::Request {
            url: url.to_string(),
            reason: format!("Failed to read response body: {}", e),
        })?;
        serde_json::from_str(&body).map_err(|e| TransportError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Target of a `Link: <...>; rel="next"` header, resolved against the current URL
pub fn next_page(link_header: &str, current: &Url) -> Option<Url> {
    link_header.split(',').find_map(|link| {
        let mut parts = link.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| {
            let param = param.trim().replace(' ', "");
            param == "rel=\"next\"" || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        let target = target.strip_prefix('<')?.strip_suffix('>')?;
        current.join(target).ok()
    })
}

#[async_trait]
impl CatalogClient for SourceRegistryClient {
    async fn list_repositories(
        &self,
        endpoint: &RegistryEndpoint,
    ) -> Result<Vec<String>, TransportError> {
        self.output
            .verbose(&format!("Listing repositories from {}", endpoint.url));

        let mut repositories = Vec::new();
        let mut next = Some(Self::api_url(endpoint, "/v2/_catalog")?);

        while let Some(url) = next.take() {
            let response = self.get(endpoint, &url, "catalog listing").await?;
            next = response
                .headers()
                .get(LINK)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| next_page(value, &url));

            let page: CatalogResponse = Self::read_json(response, &url).await?;
            repositories.extend(page.repositories.unwrap_or_default());
        }

        self.output.verbose(&format!(
            "Found {} repositories in {}",
            repositories.len(),
            endpoint.url
        ));
        Ok(repositories)
    }
}

#[async_trait]
impl TagLister for SourceRegistryClient {
    async fn list_tags(
        &self,
        endpoint: &RegistryEndpoint,
        repository: &str,
    ) -> Result<Vec<String>, TransportError> {
        self.output
            .verbose(&format!("Listing tags for repository: {}", repository));

        let url = Self::api_url(endpoint, &format!("/v2/{}/tags/list", repository))?;
        let response = self.get(endpoint, &url, "tag listing").await?;
        let tags: TagListResponse = Self::read_json(response, &url).await?;
        let tags = tags.tags.unwrap_or_default();

        self.output.verbose(&format!(
            "Found {} tags for repository {}",
            tags.len(),
            repository
        ));
        Ok(tags)
    }
}

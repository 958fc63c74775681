//! Destination repository API client (quay.io API v1)

use crate::common::{DestinationConfigurator, TeamRole};
use crate::config::{DestinationEndpoint, HttpSettings};
use crate::error::ApiError;
use crate::error::handlers::{HttpErrorHandler, NetworkErrorHandler};
use crate::logging::Logger;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

pub struct QuayApiClient {
    client: Client,
    api_url: String,
    token: String,
    output: Logger,
}

impl QuayApiClient {
    pub fn new(client: Client, api_url: impl Into<String>, token: impl Into<String>, output: Logger) -> Self {
        let api_url: String = api_url.into();
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.into(),
            output,
        }
    }

    /// Client for a validated destination; the OAuth token must be present
    pub fn for_destination(
        destination: &DestinationEndpoint,
        settings: &HttpSettings,
        output: Logger,
    ) -> reqwest::Result<Self> {
        Ok(Self::new(
            settings.build_client()?,
            destination.api_url.clone(),
            destination.oauth_token.clone().unwrap_or_default(),
            output,
        ))
    }

    pub fn visibility_url(&self, namespace: &str, repository: &str) -> String {
        format!(
            "{}/api/v1/repository/{}/{}/changevisibility",
            self.api_url, namespace, repository
        )
    }

    pub fn team_permission_url(&self, namespace: &str, repository: &str, team: &str) -> String {
        format!(
            "{}/api/v1/repository/{}/{}/permissions/team/{}",
            self.api_url, namespace, repository, team
        )
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        body: serde_json::Value,
        operation: &str,
    ) -> Result<(), ApiError> {
        let response = request
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Request {
                operation: operation.to_string(),
                reason: NetworkErrorHandler::describe(&e, operation),
            })?;

        self.output
            .detail(&format!("{} returned {}", operation, response.status()));
        HttpErrorHandler::check_api_status(response.status(), operation)
    }
}

pub fn visibility_body(public: bool) -> serde_json::Value {
    json!({ "visibility": if public { "public" } else { "private" } })
}

pub fn role_body(role: TeamRole) -> serde_json::Value {
    json!({ "role": role.as_str() })
}

#[async_trait]
impl DestinationConfigurator for QuayApiClient {
    async fn set_visibility(
        &self,
        namespace: &str,
        repository: &str,
        public: bool,
    ) -> Result<(), ApiError> {
        let operation = if public {
            "making image public"
        } else {
            "making image private"
        };
        let url = self.visibility_url(namespace, repository);
        self.send(self.client.post(&url), visibility_body(public), operation)
            .await
    }

    async fn grant_team_role(
        &self,
        namespace: &str,
        repository: &str,
        team: &str,
        role: TeamRole,
    ) -> Result<(), ApiError> {
        let url = self.team_permission_url(namespace, repository, team);
        self.send(self.client.put(&url), role_body(role), "assigning team to image")
            .await
    }
}

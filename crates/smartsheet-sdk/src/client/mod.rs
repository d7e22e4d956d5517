//! Smartsheet API client for authenticated operations.
//!
//! This module provides the [`SmartsheetClient`] for making bearer-token
//! authenticated calls to the Smartsheet REST API, and the [`SmartsheetApi`]
//! trait that abstracts those calls for dependency injection.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;
use crate::models::{
    ApiResult, CreateWebhookRequest, GetSheetOptions, IndexResponse, Sheet, SheetId,
    UpdateWebhookRequest, Webhook, WebhookId,
};

/// Configuration for Smartsheet API client behavior.
///
/// Controls timeouts and the API endpoint. The base URL is overridable so
/// tests can point the client at a local mock server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User agent string for API requests
    pub user_agent: String,
    /// Request timeout duration
    pub timeout: Duration,
    /// Smartsheet API base URL
    pub api_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: "smartsheet-sdk/0.1.0".to_string(),
            timeout: Duration::from_secs(30),
            api_url: "https://api.smartsheet.com/2.0".to_string(),
        }
    }
}

impl ClientConfig {
    /// Set the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the API base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

/// The Smartsheet operations cell_watch consumes.
///
/// Kept object-safe so request handlers and the registrar can hold an
/// `Arc<dyn SmartsheetApi>` and tests can substitute recording doubles.
#[async_trait]
pub trait SmartsheetApi: Send + Sync {
    /// Fetch a sheet, optionally restricted to specific rows and columns.
    async fn get_sheet(
        &self,
        sheet_id: SheetId,
        options: &GetSheetOptions,
    ) -> Result<Sheet, ApiError>;

    /// List all webhook subscriptions owned by the caller.
    async fn list_webhooks(&self) -> Result<Vec<Webhook>, ApiError>;

    /// Create a new webhook subscription.
    async fn create_webhook(&self, request: &CreateWebhookRequest) -> Result<Webhook, ApiError>;

    /// Update an existing webhook subscription.
    async fn update_webhook(
        &self,
        webhook_id: WebhookId,
        request: &UpdateWebhookRequest,
    ) -> Result<Webhook, ApiError>;
}

/// Smartsheet REST API client.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct SmartsheetClient {
    http_client: reqwest::Client,
    access_token: String,
    config: ClientConfig,
}

impl SmartsheetClient {
    /// Create a new client from an access token and configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::HttpClientError` if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(access_token: impl Into<String>, config: ClientConfig) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http_client,
            access_token: access_token.into(),
            config,
        })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute a prepared request and decode a JSON response body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request
            .bearer_auth(&self.access_token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::Timeout
                } else {
                    ApiError::HttpClientError(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::AuthenticationFailed,
                StatusCode::NOT_FOUND => ApiError::NotFound,
                _ => {
                    let message = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unable to read error body".to_string());
                    ApiError::HttpError {
                        status: status.as_u16(),
                        message,
                    }
                }
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl SmartsheetApi for SmartsheetClient {
    async fn get_sheet(
        &self,
        sheet_id: SheetId,
        options: &GetSheetOptions,
    ) -> Result<Sheet, ApiError> {
        let url = format!("{}/sheets/{}", self.config.api_url, sheet_id);
        debug!(sheet_id = %sheet_id, "Fetching sheet");

        let request = self.http_client.get(&url).query(&options.to_query_pairs());
        self.execute(request).await
    }

    async fn list_webhooks(&self) -> Result<Vec<Webhook>, ApiError> {
        let url = format!("{}/webhooks", self.config.api_url);
        debug!("Listing webhook subscriptions");

        let request = self.http_client.get(&url).query(&[("includeAll", "true")]);
        let response: IndexResponse<Webhook> = self.execute(request).await?;
        Ok(response.data)
    }

    async fn create_webhook(&self, request: &CreateWebhookRequest) -> Result<Webhook, ApiError> {
        let url = format!("{}/webhooks", self.config.api_url);
        debug!(name = %request.name, scope_object_id = request.scope_object_id, "Creating webhook");

        let request = self.http_client.post(&url).json(request);
        let response: ApiResult<Webhook> = self.execute(request).await?;
        Ok(response.result)
    }

    async fn update_webhook(
        &self,
        webhook_id: WebhookId,
        request: &UpdateWebhookRequest,
    ) -> Result<Webhook, ApiError> {
        let url = format!("{}/webhooks/{}", self.config.api_url, webhook_id);
        debug!(webhook_id = %webhook_id, enabled = request.enabled, "Updating webhook");

        let request = self.http_client.put(&url).json(request);
        let response: ApiResult<Webhook> = self.execute(request).await?;
        Ok(response.result)
    }
}

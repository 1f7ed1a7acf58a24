//! Backend API client used as the production fetch collaborator.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::Fetcher;
use crate::config::Config;
use crate::error::{CacheError, FetchError, Result};

/// Header carrying the principal id to the backend and from clients
pub const PRINCIPAL_HEADER: &str = "x-user-id";

/// Query parameter carrying the scope id
pub const SCOPE_PARAM: &str = "propertyId";

// == Backend Fetcher ==
/// Reads the cached resource from the HotelEngPro backend over HTTP.
#[derive(Debug, Clone)]
pub struct BackendFetcher {
    client: reqwest::Client,
    resource_url: String,
}

impl BackendFetcher {
    /// Creates a fetcher for `{base_url}{resource_path}`.
    pub fn new(base_url: &str, resource_path: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CacheError::InvalidConfig(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            resource_url: format!("{}{}", base_url.trim_end_matches('/'), resource_path),
        })
    }

    /// Creates a fetcher from service configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.backend_url,
            &config.resource_path,
            Duration::from_secs(config.backend_timeout_secs),
        )
    }

    pub fn resource_url(&self) -> &str {
        &self.resource_url
    }
}

#[async_trait]
impl Fetcher<Value> for BackendFetcher {
    #[instrument(skip(self), fields(url = %self.resource_url))]
    async fn fetch(
        &self,
        principal: Option<&str>,
        scope: Option<&str>,
    ) -> std::result::Result<Value, FetchError> {
        let mut request = self.client.get(&self.resource_url);
        if let Some(scope) = scope {
            request = request.query(&[(SCOPE_PARAM, scope)]);
        }
        if let Some(principal) = principal {
            request = request.header(PRINCIPAL_HEADER, principal);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Transport(format!("request timed out: {}", e))
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        debug!(status = %status, "Backend responded");

        if !status.is_success() {
            let message = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(status = %status, error = %e, "Failed to read backend error body");
                    format!("unreadable response body: {}", e)
                }
            };
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::InvalidBody(e.to_string()))
    }
}

//! Search Backend REST Client
//!
//! HTTP client for the Elasticsearch field-statistics API.

use async_trait::async_trait;
use reqwest::Client;

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::field_stats::{FieldStatsRequest, FieldStatsResponse};
use crate::backend::FieldStatsClient;

/// Elasticsearch REST client
pub struct ElasticsearchClient {
    client: Client,
    config: ClientConfig,
}

/// Configuration for the backend client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the search backend (e.g., "http://localhost:9200")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Optional basic-auth user
    pub username: Option<String>,
    /// Optional basic-auth password
    pub password: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9200".to_string(),
            request_timeout_ms: 30_000,
            username: None,
            password: None,
        }
    }
}

impl ElasticsearchClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> BackendResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// URL of the field-statistics endpoint for an index pattern
    fn field_stats_url(&self, index: &str) -> String {
        format!(
            "{}/{}/_field_stats",
            self.base_url(),
            urlencoding::encode(index)
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.username {
            Some(user) => request.basic_auth(user, self.config.password.as_ref()),
            None => request,
        }
    }

    async fn error_from_response(response: reqwest::Response) -> BackendError {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        BackendError::ApiError {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl FieldStatsClient for ElasticsearchClient {
    async fn fetch_field_stats(
        &self,
        request: &FieldStatsRequest,
    ) -> BackendResult<FieldStatsResponse> {
        let url = self.field_stats_url(&request.index);
        tracing::debug!(url = %url, level = %request.level, "Requesting field stats");

        let response = self
            .authorize(self.client.post(&url))
            .query(&[("level", request.level.as_str())])
            .json(&request.body)
            .send()
            .await
            .map_err(BackendError::from_transport)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        response
            .json::<FieldStatsResponse>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn ping(&self) -> BackendResult<()> {
        let response = self
            .authorize(self.client.get(self.base_url()))
            .send()
            .await
            .map_err(BackendError::from_transport)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:9200");
        assert_eq!(config.request_timeout_ms, 30_000);
        assert!(config.username.is_none());
    }

    #[test]
    fn test_field_stats_url_encodes_pattern() {
        let client = ElasticsearchClient::new(ClientConfig {
            base_url: "http://es:9200/".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            client.field_stats_url("logstash-*"),
            "http://es:9200/logstash-%2A/_field_stats"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unavailable() {
        // Port 9 (discard) is closed on test hosts
        let client = ElasticsearchClient::new(ClientConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_ms: 2_000,
            ..Default::default()
        })
        .unwrap();

        let request = FieldStatsRequest::for_field("*", "time", Default::default());
        let err = client.fetch_field_stats(&request).await.unwrap_err();
        assert!(matches!(
            err,
            BackendError::Unavailable | BackendError::Timeout | BackendError::Request(_)
        ));
    }
}

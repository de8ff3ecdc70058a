use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use super::endpoints::Endpoints;
use super::types::*;
use crate::app::time_range::UsagePeriod;

/// Failure of a single panel request, surfaced to the view as-is
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("failed to reach {url}: {message}")]
    Transport { url: String, message: String },

    #[error("HTTP error! status: {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("request was cancelled")]
    Cancelled,
}

impl FetchError {
    /// Network-level failure (as opposed to a server answer)
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }
}

/// Whole-request limit; a hung request would otherwise hold its cache key
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Panel REST API client
#[derive(Debug, Clone)]
pub struct PanelClient {
    endpoints: Endpoints,
    client: HttpClient,
}

impl PanelClient {
    pub fn new(endpoints: Endpoints) -> anyhow::Result<Self> {
        Self::with_timeout(endpoints, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(endpoints: Endpoints, timeout: Duration) -> anyhow::Result<Self> {
        let client = HttpClient::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self::with_http_client(endpoints, client))
    }

    pub fn with_http_client(endpoints: Endpoints, client: HttpClient) -> Self {
        Self { endpoints, client }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }

    /// GET a JSON document
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self.send(url).await?;
        response.json().await.map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// GET a plain-text body
    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.send(url).await?;
        response.text().await.map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    pub async fn get_user_info(&self) -> Result<UserInfo, FetchError> {
        self.get_json(self.endpoints.info_url().as_str()).await
    }

    /// Raw `/links` body; filtering happens in the caller
    pub async fn get_links_text(&self) -> Result<String, FetchError> {
        self.get_text(self.endpoints.links_url().as_str()).await
    }

    pub async fn get_usage(
        &self,
        start: DateTime<Utc>,
        period: UsagePeriod,
    ) -> Result<ChartData, FetchError> {
        self.get_json(self.endpoints.usage_url(start, period).as_str())
            .await
    }

    pub async fn get_apps(&self) -> Result<Vec<AppClient>, FetchError> {
        self.get_json(self.endpoints.apps_url().as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, PanelClient) {
        let server = MockServer::start().await;
        let endpoints =
            Endpoints::from_subscription_url(&format!("{}/sub/token", server.uri()), None)
                .unwrap();
        (server, PanelClient::new(endpoints).unwrap())
    }

    #[tokio::test]
    async fn test_get_user_info() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/sub/token/info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "username": "bob",
                "status": "active",
                "used_traffic": 1024,
                "data_limit": 0
            })))
            .mount(&server)
            .await;

        let user = client.get_user_info().await.unwrap();
        assert_eq!(user.username, "bob");
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.used_traffic, 1024);
    }

    #[tokio::test]
    async fn test_get_usage_sends_query() {
        let (server, client) = setup().await;
        let start = chrono::TimeZone::with_ymd_and_hms(&Utc, 2025, 1, 1, 0, 0, 0).unwrap();

        Mock::given(method("GET"))
            .and(path("/sub/token/usage"))
            .and(query_param("start", "2025-01-01T00:00:00.000Z"))
            .and(query_param("period", "day"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "period": "day",
                "start": "2025-01-01T00:00:00Z",
                "end": "2025-01-08T00:00:00Z",
                "stats": {"bob": [{"period_start": "2025-01-01T00:00:00Z", "total_traffic": 42}]}
            })))
            .mount(&server)
            .await;

        let chart = client.get_usage(start, UsagePeriod::Day).await.unwrap();
        assert_eq!(chart.total_traffic(), 42);
    }

    #[tokio::test]
    async fn test_status_error_is_typed() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/sub/token/apps"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client.get_apps().await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert_eq!(err.to_string(), "HTTP error! status: 404");
        assert!(!err.is_transport());
    }

    #[tokio::test]
    async fn test_decode_error() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/sub/token/info"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client.get_user_info().await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_transport_error() {
        let endpoints =
            Endpoints::from_subscription_url("http://127.0.0.1:1/sub/token", None).unwrap();
        let client = PanelClient::new(endpoints).unwrap();

        let err = client.get_links_text().await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_slow_response_times_out_as_transport() {
        let server = MockServer::start().await;
        let endpoints =
            Endpoints::from_subscription_url(&format!("{}/sub/token", server.uri()), None)
                .unwrap();
        let client = PanelClient::with_timeout(endpoints, Duration::from_millis(200)).unwrap();

        Mock::given(method("GET"))
            .and(path("/sub/token/info"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"username": "late"}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let err = client.get_user_info().await.unwrap_err();
        assert!(err.is_transport());
    }
}

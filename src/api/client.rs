//! Backend REST API client.

use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::resource::Resource;
use crate::error::{AppError, Result};
use crate::models::{DashboardSummary, RecordId};

/// Path of the aggregate counters endpoint.
pub const SUMMARY_PATH: &str = "/api/dashboard-summary";

/// HTTP client for the dashboard backend.
///
/// Wraps a shared `reqwest::Client`, so clones are cheap and share a
/// connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Backend root (e.g., "http://localhost:8000")
    /// * `timeout` - Per-request timeout; `None` waits indefinitely
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    /// Backend root without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{base}{path}", base = self.base_url)
    }

    /// Fetch the dashboard counters.
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary> {
        self.get_json(SUMMARY_PATH, None).await
    }

    /// List a resource, narrowed by its filter parameter when `filter` is set.
    ///
    /// Resources without a filter parameter ignore `filter`.
    pub async fn list<R: Resource>(&self, filter: Option<&RecordId>) -> Result<Vec<R::Record>> {
        let query = R::FILTER_PARAM.zip(filter).map(|(param, id)| (param, id.as_str()));
        self.get_json(R::PATH, query).await
    }

    /// Create a record. The response body is not inspected.
    pub async fn create<R: Resource>(&self, body: &R::New) -> Result<()> {
        self.post_json(R::PATH, body).await?;
        tracing::info!("Created {} via {}", R::LABEL, R::PATH);
        Ok(())
    }

    /// Check that the backend answers the summary endpoint.
    pub async fn test_connection(&self) -> Result<()> {
        let response = self.client.get(self.url(SUMMARY_PATH)).send().await?;
        check_status(response).await.map(|_| ())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: Option<(&str, &str)>) -> Result<T> {
        let mut request = self.client.get(self.url(path));
        if let Some(pair) = query {
            request = request.query(&[pair]);
        }
        tracing::debug!("GET {path} {query:?}");

        let response = check_status(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        tracing::debug!("POST {path}");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        check_status(response).await
    }
}

/// Turn non-success statuses into `AppError::Status`.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!("Backend returned {status}: {body}");
    Err(AppError::Status {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8000/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url(SUMMARY_PATH), "http://localhost:8000/api/dashboard-summary");
    }

    #[test]
    fn test_client_with_timeout() {
        let client = ApiClient::new(" https://ops.example.com ", Some(Duration::from_secs(5))).unwrap();
        assert_eq!(client.url("/api/pos"), "https://ops.example.com/api/pos");
    }
}

//! # GitHub Label API Client
//!
//! [`LabelClient`] implementation backed by the GitHub REST API. Issues and
//! pull requests share the `/issues/{number}/labels` endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client as HttpClient, Method, Response};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::client::{ItemRef, LabelClient};
use crate::error::LabelClientError;

/// Default GitHub API base URL.
pub const GITHUB_API_URL: &str = "https://api.github.com";

const PER_PAGE: usize = 100;

/// GitHub API client for label operations.
#[derive(Debug, Clone)]
pub struct GitHubLabelClient {
    http_client: HttpClient,
    base_url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct GitHubError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GitHubLabel {
    name: String,
}

impl GitHubLabelClient {
    /// Create a client against `base_url` (normally [`GITHUB_API_URL`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        token: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LabelClientError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );

        let http_client = HttpClient::builder()
            .user_agent("lifecycle-labeler/1.0")
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn labels_url(&self, item: &ItemRef) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}/labels",
            self.base_url, item.owner, item.repo, item.number
        )
    }

    /// Send an authenticated request and turn non-success statuses into errors.
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response, LabelClientError> {
        let mut request = self
            .http_client
            .request(method, url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token));

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if matches!(status.as_u16(), 403 | 429) {
            if let Some(reset_in) = rate_limit_reset(&response) {
                return Err(LabelClientError::RateLimited { reset_in });
            }
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<GitHubError>(&text)
            .map(|e| e.message)
            .unwrap_or(text);
        Err(LabelClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Time until the rate limit resets, if the response says it is exhausted.
fn rate_limit_reset(response: &Response) -> Option<Duration> {
    let headers = response.headers();
    let remaining = headers
        .get("x-ratelimit-remaining")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok());
    if remaining != Some(0) {
        return None;
    }

    headers
        .get("x-ratelimit-reset")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse::<i64>().ok())
        .map(|reset_timestamp| {
            let now = chrono::Utc::now().timestamp();
            #[allow(clippy::cast_sign_loss)]
            let seconds_until_reset = (reset_timestamp - now).max(0) as u64;
            Duration::from_secs(seconds_until_reset)
        })
}

#[async_trait]
impl LabelClient for GitHubLabelClient {
    #[instrument(skip(self), fields(item = %item))]
    async fn fetch_labels(&self, item: &ItemRef) -> Result<Vec<String>, LabelClientError> {
        let url = self.labels_url(item);
        let mut labels = Vec::new();

        for page in 1.. {
            let page_url = format!("{url}?per_page={PER_PAGE}&page={page}");
            let response = self.send(Method::GET, &page_url, None).await?;
            let text = response.text().await?;
            let batch: Vec<GitHubLabel> = serde_json::from_str(&text)?;
            let done = batch.len() < PER_PAGE;
            labels.extend(batch.into_iter().map(|l| l.name));
            if done {
                break;
            }
        }

        debug!("Retrieved {} labels for {}", labels.len(), item);
        Ok(labels)
    }

    #[instrument(skip(self), fields(item = %item))]
    async fn add_label(&self, item: &ItemRef, label: &str) -> Result<(), LabelClientError> {
        let body = serde_json::json!({ "labels": [label] });
        self.send(Method::POST, &self.labels_url(item), Some(body))
            .await?;
        debug!("Added label '{}' to {}", label, item);
        Ok(())
    }

    #[instrument(skip(self), fields(item = %item))]
    async fn remove_label(&self, item: &ItemRef, label: &str) -> Result<(), LabelClientError> {
        let url = format!("{}/{}", self.labels_url(item), urlencoding::encode(label));
        self.send(Method::DELETE, &url, None).await?;
        debug!("Removed label '{}' from {}", label, item);
        Ok(())
    }
}

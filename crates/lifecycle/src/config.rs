//! Configuration for the lifecycle service.

use std::env;
use std::time::Duration;

use crate::github::GITHUB_API_URL;

/// Lifecycle webhook service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port.
    pub port: u16,
    /// GitHub webhook secret for signature verification.
    pub webhook_secret: Option<String>,
    /// GitHub token for label API calls.
    pub github_token: Option<String>,
    /// GitHub API base URL (override for GitHub Enterprise).
    pub github_api_url: String,
    /// Per-request timeout for GitHub API calls.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: env::var("LIFECYCLE_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8080),
            webhook_secret: env::var("GITHUB_WEBHOOK_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),
            github_token: env::var("GITHUB_TOKEN").ok().filter(|s| !s.is_empty()),
            github_api_url: env::var("GITHUB_API_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| GITHUB_API_URL.to_string()),
            request_timeout: Duration::from_secs(
                env::var("GITHUB_REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }
}

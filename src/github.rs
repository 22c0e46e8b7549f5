use crate::error::{GitHubPrsError, Result};
use crate::types::SearchResult;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_AUTHOR: &str = "Glitchyi";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the outbound search call
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub api_base_url: String,
    /// Login whose pull requests are listed
    pub author: String,
    pub timeout: Duration,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    search_url: Url,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent("GitHub PRs Server/0.1.0")
            .timeout(config.timeout)
            .build()?;

        let mut search_url = Url::parse(&format!(
            "{}/search/issues",
            config.api_base_url.trim_end_matches('/')
        ))?;
        search_url
            .query_pairs_mut()
            .append_pair("q", &format!("type:pr author:{}", config.author));

        Ok(GitHubClient { client, search_url })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    /// Single GET, body decoded as JSON. The response is consumed by the
    /// body read, so the connection is released on every path.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GitHubPrsError::ApiError(format!(
                "API request failed with status {}: {}",
                status, error_text
            )));
        }

        let body = response.bytes().await?;
        debug!("Fetched {} bytes from {}", body.len(), url);

        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch the configured author's pull requests
    pub async fn search_pull_requests(&self) -> Result<SearchResult> {
        self.get_json(&self.search_url).await
    }
}

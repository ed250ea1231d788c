//! GitHub API client implementation

use crate::config::Config;
use crate::core::{GhpmError, GhpmResult};
use crate::di::traits::{ConfigProvider, ReleaseResolver};
use crate::github::types::{GitHubRelease, RateLimit, ReleaseSnapshot, RepoTarget};
use async_trait::async_trait;
use reqwest::{header, Client as HttpClient, StatusCode};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;

/// GitHub API client
pub struct GitHubClient {
    http_client: HttpClient,
    api_url: String,
    has_token: bool,
    rate_limit: Mutex<Option<RateLimit>>,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(config: &Config) -> GhpmResult<Self> {
        Self::from_provider(config)
    }

    /// Create a client from any configuration provider
    pub fn from_provider(config: &dyn ConfigProvider) -> GhpmResult<Self> {
        let token = config.github_token();

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("ghpm/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );

        if let Some(ref token) = token {
            let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| GhpmError::Config(format!("Invalid GitHub token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| GhpmError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_url: config.github_api_url().trim_end_matches('/').to_string(),
            has_token: token.is_some(),
            rate_limit: Mutex::new(None),
        })
    }

    /// Get the latest release for a repository
    pub async fn get_latest_release(&self, target: &RepoTarget) -> GhpmResult<GitHubRelease> {
        let url = format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url,
            urlencoding::encode(&target.owner),
            urlencoding::encode(&target.repo)
        );

        self.check_rate_limit().await?;

        tracing::debug!(%url, "requesting latest release");
        let response = self.http_client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                GhpmError::unreachable(format!("GitHub API request timed out: {}", url))
            } else {
                GhpmError::unreachable(format!("GitHub API request failed: {}", e))
            }
        })?;

        self.update_rate_limit(&response).await;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GhpmError::NotFound(target.to_string()));
        }
        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "GitHub API returned an error");
            return Err(GhpmError::http_status(status.as_u16(), &url));
        }

        response
            .json::<GitHubRelease>()
            .await
            .map_err(|e| GhpmError::Transport {
                status: Some(status.as_u16()),
                message: format!("Failed to parse GitHub API response: {}", e),
            })
    }

    /// Remaining budget as last reported by GitHub
    pub async fn rate_limit(&self) -> Option<RateLimit> {
        *self.rate_limit.lock().await
    }

    /// Check if we're within rate limits
    async fn check_rate_limit(&self) -> GhpmResult<()> {
        let Some(limit) = *self.rate_limit.lock().await else {
            return Ok(());
        };

        if limit.remaining == 0 {
            // A reset beyond what SystemTime can represent is treated as unknown
            let Some(reset_time) = UNIX_EPOCH.checked_add(Duration::from_secs(limit.reset)) else {
                return Ok(());
            };
            if let Ok(wait) = reset_time.duration_since(SystemTime::now()) {
                return Err(GhpmError::Transport {
                    status: Some(403),
                    message: format!(
                        "GitHub API rate limit exceeded. Reset in {} seconds.{}",
                        wait.as_secs(),
                        if self.has_token {
                            ""
                        } else {
                            " Consider setting GITHUB_TOKEN to increase rate limit to 5000/hour."
                        }
                    ),
                });
            }
        }

        Ok(())
    }

    /// Update rate limit from response headers
    async fn update_rate_limit(&self, response: &reqwest::Response) {
        let header_u64 = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
        };

        if let (Some(remaining), Some(reset)) = (
            header_u64("x-ratelimit-remaining"),
            header_u64("x-ratelimit-reset"),
        ) {
            *self.rate_limit.lock().await = Some(RateLimit { remaining, reset });
        }
    }
}

#[async_trait]
impl ReleaseResolver for GitHubClient {
    async fn resolve(&self, target: &RepoTarget) -> GhpmResult<ReleaseSnapshot> {
        let release = self.get_latest_release(target).await?;
        Ok(ReleaseSnapshot::from(release))
    }
}

//! Trait definitions for dependency injection

use crate::core::GhpmResult;
use crate::github::types::{ReleaseSnapshot, RepoTarget};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Trait for configuration access
///
/// Provides read-only access to application configuration.
/// Implementations should be thread-safe (Send + Sync).
pub trait ConfigProvider: Send + Sync {
    /// Base URL of the GitHub REST API, without a trailing slash
    fn github_api_url(&self) -> &str;

    /// Token sent with API requests, if any
    fn github_token(&self) -> Option<String>;

    /// Timeout for network requests
    fn request_timeout(&self) -> Duration;

    /// Location of packages.toml
    fn manifest_path(&self) -> GhpmResult<PathBuf>;
}

/// Resolves a repository to its latest release.
///
/// One call is one upstream request: no caching, no retries.
#[async_trait]
pub trait ReleaseResolver: Send + Sync {
    /// Latest release of `target`.
    ///
    /// Fails with `GhpmError::NotFound` when the repository has no release and
    /// with `GhpmError::Transport` for any other failed request.
    async fn resolve(&self, target: &RepoTarget) -> GhpmResult<ReleaseSnapshot>;
}

/// Downloads a release asset.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Download `url` into `dest_dir`, named after the URL's last path
    /// segment. Returns the path of the complete file.
    async fn fetch(&self, url: &str, dest_dir: &Path) -> GhpmResult<PathBuf>;
}

/// Line-oriented conversation with the operator.
pub trait Prompter {
    /// Show a line of text.
    fn say(&mut self, line: &str) -> GhpmResult<()>;

    /// Show `prompt` and read one answer. `None` means input is exhausted.
    fn ask(&mut self, prompt: &str) -> GhpmResult<Option<String>>;
}

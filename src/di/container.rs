//! Service container for dependency injection

use super::traits::{AssetFetcher, ConfigProvider, ReleaseResolver};
use crate::config::Config;
use crate::core::GhpmResult;
use crate::github::GitHubClient;
use crate::package::fetcher::HttpFetcher;
use std::sync::Arc;

/// Service container for dependency injection
///
/// Holds the services a command needs as trait objects, so tests can swap
/// the GitHub client and the downloader for in-memory mocks.
///
/// # Example (Testing)
///
/// ```
/// use ghpm::di::{ServiceContainer, mocks::*};
/// use std::sync::Arc;
///
/// let config = Arc::new(MockConfigProvider::default());
/// let resolver = Arc::new(MockReleaseResolver::new());
/// let fetcher = Arc::new(MockFetcher::new());
///
/// let container = ServiceContainer::with_providers(config, resolver, fetcher);
/// assert_eq!(container.config().github_api_url(), "http://127.0.0.1:1");
/// ```
#[derive(Clone)]
pub struct ServiceContainer {
    pub config: Arc<dyn ConfigProvider>,
    pub resolver: Arc<dyn ReleaseResolver>,
    pub fetcher: Arc<dyn AssetFetcher>,
}

impl ServiceContainer {
    /// Create a new service container with production implementations
    ///
    /// Loads config from disk (creating the default file on first run) and
    /// builds the HTTP clients.
    pub fn new() -> GhpmResult<Self> {
        Self::from_config(Config::load()?)
    }

    /// Create a service container from an already loaded config
    pub fn from_config(config: Config) -> GhpmResult<Self> {
        let resolver = GitHubClient::new(&config)?;
        let fetcher = HttpFetcher::new(&config)?;

        Ok(Self {
            config: Arc::new(config),
            resolver: Arc::new(resolver),
            fetcher: Arc::new(fetcher),
        })
    }

    /// Create a service container with custom provider implementations
    pub fn with_providers(
        config: Arc<dyn ConfigProvider>,
        resolver: Arc<dyn ReleaseResolver>,
        fetcher: Arc<dyn AssetFetcher>,
    ) -> Self {
        Self {
            config,
            resolver,
            fetcher,
        }
    }

    /// Get the configuration provider
    pub fn config(&self) -> &dyn ConfigProvider {
        self.config.as_ref()
    }

    /// Get the release resolver
    pub fn resolver(&self) -> &dyn ReleaseResolver {
        self.resolver.as_ref()
    }

    /// Get the asset fetcher
    pub fn fetcher(&self) -> &dyn AssetFetcher {
        self.fetcher.as_ref()
    }
}

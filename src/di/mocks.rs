//! Mock implementations of service traits for testing

use super::traits::{AssetFetcher, ConfigProvider, Prompter, ReleaseResolver};
use crate::core::{GhpmError, GhpmResult};
use crate::github::types::{ReleaseSnapshot, RepoTarget};
use crate::package::fetcher::asset_file_name;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock configuration provider for testing
///
/// # Example
///
/// ```
/// use ghpm::di::mocks::MockConfigProvider;
/// use ghpm::di::ConfigProvider;
/// use std::path::PathBuf;
///
/// let mut config = MockConfigProvider::default();
/// config.manifest_path = PathBuf::from("/tmp/test/packages.toml");
///
/// assert_eq!(config.manifest_path().unwrap(), PathBuf::from("/tmp/test/packages.toml"));
/// ```
#[derive(Clone)]
pub struct MockConfigProvider {
    pub api_url: String,
    pub token: Option<String>,
    pub request_timeout: Duration,
    pub manifest_path: PathBuf,
}

impl Default for MockConfigProvider {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:1".to_string(),
            token: None,
            request_timeout: Duration::from_secs(5),
            manifest_path: PathBuf::from("/tmp/ghpm-test/packages.toml"),
        }
    }
}

impl MockConfigProvider {
    /// Config pointing at a specific manifest
    pub fn with_manifest(path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: path.into(),
            ..Default::default()
        }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn github_api_url(&self) -> &str {
        &self.api_url
    }

    fn github_token(&self) -> Option<String> {
        self.token.clone()
    }

    fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    fn manifest_path(&self) -> GhpmResult<PathBuf> {
        Ok(self.manifest_path.clone())
    }
}

/// Canned outcome for one repository.
#[derive(Clone)]
enum MockRelease {
    Found(ReleaseSnapshot),
    NoReleases,
    Status(u16),
}

/// Mock release resolver for testing
///
/// Unknown targets resolve to `NotFound`. Every call is recorded.
///
/// # Example
///
/// ```
/// use ghpm::di::mocks::MockReleaseResolver;
///
/// let resolver = MockReleaseResolver::new();
/// resolver.add_release("acme/widget", "v2", vec!["https://example.com/widget.bin".to_string()]);
/// ```
#[derive(Clone, Default)]
pub struct MockReleaseResolver {
    releases: Arc<Mutex<HashMap<String, MockRelease>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockReleaseResolver {
    /// Create a new mock resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `target` resolve to `tag` with the given asset URLs
    pub fn add_release(&self, target: &str, tag: &str, assets: Vec<String>) {
        self.releases.lock().unwrap().insert(
            target.to_string(),
            MockRelease::Found(ReleaseSnapshot {
                tag: tag.to_string(),
                assets,
            }),
        );
    }

    /// Make `target` report that it has no releases
    pub fn add_not_found(&self, target: &str) {
        self.releases
            .lock()
            .unwrap()
            .insert(target.to_string(), MockRelease::NoReleases);
    }

    /// Make `target` fail with an HTTP status
    pub fn add_failure(&self, target: &str, status: u16) {
        self.releases
            .lock()
            .unwrap()
            .insert(target.to_string(), MockRelease::Status(status));
    }

    /// Targets resolved so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReleaseResolver for MockReleaseResolver {
    async fn resolve(&self, target: &RepoTarget) -> GhpmResult<ReleaseSnapshot> {
        let key = target.to_string();
        self.calls.lock().unwrap().push(key.clone());

        let release = self.releases.lock().unwrap().get(&key).cloned();
        match release {
            Some(MockRelease::Found(snapshot)) => Ok(snapshot),
            Some(MockRelease::Status(status)) => Err(GhpmError::http_status(
                status,
                &format!("mock://{}/releases/latest", key),
            )),
            Some(MockRelease::NoReleases) | None => Err(GhpmError::NotFound(key)),
        }
    }
}

/// Mock asset fetcher for testing
///
/// Serves registered bytes and writes them into the destination directory
/// under the same name the real fetcher would use.
#[derive(Clone, Default)]
pub struct MockFetcher {
    assets: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MockFetcher {
    /// Create a new mock fetcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the bytes served for `url`
    pub fn add_asset(&self, url: &str, content: Vec<u8>) {
        self.assets
            .lock()
            .unwrap()
            .insert(url.to_string(), content);
    }
}

#[async_trait]
impl AssetFetcher for MockFetcher {
    async fn fetch(&self, url: &str, dest_dir: &Path) -> GhpmResult<PathBuf> {
        let file_name = asset_file_name(url)?;
        let content = self
            .assets
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| GhpmError::http_status(404, url))?;

        let dest = dest_dir.join(file_name);
        std::fs::write(&dest, content)?;
        Ok(dest)
    }
}

/// Prompter that answers from a script and records everything shown.
///
/// Once the script runs out, `ask` reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    /// Lines passed to `say`
    pub said: Vec<String>,
    /// Prompts passed to `ask`
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn say(&mut self, line: &str) -> GhpmResult<()> {
        self.said.push(line.to_string());
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> GhpmResult<Option<String>> {
        self.asked.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }
}

use crate::core::path::{config_file, default_manifest_path, ensure_dir, parent_dir};
use crate::core::{GhpmError, GhpmResult};
use crate::di::ConfigProvider;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// GitHub API settings
    #[serde(default)]
    pub github: GitHubConfig,

    /// Timeout applied to API requests and to connecting/reading downloads
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Manifest location (defaults to packages.toml beside the executable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Base URL of the GitHub REST API
    #[serde(default = "default_github_api_url")]
    pub api_url: String,

    /// Personal access token. The GITHUB_TOKEN environment variable wins over this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_github_api_url(),
            token: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github: GitHubConfig::default(),
            request_timeout_secs: default_request_timeout_secs(),
            manifest_path: None,
        }
    }
}

impl Config {
    /// Load config from platform-specific config directory, creating default if it doesn't exist
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\ghpm\config.yaml
    /// - Linux: ~/.config/ghpm/config.yaml
    /// - macOS: ~/Library/Application Support/ghpm/config.yaml
    pub fn load() -> GhpmResult<Self> {
        Self::load_from(&config_file()?)
    }

    /// Load config from an explicit path, creating the default there if it doesn't exist
    pub fn load_from(config_path: &Path) -> GhpmResult<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(config_path)?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| GhpmError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save config to platform-specific config directory
    pub fn save(&self) -> GhpmResult<()> {
        self.save_to(&config_file()?)
    }

    pub fn save_to(&self, config_path: &Path) -> GhpmResult<()> {
        ensure_dir(parent_dir(config_path))?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| GhpmError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(config_path, content)?;
        Ok(())
    }

    /// Token from GITHUB_TOKEN, falling back to the config file
    pub fn resolved_token(&self) -> Option<String> {
        std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.github.token.clone())
    }

    /// Get the manifest path
    pub fn get_manifest_path(&self) -> GhpmResult<PathBuf> {
        if let Some(ref path) = self.manifest_path {
            Ok(PathBuf::from(path))
        } else {
            default_manifest_path()
        }
    }
}

// Implement ConfigProvider trait
impl ConfigProvider for Config {
    fn github_api_url(&self) -> &str {
        self.github.api_url.trim_end_matches('/')
    }

    fn github_token(&self) -> Option<String> {
        self.resolved_token()
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn manifest_path(&self) -> GhpmResult<PathBuf> {
        self.get_manifest_path()
    }
}

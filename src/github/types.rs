//! GitHub API type definitions

use crate::core::{GhpmError, GhpmResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// GitHub release information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
    #[serde(default)]
    pub published_at: Option<String>,
}

/// GitHub release asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
    #[serde(default)]
    pub size: u64,
}

/// Latest release of a repository, as far as installing is concerned.
///
/// Ephemeral: produced by one resolution and dropped after use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSnapshot {
    pub tag: String,
    /// Asset download URLs in the order the provider listed them
    pub assets: Vec<String>,
}

impl From<GitHubRelease> for ReleaseSnapshot {
    fn from(release: GitHubRelease) -> Self {
        Self {
            tag: release.tag_name,
            assets: release
                .assets
                .into_iter()
                .map(|asset| asset.browser_download_url)
                .collect(),
        }
    }
}

/// An `owner/repo` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoTarget {
    pub owner: String,
    pub repo: String,
}

impl RepoTarget {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> GhpmResult<Self> {
        let target = Self {
            owner: owner.into(),
            repo: repo.into(),
        };
        if !valid_part(&target.owner) || !valid_part(&target.repo) {
            return Err(GhpmError::InvalidTarget(target.to_string()));
        }
        Ok(target)
    }

    /// Parse `owner/repo`. Exactly one separator, both halves non-empty.
    pub fn parse(identifier: &str) -> GhpmResult<Self> {
        let mut parts = identifier.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(repo), None) if valid_part(owner) && valid_part(repo) => {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(GhpmError::InvalidTarget(identifier.to_string())),
        }
    }
}

fn valid_part(part: &str) -> bool {
    !part.is_empty() && !part.contains('/') && !part.chars().any(char::is_whitespace)
}

impl FromStr for RepoTarget {
    type Err = GhpmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// GitHub API rate limit information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub remaining: u64,
    /// Unix timestamp at which the budget refills
    pub reset: u64,
}

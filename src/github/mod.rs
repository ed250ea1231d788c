//! GitHub integration
//!
//! Resolves `owner/repo` targets to their latest release: the tag and the
//! download URLs of the release assets.

pub mod client;
pub mod types;

pub use client::GitHubClient;
pub use types::{GitHubRelease, ReleaseAsset, ReleaseSnapshot, RepoTarget};

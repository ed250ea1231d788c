//! Streaming download of release assets.
//!
//! The body is written chunk by chunk into a hidden temporary file next to
//! the destination and renamed into place once complete, so the destination
//! either holds the whole asset or does not exist.

use crate::config::Config;
use crate::core::{GhpmError, GhpmResult};
use crate::di::traits::{AssetFetcher, ConfigProvider};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client as HttpClient, Url};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name an asset URL is saved under: its last path segment,
/// percent-decoded.
pub fn asset_file_name(url: &str) -> GhpmResult<String> {
    let parsed =
        Url::parse(url).map_err(|e| GhpmError::InvalidAsset(format!("{}: {}", url, e)))?;

    let segment = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();
    let name = urlencoding::decode(segment)
        .map_err(|e| GhpmError::InvalidAsset(format!("{}: {}", url, e)))?;

    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
    {
        return Err(GhpmError::InvalidAsset(format!(
            "{} does not end in a file name",
            url
        )));
    }

    Ok(name.into_owned())
}

/// Downloads assets over HTTP.
pub struct HttpFetcher {
    http_client: HttpClient,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> GhpmResult<Self> {
        Self::from_provider(config)
    }

    pub fn from_provider(config: &dyn ConfigProvider) -> GhpmResult<Self> {
        // No overall timeout: large assets may legitimately take minutes.
        let http_client = HttpClient::builder()
            .user_agent(concat!("ghpm/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(config.request_timeout())
            .read_timeout(config.request_timeout())
            .build()
            .map_err(|e| GhpmError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }

    /// Download `url` into `dest_dir`.
    pub async fn download(&self, url: &str, dest_dir: &Path) -> GhpmResult<PathBuf> {
        let file_name = asset_file_name(url)?;
        let dest = dest_dir.join(&file_name);

        let mut response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| GhpmError::unreachable(format!("Failed to download {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(GhpmError::http_status(response.status().as_u16(), url));
        }

        let write_error = |source: std::io::Error| GhpmError::Write {
            path: dest.clone(),
            source,
        };

        let mut part = tempfile::Builder::new()
            .prefix(".ghpm-")
            .suffix(".part")
            .tempfile_in(dest_dir)
            .map_err(write_error)?;

        let progress = progress_bar(response.content_length(), &file_name);
        let mut written: u64 = 0;

        loop {
            let chunk = match response.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => {
                    progress.abandon();
                    return Err(GhpmError::unreachable(format!(
                        "Download of {} interrupted: {}",
                        url, e
                    )));
                }
            };
            part.write_all(&chunk).map_err(write_error)?;
            written += chunk.len() as u64;
            progress.set_position(written);
        }

        part.flush().map_err(write_error)?;
        part.persist(&dest).map_err(|e| write_error(e.error))?;
        progress.finish_and_clear();

        // Temp files are created owner-only; give the asset ordinary permissions.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&dest, std::fs::Permissions::from_mode(0o644))
                .map_err(write_error)?;
        }

        tracing::debug!(path = %dest.display(), bytes = written, "asset downloaded");
        Ok(dest)
    }
}

fn progress_bar(len: Option<u64>, file_name: &str) -> ProgressBar {
    let progress = match len {
        Some(len) => {
            let progress = ProgressBar::new(len);
            if let Ok(style) = ProgressStyle::with_template(
                "{msg} [{elapsed_precise}] {bar:40.cyan/blue} {bytes}/{total_bytes}",
            ) {
                progress.set_style(style.progress_chars("#>-"));
            }
            progress
        }
        None => ProgressBar::new_spinner(),
    };
    progress.set_message(file_name.to_string());
    progress
}

#[async_trait]
impl AssetFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest_dir: &Path) -> GhpmResult<PathBuf> {
        self.download(url, dest_dir).await
    }
}

//! Common utilities for integration tests

use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use serde_json::json;
use std::path::PathBuf;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Isolated environment for one test: config, manifest and working directory
/// all live in a temp dir.
pub struct TestContext {
    pub temp: TempDir,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    /// Directory the `dirs` crate resolves as the config dir for the child process
    fn config_dir(&self) -> PathBuf {
        if cfg!(target_os = "macos") {
            self.temp
                .child("Library")
                .child("Application Support")
                .to_path_buf()
        } else {
            self.temp.child("config").to_path_buf()
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir().join("ghpm").join("config.yaml")
    }

    /// Point the GitHub API at `api_url`
    pub fn write_config(&self, api_url: &str) {
        self.write_config_with(api_url, None);
    }

    pub fn write_config_with(&self, api_url: &str, manifest_path: Option<&PathBuf>) {
        let mut content = format!(
            "github:\n  api_url: {}\nrequest_timeout_secs: 5\n",
            api_url
        );
        if let Some(path) = manifest_path {
            content.push_str(&format!("manifest_path: '{}'\n", path.display()));
        }
        let config_file = self.config_file();
        std::fs::create_dir_all(config_file.parent().unwrap()).unwrap();
        std::fs::write(config_file, content).unwrap();
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.temp.child("packages.toml").to_path_buf()
    }

    pub fn write_manifest(&self, content: &str) {
        self.temp.child("packages.toml").write_str(content).unwrap();
    }

    pub fn read_manifest(&self) -> String {
        std::fs::read_to_string(self.manifest_path()).unwrap()
    }

    /// `ghpm` with isolated directories, no token, and no `--manifest`
    pub fn ghpm_bare(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("ghpm").unwrap();
        cmd.current_dir(&self.temp);
        cmd.env_remove("GITHUB_TOKEN");
        cmd.env_remove("RUST_LOG");

        let config_dir = self.config_dir();
        if cfg!(target_os = "windows") {
            cmd.env("APPDATA", &config_dir);
            cmd.env("USERPROFILE", self.temp.path());
        } else if cfg!(target_os = "linux") {
            cmd.env("XDG_CONFIG_HOME", &config_dir);
            cmd.env("HOME", self.temp.path());
        } else {
            cmd.env("HOME", self.temp.path());
        }

        cmd
    }

    /// `ghpm` using the manifest in the temp dir
    pub fn ghpm(&self) -> Command {
        let mut cmd = self.ghpm_bare();
        cmd.arg("--manifest").arg(self.manifest_path());
        cmd
    }
}

/// Serve `tag` as the latest release of `owner/repo`, with the given assets
/// (file names, served by the same mock server under `/dl/`).
pub async fn mount_release(
    server: &MockServer,
    owner: &str,
    repo: &str,
    tag: &str,
    files: &[&str],
) {
    let assets: Vec<_> = files
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "browser_download_url": asset_url(server, name),
                "size": 0
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/{}/releases/latest", owner, repo)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tag_name": tag,
            "name": tag,
            "draft": false,
            "prerelease": false,
            "assets": assets
        })))
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, owner: &str, repo: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/{}/releases/latest", owner, repo)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub async fn mount_asset(server: &MockServer, name: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/dl/{}", name)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

pub fn asset_url(server: &MockServer, name: &str) -> String {
    format!("{}/dl/{}", server.uri(), name)
}

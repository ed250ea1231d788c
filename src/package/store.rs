//! Read-modify-write cycle of `packages.toml`.
//!
//! The store is the only code that touches the manifest file. Loading never
//! fails: unreadable content is reported through [`LoadOutcome::Recovered`]
//! and the caller carries on with whatever could be salvaged. Writing goes
//! through a temporary file and a rename, so the file on disk is always
//! either the previous or the new manifest.
//!
//! There is no locking. Two processes upserting at the same time both
//! succeed and the later rename wins.

use crate::core::path::{backup_path, ensure_dir, parent_dir};
use crate::core::{GhpmError, GhpmResult};
use crate::di::traits::ReleaseResolver;
use crate::package::drift::DriftCheck;
use ghpm_core::package::manifest::{Manifest, PackageRecord};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Result of reading the manifest.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The file was read completely, or does not exist yet.
    Loaded(Manifest),
    /// Some or all of the file could not be read. `manifest` holds the
    /// entries that could.
    Recovered { manifest: Manifest, cause: GhpmError },
}

impl LoadOutcome {
    pub fn manifest(&self) -> &Manifest {
        match self {
            LoadOutcome::Loaded(manifest) => manifest,
            LoadOutcome::Recovered { manifest, .. } => manifest,
        }
    }

    pub fn into_manifest(self) -> Manifest {
        match self {
            LoadOutcome::Loaded(manifest) => manifest,
            LoadOutcome::Recovered { manifest, .. } => manifest,
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, LoadOutcome::Recovered { .. })
    }
}

/// Owner of the manifest file at a fixed path.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    path: PathBuf,
}

impl ManifestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where unreadable content is preserved before an overwrite.
    pub fn backup_path(&self) -> PathBuf {
        backup_path(&self.path)
    }

    /// Read the manifest fresh from disk.
    pub fn load(&self) -> LoadOutcome {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return LoadOutcome::Loaded(Manifest::new())
            }
            Err(e) => {
                let cause = GhpmError::Parse(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                ));
                tracing::warn!(%cause, "treating manifest as empty");
                return LoadOutcome::Recovered {
                    manifest: Manifest::new(),
                    cause,
                };
            }
        };

        match Manifest::parse(&content) {
            Ok(parsed) if parsed.rejected.is_empty() => LoadOutcome::Loaded(parsed.manifest),
            Ok(parsed) => {
                let details: Vec<String> = parsed
                    .rejected
                    .iter()
                    .map(|entry| format!("[{}] {}", entry.key, entry.reason))
                    .collect();
                let cause = GhpmError::Parse(format!(
                    "{} entr{} in {} could not be kept: {}",
                    details.len(),
                    if details.len() == 1 { "y" } else { "ies" },
                    self.path.display(),
                    details.join("; ")
                ));
                tracing::warn!(%cause, kept = parsed.manifest.len(), "manifest partly recovered");
                LoadOutcome::Recovered {
                    manifest: parsed.manifest,
                    cause,
                }
            }
            Err(e) => {
                let cause = GhpmError::Parse(format!("{}: {}", self.path.display(), e));
                tracing::warn!(%cause, "treating manifest as empty");
                LoadOutcome::Recovered {
                    manifest: Manifest::new(),
                    cause,
                }
            }
        }
    }

    /// Record `repo_name` as installed from `owner` at `version`.
    ///
    /// Merges into every entry that could be read, writes the result sorted,
    /// and returns what was written. Only a failed write is an error.
    pub fn upsert(&self, repo_name: &str, owner: &str, version: &str) -> GhpmResult<Manifest> {
        let mut manifest = match self.load() {
            LoadOutcome::Loaded(manifest) => manifest,
            LoadOutcome::Recovered { manifest, cause } => {
                eprintln!("Warning: {}", cause);
                self.back_up();
                manifest
            }
        };

        manifest.upsert(PackageRecord::new(repo_name, owner, version));
        self.write(&manifest)?;

        tracing::info!(
            repo = repo_name,
            owner,
            version,
            path = %self.path.display(),
            "manifest updated"
        );
        Ok(manifest)
    }

    /// Lazily compare every record against its latest upstream release.
    ///
    /// Each call starts a fresh pass; nothing is cached between passes.
    pub fn diff_against_upstream<'a>(
        manifest: &'a Manifest,
        resolver: &'a dyn ReleaseResolver,
    ) -> DriftCheck<'a> {
        DriftCheck::new(manifest, resolver)
    }

    /// Copy the current file aside so unreadable content survives the overwrite.
    fn back_up(&self) {
        if !self.path.is_file() {
            return;
        }
        let backup = self.backup_path();
        match fs::copy(&self.path, &backup) {
            Ok(_) => eprintln!("Previous manifest saved to {}", backup.display()),
            Err(e) => {
                eprintln!(
                    "Warning: could not save previous manifest to {}: {}",
                    backup.display(),
                    e
                );
                tracing::warn!(
                    error = %e,
                    backup = %backup.display(),
                    "could not back up unreadable manifest"
                );
            }
        }
    }

    /// Replace the file atomically with `manifest`.
    fn write(&self, manifest: &Manifest) -> GhpmResult<()> {
        let content = manifest.to_toml_string()?;
        let write_error = |source: io::Error| GhpmError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = parent_dir(&self.path);
        ensure_dir(dir).map_err(|e| match e {
            GhpmError::Io(source) => write_error(source),
            other => other,
        })?;

        let mut temp = tempfile::Builder::new()
            .prefix(".packages-")
            .suffix(".toml.tmp")
            .tempfile_in(dir)
            .map_err(write_error)?;
        temp.write_all(content.as_bytes()).map_err(write_error)?;
        temp.flush().map_err(write_error)?;
        temp.persist(&self.path).map_err(|e| write_error(e.error))?;

        Ok(())
    }
}

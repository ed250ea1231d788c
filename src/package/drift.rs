//! Version drift between the manifest and upstream releases.

use crate::core::GhpmError;
use crate::di::traits::ReleaseResolver;
use crate::github::types::RepoTarget;
use ghpm_core::package::manifest::{Manifest, PackageRecord};

/// What upstream says about one record.
#[derive(Debug)]
pub enum Availability {
    /// The latest tag equals the recorded version.
    UpToDate,
    /// The latest tag differs from the recorded version.
    Newer(String),
    /// The latest tag could not be determined.
    Unknown(GhpmError),
}

/// One line of the drift report.
#[derive(Debug)]
pub struct DriftRow {
    pub repo_name: String,
    pub owner: String,
    pub local_version: String,
    pub availability: Availability,
}

impl DriftRow {
    /// Tag to show in the "available" column; blank unless something newer exists.
    pub fn available(&self) -> &str {
        match &self.availability {
            Availability::Newer(tag) => tag,
            Availability::UpToDate | Availability::Unknown(_) => "",
        }
    }

    pub fn has_update(&self) -> bool {
        matches!(self.availability, Availability::Newer(_))
    }

    /// The resolution failure, if there was one.
    pub fn failure(&self) -> Option<&GhpmError> {
        match &self.availability {
            Availability::Unknown(e) => Some(e),
            _ => None,
        }
    }
}

/// A single pass over the manifest, resolving one record per step.
///
/// Every record yields exactly one row, even when its resolution fails.
pub struct DriftCheck<'a> {
    records: std::vec::IntoIter<&'a PackageRecord>,
    resolver: &'a dyn ReleaseResolver,
}

impl<'a> DriftCheck<'a> {
    pub fn new(manifest: &'a Manifest, resolver: &'a dyn ReleaseResolver) -> Self {
        Self {
            records: manifest.iter().collect::<Vec<_>>().into_iter(),
            resolver,
        }
    }

    /// Records not yet checked.
    pub fn remaining(&self) -> usize {
        self.records.len()
    }

    /// Resolve the next record, or `None` when the pass is complete.
    pub async fn next_row(&mut self) -> Option<DriftRow> {
        let record = self.records.next()?;
        let availability = match self.latest_tag(record).await {
            Ok(latest) if latest == record.version => Availability::UpToDate,
            Ok(latest) => Availability::Newer(latest),
            Err(e) => {
                tracing::warn!(repo = %record.target(), error = %e, "could not resolve latest release");
                Availability::Unknown(e)
            }
        };

        Some(DriftRow {
            repo_name: record.repo_name.clone(),
            owner: record.owner.clone(),
            local_version: record.version.clone(),
            availability,
        })
    }

    async fn latest_tag(&self, record: &PackageRecord) -> Result<String, GhpmError> {
        let target = RepoTarget::new(record.owner.as_str(), record.repo_name.as_str())?;
        let snapshot = self.resolver.resolve(&target).await?;
        Ok(snapshot.tag)
    }
}

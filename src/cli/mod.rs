pub mod install;
pub mod list;
pub mod search;

use ghpm::core::GhpmResult;
use ghpm::di::ServiceContainer;
use ghpm::package::ManifestStore;
use std::path::PathBuf;

/// Production services plus the manifest store, honouring `--manifest`.
pub fn services(manifest: Option<PathBuf>) -> GhpmResult<(ServiceContainer, ManifestStore)> {
    let container = ServiceContainer::new()?;
    let manifest_path = match manifest {
        Some(path) => path,
        None => container.config().manifest_path()?,
    };
    tracing::debug!(path = %manifest_path.display(), "using manifest");
    Ok((container, ManifestStore::new(manifest_path)))
}

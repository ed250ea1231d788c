use ghpm::core::{GhpmError, GhpmResult};
use ghpm::di::{Prompter, ServiceContainer};
use ghpm::github::types::RepoTarget;
use ghpm::package::fetcher::asset_file_name;
use ghpm::package::{choose, ManifestStore, Selection, StdinPrompter};
use ghpm::PackageRecord;
use std::env;
use std::path::{Path, PathBuf};

pub async fn run(target: String, manifest: Option<PathBuf>) -> GhpmResult<()> {
    let target = RepoTarget::parse(&target)?;
    let (container, store) = super::services(manifest)?;

    let current_dir = env::current_dir()
        .map_err(|e| GhpmError::Path(format!("Failed to get current directory: {}", e)))?;

    let mut prompter = StdinPrompter::stdio();
    run_with(&container, &store, &mut prompter, &target, &current_dir).await?;
    Ok(())
}

/// Resolve, choose, download, record. Nothing is recorded unless the
/// download completed.
pub async fn run_with(
    container: &ServiceContainer,
    store: &ManifestStore,
    prompter: &mut dyn Prompter,
    target: &RepoTarget,
    dest_dir: &Path,
) -> GhpmResult<PackageRecord> {
    let release = container.resolver().resolve(target).await?;
    prompter.say(&format!("latest tag: {}\n", release.tag))?;

    let index = match choose(&release.assets, prompter)? {
        Selection::Chosen(index) => index,
        Selection::Cancelled => {
            return Err(GhpmError::Cancelled(format!(
                "nothing installed for {}",
                target
            )))
        }
    };
    let url = &release.assets[index];
    let file_name = asset_file_name(url)?;

    prompter.say(&format!("\nDownloading {}...", file_name))?;
    let path = container.fetcher().fetch(url, dest_dir).await?;
    prompter.say(&format!("Finished downloading {}.", file_name))?;
    tracing::debug!(path = %path.display(), "asset saved");

    store.upsert(&target.repo, &target.owner, &release.tag)?;
    prompter.say(&format!(
        "Recorded {} {} in {}",
        target,
        release.tag,
        store.path().display()
    ))?;

    Ok(PackageRecord::new(
        target.repo.as_str(),
        target.owner.as_str(),
        release.tag.as_str(),
    ))
}

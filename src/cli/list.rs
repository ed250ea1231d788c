use ghpm::core::GhpmResult;
use ghpm::di::ServiceContainer;
use ghpm::package::{LoadOutcome, ManifestStore};
use std::io::{self, Write};
use std::path::PathBuf;

pub async fn run(target: Option<String>, manifest: Option<PathBuf>) -> GhpmResult<()> {
    if let Some(target) = target {
        tracing::debug!(ignored = %target, "list always shows the whole manifest; ignoring target");
    }

    let (container, store) = super::services(manifest)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with(&container, &store, &mut out).await?;
    Ok(())
}

/// Print one row per manifest entry, resolving upstream as each row is
/// printed. Returns the number of rows.
pub async fn run_with(
    container: &ServiceContainer,
    store: &ManifestStore,
    out: &mut dyn Write,
) -> GhpmResult<usize> {
    let outcome = store.load();
    if let LoadOutcome::Recovered { cause, .. } = &outcome {
        eprintln!("Warning: {}", cause);
    }
    let manifest = outcome.into_manifest();

    if manifest.is_empty() {
        writeln!(out, "No packages installed.")?;
        return Ok(0);
    }

    let header = format_row("Name", "Owner", "Version", "Available");
    writeln!(out, "{}", header)?;
    writeln!(out, "{}", "-".repeat(header.len()))?;

    let mut check = ManifestStore::diff_against_upstream(&manifest, container.resolver());
    let mut rows = 0;
    while let Some(row) = check.next_row().await {
        writeln!(
            out,
            "{}",
            format_row(&row.repo_name, &row.owner, &row.local_version, row.available())
        )?;
        out.flush()?;

        if let Some(e) = row.failure() {
            eprintln!(
                "Warning: could not check {}/{} for updates: {}",
                row.owner, row.repo_name, e
            );
        }
        rows += 1;
    }

    Ok(rows)
}

fn format_row(name: &str, owner: &str, version: &str, available: &str) -> String {
    format!(
        "{:<40} {:<30} {:<15} {:<15}",
        name, owner, version, available
    )
}

use crate::core::error::{GhpmError, GhpmResult};
use crate::package::manifest::MANIFEST_FILE;
use std::path::{Path, PathBuf};

/// Suffix appended to the manifest path for the copy kept on recovery.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Get the ghpm home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\ghpm
/// - Linux: ~/.config/ghpm
/// - macOS: ~/Library/Application Support/ghpm
pub fn ghpm_home() -> GhpmResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| GhpmError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("ghpm"))
}

/// Get the config file path (`<ghpm home>/config.yaml`)
pub fn config_file() -> GhpmResult<PathBuf> {
    Ok(ghpm_home()?.join("config.yaml"))
}

/// Default manifest location: `packages.toml` next to the running executable.
pub fn default_manifest_path() -> GhpmResult<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| GhpmError::Path(format!("Failed to locate executable: {}", e)))?;
    let dir = exe
        .parent()
        .ok_or_else(|| GhpmError::Path(format!("{} has no parent directory", exe.display())))?;
    Ok(dir.join(MANIFEST_FILE))
}

/// Where a partly unreadable manifest is copied before being overwritten.
pub fn backup_path(manifest: &Path) -> PathBuf {
    let mut name = manifest.as_os_str().to_os_string();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Directory a file lives in, treating a bare file name as the current directory.
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> GhpmResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

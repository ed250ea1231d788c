//! Operator-facing hints attached to errors.

use super::error::GhpmError;

/// Suggests what the operator can do about an error.
pub trait ErrorHelp {
    /// A short hint, or `None` when the message speaks for itself.
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for GhpmError {
    fn help(&self) -> Option<String> {
        match self {
            GhpmError::InvalidTarget(_) => {
                Some("Targets look like 'owner/repo', e.g. 'BurntSushi/ripgrep'.".to_string())
            }
            GhpmError::NotFound(_) => Some(
                "Check the repository name and that it publishes GitHub releases (tags alone are not enough)."
                    .to_string(),
            ),
            GhpmError::Transport {
                status: Some(401), ..
            } => Some("The GitHub token was rejected. Check GITHUB_TOKEN or github.token in config.yaml.".to_string()),
            GhpmError::Transport {
                status: Some(403), ..
            }
            | GhpmError::Transport {
                status: Some(429), ..
            } => Some(
                "GitHub may be rate limiting you. Set GITHUB_TOKEN to raise the limit to 5000 requests/hour."
                    .to_string(),
            ),
            GhpmError::Transport { status: None, .. } => {
                Some("Check your network connection and github.api_url in config.yaml.".to_string())
            }
            GhpmError::Write { .. } => Some(
                "Check that the manifest directory is writable, or pass --manifest <PATH>.".to_string(),
            ),
            GhpmError::InvalidAsset(_) => {
                Some("Pick an asset whose URL ends in a plain file name.".to_string())
            }
            GhpmError::Config(_) | GhpmError::Yaml(_) => {
                Some("Fix or delete config.yaml to regenerate the defaults.".to_string())
            }
            _ => None,
        }
    }
}

/// Render an error followed by its hint, if it has one.
pub fn format_error_with_help(error: &GhpmError) -> String {
    match error.help() {
        Some(help) => format!("Error: {}\n\n  help: {}", error, help),
        None => format!("Error: {}", error),
    }
}

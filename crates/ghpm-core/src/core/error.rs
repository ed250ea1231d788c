use std::path::PathBuf;
use thiserror::Error;

pub type GhpmResult<T> = Result<T, GhpmError>;

#[derive(Error, Debug)]
pub enum GhpmError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The install target is not of the form `owner/repo`.
    #[error("Invalid target '{0}': expected owner/repo")]
    InvalidTarget(String),

    /// The upstream answered with a non-success status, or could not be
    /// reached at all (`status` is `None` then).
    #[error("Transport error: {message}")]
    Transport { status: Option<u16>, message: String },

    /// The repository exists (or may exist) but has no published release.
    #[error("No releases found for {0}")]
    NotFound(String),

    /// The manifest could not be read or decoded.
    #[error("Manifest parse error: {0}")]
    Parse(String),

    #[error("Failed to serialize manifest: {0}")]
    Serialize(String),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The asset URL does not end in a usable file name.
    #[error("Invalid asset: {0}")]
    InvalidAsset(String),

    /// The operator declined, or there was nothing to choose from.
    #[error("Cancelled: {0}")]
    Cancelled(String),
}

impl GhpmError {
    /// Build a transport error for a non-success HTTP status.
    pub fn http_status(status: u16, url: &str) -> Self {
        GhpmError::Transport {
            status: Some(status),
            message: format!("HTTP {} from {}", status, url),
        }
    }

    /// Build a transport error for a request that never produced a status.
    pub fn unreachable(message: impl Into<String>) -> Self {
        GhpmError::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Status code carried by a transport error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            GhpmError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

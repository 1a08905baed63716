use std::path::PathBuf;
use thiserror::Error;

/// Main error type for blockswap
#[derive(Error, Debug)]
pub enum BlockswapError {
    #[error("Target directory does not exist: {}", .path.display())]
    TargetDirMissing { path: PathBuf },

    #[error("Target path is not a directory: {}", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("IO error on {}: {source}", display_path(.path))]
    Io {
        source: std::io::Error,
        path: Option<PathBuf>,
    },

    #[error("Invalid patch: {message}")]
    InvalidPatch { message: String },

    #[error("Unknown patch: {name}")]
    UnknownPatch { name: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "<unknown>".to_string(),
    }
}

impl BlockswapError {
    /// Create a new IO error with path context
    pub fn io_error(err: std::io::Error, path: Option<impl Into<PathBuf>>) -> Self {
        Self::Io {
            source: err,
            path: path.map(|p| p.into()),
        }
    }

    pub fn invalid_patch(message: impl Into<String>) -> Self {
        Self::InvalidPatch {
            message: message.into(),
        }
    }

    pub fn unknown_patch(name: impl Into<String>) -> Self {
        Self::UnknownPatch { name: name.into() }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Result type alias for blockswap operations
pub type BlockswapResult<T> = Result<T, BlockswapError>;

impl From<std::io::Error> for BlockswapError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            source: err,
            path: None,
        }
    }
}

impl From<serde_json::Error> for BlockswapError {
    fn from(err: serde_json::Error) -> Self {
        Self::config_error(format!("JSON: {}", err))
    }
}

impl From<serde_yaml::Error> for BlockswapError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config_error(format!("YAML: {}", err))
    }
}

impl From<toml::de::Error> for BlockswapError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_error(format!("TOML: {}", err))
    }
}

impl From<toml::ser::Error> for BlockswapError {
    fn from(err: toml::ser::Error) -> Self {
        Self::config_error(format!("TOML: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = BlockswapError::io_error(
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            Some("src/main.cpp"),
        );
        let msg = err.to_string();
        assert!(msg.contains("src/main.cpp"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_missing_dir_message() {
        let err = BlockswapError::TargetDirMissing {
            path: PathBuf::from("/nowhere/src"),
        };
        assert_eq!(err.to_string(), "Target directory does not exist: /nowhere/src");
    }
}

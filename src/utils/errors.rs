use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Attempting to read a file with too broad permissions assigned: {path} (mode {mode:03o})")]
    PermissionTooBroad { path: PathBuf, mode: u32 },

    #[error("Logging setup error: {0}")]
    Logging(String),
}

impl Error {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True when the failure means the file (or a path component) does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }

    /// True when a validation policy rejected the file's permission bits.
    pub fn is_permission_too_broad(&self) -> bool {
        matches!(self, Error::PermissionTooBroad { .. })
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment configuration: {0}")]
    MissingEnvironment(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    #[error("Invalid configuration format: {0}")]
    InvalidFormat(String),
}

// Result type alias for cleaner signatures
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinct_from_permission_failure() {
        let missing = Error::io(
            Path::new("/nope"),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(missing.is_not_found());
        assert!(!missing.is_permission_too_broad());

        let broad = Error::PermissionTooBroad {
            path: PathBuf::from("/etc/conf.toml"),
            mode: 0o647,
        };
        assert!(broad.is_permission_too_broad());
        assert!(!broad.is_not_found());
        assert_eq!(
            broad.to_string(),
            "Attempting to read a file with too broad permissions assigned: /etc/conf.toml (mode 647)"
        );
    }

    #[test]
    fn other_io_failures_are_not_reported_as_missing() {
        let denied = Error::io(
            Path::new("/root/secret"),
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(!denied.is_not_found());
    }
}

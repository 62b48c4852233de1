//! Error handling for rehome
//!
//! Only configuration problems are fatal to a run. Per-file I/O failures are
//! carried as values so the caller can report them and move on to the next
//! file; per-clause conditions (unknown module, ambiguous quote) are not errors
//! at all and live in [`crate::report`].

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type used throughout rehome
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RehomeError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(
        "Module '{name}' is registered under both '{first_folder}' and '{second_folder}'"
    )]
    RegistryNameCollision {
        name: String,
        first_folder: String,
        second_folder: String,
    },

    #[error("Failed to read {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    FileUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),
}

impl RehomeError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a registry collision error
    pub fn name_collision(
        name: impl Into<String>,
        first_folder: impl Into<String>,
        second_folder: impl Into<String>,
    ) -> Self {
        Self::RegistryNameCollision {
            name: name.into(),
            first_folder: first_folder.into(),
            second_folder: second_folder.into(),
        }
    }

    /// Wrap a read failure for `path`
    pub fn unreadable(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::FileUnreadable {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Wrap a write failure for `path`
    pub fn unwritable(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::FileUnwritable {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether the run must stop when this error shows up.
    ///
    /// File-level I/O failures are skip-and-report; everything that stems
    /// from loading configuration aborts the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::FileUnreadable { .. } | Self::FileUnwritable { .. }
        )
    }
}

/// Result type alias for convenience
pub type RehomeResult<T> = Result<T, RehomeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_message_names_both_folders() {
        let err = RehomeError::name_collision("Button", "common", "view");
        let message = err.to_string();
        assert!(message.contains("Button"));
        assert!(message.contains("common"));
        assert!(message.contains("view"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_file_errors_are_not_fatal() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = RehomeError::unwritable("src/a.tsx", io);
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("src/a.tsx"));
    }
}

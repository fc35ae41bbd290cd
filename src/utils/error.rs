use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecompressError {
    #[error("Failed to list {}: {source}", .path.display())]
    EnumerationError {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Not a directory: {}", .path.display())]
    NotADirectoryError { path: PathBuf },

    #[error("Failed to delete {}: {source}", .path.display())]
    DeleteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {}: {source}", .path.display())]
    DecodeError {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {}: {source}", .path.display())]
    EncodeError {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not under input root {}", .path.display(), .root.display())]
    PathError { path: PathBuf, root: PathBuf },

    #[error("Failed to read config file {}: {source}", .path.display())]
    ConfigFileError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error(
        "{} and {} would both be written to {}",
        .first.display(),
        .second.display(),
        .output.display()
    )]
    OutputCollisionError {
        output: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Filesystem,
    Image,
    Internal,
}

impl ErrorCategory {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCategory::Filesystem => 1,
            ErrorCategory::Configuration => 2,
            ErrorCategory::Image => 3,
            ErrorCategory::Internal => 4,
        }
    }
}

impl RecompressError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RecompressError::EnumerationError { .. }
            | RecompressError::NotADirectoryError { .. }
            | RecompressError::DeleteError { .. }
            | RecompressError::ReadError { .. }
            | RecompressError::WriteError { .. }
            | RecompressError::OutputCollisionError { .. } => ErrorCategory::Filesystem,
            RecompressError::DecodeError { .. } | RecompressError::EncodeError { .. } => {
                ErrorCategory::Image
            }
            RecompressError::PathError { .. }
            | RecompressError::ConfigFileError { .. }
            | RecompressError::TomlParseError(_)
            | RecompressError::ConfigError { .. }
            | RecompressError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            RecompressError::SerializationError(_) | RecompressError::TaskError(_) => {
                ErrorCategory::Internal
            }
        }
    }

    /// The file this error is about, when there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            RecompressError::EnumerationError { path, .. }
            | RecompressError::NotADirectoryError { path }
            | RecompressError::DeleteError { path, .. }
            | RecompressError::ReadError { path, .. }
            | RecompressError::DecodeError { path, .. }
            | RecompressError::EncodeError { path, .. }
            | RecompressError::WriteError { path, .. }
            | RecompressError::PathError { path, .. }
            | RecompressError::ConfigFileError { path, .. } => Some(path),
            RecompressError::OutputCollisionError { second, .. } => Some(second),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RecompressError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_message_names_offending_path() {
        let err = RecompressError::DeleteError {
            path: PathBuf::from("out/races/horseA.avif"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };

        let message = err.to_string();
        assert!(message.contains("out/races/horseA.avif"));
        assert!(message.contains("permission denied"));
        assert_eq!(err.path(), Some(std::path::Path::new("out/races/horseA.avif")));
    }

    #[test]
    fn test_categories_map_to_distinct_nonzero_exit_codes() {
        let fs = RecompressError::ReadError {
            path: PathBuf::from("a.png"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        let config = RecompressError::ConfigError {
            message: "bad config".to_string(),
        };

        assert_eq!(fs.category(), ErrorCategory::Filesystem);
        assert_eq!(config.category(), ErrorCategory::Configuration);
        assert_eq!(fs.category().exit_code(), 1);
        assert_eq!(config.category().exit_code(), 2);
        assert_eq!(ErrorCategory::Image.exit_code(), 3);
        assert_eq!(ErrorCategory::Internal.exit_code(), 4);
        assert_eq!(config.path(), None);
    }
}

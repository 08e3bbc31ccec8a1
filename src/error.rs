//! Error types for storegen
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for storegen operations
pub type StoregenResult<T> = Result<T, StoregenError>;

/// Main error type for storegen operations
#[derive(Error, Debug)]
pub enum StoregenError {
    /// Store directory missing at enumeration time.
    ///
    /// Fatal to the generation run; no output is written or overwritten.
    #[error("store directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Malformed include/exclude glob, surfaced at filter construction
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Output directory creation or file write failed
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_directory_not_found() {
        let err = StoregenError::DirectoryNotFound {
            path: PathBuf::from("src/store"),
        };
        assert_eq!(err.to_string(), "store directory not found: src/store");
    }

    #[test]
    fn test_error_display_invalid_pattern() {
        let err = StoregenError::InvalidPattern {
            pattern: "**/*.{ts".to_string(),
            message: "unclosed alternate group".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid glob pattern '**/*.{ts': unclosed alternate group"
        );
    }

    #[test]
    fn test_error_display_write_failed() {
        let err = StoregenError::WriteFailed {
            path: PathBuf::from("src/helper/use-store.ts"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("src/helper/use-store.ts"));
        assert!(err.to_string().contains("denied"));
    }
}

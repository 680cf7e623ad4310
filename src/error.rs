//! Error types for encoding store and encoder operations.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using [`EncodingError`].
pub type Result<T> = std::result::Result<T, EncodingError>;

/// Error type for encoding store and encoder operations.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// No store exists at the requested location.
    #[error("Encoding store not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The store exists but its content does not form a valid dictionary.
    #[error("Corrupt encoding store {}: {reason}", path.display())]
    StoreCorrupt { path: PathBuf, reason: String },

    /// Any read/write failure other than a missing store.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An integer code falls outside `[0, num_classes)`.
    #[error("Code {value} out of range for {num_classes} classes")]
    OutOfRange { value: String, num_classes: usize },

    /// A label cannot be represented in the persisted format.
    #[error("Invalid label {0:?}: labels made only of ASCII digits collide with index keys")]
    InvalidLabel(String),

    /// An assigned index does not fit the requested output type.
    #[error("Index {index} is not representable as {dtype}")]
    CodeOverflow { index: usize, dtype: &'static str },

    /// A one-hot row is not a valid indicator vector.
    #[error("Invalid one-hot encoding: {0}")]
    InvalidEncoding(String),

    /// A lookup that the dictionary invariants guarantee failed anyway.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EncodingError {
    pub(crate) fn not_found(path: &Path) -> Self {
        EncodingError::NotFound {
            path: path.to_path_buf(),
        }
    }

    pub(crate) fn corrupt(path: &Path, reason: impl Into<String>) -> Self {
        EncodingError::StoreCorrupt {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Wrap a read failure, mapping a missing file to [`EncodingError::NotFound`].
    pub(crate) fn read_failed(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::not_found(path);
        }
        Self::write_failed(path, source)
    }

    pub(crate) fn write_failed(path: &Path, source: std::io::Error) -> Self {
        EncodingError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns true if this error reports a missing store.
    pub fn is_not_found(&self) -> bool {
        matches!(self, EncodingError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found() {
        let err = EncodingError::not_found(Path::new("dicts/site.json"));
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("dicts/site.json"));
    }

    #[test]
    fn test_error_display_corrupt() {
        let err = EncodingError::corrupt(Path::new("a.json"), "missing backward entry");
        assert!(err.to_string().contains("Corrupt encoding store"));
        assert!(err.to_string().contains("missing backward entry"));
    }

    #[test]
    fn test_error_display_out_of_range() {
        let err = EncodingError::OutOfRange {
            value: "5".to_string(),
            num_classes: 4,
        };
        assert_eq!(err.to_string(), "Code 5 out of range for 4 classes");
    }

    #[test]
    fn test_error_display_code_overflow() {
        let err = EncodingError::CodeOverflow {
            index: 300,
            dtype: "u8",
        };
        assert!(err.to_string().contains("u8"));
    }

    #[test]
    fn test_io_not_found_maps_to_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = EncodingError::read_failed(Path::new("x.json"), io_err);
        assert!(err.is_not_found());
    }

    #[test]
    fn test_io_other_kind_stays_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = EncodingError::read_failed(Path::new("x.json"), io_err);
        assert!(matches!(err, EncodingError::Io { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_write_not_found_stays_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no parent");
        let err = EncodingError::write_failed(Path::new("missing/x.json"), io_err);
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_error_is_std_error() {
        let err = EncodingError::Internal("test".to_string());
        let _: &dyn std::error::Error = &err;
    }
}

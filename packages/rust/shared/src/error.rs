//! Error types for eodb.
//!
//! Library crates use [`EodbError`] via `thiserror`.
//! App crates (cli/tui) wrap this with `color-eyre` for rich diagnostics.
//!
//! Malformed rows are not errors: the loader drops or nulls the damaged
//! field and keeps going. Not-found lookups and empty filter results are
//! ordinary return values on the query surface; [`EodbError::NotFound`]
//! exists for callers that want to turn a miss into an error value.

use std::path::PathBuf;

/// Top-level error type for all eodb operations.
#[derive(Debug, thiserror::Error)]
pub enum EodbError {
    /// A data source could not be located or read.
    #[error("failed to load {path:?}: {source}")]
    Load {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error outside of data loading (config files).
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Loaded data violates a constraint the caller asked to enforce.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// A requested key matched no record.
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, EodbError>;

impl EodbError {
    /// Wrap a `std::io::Error` raised while reading a data source.
    pub fn load(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Load {
            path: path.into(),
            source,
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a not-found error for a record kind and lookup key.
    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            key: key.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = EodbError::config("missing data dir");
        assert_eq!(err.to_string(), "config error: missing data dir");

        let err = EodbError::not_found("executive order", "9999-99999");
        assert_eq!(err.to_string(), "executive order not found: 9999-99999");
        assert!(matches!(err, EodbError::NotFound { .. }));
    }

    #[test]
    fn load_error_names_the_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = EodbError::load("data/EO_Timelines_v2.csv", source);
        assert!(err.to_string().contains("EO_Timelines_v2.csv"));
        assert!(matches!(err, EodbError::Load { .. }));
    }
}

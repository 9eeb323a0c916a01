//! Error types for Lattice Select.
//!
//! User-facing anomalies (stale selected values, operations before the option
//! index exists, bulk actions on single-select widgets) degrade gracefully and
//! never surface here. Errors only come from the named command boundary and
//! from loading configuration.

use std::path::PathBuf;

/// Result type alias for Lattice Select operations.
pub type Result<T> = std::result::Result<T, SelectError>;

/// Errors that can occur in Lattice Select.
#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    /// No public operation carries this name.
    #[error("Method '{0}' not found in CustomSelect")]
    UnknownOperation(String),

    /// The name refers to an internal operation.
    #[error("Cannot call protected method '{0}'")]
    ProtectedOperation(String),

    /// The operation exists but its arguments could not be interpreted.
    #[error("Invalid arguments for '{operation}': {message}")]
    InvalidArguments { operation: String, message: String },

    /// A settings value is out of range or malformed.
    #[error("Invalid settings: {0}")]
    Settings(String),

    /// Settings file I/O error.
    #[error("Failed to read settings '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON settings or arguments could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML settings could not be decoded.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl SelectError {
    /// Create an invalid-arguments error.
    pub fn invalid_arguments(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error.
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
    fn test_error_messages() {
        assert_eq!(
            SelectError::UnknownOperation("explode".into()).to_string(),
            "Method 'explode' not found in CustomSelect"
        );
        assert_eq!(
            SelectError::ProtectedOperation("_init".into()).to_string(),
            "Cannot call protected method '_init'"
        );
        assert_eq!(
            SelectError::invalid_arguments("val", "expected a string").to_string(),
            "Invalid arguments for 'val': expected a string"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let err: SelectError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, SelectError::Json(_)));
    }
}

//! Custom error types for content export
//!
//! This module defines the error hierarchy for the export engine using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for content export operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// The retrieval layer could not produce a query result
    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    /// A node is missing data required to take part in the export
    #[error("Malformed node {node}: {reason}")]
    MalformedInput { node: String, reason: String },

    /// The engine broke one of its own guarantees
    #[error("Internal invariant violated: {0}")]
    Invariant(String),

    /// Validation errors for user-supplied values
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

/// Coarse classification of an [`ExportError`], used when reporting outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Failure reported by the retrieval collaborator, passed through as is
    Retrieval,
    /// User data broke the minimum shape the export needs
    MalformedInput,
    /// Contract violation inside the engine
    Invariant,
    /// Anything else (I/O, configuration, serialization)
    Other,
}

impl ExportError {
    /// Create a malformed-input error for a node
    pub fn malformed(node: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            node: node.into(),
            reason: reason.into(),
        }
    }

    /// Create a "not found" error for content types
    pub fn content_type_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Content type",
            identifier: identifier.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Retrieval(_) => FailureKind::Retrieval,
            Self::MalformedInput { .. } => FailureKind::MalformedInput,
            Self::Invariant(_) => FailureKind::Invariant,
            _ => FailureKind::Other,
        }
    }

    /// Check if this error came from the retrieval layer
    pub fn is_retrieval(&self) -> bool {
        self.kind() == FailureKind::Retrieval
    }

    /// Check if this is a malformed input error
    pub fn is_malformed_input(&self) -> bool {
        self.kind() == FailureKind::MalformedInput
    }

    /// Check if this is an internal invariant failure
    pub fn is_invariant(&self) -> bool {
        self.kind() == FailureKind::Invariant
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for ExportError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

/// Result type alias for content export operations
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExportError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_malformed_error() {
        let err = ExportError::malformed("1234", "missing path");
        assert_eq!(err.to_string(), "Malformed node 1234: missing path");
        assert!(err.is_malformed_input());
        assert!(!err.is_retrieval());
    }

    #[test]
    fn test_not_found_error() {
        let err = ExportError::content_type_not_found("jnt:news");
        assert_eq!(err.to_string(), "Content type not found: jnt:news");
        assert!(err.is_not_found());
        assert_eq!(err.kind(), FailureKind::Other);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(
            ExportError::Retrieval("timeout".into()).kind(),
            FailureKind::Retrieval
        );
        assert!(ExportError::Invariant("root missing".into()).is_invariant());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let export_err: ExportError = io_err.into();
        assert!(matches!(export_err, ExportError::Io(_)));
    }
}

//! Error types and error handling

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;

/// Scaffolding error type
///
/// Every variant halts the render call that produced it. Nothing is retried
/// internally. An output that already exists is a skip, not an error.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The entity or one of the roots cannot be resolved to a usable directory
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Template file missing or unreadable at the resolved path
    #[error("Template not found: {}", path.display())]
    TemplateNotFound {
        /// Resolved template path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A template could not be rendered (syntax error, or an unresolved
    /// placeholder under strict mode)
    #[error("Failed to render template '{template}': {message}")]
    Substitution {
        /// The template source, or a short label for it
        template: String,
        /// Renderer diagnostic
        message: String,
    },

    /// Directory creation or file write failed
    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        /// Path being created or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A context extension tried to replace one of the fixed merge keys
    #[error("Merge key '{0}' is reserved and cannot be overridden")]
    ReservedKey(String),

    /// A command-line field specification could not be parsed
    #[error("Invalid field definition: {0}")]
    InvalidField(String),

    /// An entity schema or recipe file could not be read or parsed
    #[error("Invalid schema {}: {message}", path.display())]
    Schema {
        /// Schema file path
        path: PathBuf,
        /// Parse or read diagnostic
        message: String,
    },
}

impl ScaffoldError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn schema(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Schema {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

//! Error types for loading mount tables.
//!
//! Covers the failure modes of the ingestion layer (reading content,
//! parsing configuration) and wraps parse failures from the core crate.

use std::path::PathBuf;

use mounttab_core::TableError;
use thiserror::Error;

/// Errors that can occur while loading a table.
#[derive(Debug, Error)]
pub enum SourceError {
    /// File I/O failure.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// The path that could not be read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration YAML could not be parsed or serialized.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Configuration is structurally invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The content could not be parsed as a table.
    #[error(transparent)]
    Table(#[from] TableError),
}

impl SourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SourceError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for results with [`SourceError`].
pub type Result<T> = std::result::Result<T, SourceError>;

//! Error types for definition loading and export generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Error type for generator operations
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// A file could not be read or written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The definition document is not valid JSON or has the wrong top-level shape
    #[error("malformed definition: {0}")]
    MalformedDefinition(#[from] serde_json::Error),

    /// An export type tag that no emitter handles
    #[error("unknown export type: {0}")]
    UnknownExportType(String),

    /// Another export of the same run already targets this file
    #[error("duplicate export target: {}", .0.display())]
    DuplicateTarget(PathBuf),

    /// An export task panicked or was cancelled before finishing
    #[error("export task failed: {0}")]
    TaskFailed(String),
}

impl GeneratorError {
    /// Wrap an I/O error together with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GeneratorError::Io {
            path: path.into(),
            source,
        }
    }
}

//! Renderer error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering and export.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Export was requested for a canvas without strokes.
    #[error("Nothing to export: the canvas has no strokes")]
    NothingToExport,

    /// Writing the output file failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Encoding to an output format failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// Draw command serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

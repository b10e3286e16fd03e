//! Error types for canvas operations.

use thiserror::Error;

use crate::size::{CanvasSize, SizeParseError};

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in canvas operations.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Requested drawing area is outside the allowed range.
    #[error("Invalid canvas size {requested}: must be between {min} and {max}")]
    InvalidSize {
        /// The rejected size.
        requested: CanvasSize,
        /// Smallest accepted size.
        min: CanvasSize,
        /// Largest accepted size.
        max: CanvasSize,
    },

    /// Canvas size text could not be parsed.
    #[error("Malformed canvas size: {0}")]
    MalformedSize(#[from] SizeParseError),

    /// Scene or event serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

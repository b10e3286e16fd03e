//! Drawing area dimensions.

use std::num::ParseIntError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest drawing area edge, in pixels.
pub const MIN_EDGE: u32 = 100;

/// Width and height of the drawing area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CanvasSize {
    /// Smallest accepted drawing area.
    pub const MIN: Self = Self::new(MIN_EDGE, MIN_EDGE);

    /// Create a size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether both edges are within `[min, max]`.
    #[must_use]
    pub fn fits(self, min: Self, max: Self) -> bool {
        (min.width..=max.width).contains(&self.width)
            && (min.height..=max.height).contains(&self.height)
    }
}

impl std::fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

/// Failure to read a size from user-entered text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeParseError {
    /// The field was blank.
    #[error("{field} is empty")]
    Empty {
        /// Which field ("width" or "height").
        field: &'static str,
    },
    /// The field was not a non-negative integer.
    #[error("{field} is not a whole number: {value:?}")]
    NotANumber {
        /// Which field ("width" or "height").
        field: &'static str,
        /// The offending text.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: ParseIntError,
    },
}

/// Parse user-entered width and height. Surrounding whitespace is ignored.
///
/// Range checks are left to [`crate::Canvas::resize`].
///
/// # Errors
///
/// Returns an error if either field is blank or not a whole number.
pub fn parse_size(width: &str, height: &str) -> Result<CanvasSize, SizeParseError> {
    Ok(CanvasSize::new(
        parse_edge("width", width)?,
        parse_edge("height", height)?,
    ))
}

fn parse_edge(field: &'static str, text: &str) -> Result<u32, SizeParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SizeParseError::Empty { field });
    }
    trimmed
        .parse::<u32>()
        .map_err(|source| SizeParseError::NotANumber {
            field,
            value: trimmed.to_string(),
            source,
        })
}

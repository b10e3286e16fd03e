//! Rendering backend implementations.

pub mod command_list;
pub mod svg_surface;

use serde::{Deserialize, Serialize};
use treetop_core::{Color, Point};

use crate::{BackendType, RenderResult};

/// Pen and brush for a single draw call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawStyle {
    /// Outline color.
    pub pen: Color,
    /// Fill color. Ignored by open polylines.
    pub brush: Color,
    /// Outline width in pixels.
    pub width: f64,
}

impl DrawStyle {
    /// Create a style.
    #[must_use]
    pub fn new(pen: Color, brush: Color, width: f64) -> Self {
        Self { pen, brush, width }
    }
}

/// Trait for rendering backends.
///
/// A frame is a `begin_frame` call, any number of draw calls in paint
/// order, then `end_frame`.
pub trait RenderBackend {
    /// Get the backend type.
    fn backend_type(&self) -> BackendType;

    /// Start a frame, clearing the surface to `background`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be prepared.
    fn begin_frame(&mut self, width: u32, height: u32, background: Color) -> RenderResult<()>;

    /// Draw an open polyline.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    fn draw_polyline(&mut self, points: &[Point], style: &DrawStyle) -> RenderResult<()>;

    /// Draw a closed, filled polygon.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    fn draw_closed_path(&mut self, points: &[Point], style: &DrawStyle) -> RenderResult<()>;

    /// Draw a smooth curve guided by `points`.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    fn draw_spline(&mut self, points: &[Point], style: &DrawStyle) -> RenderResult<()>;

    /// Draw a filled circle.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing fails.
    fn draw_circle(&mut self, center: Point, radius: f64, style: &DrawStyle) -> RenderResult<()>;

    /// Finish the frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be completed.
    fn end_frame(&mut self) -> RenderResult<()>;
}

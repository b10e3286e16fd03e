//! # Treetop Renderer
//!
//! Rendering sink and exporters for Treetop drawings.
//!
//! ## Rendering Backends
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │        Renderer (frame -> draw calls)       │
//! ├──────────────────────┬──────────────────────┤
//! │ CommandList          │ SvgSurface           │
//! │ (record / replay)    │ (vector snapshot)    │
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! The [`export::SceneExporter`] writes the shape list directly as a grouped
//! SVG document with embedded metadata, or as a tab-delimited text dump.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod error;
pub mod export;
mod markup;

pub use backend::command_list::{CommandListBackend, DrawCommand};
pub use backend::svg_surface::SvgSurfaceBackend;
pub use backend::{DrawStyle, RenderBackend};
pub use error::{RenderError, RenderResult};
pub use export::{ExportConfig, ExportFormat, SceneExporter, SvgMetadata};

use treetop_core::{Color, Frame, Shape};

/// Configuration for the renderer.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Background color.
    pub background: Color,
    /// Cursor and start marker outline.
    pub cursor_pen: Color,
    /// Cursor and start marker fill.
    pub cursor_brush: Color,
    /// Border and guide line color.
    pub border_pen: Color,
    /// Border fill.
    pub border_brush: Color,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            cursor_pen: Color::BLACK,
            cursor_brush: Color::BLACK,
            border_pen: Color::RED,
            border_brush: Color::TRANSPARENT,
        }
    }
}

/// Available rendering backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// Records draw calls for replay.
    CommandList,
    /// Paints into an SVG document.
    SvgSurface,
}

/// Drives a [`RenderBackend`] from canvas frames.
///
/// Paint order is cursor, start marker, rubber band, border, guides, then
/// every shape in scene order.
pub struct Renderer<B: RenderBackend> {
    config: RendererConfig,
    backend: B,
    frame_count: u64,
}

impl<B: RenderBackend> Renderer<B> {
    /// Create a renderer over `backend`.
    #[must_use]
    pub fn new(config: RendererConfig, backend: B) -> Self {
        Self {
            config,
            backend,
            frame_count: 0,
        }
    }

    /// Render a frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn render(&mut self, frame: &Frame<'_>) -> RenderResult<()> {
        self.backend
            .begin_frame(frame.width, frame.height, self.config.background)?;
        self.render_overlay(frame)?;

        let spline = frame.spline();
        for shape in frame.scene.shapes() {
            self.render_shape(shape, spline)?;
        }

        self.backend.end_frame()?;
        self.frame_count += 1;
        tracing::trace!(
            "Rendered frame {} with {} shapes on {:?}",
            self.frame_count,
            frame.scene.shape_count(),
            self.backend.backend_type()
        );
        Ok(())
    }

    fn render_overlay(&mut self, frame: &Frame<'_>) -> RenderResult<()> {
        let overlay = frame.overlay;
        let cursor = DrawStyle::new(self.config.cursor_pen, self.config.cursor_brush, 1.0);
        let border = DrawStyle::new(self.config.border_pen, self.config.border_brush, 1.0);

        for circle in [overlay.cursor, overlay.start_marker].into_iter().flatten() {
            self.backend
                .draw_circle(circle.center, circle.radius, &cursor)?;
        }
        if let Some(band) = overlay.rubber_band {
            self.backend.draw_polyline(&[band.from, band.to], &cursor)?;
        }
        if let Some(rect) = overlay.border {
            self.backend.draw_closed_path(&rect.outline(), &border)?;
        }
        for guide in &overlay.guides {
            self.backend.draw_polyline(&[guide.from, guide.to], &border)?;
        }
        Ok(())
    }

    fn render_shape(&mut self, shape: &Shape, spline: bool) -> RenderResult<()> {
        let style = DrawStyle::new(shape.pen, shape.brush, f64::from(shape.width));
        if spline {
            self.backend.draw_spline(&shape.points, &style)
        } else if shape.is_line() {
            self.backend.draw_polyline(&shape.points, &style)
        } else {
            self.backend.draw_closed_path(&shape.points, &style)
        }
    }

    /// Get the current frame count.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the active backend type.
    #[must_use]
    pub fn active_backend(&self) -> BackendType {
        self.backend.backend_type()
    }

    /// Get the renderer configuration.
    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Borrow the backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consume the renderer, returning its backend.
    #[must_use]
    pub fn into_backend(self) -> B {
        self.backend
    }
}

/// Renderer crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use treetop_core::{Canvas, CanvasConfig, Point};

    fn canvas_with_branch() -> Canvas {
        let mut canvas = Canvas::new(CanvasConfig {
            seed: Some(1),
            ..CanvasConfig::default()
        })
        .expect("canvas");
        canvas.pointer_down(Point::new(100.0, 100.0));
        canvas.pointer_move(Point::new(300.0, 100.0));
        canvas.pointer_up(Point::new(300.0, 100.0));
        canvas.break_stroke();
        canvas
    }

    #[test]
    fn test_shapes_follow_overlay() {
        let canvas = canvas_with_branch();
        let mut renderer = Renderer::new(RendererConfig::default(), CommandListBackend::new());
        renderer.render(&canvas.frame()).expect("render");

        let commands = renderer.backend().commands();
        assert!(matches!(commands[0], DrawCommand::Clear { width: 800, .. }));
        // 21 shapes: 20 leaves as closed paths, then the branch polyline.
        let shapes = &commands[commands.len() - 21..];
        assert!(shapes[..20]
            .iter()
            .all(|c| matches!(c, DrawCommand::ClosedPath { .. })));
        assert!(matches!(shapes[20], DrawCommand::Polyline { .. }));
        assert_eq!(renderer.frame_count(), 1);
    }

    #[test]
    fn test_spline_toggle_routes_everything_to_spline() {
        let mut canvas = canvas_with_branch();
        canvas.set_spline(true);
        let mut renderer = Renderer::new(RendererConfig::default(), CommandListBackend::new());
        renderer.render(&canvas.frame()).expect("render");

        let splines = renderer
            .backend()
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Spline { .. }))
            .count();
        assert_eq!(splines, 21);
    }

    #[test]
    fn test_empty_canvas_draws_border_and_guides() {
        let canvas = Canvas::new(CanvasConfig::default()).expect("canvas");
        let mut renderer = Renderer::new(RendererConfig::default(), CommandListBackend::new());
        renderer.render(&canvas.frame()).expect("render");

        let commands = renderer.backend().commands();
        assert_eq!(commands.len(), 4);
        assert!(matches!(
            &commands[1],
            DrawCommand::ClosedPath { style, .. } if style.pen == Color::RED
        ));
        assert_eq!(renderer.active_backend(), BackendType::CommandList);
    }

    #[test]
    fn test_surface_backend_produces_document() {
        let canvas = canvas_with_branch();
        let mut renderer = Renderer::new(RendererConfig::default(), SvgSurfaceBackend::new());
        renderer.render(&canvas.frame()).expect("render");

        let svg = renderer.into_backend().into_document().expect("document");
        assert_eq!(svg.matches("<polyline").count(), 1);
        assert_eq!(svg.matches("<path").count(), 20);
    }
}

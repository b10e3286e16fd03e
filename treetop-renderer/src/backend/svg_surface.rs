//! Vector surface backend.
//!
//! Turns draw calls into plain SVG markup, one element per call, so a whole
//! frame (overlay included) can be saved the way it appears on screen.

use std::fmt::Write;

use treetop_core::{Color, Point};

use crate::markup::{closed_path_data, fmt_coord, fmt_decimal, points_attr, spline_path_data};
use crate::{BackendType, RenderResult};

use super::{DrawStyle, RenderBackend};

/// Backend that paints into an SVG document.
#[derive(Debug, Default)]
pub struct SvgSurfaceBackend {
    width: u32,
    height: u32,
    body: String,
    document: Option<String>,
}

impl SvgSurfaceBackend {
    /// Create an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The SVG document of the last finished frame.
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Consume the surface, returning the last finished document.
    #[must_use]
    pub fn into_document(self) -> Option<String> {
        self.document
    }

    fn paint(color: Color) -> String {
        if color.a == 0 {
            "none".to_string()
        } else {
            color.to_hex()
        }
    }

    fn stroke_attrs(style: &DrawStyle) -> String {
        format!(
            "stroke=\"{}\" stroke-opacity=\"{}\" stroke-width=\"{}\" stroke-linejoin=\"round\" stroke-linecap=\"round\"",
            Self::paint(style.pen),
            fmt_decimal(f64::from(style.pen.opacity())),
            fmt_coord(style.width),
        )
    }

    fn fill_attrs(color: Color) -> String {
        format!(
            "fill=\"{}\" fill-opacity=\"{}\"",
            Self::paint(color),
            fmt_decimal(f64::from(color.opacity()))
        )
    }
}

impl RenderBackend for SvgSurfaceBackend {
    fn backend_type(&self) -> BackendType {
        BackendType::SvgSurface
    }

    fn begin_frame(&mut self, width: u32, height: u32, background: Color) -> RenderResult<()> {
        self.width = width;
        self.height = height;
        self.body.clear();
        if background.a > 0 {
            let _ = writeln!(
                self.body,
                "<rect width=\"{width}\" height=\"{height}\" {}/>",
                Self::fill_attrs(background)
            );
        }
        Ok(())
    }

    fn draw_polyline(&mut self, points: &[Point], style: &DrawStyle) -> RenderResult<()> {
        if points.is_empty() {
            return Ok(());
        }
        let _ = writeln!(
            self.body,
            "<polyline points=\"{}\" fill=\"none\" {}/>",
            points_attr(points),
            Self::stroke_attrs(style)
        );
        Ok(())
    }

    fn draw_closed_path(&mut self, points: &[Point], style: &DrawStyle) -> RenderResult<()> {
        if points.is_empty() {
            return Ok(());
        }
        let _ = writeln!(
            self.body,
            "<path d=\"{}\" {} {}/>",
            closed_path_data(points),
            Self::fill_attrs(style.brush),
            Self::stroke_attrs(style)
        );
        Ok(())
    }

    fn draw_spline(&mut self, points: &[Point], style: &DrawStyle) -> RenderResult<()> {
        if points.is_empty() {
            return Ok(());
        }
        // Only curves that return to their start enclose an area to fill.
        let closed = points.len() > 2 && points.first() == points.last();
        let fill = if closed {
            Self::fill_attrs(style.brush)
        } else {
            "fill=\"none\"".to_string()
        };
        let _ = writeln!(
            self.body,
            "<path d=\"{}\" {fill} {}/>",
            spline_path_data(points),
            Self::stroke_attrs(style)
        );
        Ok(())
    }

    fn draw_circle(&mut self, center: Point, radius: f64, style: &DrawStyle) -> RenderResult<()> {
        let _ = writeln!(
            self.body,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {} {}/>",
            fmt_coord(center.x),
            fmt_coord(center.y),
            fmt_coord(radius),
            Self::fill_attrs(style.brush),
            Self::stroke_attrs(style)
        );
        Ok(())
    }

    fn end_frame(&mut self) -> RenderResult<()> {
        let (width, height) = (self.width, self.height);
        let mut document = String::with_capacity(self.body.len() + 256);
        let _ = writeln!(document, "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>");
        let _ = writeln!(
            document,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
        );
        document.push_str(&self.body);
        document.push_str("</svg>\n");
        tracing::trace!("Surface frame finished: {} bytes", document.len());
        self.document = Some(document);
        Ok(())
    }
}

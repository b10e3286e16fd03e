//! Recording backend.
//!
//! Stores every draw call of the latest frame as a [`DrawCommand`] so a host
//! UI can replay it on its own surface, or a test can inspect it.

use serde::{Deserialize, Serialize};
use treetop_core::{Color, Point};

use crate::{BackendType, RenderResult};

use super::{DrawStyle, RenderBackend};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum DrawCommand {
    /// Clear the surface.
    Clear {
        /// Surface width.
        width: u32,
        /// Surface height.
        height: u32,
        /// Background color.
        background: Color,
    },
    /// Open polyline.
    Polyline {
        /// Vertices.
        points: Vec<Point>,
        /// Pen and brush.
        style: DrawStyle,
    },
    /// Closed filled polygon.
    ClosedPath {
        /// Vertices.
        points: Vec<Point>,
        /// Pen and brush.
        style: DrawStyle,
    },
    /// Smooth curve.
    Spline {
        /// Control points.
        points: Vec<Point>,
        /// Pen and brush.
        style: DrawStyle,
    },
    /// Filled circle.
    Circle {
        /// Centre.
        center: Point,
        /// Radius.
        radius: f64,
        /// Pen and brush.
        style: DrawStyle,
    },
}

/// Backend that records draw calls instead of painting them.
#[derive(Debug, Default)]
pub struct CommandListBackend {
    commands: Vec<DrawCommand>,
    in_frame: bool,
}

impl CommandListBackend {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of the latest frame, in paint order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Serialize the recorded commands to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> RenderResult<String> {
        Ok(serde_json::to_string(&self.commands)?)
    }

    fn record(&mut self, command: DrawCommand) {
        if !self.in_frame {
            tracing::warn!("Draw call outside a frame: {command:?}");
        }
        self.commands.push(command);
    }
}

impl RenderBackend for CommandListBackend {
    fn backend_type(&self) -> BackendType {
        BackendType::CommandList
    }

    fn begin_frame(&mut self, width: u32, height: u32, background: Color) -> RenderResult<()> {
        self.commands.clear();
        self.in_frame = true;
        self.commands.push(DrawCommand::Clear {
            width,
            height,
            background,
        });
        Ok(())
    }

    fn draw_polyline(&mut self, points: &[Point], style: &DrawStyle) -> RenderResult<()> {
        tracing::trace!("Polyline with {} points", points.len());
        self.record(DrawCommand::Polyline {
            points: points.to_vec(),
            style: *style,
        });
        Ok(())
    }

    fn draw_closed_path(&mut self, points: &[Point], style: &DrawStyle) -> RenderResult<()> {
        tracing::trace!("Closed path with {} points", points.len());
        self.record(DrawCommand::ClosedPath {
            points: points.to_vec(),
            style: *style,
        });
        Ok(())
    }

    fn draw_spline(&mut self, points: &[Point], style: &DrawStyle) -> RenderResult<()> {
        tracing::trace!("Spline with {} points", points.len());
        self.record(DrawCommand::Spline {
            points: points.to_vec(),
            style: *style,
        });
        Ok(())
    }

    fn draw_circle(&mut self, center: Point, radius: f64, style: &DrawStyle) -> RenderResult<()> {
        tracing::trace!("Circle at ({}, {}) r={radius}", center.x, center.y);
        self.record(DrawCommand::Circle {
            center,
            radius,
            style: *style,
        });
        Ok(())
    }

    fn end_frame(&mut self) -> RenderResult<()> {
        self.in_frame = false;
        tracing::trace!("Frame recorded: {} commands", self.commands.len());
        Ok(())
    }
}

//! Scene reconstruction: strokes plus parameters in, renderable shapes out.
//!
//! The shape list is derived state. It is rebuilt from scratch after every
//! change to the strokes or the decoration parameters and never patched.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::{angular_offset, distance, line_angle, Point};
use crate::leaf::leaf_outline;
use crate::params::DecorationParameters;
use crate::stroke::Stroke;

/// Stroke width used for leaf outlines.
pub const LEAF_STROKE_WIDTH: u32 = 1;

/// How a shape should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Open branch polyline.
    Line,
    /// Closed, filled leaf outline.
    Polygon,
    /// Leaf outline drawn as a smooth curve.
    Spline,
}

impl ShapeKind {
    /// Tag used in exports.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Line => "Line",
            Self::Polygon => "Polygon",
            Self::Spline => "Spline",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A renderable primitive with its style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Shape kind.
    pub kind: ShapeKind,
    /// Stroke (pen) color.
    pub pen: Color,
    /// Fill (brush) color.
    pub brush: Color,
    /// Stroke width in pixels.
    pub width: u32,
    /// Outline points in drawing order.
    pub points: Vec<Point>,
}

impl Shape {
    /// Whether this is a branch line.
    #[must_use]
    pub fn is_line(&self) -> bool {
        self.kind == ShapeKind::Line
    }
}

/// The derived drawing: every shape in z-order plus the drawing area size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    shapes: Vec<Shape>,
    /// Drawing area width in pixels.
    pub width: u32,
    /// Drawing area height in pixels.
    pub height: u32,
    /// Number of strokes the scene was built from.
    pub stroke_count: usize,
    /// Whether shapes should be drawn as splines.
    pub spline: bool,
}

impl Scene {
    /// Build a scene from strokes and the current parameters.
    pub fn build<R: Rng>(
        strokes: &[Stroke],
        params: &DecorationParameters,
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Self {
        let shapes = reconstruct(strokes, params, rng);
        tracing::trace!(
            "Scene rebuilt: {} strokes -> {} shapes",
            strokes.len(),
            shapes.len()
        );
        Self {
            shapes,
            width,
            height,
            stroke_count: strokes.len(),
            spline: params.spline(),
        }
    }

    /// Shapes in drawing order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Number of shapes.
    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Whether the scene was built from no strokes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stroke_count == 0
    }

    /// Serialize the scene to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> crate::CanvasResult<String> {
        serde_json::to_string(self).map_err(crate::CanvasError::Serialization)
    }
}

/// Derive the full shape list for `strokes`.
///
/// Each stroke is walked from its newest point back to its first. Whenever the
/// gap between the current anchor and the next point exceeds the stroke's
/// spacing, the gap is split into `floor(gap / spacing)` evenly spaced
/// decoration points, and each gets a pair of leaves mirrored about the
/// branch. The branch itself follows as one `Line` shape after its leaves.
///
/// `rng` is only consulted when random fill is enabled.
pub fn reconstruct<R: Rng>(
    strokes: &[Stroke],
    params: &DecorationParameters,
    rng: &mut R,
) -> Vec<Shape> {
    let mut shapes = Vec::new();
    for stroke in strokes {
        decorate_stroke(stroke, params, rng, &mut shapes);
    }
    shapes
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
fn decorate_stroke<R: Rng>(
    stroke: &Stroke,
    params: &DecorationParameters,
    rng: &mut R,
    shapes: &mut Vec<Shape>,
) {
    let style = stroke.style;
    let spacing = f64::from(style.spacing);
    let leaf_length = f64::from(style.leaf_length);
    let leaf_angle = style.leaf_angle as i32;
    let line_width = f64::from(params.line_width());
    let leaf_kind = if params.spline() {
        ShapeKind::Spline
    } else {
        ShapeKind::Polygon
    };
    let random_fill = params.random_fill();

    let mut branch = Vec::with_capacity(stroke.points().len());
    let mut anchor = stroke.last_point();

    for &point in stroke.points().iter().rev() {
        let gap = distance(anchor, point);
        if style.leaf_length > 0 && gap > 0.0 && gap > spacing {
            let bearing = line_angle(anchor, point);
            // Zero spacing decorates each captured point once.
            let sites = if style.spacing == 0 {
                1
            } else {
                (gap / spacing).floor() as u32
            };

            for step in 0..sites {
                let brush = if random_fill.enabled {
                    random_fill.sample(rng)
                } else {
                    params.leaf_brush()
                };
                let site = angular_offset(anchor, f64::from(step) * spacing, bearing);

                for sign in [-1, 1] {
                    let angle = bearing + sign * leaf_angle;
                    let base = angular_offset(site, line_width, angle);
                    shapes.push(Shape {
                        kind: leaf_kind,
                        pen: params.leaf_pen(),
                        brush,
                        width: LEAF_STROKE_WIDTH,
                        points: leaf_outline(style.shape_id, base, leaf_length, angle),
                    });
                }
            }
            anchor = point;
        }
        branch.push(point);
    }

    // The walk ends on `begin`, so the polyline is already closed.
    if branch.len() >= 2 && params.line_width() > 0 {
        shapes.push(Shape {
            kind: ShapeKind::Line,
            pen: params.branch_pen(),
            brush: params.branch_brush(),
            width: params.line_width(),
            points: branch,
        });
    }
}

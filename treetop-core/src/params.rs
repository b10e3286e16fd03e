//! Decoration parameters.
//!
//! The UI layer only ever calls the setters here; each setter clamps its
//! input to a fixed range. The values owned by this type are the canonical
//! ones.

use serde::{Deserialize, Serialize};

use crate::color::{Color, RandomFill};
use crate::leaf::MAX_SHAPE_ID;

/// Upper bound for the leaf angle, in degrees.
pub const MAX_LEAF_ANGLE: u32 = 180;
/// Upper bound for the leaf length.
pub const MAX_LEAF_LENGTH: u32 = 150;
/// Upper bound for the spacing between decoration points.
pub const MAX_SPACING: u32 = 50;
/// Upper bound for the branch line width.
pub const MAX_LINE_WIDTH: u32 = 20;

/// Which strokes a parameter change applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamScope {
    /// Only strokes started after the change.
    #[default]
    NewStrokes,
    /// Every stroke, including the ones already drawn ("redraw all").
    AllStrokes,
}

/// Which color a color change targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTarget {
    /// Leaf outline (pen).
    LeafOutline,
    /// Leaf fill (brush). Setting it turns random fill off.
    LeafFill,
    /// Branch line, pen and brush together.
    Branch,
}

/// Leaf settings frozen into a stroke when it is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafStyle {
    /// Active leaf shape id (0 = plain line).
    pub shape_id: u8,
    /// Leaf angle relative to the branch, in degrees.
    pub leaf_angle: u32,
    /// Leaf length.
    pub leaf_length: u32,
    /// Minimum gap between decoration points.
    pub spacing: u32,
}

impl Default for LeafStyle {
    fn default() -> Self {
        Self {
            shape_id: 0,
            leaf_angle: 60,
            leaf_length: 50,
            spacing: 20,
        }
    }
}

/// Global decoration state read by the scene engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorationParameters {
    leaf: LeafStyle,
    line_width: u32,
    spline: bool,
    leaf_pen: Color,
    leaf_brush: Color,
    branch_pen: Color,
    branch_brush: Color,
    random_fill: RandomFill,
}

impl Default for DecorationParameters {
    fn default() -> Self {
        Self {
            leaf: LeafStyle::default(),
            line_width: 10,
            spline: false,
            leaf_pen: Color::BLACK,
            leaf_brush: Color::BLACK,
            branch_pen: Color::BLACK,
            branch_brush: Color::BLACK,
            random_fill: RandomFill::default(),
        }
    }
}

impl DecorationParameters {
    /// Leaf style that new strokes will freeze.
    #[must_use]
    pub fn leaf_style(&self) -> LeafStyle {
        self.leaf
    }

    /// Current leaf angle.
    #[must_use]
    pub fn leaf_angle(&self) -> u32 {
        self.leaf.leaf_angle
    }

    /// Current leaf length.
    #[must_use]
    pub fn leaf_length(&self) -> u32 {
        self.leaf.leaf_length
    }

    /// Current spacing between decoration points.
    #[must_use]
    pub fn spacing(&self) -> u32 {
        self.leaf.spacing
    }

    /// Current leaf shape id.
    #[must_use]
    pub fn shape_id(&self) -> u8 {
        self.leaf.shape_id
    }

    /// Branch line width.
    #[must_use]
    pub fn line_width(&self) -> u32 {
        self.line_width
    }

    /// Whether shapes render as smooth splines.
    #[must_use]
    pub fn spline(&self) -> bool {
        self.spline
    }

    /// Leaf outline color.
    #[must_use]
    pub fn leaf_pen(&self) -> Color {
        self.leaf_pen
    }

    /// Fixed leaf fill color, used when random fill is off.
    #[must_use]
    pub fn leaf_brush(&self) -> Color {
        self.leaf_brush
    }

    /// Branch pen color.
    #[must_use]
    pub fn branch_pen(&self) -> Color {
        self.branch_pen
    }

    /// Branch brush color.
    #[must_use]
    pub fn branch_brush(&self) -> Color {
        self.branch_brush
    }

    /// Random leaf fill range.
    #[must_use]
    pub fn random_fill(&self) -> RandomFill {
        self.random_fill
    }

    /// Set the leaf angle, clamped to `[0, 180]`. Returns the stored value.
    pub fn set_leaf_angle(&mut self, value: u32) -> u32 {
        self.leaf.leaf_angle = value.min(MAX_LEAF_ANGLE);
        self.leaf.leaf_angle
    }

    /// Set the leaf length, clamped to `[0, 150]`. Returns the stored value.
    pub fn set_leaf_length(&mut self, value: u32) -> u32 {
        self.leaf.leaf_length = value.min(MAX_LEAF_LENGTH);
        self.leaf.leaf_length
    }

    /// Set the spacing, clamped to `[0, 50]`. Returns the stored value.
    pub fn set_spacing(&mut self, value: u32) -> u32 {
        self.leaf.spacing = value.min(MAX_SPACING);
        self.leaf.spacing
    }

    /// Set the line width, clamped to `[0, 20]`. Returns the stored value.
    pub fn set_line_width(&mut self, value: u32) -> u32 {
        self.line_width = value.min(MAX_LINE_WIDTH);
        self.line_width
    }

    /// Set the shape id, clamped to `[0, 10]`. Returns the stored value.
    pub fn set_shape_id(&mut self, value: u8) -> u8 {
        self.leaf.shape_id = value.min(MAX_SHAPE_ID);
        self.leaf.shape_id
    }

    /// Toggle spline rendering.
    pub fn set_spline(&mut self, spline: bool) {
        self.spline = spline;
    }

    /// Set one of the configurable colors.
    pub fn set_color(&mut self, target: ColorTarget, color: Color) {
        match target {
            ColorTarget::LeafOutline => self.leaf_pen = color,
            ColorTarget::LeafFill => {
                self.leaf_brush = color;
                self.random_fill.enabled = false;
            }
            ColorTarget::Branch => {
                self.branch_pen = color;
                self.branch_brush = color;
            }
        }
    }

    /// Set the random fill range. Equal colors turn random fill off and
    /// become the fixed leaf fill.
    pub fn set_random_color(&mut self, first: Color, second: Color) {
        self.random_fill = RandomFill::between(first, second);
        if !self.random_fill.enabled {
            self.leaf_brush = first;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = DecorationParameters::default();
        assert_eq!(params.leaf_angle(), 60);
        assert_eq!(params.leaf_length(), 50);
        assert_eq!(params.spacing(), 20);
        assert_eq!(params.line_width(), 10);
        assert_eq!(params.shape_id(), 0);
        assert!(!params.spline());
        assert!(!params.random_fill().enabled);
    }

    #[test]
    fn test_setters_clamp() {
        let mut params = DecorationParameters::default();
        assert_eq!(params.set_leaf_angle(500), 180);
        assert_eq!(params.set_leaf_length(151), 150);
        assert_eq!(params.set_spacing(1000), 50);
        assert_eq!(params.set_line_width(21), 20);
        assert_eq!(params.set_shape_id(42), 10);
        assert_eq!(params.set_leaf_angle(0), 0);
    }

    #[test]
    fn test_leaf_fill_disables_random() {
        let mut params = DecorationParameters::default();
        params.set_random_color(Color::rgb(0, 0, 0), Color::rgb(0, 200, 0));
        assert!(params.random_fill().enabled);

        params.set_color(ColorTarget::LeafFill, Color::rgb(10, 20, 30));
        assert!(!params.random_fill().enabled);
        assert_eq!(params.leaf_brush(), Color::rgb(10, 20, 30));
    }

    #[test]
    fn test_equal_random_bounds_become_leaf_fill() {
        let mut params = DecorationParameters::default();
        params.set_color(ColorTarget::LeafFill, Color::rgb(1, 2, 3));
        params.set_random_color(Color::rgb(40, 120, 60), Color::rgb(40, 120, 60));
        assert!(!params.random_fill().enabled);
        assert_eq!(params.leaf_brush(), Color::rgb(40, 120, 60));

        params.set_random_color(Color::rgb(0, 0, 0), Color::rgb(9, 9, 9));
        assert!(params.random_fill().enabled);
        assert_eq!(params.leaf_brush(), Color::rgb(40, 120, 60));
    }

    #[test]
    fn test_branch_color_sets_pen_and_brush() {
        let mut params = DecorationParameters::default();
        params.set_color(ColorTarget::Branch, Color::rgb(90, 60, 30));
        assert_eq!(params.branch_pen(), Color::rgb(90, 60, 30));
        assert_eq!(params.branch_brush(), Color::rgb(90, 60, 30));
    }
}

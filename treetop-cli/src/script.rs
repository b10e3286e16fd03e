//! Event scripts: a JSON array of input events and canvas commands replayed
//! in order against a [`Canvas`].
//!
//! ```json
//! [
//!   {"command": "set_shape", "value": 3, "scope": "new_strokes"},
//!   {"type": "Pointer", "data": {"phase": "down", "x": 400, "y": 300}},
//!   {"type": "Pointer", "data": {"phase": "move", "x": 520, "y": 260}},
//!   {"type": "Pointer", "data": {"phase": "up", "x": 520, "y": 260}},
//!   {"type": "Key", "data": {"key": "Escape"}}
//! ]
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use treetop_core::{
    angular_offset, Canvas, CanvasSize, Color, ColorTarget, InputEvent, ParamScope, Point,
    PointerPhase,
};

/// One step of an event script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    /// Raw pointer or keyboard input.
    Input(InputEvent),
    /// Direct canvas operation.
    Command(CanvasCommand),
}

/// Canvas operations a script can call directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CanvasCommand {
    /// Set the leaf angle.
    SetLeafAngle {
        /// Degrees.
        value: u32,
        /// Strokes affected.
        #[serde(default)]
        scope: ParamScope,
    },
    /// Set the leaf length.
    SetLeafLength {
        /// Length in pixels.
        value: u32,
        /// Strokes affected.
        #[serde(default)]
        scope: ParamScope,
    },
    /// Set the spacing between decoration points.
    SetSpacing {
        /// Spacing in pixels.
        value: u32,
        /// Strokes affected.
        #[serde(default)]
        scope: ParamScope,
    },
    /// Select a leaf shape.
    SetShape {
        /// Shape id.
        value: u8,
        /// Strokes affected.
        #[serde(default)]
        scope: ParamScope,
    },
    /// Set the branch line width.
    SetLineWidth {
        /// Width in pixels.
        value: u32,
    },
    /// Toggle spline rendering.
    SetSpline {
        /// Whether splines are on.
        value: bool,
    },
    /// Set one of the colors.
    SetColor {
        /// Which color.
        target: ColorTarget,
        /// The new color.
        color: Color,
    },
    /// Set the random fill range.
    SetRandomColor {
        /// First bound.
        first: Color,
        /// Second bound.
        second: Color,
    },
    /// Resize the drawing area.
    Resize {
        /// New width.
        width: u32,
        /// New height.
        height: u32,
        /// Clear strokes first.
        #[serde(default)]
        reset: bool,
    },
    /// Lift the pen.
    BreakStroke,
    /// Undo the newest stroke.
    Undo,
    /// Redo the last undone stroke.
    Redo,
    /// Clear the canvas.
    Reset,
}

/// Parse a script from JSON text.
///
/// # Errors
///
/// Returns an error if the text is not a JSON array of script steps.
pub fn parse_script(json: &str) -> anyhow::Result<Vec<ScriptStep>> {
    serde_json::from_str(json).context("Invalid event script")
}

/// Replay `steps` against `canvas`. Returns the number of steps that
/// changed what is on screen.
///
/// A rejected resize is logged and skipped, like any other failed step in
/// an interactive session.
pub fn replay(canvas: &mut Canvas, steps: &[ScriptStep]) -> usize {
    let mut repaints = 0;
    for (index, step) in steps.iter().enumerate() {
        let repaint = match step {
            ScriptStep::Input(event) => canvas.process_event(event),
            ScriptStep::Command(command) => apply_command(canvas, command),
        };
        tracing::trace!("Step {index}: {step:?} (repaint: {repaint})");
        if repaint {
            repaints += 1;
        }
    }
    repaints
}

fn apply_command(canvas: &mut Canvas, command: &CanvasCommand) -> bool {
    match *command {
        CanvasCommand::SetLeafAngle { value, scope } => {
            canvas.set_leaf_angle(value, scope);
        }
        CanvasCommand::SetLeafLength { value, scope } => {
            canvas.set_leaf_length(value, scope);
        }
        CanvasCommand::SetSpacing { value, scope } => {
            canvas.set_spacing(value, scope);
        }
        CanvasCommand::SetShape { value, scope } => {
            canvas.set_shape(value, scope);
        }
        CanvasCommand::SetLineWidth { value } => {
            canvas.set_line_width(value);
        }
        CanvasCommand::SetSpline { value } => canvas.set_spline(value),
        CanvasCommand::SetColor { target, color } => canvas.set_color(target, color),
        CanvasCommand::SetRandomColor { first, second } => canvas.set_random_color(first, second),
        CanvasCommand::Resize {
            width,
            height,
            reset,
        } => {
            if canvas
                .resize(CanvasSize::new(width, height), reset)
                .is_err()
            {
                return false;
            }
        }
        CanvasCommand::BreakStroke => canvas.break_stroke(),
        CanvasCommand::Undo => {
            canvas.undo();
        }
        CanvasCommand::Redo => {
            canvas.redo();
        }
        CanvasCommand::Reset => canvas.reset(),
    }
    true
}

/// A small shrub: eight gently curving branches radiating from the centre.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn demo_script(size: CanvasSize, border: u32) -> Vec<ScriptStep> {
    let center = Point::new(f64::from(size.width) / 2.0, f64::from(size.height) / 2.0);
    let reach = f64::from(size.width.min(size.height)) / 2.0 - f64::from(border) - 10.0;
    let mut steps = Vec::new();

    for branch in 0..8 {
        let heading = branch * 45;
        let mut radius = 0.0;
        let mut phase = PointerPhase::Down;
        while radius <= reach {
            let bend = (radius / 12.0) as i32;
            let point = angular_offset(center, radius, heading + bend);
            steps.push(ScriptStep::Input(InputEvent::pointer(phase, point.x, point.y)));
            phase = PointerPhase::Move;
            radius += 15.0;
        }
        if let Some(ScriptStep::Input(InputEvent::Pointer(last))) = steps.last().cloned() {
            steps.push(ScriptStep::Input(InputEvent::pointer(
                PointerPhase::Up,
                last.x,
                last.y,
            )));
        }
        steps.push(ScriptStep::Input(InputEvent::key("Escape")));
    }
    steps
}

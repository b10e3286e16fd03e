//! The drawing canvas: stroke history, decoration parameters and the derived
//! scene, driven by pointer and keyboard input.
//!
//! Every mutation that can change the drawing rebuilds the scene from scratch.
//! Pointer input is only accepted strictly inside the panel border.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::event::{InputEvent, KeyAction, PointerEvent, PointerPhase};
use crate::geometry::Point;
use crate::params::{ColorTarget, DecorationParameters, LeafStyle, ParamScope};
use crate::scene::Scene;
use crate::size::{parse_size, CanvasSize};
use crate::stroke::{StrokeHistory, StrokeId};
use crate::{CanvasError, CanvasResult};

/// Canvas construction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Initial drawing area size.
    pub size: CanvasSize,
    /// Largest size a resize may request.
    pub max_size: CanvasSize,
    /// Width of the margin where pointer input is ignored.
    pub border: u32,
    /// Radius of the cursor and start marker circles.
    pub cursor_radius: u32,
    /// Seed for the random fill generator. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            size: CanvasSize::new(800, 600),
            max_size: CanvasSize::new(1920, 1080),
            border: 20,
            cursor_radius: 5,
            seed: None,
        }
    }
}

/// A circle in the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Centre point.
    pub center: Point,
    /// Radius in pixels.
    pub radius: f64,
}

/// A straight overlay segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Point,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// The four corners, clockwise from the origin, with the origin repeated.
    #[must_use]
    pub fn outline(&self) -> [Point; 5] {
        let Point { x, y } = self.origin;
        [
            Point::new(x, y),
            Point::new(x + self.width, y),
            Point::new(x + self.width, y + self.height),
            Point::new(x, y + self.height),
            Point::new(x, y),
        ]
    }
}

/// Interaction hints drawn on top of the scene. Never exported by the custom
/// SVG writer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    /// Cursor indicator.
    pub cursor: Option<Circle>,
    /// Marker on a stroke that so far has a single point.
    pub start_marker: Option<Circle>,
    /// Segment from the open stroke's last point to the cursor.
    pub rubber_band: Option<Segment>,
    /// Panel border.
    pub border: Option<Rect>,
    /// Vertical and horizontal centre lines.
    pub guides: Vec<Segment>,
}

/// Everything a rendering sink needs for one repaint.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Drawing area width.
    pub width: u32,
    /// Drawing area height.
    pub height: u32,
    /// Interaction overlay.
    pub overlay: &'a Overlay,
    /// Derived shapes.
    pub scene: &'a Scene,
}

impl Frame<'_> {
    /// Whether shapes should be drawn as splines.
    #[must_use]
    pub fn spline(&self) -> bool {
        self.scene.spline
    }
}

/// Interactive drawing state.
#[derive(Debug, Clone)]
pub struct Canvas {
    config: CanvasConfig,
    size: CanvasSize,
    history: StrokeHistory,
    params: DecorationParameters,
    rng: StdRng,
    scene: Scene,
    overlay: Overlay,
    cursor: Option<Point>,
    is_drawing: bool,
    dragging: bool,
}

impl Canvas {
    /// Create an empty canvas.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidSize`] if the initial size is outside
    /// `[100 x 100, max_size]`.
    pub fn new(config: CanvasConfig) -> CanvasResult<Self> {
        let size = config.size;
        check_size(size, config.max_size)?;
        let rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        let mut canvas = Self {
            config,
            size,
            history: StrokeHistory::new(),
            params: DecorationParameters::default(),
            rng,
            scene: Scene::default(),
            overlay: Overlay::default(),
            cursor: None,
            is_drawing: true,
            dragging: false,
        };
        canvas.rebuild();
        tracing::debug!("Canvas created at {size}");
        Ok(canvas)
    }

    /// Current drawing area size.
    #[must_use]
    pub fn size(&self) -> CanvasSize {
        self.size
    }

    /// Construction settings.
    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Whether there are no active strokes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Stroke history.
    #[must_use]
    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    /// Decoration parameters.
    #[must_use]
    pub fn params(&self) -> &DecorationParameters {
        &self.params
    }

    /// The derived scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The interaction overlay.
    #[must_use]
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Everything needed to paint the canvas.
    #[must_use]
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            width: self.size.width,
            height: self.size.height,
            overlay: &self.overlay,
            scene: &self.scene,
        }
    }

    /// Whether a point lies strictly inside the panel border.
    #[must_use]
    pub fn accepts(&self, point: Point) -> bool {
        let border = f64::from(self.config.border);
        point.x > border
            && point.x < f64::from(self.size.width) - border
            && point.y > border
            && point.y < f64::from(self.size.height) - border
    }

    /// Process an input event. Returns `true` when a repaint is needed.
    pub fn process_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Pointer(pointer) => self.process_pointer(pointer),
            InputEvent::Key { key, modifiers } => {
                let Some(action) = KeyAction::from_key(key, *modifiers) else {
                    tracing::trace!("Ignoring key {key:?}");
                    return false;
                };
                match action {
                    KeyAction::LiftPen => self.break_stroke(),
                    KeyAction::Undo => {
                        self.undo();
                    }
                    KeyAction::Redo => {
                        self.redo();
                    }
                    KeyAction::Reset => self.reset(),
                }
                true
            }
        }
    }

    fn process_pointer(&mut self, pointer: &PointerEvent) -> bool {
        let point = Point::new(pointer.x, pointer.y);
        match pointer.phase {
            PointerPhase::Down if pointer.is_primary() => self.pointer_down(point),
            PointerPhase::Up if pointer.is_primary() => self.pointer_up(point),
            PointerPhase::Down | PointerPhase::Up | PointerPhase::Move => {
                self.pointer_move(point)
            }
            PointerPhase::Leave => self.pointer_leave(),
        }
    }

    /// Primary button pressed. Starts a new stroke when the pen is lifted,
    /// otherwise continues the open one. Returns `true` when a repaint is needed.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        if !self.track_cursor(point) {
            return self.refresh_overlay();
        }
        self.is_drawing = true;
        self.dragging = true;
        if self.history.pen_lifted() {
            self.history.begin_stroke(point, self.params.leaf_style());
        } else {
            self.history.extend_stroke(point);
        }
        self.rebuild();
        true
    }

    /// Pointer moved. Extends the open stroke while the button is held.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        if !self.track_cursor(point) {
            return self.refresh_overlay();
        }
        if self.dragging && self.history.extend_stroke(point) {
            self.rebuild();
        } else {
            self.refresh_overlay();
        }
        true
    }

    /// Primary button released. The stroke stays open for continuation.
    pub fn pointer_up(&mut self, point: Point) -> bool {
        self.track_cursor(point);
        self.dragging = false;
        self.is_drawing = false;
        self.refresh_overlay();
        true
    }

    /// Pointer left the drawing area.
    pub fn pointer_leave(&mut self) -> bool {
        self.cursor = None;
        self.refresh_overlay()
    }

    /// Lift the pen: the next pointer-down starts a new stroke.
    pub fn break_stroke(&mut self) {
        self.history.break_stroke();
        self.dragging = false;
        self.refresh_overlay();
    }

    /// Undo the newest stroke.
    pub fn undo(&mut self) -> Option<StrokeId> {
        let id = self.history.undo();
        self.rebuild();
        id
    }

    /// Restore the most recently undone stroke at the end of the stroke list.
    pub fn redo(&mut self) -> Option<StrokeId> {
        let id = self.history.redo();
        self.rebuild();
        id
    }

    /// Remove every stroke, including the undo buffer.
    pub fn reset(&mut self) {
        self.history.reset();
        self.dragging = false;
        self.rebuild();
    }

    /// Resize the drawing area, optionally clearing it first.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidSize`] if `size` is below 100 x 100 or
    /// above the configured maximum. The canvas is left unchanged.
    pub fn resize(&mut self, size: CanvasSize, reset: bool) -> CanvasResult<()> {
        if let Err(err) = check_size(size, self.config.max_size) {
            tracing::warn!("Resize rejected: {err}");
            return Err(err);
        }
        if reset {
            self.history.reset();
            self.dragging = false;
        }
        self.size = size;
        tracing::debug!("Canvas resized to {size}");
        self.rebuild();
        Ok(())
    }

    /// Resize from user-entered text.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::MalformedSize`] for unparseable input, or
    /// [`CanvasError::InvalidSize`] as for [`Canvas::resize`].
    pub fn resize_from_text(&mut self, width: &str, height: &str, reset: bool) -> CanvasResult<()> {
        let size = parse_size(width, height).map_err(|err| {
            tracing::warn!("Resize rejected: {err}");
            CanvasError::from(err)
        })?;
        self.resize(size, reset)
    }

    /// Set the leaf angle in degrees. Returns the clamped value.
    pub fn set_leaf_angle(&mut self, value: u32, scope: ParamScope) -> u32 {
        let stored = self.params.set_leaf_angle(value);
        self.apply_style(scope, |style| style.leaf_angle = stored);
        tracing::debug!("Leaf angle set to {stored} ({scope:?})");
        stored
    }

    /// Set the leaf length. Returns the clamped value.
    pub fn set_leaf_length(&mut self, value: u32, scope: ParamScope) -> u32 {
        let stored = self.params.set_leaf_length(value);
        self.apply_style(scope, |style| style.leaf_length = stored);
        tracing::debug!("Leaf length set to {stored} ({scope:?})");
        stored
    }

    /// Set the spacing between decoration points. Returns the clamped value.
    pub fn set_spacing(&mut self, value: u32, scope: ParamScope) -> u32 {
        let stored = self.params.set_spacing(value);
        self.apply_style(scope, |style| style.spacing = stored);
        tracing::debug!("Spacing set to {stored} ({scope:?})");
        stored
    }

    /// Select the leaf shape. Returns the clamped id.
    pub fn set_shape(&mut self, shape_id: u8, scope: ParamScope) -> u8 {
        let stored = self.params.set_shape_id(shape_id);
        self.apply_style(scope, |style| style.shape_id = stored);
        tracing::debug!("Leaf shape set to {stored} ({scope:?})");
        stored
    }

    /// Set the branch line width. Applies to every stroke.
    pub fn set_line_width(&mut self, value: u32) -> u32 {
        let stored = self.params.set_line_width(value);
        tracing::debug!("Line width set to {stored}");
        self.rebuild();
        stored
    }

    /// Toggle spline rendering.
    pub fn set_spline(&mut self, spline: bool) {
        self.params.set_spline(spline);
        tracing::debug!("Spline rendering {}", if spline { "on" } else { "off" });
        self.rebuild();
    }

    /// Set one of the configurable colors.
    pub fn set_color(&mut self, target: ColorTarget, color: Color) {
        self.params.set_color(target, color);
        tracing::debug!("{target:?} color set to {color}");
        self.rebuild();
    }

    /// Set the random leaf fill range. Equal colors disable random fill.
    pub fn set_random_color(&mut self, first: Color, second: Color) {
        self.params.set_random_color(first, second);
        tracing::debug!(
            "Random fill {first}..{second} ({})",
            if self.params.random_fill().enabled {
                "enabled"
            } else {
                "disabled"
            }
        );
        self.rebuild();
    }

    fn apply_style(&mut self, scope: ParamScope, update: impl Fn(&mut LeafStyle)) {
        if scope == ParamScope::AllStrokes {
            self.history.restyle_all(update);
            self.rebuild();
        }
    }

    /// Record the cursor if `point` is inside the border. Returns whether it was.
    fn track_cursor(&mut self, point: Point) -> bool {
        if self.accepts(point) {
            self.cursor = Some(point);
            true
        } else {
            self.cursor = None;
            false
        }
    }

    fn rebuild(&mut self) {
        self.scene = Scene::build(
            self.history.strokes(),
            &self.params,
            self.size.width,
            self.size.height,
            &mut self.rng,
        );
        self.refresh_overlay();
    }

    /// Recompute the overlay. Returns whether it changed.
    fn refresh_overlay(&mut self) -> bool {
        let overlay = self.compute_overlay();
        let changed = overlay != self.overlay;
        self.overlay = overlay;
        changed
    }

    fn compute_overlay(&self) -> Overlay {
        let radius = f64::from(self.config.cursor_radius);
        let mut overlay = Overlay::default();

        if self.is_drawing || self.history.pen_lifted() {
            overlay.cursor = self.cursor.map(|center| Circle { center, radius });
        }

        if let Some(last) = self.history.strokes().last() {
            if last.points().len() == 1 {
                overlay.start_marker = Some(Circle {
                    center: last.begin(),
                    radius,
                });
            }
        }

        if let (Some(open), Some(cursor)) = (self.history.open_stroke(), self.cursor) {
            overlay.rubber_band = Some(Segment {
                from: open.last_point(),
                to: cursor,
            });
        }

        if self.is_drawing || self.history.is_empty() {
            let border = f64::from(self.config.border);
            let width = f64::from(self.size.width);
            let height = f64::from(self.size.height);
            overlay.border = Some(Rect {
                origin: Point::new(border, border),
                width: width - 2.0 * border,
                height: height - 2.0 * border,
            });
            overlay.guides = vec![
                Segment {
                    from: Point::new(width / 2.0, 0.0),
                    to: Point::new(width / 2.0, height),
                },
                Segment {
                    from: Point::new(0.0, height / 2.0),
                    to: Point::new(width, height / 2.0),
                },
            ];
        }

        overlay
    }
}

fn check_size(size: CanvasSize, max: CanvasSize) -> CanvasResult<()> {
    if size.fits(CanvasSize::MIN, max) {
        Ok(())
    } else {
        Err(CanvasError::InvalidSize {
            requested: size,
            min: CanvasSize::MIN,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KeyModifiers;

    fn canvas() -> Canvas {
        Canvas::new(CanvasConfig {
            seed: Some(7),
            ..CanvasConfig::default()
        })
        .expect("default config is valid")
    }

    fn drag(canvas: &mut Canvas, from: (f64, f64), to: (f64, f64)) {
        canvas.pointer_down(Point::new(from.0, from.1));
        canvas.pointer_move(Point::new(to.0, to.1));
        canvas.pointer_up(Point::new(to.0, to.1));
    }

    #[test]
    fn test_new_canvas_is_empty() {
        let canvas = canvas();
        assert!(canvas.is_empty());
        assert!(canvas.scene().is_empty());
        assert_eq!(canvas.size(), CanvasSize::new(800, 600));
        assert!(canvas.history().pen_lifted());
    }

    #[test]
    fn test_invalid_initial_size() {
        let result = Canvas::new(CanvasConfig {
            size: CanvasSize::new(50, 600),
            ..CanvasConfig::default()
        });
        assert!(matches!(result, Err(CanvasError::InvalidSize { .. })));
    }

    #[test]
    fn test_drag_builds_scene() {
        let mut canvas = canvas();
        drag(&mut canvas, (100.0, 100.0), (300.0, 100.0));

        assert_eq!(canvas.history().strokes().len(), 1);
        assert_eq!(canvas.scene().shape_count(), 21);
        assert_eq!(canvas.scene().stroke_count, 1);
    }

    #[test]
    fn test_pointer_outside_border_is_ignored() {
        let mut canvas = canvas();
        canvas.pointer_down(Point::new(10.0, 300.0));
        canvas.pointer_down(Point::new(20.0, 300.0));
        canvas.pointer_down(Point::new(790.0, 300.0));
        assert!(canvas.is_empty());
        assert!(canvas.overlay().cursor.is_none());
    }

    #[test]
    fn test_click_continues_until_pen_lifted() {
        let mut canvas = canvas();
        canvas.pointer_down(Point::new(100.0, 100.0));
        canvas.pointer_up(Point::new(100.0, 100.0));
        canvas.pointer_down(Point::new(150.0, 100.0));
        canvas.pointer_up(Point::new(150.0, 100.0));
        assert_eq!(canvas.history().strokes().len(), 1);
        assert_eq!(canvas.history().strokes()[0].points().len(), 2);

        assert!(canvas.process_event(&InputEvent::key("Escape")));
        canvas.pointer_down(Point::new(200.0, 200.0));
        assert_eq!(canvas.history().strokes().len(), 2);
    }

    #[test]
    fn test_move_without_button_does_not_extend() {
        let mut canvas = canvas();
        canvas.pointer_down(Point::new(100.0, 100.0));
        canvas.pointer_up(Point::new(100.0, 100.0));
        canvas.pointer_move(Point::new(200.0, 100.0));
        assert_eq!(canvas.history().strokes()[0].points().len(), 1);
    }

    #[test]
    fn test_keys_drive_history() {
        let mut canvas = canvas();
        drag(&mut canvas, (100.0, 100.0), (300.0, 100.0));

        canvas.process_event(&InputEvent::key("Backspace"));
        assert!(canvas.is_empty());
        assert!(canvas.scene().shapes().is_empty());

        let ctrl_y = InputEvent::Key {
            key: "y".to_string(),
            modifiers: KeyModifiers {
                ctrl: true,
                ..KeyModifiers::default()
            },
        };
        canvas.process_event(&ctrl_y);
        assert_eq!(canvas.scene().shape_count(), 21);

        canvas.process_event(&InputEvent::key("Delete"));
        assert!(canvas.is_empty());
        assert!(canvas.history().removed().is_empty());

        assert!(!canvas.process_event(&InputEvent::key("q")));
    }

    #[test]
    fn test_resize_bounds() {
        let mut canvas = canvas();
        drag(&mut canvas, (100.0, 100.0), (300.0, 100.0));

        assert!(canvas.resize(CanvasSize::new(99, 400), false).is_err());
        assert!(canvas.resize(CanvasSize::new(400, 1081), false).is_err());
        assert_eq!(canvas.size(), CanvasSize::new(800, 600));
        assert_eq!(canvas.history().strokes().len(), 1);

        canvas.resize(CanvasSize::new(400, 300), false).expect("valid size");
        assert_eq!(canvas.size(), CanvasSize::new(400, 300));
        assert_eq!(canvas.scene().width, 400);
        assert!(!canvas.is_empty());

        canvas.resize(CanvasSize::new(500, 500), true).expect("valid size");
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_resize_from_text() {
        let mut canvas = canvas();
        assert!(matches!(
            canvas.resize_from_text("wide", "300", false),
            Err(CanvasError::MalformedSize(_))
        ));
        assert!(matches!(
            canvas.resize_from_text("0", "300", false),
            Err(CanvasError::InvalidSize { .. })
        ));
        canvas
            .resize_from_text(" 640 ", "480", false)
            .expect("valid text");
        assert_eq!(canvas.size(), CanvasSize::new(640, 480));
    }

    #[test]
    fn test_scope_controls_restyle() {
        let mut canvas = canvas();
        drag(&mut canvas, (100.0, 100.0), (300.0, 100.0));

        canvas.set_leaf_length(0, ParamScope::NewStrokes);
        assert_eq!(canvas.scene().shape_count(), 21);
        assert_eq!(canvas.history().strokes()[0].style.leaf_length, 50);

        canvas.set_leaf_length(0, ParamScope::AllStrokes);
        assert_eq!(canvas.history().strokes()[0].style.leaf_length, 0);
        assert_eq!(canvas.scene().shape_count(), 1);
    }

    #[test]
    fn test_line_width_applies_everywhere() {
        let mut canvas = canvas();
        drag(&mut canvas, (100.0, 100.0), (300.0, 100.0));
        assert_eq!(canvas.set_line_width(0), 0);
        assert!(canvas.scene().shapes().iter().all(|s| !s.is_line()));
    }

    #[test]
    fn test_overlay_states() {
        let mut canvas = canvas();
        let overlay = canvas.overlay();
        assert!(overlay.border.is_some());
        assert_eq!(overlay.guides.len(), 2);

        canvas.pointer_down(Point::new(100.0, 100.0));
        let overlay = canvas.overlay();
        assert_eq!(
            overlay.start_marker.map(|c| c.center),
            Some(Point::new(100.0, 100.0))
        );
        assert!(overlay.cursor.is_some());

        canvas.pointer_move(Point::new(200.0, 100.0));
        canvas.pointer_up(Point::new(200.0, 100.0));
        canvas.pointer_move(Point::new(250.0, 150.0));
        let overlay = canvas.overlay();
        assert!(overlay.start_marker.is_none());
        // Not drawing, pen down, strokes present: only the rubber band.
        assert!(overlay.cursor.is_none());
        assert!(overlay.border.is_none());
        assert_eq!(
            overlay.rubber_band,
            Some(Segment {
                from: Point::new(200.0, 100.0),
                to: Point::new(250.0, 150.0),
            })
        );

        canvas.break_stroke();
        let overlay = canvas.overlay();
        assert!(overlay.rubber_band.is_none());
        assert!(overlay.cursor.is_some());
    }

    #[test]
    fn test_pointer_leave_hides_cursor() {
        let mut canvas = canvas();
        canvas.pointer_move(Point::new(100.0, 100.0));
        assert!(canvas.overlay().cursor.is_some());
        assert!(canvas.pointer_leave());
        assert!(canvas.overlay().cursor.is_none());
    }

    #[test]
    fn test_frame_reflects_spline_toggle() {
        let mut canvas = canvas();
        assert!(!canvas.frame().spline());
        canvas.set_spline(true);
        assert!(canvas.frame().spline());
        assert_eq!((canvas.frame().width, canvas.frame().height), (800, 600));
    }

    #[test]
    fn test_rect_outline_is_closed() {
        let rect = Rect {
            origin: Point::new(20.0, 20.0),
            width: 760.0,
            height: 560.0,
        };
        let outline = rect.outline();
        assert_eq!(outline[0], outline[4]);
        assert_eq!(outline[2], Point::new(780.0, 580.0));
    }
}

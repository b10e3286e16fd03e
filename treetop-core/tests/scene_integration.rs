//! Scene Reconstruction Integration Tests
//!
//! Exercises the full path from pointer input to derived shapes:
//! - Leaf decoration counts on a straight stroke
//! - Undo / redo restoring the stroke list
//! - Reconstruction idempotence, with and without random fill
//! - Resize rejection
//! - Random fill with equal bounds

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use treetop_core::{
    leaf_outline, reconstruct, Canvas, CanvasConfig, CanvasSize, Color, ColorTarget,
    DecorationParameters, InputEvent, LeafStyle, ParamScope, Point, PointerPhase, Shape,
    StrokeHistory, MAX_SHAPE_ID,
};

fn seeded_canvas() -> Canvas {
    Canvas::new(CanvasConfig {
        seed: Some(42),
        ..CanvasConfig::default()
    })
    .expect("default config is valid")
}

/// Drag from `from` to `to` in `steps` pointer moves.
fn drag(canvas: &mut Canvas, from: Point, to: Point, steps: u32) {
    canvas.process_event(&InputEvent::pointer(PointerPhase::Down, from.x, from.y));
    for step in 1..=steps {
        let t = f64::from(step) / f64::from(steps);
        let x = from.x + (to.x - from.x) * t;
        let y = from.y + (to.y - from.y) * t;
        canvas.process_event(&InputEvent::pointer(PointerPhase::Move, x, y));
    }
    canvas.process_event(&InputEvent::pointer(PointerPhase::Up, to.x, to.y));
    canvas.process_event(&InputEvent::key("Escape"));
}

fn leaves(shapes: &[Shape]) -> impl Iterator<Item = &Shape> {
    shapes.iter().filter(|s| !s.is_line())
}

fn point_lists(shapes: &[Shape]) -> Vec<Vec<Point>> {
    shapes.iter().map(|s| s.points.clone()).collect()
}

// ============================================================================
// Scenario Tests
// ============================================================================

#[test]
fn test_straight_stroke_gets_twenty_leaves_and_one_line() {
    let mut canvas = seeded_canvas();
    canvas.set_shape(1, ParamScope::NewStrokes);
    canvas.set_spacing(20, ParamScope::NewStrokes);
    canvas.set_leaf_angle(60, ParamScope::NewStrokes);
    canvas.set_leaf_length(50, ParamScope::NewStrokes);

    drag(&mut canvas, Point::new(100.0, 300.0), Point::new(300.0, 300.0), 1);

    let shapes = canvas.scene().shapes();
    assert_eq!(leaves(shapes).count(), 20);
    assert_eq!(shapes.iter().filter(|s| s.is_line()).count(), 1);
}

#[test]
fn test_strokes_keep_their_own_style() {
    let mut canvas = seeded_canvas();
    canvas.set_shape(2, ParamScope::NewStrokes);
    drag(&mut canvas, Point::new(100.0, 100.0), Point::new(300.0, 100.0), 1);
    canvas.set_shape(6, ParamScope::NewStrokes);
    drag(&mut canvas, Point::new(100.0, 400.0), Point::new(300.0, 400.0), 1);

    let strokes = canvas.history().strokes();
    assert_eq!(strokes[0].style.shape_id, 2);
    assert_eq!(strokes[1].style.shape_id, 6);

    canvas.set_shape(3, ParamScope::AllStrokes);
    assert!(canvas
        .history()
        .strokes()
        .iter()
        .all(|stroke| stroke.style.shape_id == 3));
}

#[test]
fn test_dense_sampling_matches_single_segment() {
    // Segments that are whole multiples of the spacing subdivide into the
    // same sites however the pointer was sampled.
    let mut sparse = seeded_canvas();
    drag(&mut sparse, Point::new(100.0, 300.0), Point::new(500.0, 300.0), 1);
    let mut dense = seeded_canvas();
    drag(&mut dense, Point::new(100.0, 300.0), Point::new(500.0, 300.0), 4);

    assert_eq!(
        leaves(sparse.scene().shapes()).count(),
        leaves(dense.scene().shapes()).count()
    );
}

#[test]
fn test_undo_then_redo_restores_strokes() {
    let mut canvas = seeded_canvas();
    drag(&mut canvas, Point::new(100.0, 100.0), Point::new(300.0, 150.0), 4);
    drag(&mut canvas, Point::new(200.0, 300.0), Point::new(400.0, 250.0), 4);
    let before = canvas.history().strokes().to_vec();
    let shapes_before = point_lists(canvas.scene().shapes());

    canvas.undo();
    assert_eq!(canvas.history().strokes().len(), 1);
    canvas.redo();

    assert_eq!(canvas.history().strokes(), before.as_slice());
    assert_eq!(point_lists(canvas.scene().shapes()), shapes_before);
}

#[test]
fn test_resize_rejection_leaves_canvas_unchanged() {
    let mut canvas = seeded_canvas();
    drag(&mut canvas, Point::new(100.0, 100.0), Point::new(300.0, 150.0), 2);
    let shapes = canvas.scene().clone();

    for size in [
        CanvasSize::new(99, 99),
        CanvasSize::new(100, 99),
        CanvasSize::new(1921, 600),
        CanvasSize::new(800, 5000),
    ] {
        assert!(canvas.resize(size, true).is_err());
    }

    assert_eq!(canvas.size(), CanvasSize::new(800, 600));
    assert_eq!(canvas.history().strokes().len(), 1);
    assert_eq!(canvas.scene().shapes(), shapes.shapes());
}

#[test]
fn test_equal_random_bounds_give_exact_fill() {
    let fill = Color::rgb(40, 120, 60);
    let mut canvas = seeded_canvas();
    canvas.set_color(ColorTarget::LeafFill, Color::rgb(1, 2, 3));
    canvas.set_random_color(fill, fill);
    assert!(!canvas.params().random_fill().enabled);

    drag(&mut canvas, Point::new(100.0, 100.0), Point::new(400.0, 300.0), 3);
    assert_eq!(canvas.params().leaf_brush(), fill);
    assert!(leaves(canvas.scene().shapes()).count() > 0);
    assert!(leaves(canvas.scene().shapes()).all(|s| s.brush == fill));

    let mut params = DecorationParameters::default();
    params.set_random_color(fill, fill);
    assert_eq!(params.random_fill().min, fill);
    assert_eq!(params.random_fill().max, fill);
}

#[test]
fn test_random_fill_stays_within_bounds() {
    let mut canvas = seeded_canvas();
    canvas.set_random_color(Color::rgb(10, 100, 20), Color::rgb(60, 180, 40));
    drag(&mut canvas, Point::new(100.0, 100.0), Point::new(700.0, 500.0), 6);

    assert!(leaves(canvas.scene().shapes()).count() > 0);
    for leaf in leaves(canvas.scene().shapes()) {
        assert!((10..60).contains(&leaf.brush.r));
        assert!((100..180).contains(&leaf.brush.g));
        assert!((20..40).contains(&leaf.brush.b));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

fn arb_style() -> impl Strategy<Value = LeafStyle> {
    (0..=MAX_SHAPE_ID, 0u32..=180, 0u32..=150, 0u32..=50).prop_map(
        |(shape_id, leaf_angle, leaf_length, spacing)| LeafStyle {
            shape_id,
            leaf_angle,
            leaf_length,
            spacing,
        },
    )
}

fn arb_points() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((21.0f64..779.0, 21.0f64..579.0), 1..12)
}

fn history_from(strokes: &[(LeafStyle, Vec<(f64, f64)>)]) -> StrokeHistory {
    let mut history = StrokeHistory::new();
    for (style, points) in strokes {
        let mut iter = points.iter().copied().map(Point::from);
        if let Some(first) = iter.next() {
            history.begin_stroke(first, *style);
            for point in iter {
                history.extend_stroke(point);
            }
        }
    }
    history
}

proptest! {
    #[test]
    fn prop_zero_length_leaf_collapses_to_anchor(
        shape_id in 0..=MAX_SHAPE_ID,
        x in -500.0f64..500.0,
        y in -500.0f64..500.0,
        angle in -360i32..720,
    ) {
        let anchor = Point::new(x, y);
        let outline = leaf_outline(shape_id, anchor, 0.0, angle);
        prop_assert!(!outline.is_empty());
        for point in outline {
            prop_assert!(point.approx_eq(anchor, 1e-9));
        }
    }

    #[test]
    fn prop_undo_redo_round_trip(
        strokes in prop::collection::vec((arb_style(), arb_points()), 1..5)
    ) {
        let mut history = history_from(&strokes);
        history.break_stroke();
        let before = history.strokes().to_vec();

        history.undo();
        history.redo();

        prop_assert_eq!(history.strokes(), before.as_slice());
        prop_assert!(history.removed().is_empty());
    }

    #[test]
    fn prop_reconstruction_is_idempotent(
        strokes in prop::collection::vec((arb_style(), arb_points()), 1..5),
        random in any::<bool>(),
    ) {
        let history = history_from(&strokes);
        let mut params = DecorationParameters::default();
        if random {
            params.set_random_color(Color::rgb(0, 50, 0), Color::rgb(90, 200, 90));
        }
        let mut rng = StdRng::seed_from_u64(3);

        let first = reconstruct(history.strokes(), &params, &mut rng);
        let second = reconstruct(history.strokes(), &params, &mut rng);

        prop_assert_eq!(first.len(), second.len());
        prop_assert_eq!(point_lists(&first), point_lists(&second));
        if !random {
            prop_assert_eq!(first, second);
        }
    }
}

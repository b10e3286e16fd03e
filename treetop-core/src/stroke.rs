//! Freehand strokes and their undo history.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Point;
use crate::params::LeafStyle;

/// Unique identifier for a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrokeId(Uuid);

impl StrokeId {
    /// Create a new unique stroke ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StrokeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StrokeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One continuous freehand drag.
///
/// A stroke always holds at least one point. `begin` is the first point and
/// `end` is the last point at the time the stroke was closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    id: StrokeId,
    points: Vec<Point>,
    begin: Point,
    end: Point,
    /// Leaf settings captured when the stroke was started.
    pub style: LeafStyle,
}

impl Stroke {
    /// Start a stroke at `point` with a frozen leaf style.
    #[must_use]
    pub fn new(point: Point, style: LeafStyle) -> Self {
        Self {
            id: StrokeId::new(),
            points: vec![point],
            begin: point,
            end: point,
            style,
        }
    }

    /// Stroke identifier.
    #[must_use]
    pub fn id(&self) -> StrokeId {
        self.id
    }

    /// Captured points, oldest first. Never empty.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// First point of the stroke.
    #[must_use]
    pub fn begin(&self) -> Point {
        self.begin
    }

    /// Closing point of the stroke.
    #[must_use]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Most recently captured point.
    #[must_use]
    pub fn last_point(&self) -> Point {
        self.points.last().copied().unwrap_or(self.begin)
    }

    fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    fn close(&mut self) {
        self.end = self.last_point();
    }
}

/// Active strokes plus the undo buffer.
///
/// Undo moves the newest active stroke onto the removed stack and redo moves
/// it back to the end of the active list. A stroke is never on both stacks.
/// Every operation is a no-op when there is nothing to act on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrokeHistory {
    active: Vec<Stroke>,
    removed: Vec<Stroke>,
    /// Whether the newest active stroke still accepts points.
    open: bool,
}

impl StrokeHistory {
    /// Create an empty history. The pen starts lifted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active strokes, oldest first.
    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        &self.active
    }

    /// Strokes in the undo buffer, most recently removed last.
    #[must_use]
    pub fn removed(&self) -> &[Stroke] {
        &self.removed
    }

    /// The stroke currently accepting points, if any.
    #[must_use]
    pub fn open_stroke(&self) -> Option<&Stroke> {
        if self.open {
            self.active.last()
        } else {
            None
        }
    }

    /// Whether there are no active strokes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Whether the next pointer-down should start a new stroke.
    #[must_use]
    pub fn pen_lifted(&self) -> bool {
        !self.open
    }

    /// Close the open stroke (if any) and start a new one at `point`.
    pub fn begin_stroke(&mut self, point: Point, style: LeafStyle) -> StrokeId {
        self.close_open();
        let stroke = Stroke::new(point, style);
        let id = stroke.id();
        self.active.push(stroke);
        self.open = true;
        tracing::debug!("Began stroke {id} at ({}, {})", point.x, point.y);
        id
    }

    /// Append `point` to the open stroke. Returns `false` when no stroke is open.
    pub fn extend_stroke(&mut self, point: Point) -> bool {
        if !self.open {
            return false;
        }
        match self.active.last_mut() {
            Some(stroke) => {
                stroke.push(point);
                true
            }
            None => false,
        }
    }

    /// Lift the pen so the next pointer-down starts a new stroke.
    pub fn break_stroke(&mut self) {
        self.close_open();
    }

    /// Move the newest active stroke to the undo buffer.
    pub fn undo(&mut self) -> Option<StrokeId> {
        self.break_stroke();
        let stroke = self.active.pop()?;
        let id = stroke.id();
        self.removed.push(stroke);
        tracing::debug!("Undo stroke {id}");
        Some(id)
    }

    /// Re-append the most recently undone stroke to the active list.
    ///
    /// Redo always appends at the current end; strokes drawn after the undo
    /// stay before the restored one.
    pub fn redo(&mut self) -> Option<StrokeId> {
        self.break_stroke();
        let stroke = self.removed.pop()?;
        let id = stroke.id();
        self.active.push(stroke);
        tracing::debug!("Redo stroke {id}");
        Some(id)
    }

    /// Drop every stroke, active and removed.
    pub fn reset(&mut self) {
        self.active.clear();
        self.removed.clear();
        self.open = false;
        tracing::debug!("Stroke history reset");
    }

    /// Apply `update` to the leaf style of every active stroke.
    ///
    /// Strokes in the undo buffer keep the style they were removed with.
    pub fn restyle_all(&mut self, mut update: impl FnMut(&mut LeafStyle)) {
        for stroke in &mut self.active {
            update(&mut stroke.style);
        }
    }

    fn close_open(&mut self) {
        if self.open {
            if let Some(stroke) = self.active.last_mut() {
                stroke.close();
            }
            self.open = false;
        }
    }
}

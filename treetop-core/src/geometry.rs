//! Trigonometric primitives shared by the leaf library and the scene engine.
//!
//! Angles are whole degrees measured from the positive x axis towards the
//! positive y axis, so on a y-down canvas 90° points down the screen.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A 2D coordinate in canvas pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X position (pixels from left).
    pub x: f64,
    /// Y position (pixels from top).
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Midpoint between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Check whether two points coincide within `epsilon` on both axes.
    #[must_use]
    pub fn approx_eq(self, other: Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Point reached by travelling `length` from `origin` along `angle_degrees`.
///
/// A zero `length` returns `origin` unchanged.
#[must_use]
pub fn angular_offset(origin: Point, length: f64, angle_degrees: i32) -> Point {
    let radians = f64::from(angle_degrees).to_radians();
    Point::new(
        origin.x + length * radians.cos(),
        origin.y + length * radians.sin(),
    )
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(p0: Point, p1: Point) -> f64 {
    (p1.x - p0.x).hypot(p1.y - p0.y)
}

/// Bearing of the segment from `p0` to `p1`, in whole degrees within `[0, 360)`.
///
/// Axis-aligned segments resolve exactly: +x is 0, +y is 90, -x is 180 and
/// -y is 270. Diagonals are rounded to the nearest degree. Coincident points
/// have no direction and yield 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
pub fn line_angle(p0: Point, p1: Point) -> i32 {
    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;

    match (dx == 0.0, dy == 0.0) {
        (true, true) => 0,
        (false, true) => {
            if dx > 0.0 {
                0
            } else {
                180
            }
        }
        (true, false) => {
            if dy > 0.0 {
                90
            } else {
                270
            }
        }
        (false, false) => {
            let degrees = dy.atan2(dx).to_degrees().round() as i32;
            degrees.rem_euclid(360)
        }
    }
}

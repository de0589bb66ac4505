use std::ops::{Add, Sub};

/// A point in canvas-relative logical pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Returns `value` if it is a usable fraction in `(0, 1]`, clamping values above 1.
///
/// Non-finite and non-positive values yield `None`.
pub fn sanitize_fraction(value: f64) -> Option<f64> {
    if value.is_finite() && value > 0. {
        Some(value.min(1.))
    } else {
        None
    }
}

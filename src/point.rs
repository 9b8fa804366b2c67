//! Integer pixel coordinates and displacement vectors.

use std::ops::{Add, Sub};

/// Integer `(x, y)` pair used for reference points, block centers, and
/// displacement vectors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Point {
    /// Marks a reference point whose block did not fit in the source buffer.
    pub const SENTINEL: Point = Point {
        x: i32::MAX,
        y: i32::MAX,
    };

    /// Zero displacement.
    pub const ZERO: Point = Point { x: 0, y: 0 };

    /// Creates a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true for the skipped-point sentinel.
    pub fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }
}

/// Componentwise addition; wraps on overflow.
impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x.wrapping_add(rhs.x), self.y.wrapping_add(rhs.y))
    }
}

/// Componentwise subtraction; wraps on overflow.
impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x.wrapping_sub(rhs.x), self.y.wrapping_sub(rhs.y))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

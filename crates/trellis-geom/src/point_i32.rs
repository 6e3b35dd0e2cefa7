use std::ops::{Add, Sub};

use super::Point;

/// A signed point, used for intermediate coordinates that may fall to the
/// left of or above an origin before clipping.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct PointI32 {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

impl PointI32 {
    /// Construct a new signed point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return the origin point.
    pub fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Convert to an unsigned point if both coordinates are non-negative.
    pub fn to_point(&self) -> Option<Point> {
        Some(Point {
            x: u32::try_from(self.x).ok()?,
            y: u32::try_from(self.y).ok()?,
        })
    }
}

impl Add for PointI32 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x.saturating_add(other.x),
            y: self.y.saturating_add(other.y),
        }
    }
}

impl Sub for PointI32 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x.saturating_sub(other.x),
            y: self.y.saturating_sub(other.y),
        }
    }
}

impl From<(i32, i32)> for PointI32 {
    #[inline]
    fn from(v: (i32, i32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

impl From<Point> for PointI32 {
    fn from(p: Point) -> Self {
        Self {
            x: i32::try_from(p.x).unwrap_or(i32::MAX),
            y: i32::try_from(p.y).unwrap_or(i32::MAX),
        }
    }
}

use std::ops::Add;

use super::Rect;

/// A cell position with non-negative coordinates.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, PartialOrd, Ord)]
pub struct Point {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
}

impl Point {
    /// Construct a point.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub fn zero() -> Self {
        (0, 0).into()
    }

    /// Is this the origin?
    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Shift the point by a signed offset, saturating at the axis bounds.
    pub fn scroll(&self, x: i32, y: i32) -> Self {
        let nx = if x < 0 {
            self.x.saturating_sub(x.unsigned_abs())
        } else {
            self.x.saturating_add(x.unsigned_abs())
        };
        let ny = if y < 0 {
            self.y.saturating_sub(y.unsigned_abs())
        } else {
            self.y.saturating_add(y.unsigned_abs())
        };
        (nx, ny).into()
    }

    /// Clamp a point so that it falls within `rect`. An empty rect clamps to
    /// its origin.
    pub fn clamp(&self, rect: Rect) -> Self {
        Self {
            x: self
                .x
                .clamp(rect.tl.x, rect.tl.x + rect.w.saturating_sub(1)),
            y: self
                .y
                .clamp(rect.tl.y, rect.tl.y + rect.h.saturating_sub(1)),
        }
    }

    /// Subtract `origin` from this point, returning `None` if the result
    /// would be negative on either axis.
    pub fn relative_to(&self, origin: Self) -> Option<Self> {
        Some(Self {
            x: self.x.checked_sub(origin.x)?,
            y: self.y.checked_sub(origin.y)?,
        })
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x.saturating_add(other.x),
            y: self.y.saturating_add(other.y),
        }
    }
}

impl From<(u32, u32)> for Point {
    #[inline]
    fn from(v: (u32, u32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

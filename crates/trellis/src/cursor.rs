//! The terminal cursor.

use std::ops::Add;

use crate::geom::Point;

/// Cursor glyph shape variants.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum CursorShape {
    /// Underscore cursor.
    Underscore,
    /// Vertical bar cursor.
    Line,
    /// Block cursor.
    #[default]
    Block,
}

/// Cursor position, shape, and blink behavior.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Cursor {
    /// Location of the cursor. Components report it relative to their own
    /// origin; backends receive it in screen coordinates.
    pub location: Point,
    /// Shape of the cursor.
    pub shape: CursorShape,
    /// Should the cursor blink?
    pub blink: bool,
}

impl Cursor {
    /// A blinking block cursor at a location.
    pub fn at(location: impl Into<Point>) -> Self {
        Self {
            location: location.into(),
            shape: CursorShape::Block,
            blink: true,
        }
    }
}

impl Add<Point> for Cursor {
    type Output = Self;

    fn add(self, other: Point) -> Self {
        Self {
            location: self.location + other,
            ..self
        }
    }
}

use super::{Point, PointI32, Rect};

/// A rectangle with a signed origin and unsigned size.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct RectI32 {
    /// Top-left corner.
    pub tl: PointI32,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl RectI32 {
    /// Construct a rectangle from coordinates and size.
    pub fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self {
            tl: PointI32 { x, y },
            w,
            h,
        }
    }

    /// Does this rect have a zero size?
    pub fn is_zero(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Translate this rectangle by an offset.
    pub fn shift(&self, by: PointI32) -> Self {
        Self {
            tl: self.tl + by,
            w: self.w,
            h: self.h,
        }
    }

    /// Intersect this signed rect with an unsigned rect in the same coordinate
    /// space. The result is always a valid non-negative rectangle.
    pub fn intersect_rect(&self, other: Rect) -> Option<Rect> {
        let left = self.tl.x as i64;
        let top = self.tl.y as i64;
        let right = left + self.w as i64;
        let bottom = top + self.h as i64;

        let other_left = other.tl.x as i64;
        let other_top = other.tl.y as i64;
        let other_right = other_left + other.w as i64;
        let other_bottom = other_top + other.h as i64;

        let inter_left = left.max(other_left);
        let inter_top = top.max(other_top);
        let inter_right = right.min(other_right);
        let inter_bottom = bottom.min(other_bottom);

        if inter_right <= inter_left || inter_bottom <= inter_top {
            return None;
        }

        Some(Rect::new(
            inter_left as u32,
            inter_top as u32,
            (inter_right - inter_left) as u32,
            (inter_bottom - inter_top) as u32,
        ))
    }

    /// Express a point in this rect's local coordinates, if the rect
    /// contains it.
    pub fn rebase(&self, p: Point) -> Option<Point> {
        let x = u32::try_from(p.x as i64 - self.tl.x as i64).ok()?;
        let y = u32::try_from(p.y as i64 - self.tl.y as i64).ok()?;
        (x < self.w && y < self.h).then_some(Point { x, y })
    }

    /// The part of `other` inside this rect, in this rect's local
    /// coordinates.
    pub fn rebase_rect(&self, other: &Rect) -> Option<Rect> {
        let isec = self.intersect_rect(*other)?;
        let tl = self.rebase(isec.tl)?;
        Some(Rect::new(tl.x, tl.y, isec.w, isec.h))
    }
}

impl From<Rect> for RectI32 {
    fn from(r: Rect) -> Self {
        Self {
            tl: r.tl.into(),
            w: r.w,
            h: r.h,
        }
    }
}

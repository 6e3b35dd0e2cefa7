use super::{Expanse, LineSegment, Point};
use crate::{Error, Result};

/// A rectangle with a non-negative origin.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Rect {
    /// Construct a rectangle from coordinates and size.
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            tl: Point { x, y },
            w,
            h,
        }
    }

    /// A zero rectangle at the origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Construct a rectangle from a horizontal and a vertical extent.
    pub fn from_extents(h: LineSegment, v: LineSegment) -> Self {
        Self::new(h.off, v.off, h.len, v.len)
    }

    /// Does this rect have a zero size?
    pub fn is_zero(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Number of cells covered.
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// The size of this rectangle.
    pub fn expanse(&self) -> Expanse {
        Expanse::new(self.w, self.h)
    }

    /// One past the rightmost column.
    pub fn right(&self) -> u32 {
        self.tl.x.saturating_add(self.w)
    }

    /// One past the bottom row.
    pub fn bottom(&self) -> u32 {
        self.tl.y.saturating_add(self.h)
    }

    /// The horizontal extent of this rectangle.
    pub fn hextent(&self) -> LineSegment {
        LineSegment {
            off: self.tl.x,
            len: self.w,
        }
    }

    /// The vertical extent of this rectangle.
    pub fn vextent(&self) -> LineSegment {
        LineSegment {
            off: self.tl.y,
            len: self.h,
        }
    }

    /// Does this rectangle contain the point?
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.tl.x && p.x < self.right() && p.y >= self.tl.y && p.y < self.bottom()
    }

    /// Does this rectangle completely enclose the other? An empty rectangle is
    /// enclosed if it sits within our bounds.
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.tl.x >= self.tl.x
            && other.tl.y >= self.tl.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// The intersection of two rectangles, or `None` if they don't overlap.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let h = self.hextent().intersection(&other.hextent())?;
        let v = self.vextent().intersection(&other.vextent())?;
        Some(Self::from_extents(h, v))
    }

    /// The smallest rectangle enclosing both. Zero-sized rectangles are
    /// ignored.
    pub fn union(&self, other: &Self) -> Self {
        if other.is_zero() {
            *self
        } else if self.is_zero() {
            *other
        } else {
            Self::from_extents(
                self.hextent().enclose(&other.hextent()),
                self.vextent().enclose(&other.vextent()),
            )
        }
    }

    /// Translate this rectangle by an offset.
    pub fn shift(&self, by: Point) -> Self {
        Self {
            tl: self.tl + by,
            w: self.w,
            h: self.h,
        }
    }

    /// Return a rectangle of the same size located at `tl`.
    pub fn at(&self, tl: Point) -> Self {
        Self {
            tl,
            w: self.w,
            h: self.h,
        }
    }

    /// Given a point that falls within this rectangle, rebase the point to be
    /// relative to our origin. If the point falls outside the rect, an error is
    /// returned.
    pub fn rebase(&self, pt: Point) -> Result<Point> {
        if !self.contains_point(pt) {
            return Err(Error::Geometry("co-ords outside rectangle".into()));
        }
        Ok(Point {
            x: pt.x - self.tl.x,
            y: pt.y - self.tl.y,
        })
    }

    /// Rebase a rectangle that lies within this one to be relative to our
    /// origin. Portions outside this rectangle are clipped away.
    pub fn rebase_rect(&self, other: &Self) -> Option<Self> {
        let isec = self.intersect(other)?;
        Some(Self::new(
            isec.tl.x - self.tl.x,
            isec.tl.y - self.tl.y,
            isec.w,
            isec.h,
        ))
    }

    /// Splits the rectangle horizontally into n columns, as close to equally
    /// sized as possible. Excess columns go to the leftmost sections.
    pub fn split_horizontal(&self, n: u32) -> Result<Vec<Self>> {
        let widths = split(self.w, n)?;
        let mut off = self.tl.x;
        let mut ret = Vec::with_capacity(n as usize);
        for w in widths {
            ret.push(Self::new(off, self.tl.y, w, self.h));
            off += w;
        }
        Ok(ret)
    }

    /// Splits the rectangle vertically into n rows, as close to equally sized
    /// as possible. Excess rows go to the topmost sections.
    pub fn split_vertical(&self, n: u32) -> Result<Vec<Self>> {
        let heights = split(self.h, n)?;
        let mut off = self.tl.y;
        let mut ret = Vec::with_capacity(n as usize);
        for h in heights {
            ret.push(Self::new(self.tl.x, off, self.w, h));
            off += h;
        }
        Ok(ret)
    }
}

impl From<Expanse> for Rect {
    fn from(e: Expanse) -> Self {
        e.rect()
    }
}

/// Split a length into n sections as evenly as possible, front-loading the
/// remainder.
pub(crate) fn split(len: u32, n: u32) -> Result<Vec<u32>> {
    if n == 0 {
        return Err(Error::Geometry("divide by zero".into()));
    }
    let w = len / n;
    let rem = len % n;
    Ok((0..n).map(|i| if i < rem { w + 1 } else { w }).collect())
}

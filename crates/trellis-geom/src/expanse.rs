use super::{Point, Rect};

/// An `Expanse` is a size with no location: a width and a height.
///
/// Preferred sizes may use [`Expanse::UNBOUNDED`] on either axis to mean "as
/// much as is available". Arithmetic on expanses saturates, so the sentinel
/// never wraps.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Expanse {
    /// Width in cells.
    pub w: u32,
    /// Height in cells.
    pub h: u32,
}

impl Expanse {
    /// Sentinel dimension meaning "as much as needed".
    pub const UNBOUNDED: u32 = u32::MAX;

    /// Construct an expanse.
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// A zero-sized expanse.
    pub fn zero() -> Self {
        Self::default()
    }

    /// An expanse that is unbounded in both dimensions.
    pub fn unbounded() -> Self {
        Self {
            w: Self::UNBOUNDED,
            h: Self::UNBOUNDED,
        }
    }

    /// Is either dimension zero?
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Is either dimension the unbounded sentinel?
    pub fn is_unbounded(&self) -> bool {
        self.w == Self::UNBOUNDED || self.h == Self::UNBOUNDED
    }

    /// The area of this expanse. Computed in 64 bits so that large or
    /// unbounded sizes don't overflow.
    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// Return a `Rect` with the same dimensions as the `Expanse`, located at (0, 0).
    pub fn rect(&self) -> Rect {
        Rect {
            tl: Point::zero(),
            w: self.w,
            h: self.h,
        }
    }

    /// True if this expanse can completely enclose the target in both dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }

    /// Clamp both dimensions to fit within `max`.
    pub fn clamp_to(&self, max: Self) -> Self {
        Self {
            w: self.w.min(max.w),
            h: self.h.min(max.h),
        }
    }

    /// The component-wise maximum of two expanses.
    pub fn max(&self, other: Self) -> Self {
        Self {
            w: self.w.max(other.w),
            h: self.h.max(other.h),
        }
    }
}

impl From<Rect> for Expanse {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(u32, u32)> for Expanse {
    fn from(v: (u32, u32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}

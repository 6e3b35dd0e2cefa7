/// A directionless one-dimensional segment, used to carve up one axis of a
/// rectangle during layout.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct LineSegment {
    /// The offset of this segment.
    pub off: u32,
    /// The length of this segment.
    pub len: u32,
}

impl LineSegment {
    /// Construct a segment.
    pub fn new(off: u32, len: u32) -> Self {
        Self { off, len }
    }

    /// The far limit of the segment.
    pub fn far(&self) -> u32 {
        self.off.saturating_add(self.len)
    }

    /// Return a segment that encloses this segment and another. If the
    /// segments overlap or abut, this is equivalent to joining them.
    pub fn enclose(&self, other: &Self) -> Self {
        let off = self.off.min(other.off);
        Self {
            off,
            len: self.far().max(other.far()) - off,
        }
    }

    /// Take up to `n` from the start of this segment, returning a (head,
    /// tail) tuple. If the segment is shorter than `n`, the head is truncated
    /// to the whole segment and the tail is empty.
    pub fn take_start(&self, n: u32) -> (Self, Self) {
        let n = n.min(self.len);
        (
            Self {
                off: self.off,
                len: n,
            },
            Self {
                off: self.off + n,
                len: self.len - n,
            },
        )
    }

    /// Take up to `n` from the end of this segment, returning a (head, tail)
    /// tuple. If the segment is shorter than `n`, the tail is truncated to the
    /// whole segment and the head is empty.
    pub fn take_end(&self, n: u32) -> (Self, Self) {
        let n = n.min(self.len);
        let head = Self {
            off: self.off,
            len: self.len - n,
        };
        (
            head,
            Self {
                off: head.far(),
                len: n,
            },
        )
    }

    /// Are these two segments adjacent but non-overlapping?
    pub fn abuts(&self, other: &Self) -> bool {
        self.far() == other.off || other.far() == self.off
    }

    /// Does other lie completely within this segment?
    pub fn contains(&self, other: &Self) -> bool {
        self.off <= other.off && self.far() >= other.far()
    }

    /// Return the intersection between this segment and other. The segment
    /// returned always has a non-zero length.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let off = self.off.max(other.off);
        let far = self.far().min(other.far());
        if self.len == 0 || other.len == 0 || far <= off {
            None
        } else {
            Some(Self {
                off,
                len: far - off,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    #[test]
    fn take() -> Result<()> {
        let s = LineSegment::new(5, 5);
        assert_eq!(
            s.take_start(2),
            (LineSegment::new(5, 2), LineSegment::new(7, 3))
        );
        assert_eq!(
            s.take_start(10),
            (LineSegment::new(5, 5), LineSegment::new(10, 0))
        );
        assert_eq!(
            s.take_end(2),
            (LineSegment::new(5, 3), LineSegment::new(8, 2))
        );
        assert_eq!(
            s.take_end(10),
            (LineSegment::new(5, 0), LineSegment::new(5, 5))
        );
        Ok(())
    }

    #[test]
    fn intersection() -> Result<()> {
        let l = LineSegment::new(5, 5);
        assert_eq!(
            l.intersection(&LineSegment::new(6, 2)),
            Some(LineSegment::new(6, 2))
        );
        assert_eq!(l.intersection(&LineSegment::new(1, 10)), Some(l));
        assert_eq!(
            l.intersection(&LineSegment::new(0, 8)),
            Some(LineSegment::new(5, 3))
        );
        assert_eq!(l.intersection(&LineSegment::new(10, 2)), None);
        assert_eq!(l.intersection(&LineSegment::new(5, 0)), None);
        assert_eq!(l.intersection(&LineSegment::new(0, 5)), None);
        Ok(())
    }

    #[test]
    fn enclose_and_abut() -> Result<()> {
        let a = LineSegment::new(0, 5);
        let b = LineSegment::new(5, 3);
        assert!(a.abuts(&b));
        assert_eq!(a.enclose(&b), LineSegment::new(0, 8));
        assert!(a.enclose(&b).contains(&b));
        Ok(())
    }
}

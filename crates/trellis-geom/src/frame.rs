use super::Rect;

/// The border segments of a rectangle, for drawing boxes around content.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Frame {
    /// The top of the frame, not including corners.
    pub top: Rect,
    /// The bottom of the frame, not including corners.
    pub bottom: Rect,
    /// The left of the frame, not including corners.
    pub left: Rect,
    /// The right of the frame, not including corners.
    pub right: Rect,
    /// The top left corner.
    pub topleft: Rect,
    /// The top right corner.
    pub topright: Rect,
    /// The bottom left corner.
    pub bottomleft: Rect,
    /// The bottom right corner.
    pub bottomright: Rect,
    /// The original outer rect.
    outer: Rect,
    /// The border width.
    border: u32,
}

impl Frame {
    /// Construct a new frame. If the rect is too small to hold a border of the
    /// given width on both sides, every segment is zero.
    pub fn new(rect: Rect, border: u32) -> Self {
        if rect.w < border * 2 || rect.h < border * 2 || border == 0 {
            return Self {
                outer: rect,
                border,
                ..Self::default()
            };
        }
        let x = rect.tl.x;
        let y = rect.tl.y;
        let iw = rect.w - 2 * border;
        let ih = rect.h - 2 * border;
        let far_x = rect.right() - border;
        let far_y = rect.bottom() - border;
        Self {
            top: Rect::new(x + border, y, iw, border),
            bottom: Rect::new(x + border, far_y, iw, border),
            left: Rect::new(x, y + border, border, ih),
            right: Rect::new(far_x, y + border, border, ih),
            topleft: Rect::new(x, y, border, border),
            topright: Rect::new(far_x, y, border, border),
            bottomleft: Rect::new(x, far_y, border, border),
            bottomright: Rect::new(far_x, far_y, border, border),
            outer: rect,
            border,
        }
    }

    /// The space inside the frame.
    pub fn inner(&self) -> Rect {
        if self.outer.w < self.border * 2 || self.outer.h < self.border * 2 {
            Rect::zero()
        } else {
            Rect::new(
                self.outer.tl.x + self.border,
                self.outer.tl.y + self.border,
                self.outer.w - 2 * self.border,
                self.outer.h - 2 * self.border,
            )
        }
    }

    /// The rect the frame was built from.
    pub fn outer(&self) -> Rect {
        self.outer
    }
}

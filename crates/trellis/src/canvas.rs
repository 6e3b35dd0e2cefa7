//! Bounded views over a frame's cell storage.
//!
//! A [`Canvas`] never owns cells. It borrows a [`TermBuf`] and carries an
//! origin and a clip rectangle, so a component draws in its own coordinate
//! space and can't touch cells outside the area it was handed. Every write
//! that falls outside the view is silently dropped.

use unicode_segmentation::UnicodeSegmentation;

use crate::{
    geom::{Expanse, Point, PointI32, Rect, RectI32},
    style::Style,
    termbuf::{Cell, TermBuf},
    text,
};

/// A clipped, translated view onto a [`TermBuf`].
#[derive(Debug)]
pub struct Canvas<'a> {
    /// Backing storage.
    buf: &'a mut TermBuf,
    /// Buffer position of the view's local origin. This may be negative when
    /// a view starts above or to the left of the buffer.
    origin: PointI32,
    /// Logical size of the view.
    size: Expanse,
    /// Writable area in buffer coordinates, if any.
    clip: Option<Rect>,
}

impl<'a> Canvas<'a> {
    /// A view covering the whole buffer.
    pub fn new(buf: &'a mut TermBuf) -> Self {
        let size = buf.size();
        let clip = (!size.is_empty()).then(|| buf.rect());
        Self {
            buf,
            origin: PointI32::zero(),
            size,
            clip,
        }
    }

    /// The logical size of this view.
    pub fn size(&self) -> Expanse {
        self.size
    }

    /// The view's bounds in local coordinates.
    pub fn rect(&self) -> Rect {
        self.size.rect()
    }

    /// The writable part of the view in buffer coordinates.
    pub fn clip(&self) -> Option<Rect> {
        self.clip
    }

    /// Map a local point to a buffer point, if it is writable.
    fn to_buffer(&self, p: Point) -> Option<Point> {
        if !self.rect().contains_point(p) {
            return None;
        }
        let x = u32::try_from(self.origin.x as i64 + p.x as i64).ok()?;
        let y = u32::try_from(self.origin.y as i64 + p.y as i64).ok()?;
        let bp = Point { x, y };
        self.clip
            .filter(|clip| clip.contains_point(bp))
            .map(|_| bp)
    }

    /// Clip a rect given in local coordinates to the writable area, returning
    /// it in buffer coordinates.
    fn clip_local(&self, r: RectI32) -> Option<Rect> {
        let local = r.intersect_rect(self.rect())?;
        let clip = self.clip?;
        RectI32::from(local)
            .shift(self.origin)
            .intersect_rect(clip)
    }

    /// A sub-view over `r`, given in this view's coordinates. The sub-view's
    /// origin is `r.tl`, and it can never write outside this view.
    pub fn sub(&mut self, r: Rect) -> Canvas<'_> {
        self.sub_signed(r.into())
    }

    /// A sub-view whose origin may lie outside this view, for content that is
    /// offset or scrolled. Only the overlap with this view is writable.
    pub fn sub_signed(&mut self, r: RectI32) -> Canvas<'_> {
        let clip = self.clip_local(r);
        Canvas {
            origin: self.origin + r.tl,
            size: Expanse::new(r.w, r.h),
            clip,
            buf: self.buf,
        }
    }

    /// A view with the same coordinate space, but only `r` (local) writable.
    pub fn restrict(&mut self, r: Rect) -> Canvas<'_> {
        let clip = self.clip_local(r.into());
        Canvas {
            origin: self.origin,
            size: self.size,
            clip,
            buf: self.buf,
        }
    }

    /// Read back a cell at a local position.
    pub fn get(&self, p: Point) -> Option<&Cell> {
        if !self.rect().contains_point(p) {
            return None;
        }
        let x = u32::try_from(self.origin.x as i64 + p.x as i64).ok()?;
        let y = u32::try_from(self.origin.y as i64 + p.y as i64).ok()?;
        self.buf.get(Point { x, y })
    }

    /// Write a single glyph.
    pub fn put(&mut self, p: Point, ch: char, style: Style) {
        if let Some(bp) = self.to_buffer(p) {
            self.buf.put(bp, ch, style);
        }
    }

    /// Fill a local rectangle with a glyph.
    pub fn fill(&mut self, style: Style, r: Rect, ch: char) {
        if let Some(target) = self.clip_local(r.into()) {
            self.buf.fill(style, target, ch);
        }
    }

    /// Fill the whole view with blanks.
    pub fn clear(&mut self, style: Style) {
        self.fill(style, self.rect(), ' ');
    }

    /// Draw a single line of text starting at `p`, returning the number of
    /// columns consumed. Text stops at the right edge of the view. A wide
    /// glyph that is only partly writable is replaced by blanks.
    pub fn text(&mut self, style: Style, p: Point, txt: &str) -> u32 {
        let mut x = p.x;
        for grapheme in txt.graphemes(true) {
            if grapheme == "\n" || grapheme == "\r\n" {
                break;
            }
            let width = text::grapheme_width(grapheme) as u32;
            if x.saturating_add(width) > self.size.w {
                break;
            }
            let cells: Vec<Option<Point>> = (0..width)
                .map(|i| self.to_buffer(Point { x: x + i, y: p.y }))
                .collect();
            if cells.iter().all(Option::is_some) {
                for (i, bp) in cells.into_iter().flatten().enumerate() {
                    let cell = if i == 0 {
                        Cell::grapheme(grapheme, style)
                    } else {
                        Cell::continuation(style)
                    };
                    self.buf.set(bp, cell);
                }
            } else {
                for bp in cells.into_iter().flatten() {
                    self.buf.put(bp, ' ', style);
                }
            }
            x += width;
        }
        x - p.x
    }
}

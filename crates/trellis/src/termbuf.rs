//! Cell storage for whole frames.

use crate::{
    geom::{Expanse, Point, Rect},
    style::Style,
};

/// NULL character constant, marking a cell nothing has been drawn into.
pub(crate) const NULL: char = '\0';

/// A terminal cell with glyph and style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Base glyph character.
    pub ch: char,
    /// Additional grapheme characters stored with the base glyph.
    pub suffix: String,
    /// Style applied to the cell.
    pub style: Style,
    /// True when this cell continues a wide glyph from the previous column.
    pub continuation: bool,
}

impl Cell {
    /// Construct a cell containing a single glyph.
    pub fn new(ch: char, style: Style) -> Self {
        Self {
            ch,
            suffix: String::new(),
            style,
            continuation: false,
        }
    }

    /// Construct an empty cell.
    pub fn empty(style: Style) -> Self {
        Self::new(NULL, style)
    }

    /// Construct a cell holding a whole grapheme cluster.
    pub(crate) fn grapheme(grapheme: &str, style: Style) -> Self {
        let mut chars = grapheme.chars();
        let ch = chars.next().unwrap_or(' ');
        Self {
            ch,
            suffix: chars.collect(),
            style,
            continuation: false,
        }
    }

    /// Construct a continuation cell for a wide glyph.
    pub(crate) fn continuation(style: Style) -> Self {
        Self {
            ch: NULL,
            suffix: String::new(),
            style,
            continuation: true,
        }
    }

    /// Return true when the cell is empty.
    pub fn is_empty(&self) -> bool {
        self.ch == NULL && self.suffix.is_empty() && !self.continuation
    }

    /// Append this cell's renderable text to the output buffer. Empty cells
    /// render as a space and continuation cells render as nothing, since the
    /// wide glyph before them already covers the column.
    pub(crate) fn push_text(&self, out: &mut String) {
        if self.continuation {
            return;
        }
        if self.is_empty() {
            out.push(' ');
            return;
        }
        out.push(self.ch);
        out.push_str(&self.suffix);
    }
}

/// A 2D grid of styled cells: the storage behind a frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermBuf {
    /// Buffer size in cells.
    size: Expanse,
    /// Backing cell storage, row-major.
    cells: Vec<Cell>,
}

impl TermBuf {
    /// Construct a buffer filled with the given character and style.
    pub fn new(size: impl Into<Expanse>, ch: char, style: Style) -> Self {
        let size = size.into();
        Self {
            size,
            cells: vec![Cell::new(ch, style); size.area() as usize],
        }
    }

    /// Create a TermBuf filled with empty cells in the default style.
    pub fn empty(size: impl Into<Expanse>) -> Self {
        Self::new(size, NULL, Style::default())
    }

    /// Return the buffer size.
    pub fn size(&self) -> Expanse {
        self.size
    }

    /// Return the buffer bounds as a rectangle.
    pub fn rect(&self) -> Rect {
        self.size.rect()
    }

    /// Convert a point into a cell index.
    fn idx(&self, p: Point) -> Option<usize> {
        if self.rect().contains_point(p) {
            Some(p.y as usize * self.size.w as usize + p.x as usize)
        } else {
            None
        }
    }

    /// Get a cell by position.
    pub fn get(&self, p: Point) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// Return one row of cells.
    pub fn row(&self, y: u32) -> Option<&[Cell]> {
        if y >= self.size.h {
            return None;
        }
        let w = self.size.w as usize;
        let start = y as usize * w;
        Some(&self.cells[start..start + w])
    }

    /// Replace the cell at a position. Out-of-bounds writes are ignored.
    ///
    /// Overwriting either half of a wide glyph blanks the other half, so the
    /// buffer never holds a head without its continuation or the reverse.
    pub fn set(&mut self, p: Point, cell: Cell) {
        let Some(i) = self.idx(p) else {
            return;
        };
        let was_continuation = self.cells[i].continuation;
        if was_continuation && !cell.continuation && p.x > 0 && !self.cells[i - 1].continuation {
            self.cells[i - 1] = Cell::new(' ', cell.style);
        }
        if !was_continuation && p.x + 1 < self.size.w && self.cells[i + 1].continuation {
            self.cells[i + 1] = Cell::new(' ', cell.style);
        }
        self.cells[i] = cell;
    }

    /// Write a glyph at a specific point.
    pub fn put(&mut self, p: Point, ch: char, style: Style) {
        self.set(p, Cell::new(ch, style));
    }

    /// Fill a rectangle with a glyph and style.
    pub fn fill(&mut self, style: Style, r: Rect, ch: char) {
        if let Some(isec) = self.rect().intersect(&r) {
            for y in isec.tl.y..isec.bottom() {
                for x in isec.tl.x..isec.right() {
                    self.put(Point { x, y }, ch, style);
                }
            }
        }
    }

    /// Copy every cell in `rect` from `src` into the same position here. The
    /// rect is clipped to both buffers.
    pub fn copy_rect(&mut self, src: &Self, rect: Rect) {
        let Some(isec) = self
            .rect()
            .intersect(&rect)
            .and_then(|r| r.intersect(&src.rect()))
        else {
            return;
        };
        for y in isec.tl.y..isec.bottom() {
            for x in isec.tl.x..isec.right() {
                let p = Point { x, y };
                if let Some(cell) = src.get(p) {
                    self.set(p, cell.clone());
                }
            }
        }
    }

    /// Return a buffer of a new size holding as much of this buffer's content
    /// as fits. Grown areas are empty.
    pub fn resized(&self, size: Expanse) -> Self {
        let mut out = Self::empty(size);
        out.copy_rect(self, self.rect());
        out
    }

    /// Render each row as a string, with empty cells shown as spaces.
    pub fn lines(&self) -> Vec<String> {
        (0..self.size.h)
            .map(|y| {
                let mut line = String::new();
                for cell in self.row(y).unwrap_or_default() {
                    cell.push_text(&mut line);
                }
                line
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    #[test]
    fn clipped_writes() -> Result<()> {
        let mut tb = TermBuf::empty(Expanse::new(4, 2));
        tb.put(Point::new(10, 10), 'x', Style::default());
        tb.fill(Style::default(), Rect::new(2, 1, 10, 10), '#');
        assert_eq!(tb.lines(), vec!["    ", "  ##"]);
        Ok(())
    }

    #[test]
    fn resize_keeps_overlap() -> Result<()> {
        let mut tb = TermBuf::new(Expanse::new(3, 2), 'a', Style::default());
        tb.put(Point::new(2, 1), 'b', Style::default());
        let grown = tb.resized(Expanse::new(4, 3));
        assert_eq!(grown.lines(), vec!["aaa ", "aab ", "    "]);
        let shrunk = tb.resized(Expanse::new(2, 1));
        assert_eq!(shrunk.lines(), vec!["aa"]);
        Ok(())
    }

    #[test]
    fn overwriting_half_a_wide_glyph_blanks_the_other() -> Result<()> {
        let wide = |tb: &mut TermBuf| {
            tb.set(Point::new(0, 0), Cell::new('界', Style::default()));
            tb.set(Point::new(1, 0), Cell::continuation(Style::default()));
        };
        let mut tb = TermBuf::new(Expanse::new(3, 1), '.', Style::default());
        wide(&mut tb);
        assert_eq!(tb.lines(), vec!["界."]);

        tb.put(Point::new(1, 0), 'x', Style::default());
        assert_eq!(tb.lines(), vec![" x."]);
        assert!(tb.row(0).unwrap_or_default().iter().all(|c| !c.continuation));

        wide(&mut tb);
        tb.put(Point::new(0, 0), 'y', Style::default());
        assert_eq!(tb.lines(), vec!["y ."]);
        assert!(tb.row(0).unwrap_or_default().iter().all(|c| !c.continuation));
        Ok(())
    }
}

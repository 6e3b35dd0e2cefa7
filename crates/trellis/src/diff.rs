//! Frame diffing.
//!
//! [`diff`] compares the previously displayed frame with a freshly drawn one,
//! looking only at the damaged regions, and produces the write runs needed to
//! bring the terminal up to date. [`emit`] hands those runs to a
//! [`RenderBackend`]; it is the only place that talks to the terminal.

use crate::{
    backend::RenderBackend,
    damage::Coverage,
    error::Result,
    geom::{Point, Rect},
    style::Style,
    termbuf::{Cell, TermBuf},
};

/// One positioned write: a horizontal run of cells sharing a style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRun {
    /// Screen position of the first cell.
    pub at: Point,
    /// Style applied to every cell in the run.
    pub style: Style,
    /// The cells, left to right. Continuation cells of wide glyphs are kept
    /// so that the run's width is `cells.len()`.
    pub cells: Vec<Cell>,
}

impl WriteRun {
    /// The glyphs to write.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for c in &self.cells {
            c.push_text(&mut out);
        }
        out
    }

    /// Number of columns covered.
    pub fn width(&self) -> u32 {
        self.cells.len() as u32
    }
}

/// Compute the writes that turn `prev` into `next` within `regions`.
///
/// Regions are in screen coordinates and may overlap; every cell is examined
/// at most once. Any part of `next` that lies outside `prev` is treated as
/// damaged and changed, so a grown frame always gets its new area written.
pub fn diff(prev: &TermBuf, next: &TermBuf, regions: &[Rect]) -> Vec<WriteRun> {
    let size = next.size();
    let mut mask = Coverage::new(size);
    for r in regions {
        mask.add(*r);
    }
    let old = prev.size();
    if size.w > old.w {
        mask.add(Rect::new(old.w, 0, size.w - old.w, size.h));
    }
    if size.h > old.h {
        mask.add(Rect::new(0, old.h, size.w, size.h - old.h));
    }

    // A wide glyph in `prev` that was split inside the damage leaves its
    // other half changed too, even when that half lies outside it.
    let split = |x: u32, y: u32| -> bool {
        let cont = |x: u32| prev.get(Point { x, y }).is_some_and(|c| c.continuation);
        (cont(x + 1) && mask.covered(x + 1, y)) || (x > 0 && cont(x) && mask.covered(x - 1, y))
    };
    let changed = |x: u32, y: u32| -> bool {
        if !mask.covered(x, y) && !split(x, y) {
            return false;
        }
        let p = Point { x, y };
        match prev.get(p) {
            Some(c) => next.get(p) != Some(c),
            None => true,
        }
    };

    let mut runs = Vec::new();
    for y in 0..size.h {
        let Some(row) = next.row(y) else {
            continue;
        };
        let width = size.w as usize;
        // Columns before this have already been emitted on this row.
        let mut emitted = 0usize;
        let mut x = 0usize;
        while x < width {
            if !changed(x as u32, y) {
                x += 1;
                continue;
            }
            let mut start = x;
            while start > emitted && row[start].continuation {
                start -= 1;
            }
            let style = row[start].style;
            let mut cells: Vec<Cell> = row[start..x].to_vec();
            while x < width && changed(x as u32, y) && row[x].style == style {
                cells.push(row[x].clone());
                x += 1;
            }
            // Never split a wide glyph from its trailing half.
            while x < width && row[x].continuation {
                cells.push(row[x].clone());
                x += 1;
            }
            emitted = x;
            runs.push(WriteRun {
                at: Point::new(start as u32, y),
                style,
                cells,
            });
        }
    }
    runs
}

/// Send write runs to a backend, flushing once if anything was written.
pub fn emit(runs: &[WriteRun], backend: &mut dyn RenderBackend) -> Result<()> {
    for run in runs {
        backend.move_cursor(run.at)?;
        backend.set_attributes(&run.style)?;
        backend.write_glyphs(&run.text())?;
    }
    if !runs.is_empty() {
        backend.flush()?;
    }
    Ok(())
}

/// Replay write runs onto a buffer. Cells falling outside the buffer are
/// dropped.
pub fn apply(buf: &mut TermBuf, runs: &[WriteRun]) {
    for run in runs {
        for (i, cell) in run.cells.iter().enumerate() {
            buf.set(Point::new(run.at.x + i as u32, run.at.y), cell.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        canvas::Canvas,
        error::Result,
        geom::Expanse,
        style::{Attr, Color},
        testing::render::TestRender,
    };

    fn frame(rows: &[&str]) -> TermBuf {
        let w = rows.first().map_or(0, |r| r.chars().count()) as u32;
        let mut tb = TermBuf::empty(Expanse::new(w, rows.len() as u32));
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                tb.put(Point::new(x as u32, y as u32), ch, Style::default());
            }
        }
        tb
    }

    #[test]
    fn identical_frames_write_nothing() -> Result<()> {
        let a = frame(&["hello", "world"]);
        let runs = diff(&a, &a.clone(), &[a.rect()]);
        assert!(runs.is_empty());

        let mut be = TestRender::new();
        emit(&runs, &mut be)?;
        assert!(be.ops.is_empty());
        Ok(())
    }

    #[test]
    fn adjacent_changes_coalesce() -> Result<()> {
        let a = frame(&["abcdefgh"]);
        let b = frame(&["aXYdeZgh"]);
        let runs = diff(&a, &b, &[a.rect()]);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].at, Point::new(1, 0));
        assert_eq!(runs[0].text(), "XY");
        assert_eq!(runs[1].at, Point::new(5, 0));
        assert_eq!(runs[1].text(), "Z");
        Ok(())
    }

    #[test]
    fn style_changes_split_runs() -> Result<()> {
        let a = frame(&["....."]);
        let mut b = frame(&["xxxxx"]);
        let bold = Style::default().with_attr(Attr::Bold);
        b.put(Point::new(2, 0), 'x', bold);
        let runs = diff(&a, &b, &[a.rect()]);
        let parts: Vec<(u32, String, Style)> =
            runs.iter().map(|r| (r.at.x, r.text(), r.style)).collect();
        assert_eq!(
            parts,
            vec![
                (0, "xx".to_string(), Style::default()),
                (2, "x".to_string(), bold),
                (3, "xx".to_string(), Style::default()),
            ]
        );
        Ok(())
    }

    #[test]
    fn only_damaged_regions_are_scanned() -> Result<()> {
        let a = frame(&["aaaa", "aaaa"]);
        let b = frame(&["bbbb", "bbbb"]);
        let runs = diff(&a, &b, &[Rect::new(1, 1, 2, 1), Rect::new(2, 1, 2, 1)]);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].at, Point::new(1, 1));
        assert_eq!(runs[0].text(), "bbb");
        Ok(())
    }

    #[test]
    fn grown_area_is_always_written() -> Result<()> {
        let a = TermBuf::new(Expanse::new(4, 2), '.', Style::default());
        let b = TermBuf::new(Expanse::new(4, 4), '.', Style::default());
        let runs = diff(&a, &b, &[]);
        let rows: Vec<u32> = runs.iter().map(|r| r.at.y).collect();
        assert_eq!(rows, vec![2, 3]);

        let mut replay = a.resized(b.size());
        apply(&mut replay, &runs);
        assert_eq!(replay, b);
        Ok(())
    }

    #[test]
    fn wide_glyphs_are_written_whole() -> Result<()> {
        let a = frame(&["......"]);
        let mut b = a.clone();
        Canvas::new(&mut b).text(Style::default(), Point::new(2, 0), "界");
        // Damage only the trailing half.
        let runs = diff(&a, &b, &[Rect::new(3, 0, 1, 1)]);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].at, Point::new(2, 0));
        assert_eq!(runs[0].text(), "界");
        assert_eq!(runs[0].width(), 2);
        Ok(())
    }

    #[test]
    fn split_wide_glyph_rewrites_both_halves() -> Result<()> {
        let mut a = frame(&["..."]);
        Canvas::new(&mut a).text(Style::default(), Point::new(0, 0), "界");
        let mut b = a.clone();
        b.put(Point::new(1, 0), 'x', Style::default());
        // Damage only the overwritten trailing half.
        let runs = diff(&a, &b, &[Rect::new(1, 0, 1, 1)]);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].at, Point::new(0, 0));
        assert_eq!(runs[0].text(), " x");
        let mut replay = a.clone();
        apply(&mut replay, &runs);
        assert_eq!(replay, b);

        let mut c = a.clone();
        c.put(Point::new(0, 0), 'y', Style::default());
        let runs = diff(&a, &c, &[Rect::new(0, 0, 1, 1)]);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text(), "y ");
        let mut replay = a.clone();
        apply(&mut replay, &runs);
        assert_eq!(replay, c);
        Ok(())
    }

    #[test]
    fn emit_maps_runs_to_backend_calls() -> Result<()> {
        let a = frame(&["....", "...."]);
        let mut b = a.clone();
        let red = Style::new(Color::Red, Color::Black);
        b.put(Point::new(1, 0), 'r', red);
        b.put(Point::new(3, 1), 'z', Style::default());
        let runs = diff(&a, &b, &[a.rect()]);

        let mut be = TestRender::new();
        emit(&runs, &mut be)?;
        assert_eq!(
            be.ops,
            vec![
                "move 1,0".to_string(),
                format!("attr {red:?}"),
                "write r".to_string(),
                "move 3,1".to_string(),
                format!("attr {:?}", Style::default()),
                "write z".to_string(),
                "flush".to_string(),
            ]
        );
        Ok(())
    }

    fn styles() -> impl Strategy<Value = Style> {
        prop_oneof![
            Just(Style::default()),
            Just(Style::new(Color::Red, Color::Black)),
            Just(Style::default().with_attr(Attr::Underline)),
        ]
    }

    proptest! {
        #[test]
        fn replaying_runs_reproduces_the_frame(
            w in 1u32..12,
            h in 1u32..6,
            edits in prop::collection::vec((0u32..12, 0u32..6, "[a-z ]", styles()), 0..40),
        ) {
            let prev = TermBuf::new(Expanse::new(w, h), '.', Style::default());
            let mut next = prev.clone();
            for (x, y, s, style) in edits {
                let ch = s.chars().next().unwrap_or(' ');
                next.put(Point::new(x, y), ch, style);
            }
            let runs = diff(&prev, &next, &[next.rect()]);
            let mut replay = prev.clone();
            apply(&mut replay, &runs);
            prop_assert_eq!(&replay, &next);

            // Nothing unchanged is ever rewritten.
            for run in &runs {
                for i in 0..run.width() {
                    let p = Point::new(run.at.x + i, run.at.y);
                    prop_assert_ne!(prev.get(p), next.get(p));
                }
            }
        }
    }
}

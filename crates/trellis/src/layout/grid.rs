use serde_json::{Value, json};

use super::{Hint, Layout};
use crate::{
    error::{Error, Result},
    geom::{Expanse, Rect},
};

/// Equal cells in a fixed number of columns and rows, filled left to right
/// then top to bottom. When the space doesn't divide evenly, the first
/// columns and rows get one extra cell each. Children beyond `cols * rows`
/// wrap around and share cells with earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    cols: u32,
    /// Number of rows.
    rows: u32,
}

impl Grid {
    /// A grid with the given dimensions. Both must be non-zero.
    pub fn new(cols: u32, rows: u32) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(Error::Config(format!(
                "grid dimensions must be non-zero, got {cols}x{rows}"
            )));
        }
        Ok(Self { cols, rows })
    }

    /// Column and row of the cell for a child.
    fn cell(&self, index: usize) -> (u32, u32) {
        let i = (index as u64 % (self.cols as u64 * self.rows as u64)) as u32;
        (i % self.cols, i / self.cols)
    }
}

/// Offset and length of slot `i` when `total` is split into `n` slots.
fn slot(total: u32, n: u32, i: u32) -> (u32, u32) {
    let (each, excess) = (total / n, total % n);
    (each * i + i.min(excess), each + u32::from(i < excess))
}

impl Layout for Grid {
    fn measure_width(&self, index: usize, _count: usize, available_width: u32) -> u32 {
        slot(available_width, self.cols, self.cell(index).0).1
    }

    fn preferred_size(&self, prefs: &[Expanse], _hints: &[Hint]) -> Expanse {
        let largest = prefs.iter().fold(Expanse::zero(), |a, p| a.max(*p));
        Expanse::new(
            largest.w.saturating_mul(self.cols),
            largest.h.saturating_mul(self.rows),
        )
    }

    fn arrange(&self, prefs: &[Expanse], _hints: &[Hint], available: Expanse) -> Vec<Rect> {
        (0..prefs.len())
            .map(|i| {
                let (col, row) = self.cell(i);
                let (x, w) = slot(available.w, self.cols, col);
                let (y, h) = slot(available.h, self.rows, row);
                if w == 0 || h == 0 {
                    Rect::zero()
                } else {
                    Rect::new(x, y, w, h)
                }
            })
            .collect()
    }

    fn to_json(&self) -> Value {
        json!({
            "type": "grid",
            "dimensions": { "cols": self.cols, "rows": self.rows },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excess_to_first_cells() -> Result<()> {
        let g = Grid::new(2, 2)?;
        let prefs = vec![Expanse::zero(); 4];
        assert_eq!(
            g.arrange(&prefs, &[], Expanse::new(5, 3)),
            vec![
                Rect::new(0, 0, 3, 2),
                Rect::new(3, 0, 2, 2),
                Rect::new(0, 2, 3, 1),
                Rect::new(3, 2, 2, 1),
            ]
        );
        assert_eq!(g.measure_width(0, 4, 5), 3);
        assert_eq!(g.measure_width(3, 4, 5), 2);
        Ok(())
    }

    #[test]
    fn wraps_and_prefers() -> Result<()> {
        let g = Grid::new(2, 1)?;
        let prefs = [Expanse::new(3, 1), Expanse::new(1, 4), Expanse::new(9, 9)];
        let r = g.arrange(&prefs, &[], Expanse::new(10, 2));
        assert_eq!(r[2], r[0]);
        assert_eq!(g.preferred_size(&prefs[..2], &[]), Expanse::new(6, 4));
        assert_eq!(g.preferred_size(&[], &[]), Expanse::zero());
        assert!(matches!(Grid::new(0, 3), Err(Error::Config(_))));
        Ok(())
    }
}

//! Damage tracking.
//!
//! The tracker accumulates the screen rectangles that went stale since the
//! last repaint and hands them to the repaint cycle exactly once. Fragments
//! are coalesced as they arrive so the pending set stays small, and when the
//! fragments get too numerous or cover too much of the screen the tracker
//! gives up on precision and reports the whole area.

use bitvec::prelude::*;
use serde::Deserialize;

use crate::{
    error::{Error, Result},
    geom::{Expanse, Rect},
};

/// Thresholds that control when fragment tracking collapses to a single
/// whole-area region.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DamageConfig {
    /// Collapse when more than this many fragments are pending.
    pub max_fragments: usize,
    /// Collapse when the fragments cover more than this fraction of the
    /// tracked area. Must lie in `(0, 1]`.
    pub collapse_ratio: f64,
}

impl Default for DamageConfig {
    fn default() -> Self {
        Self {
            max_fragments: 32,
            collapse_ratio: 0.6,
        }
    }
}

impl DamageConfig {
    /// Check that the thresholds are usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_fragments == 0 {
            return Err(Error::Config("max_fragments must be at least 1".into()));
        }
        if !(self.collapse_ratio > 0.0 && self.collapse_ratio <= 1.0) {
            return Err(Error::Config(format!(
                "collapse_ratio must be in (0, 1], got {}",
                self.collapse_ratio
            )));
        }
        Ok(())
    }
}

/// Coverage accumulates `Rect`s over a bounded area and counts the cells
/// they cover, counting overlaps once.
pub(crate) struct Coverage {
    /// Area being tracked.
    area: Expanse,
    /// One bit per cell, row-major.
    cells: BitVec,
}

impl Coverage {
    /// Create an empty coverage mask.
    pub(crate) fn new(area: Expanse) -> Self {
        Self {
            area,
            cells: BitVec::repeat(false, area.area() as usize),
        }
    }

    /// Add a rectangle to the cover set. Portions outside the area are ignored.
    pub(crate) fn add(&mut self, r: Rect) {
        if let Some(r) = r.intersect(&self.area.rect()) {
            for y in r.tl.y..r.bottom() {
                let off = y as usize * self.area.w as usize + r.tl.x as usize;
                self.cells[off..off + r.w as usize].fill(true);
            }
        }
    }

    /// Is the cell at (x, y) covered?
    pub(crate) fn covered(&self, x: u32, y: u32) -> bool {
        if x >= self.area.w || y >= self.area.h {
            return false;
        }
        self.cells[y as usize * self.area.w as usize + x as usize]
    }

    /// Number of covered cells.
    pub(crate) fn count(&self) -> u64 {
        self.cells.count_ones() as u64
    }
}

/// Accumulates damaged regions between repaints.
#[derive(Debug, Clone)]
pub struct DamageTracker {
    /// The area being tracked. Marks are clipped to it.
    bounds: Rect,
    /// Pending fragments. Never contains two rects where one encloses the
    /// other.
    rects: Vec<Rect>,
    /// Everything is damaged.
    full: bool,
    /// Collapse thresholds.
    config: DamageConfig,
}

impl DamageTracker {
    /// Construct a tracker for an area, validating the thresholds.
    pub fn new(bounds: Rect, config: DamageConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            bounds,
            rects: Vec::new(),
            full: false,
            config,
        })
    }

    /// The tracked area.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The active thresholds.
    pub fn config(&self) -> DamageConfig {
        self.config
    }

    /// Change the tracked area. Pending fragments are clipped to it.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        let rects: Vec<Rect> = self.rects.drain(..).collect();
        for r in rects {
            self.mark(r);
        }
    }

    /// Is there nothing pending?
    pub fn is_empty(&self) -> bool {
        if self.full {
            self.bounds.is_zero()
        } else {
            self.rects.is_empty()
        }
    }

    /// Has the tracker collapsed to the whole area?
    pub fn is_full(&self) -> bool {
        self.full
    }

    /// Record a damaged rectangle.
    pub fn mark(&mut self, r: Rect) {
        if self.full {
            return;
        }
        let Some(mut r) = r.intersect(&self.bounds) else {
            return;
        };
        if self.rects.iter().any(|e| e.contains_rect(&r)) {
            return;
        }
        self.rects.retain(|e| !r.contains_rect(e));

        // Merging can enable further merges, so repeat until nothing changes.
        while let Some(i) = self.rects.iter().position(|e| merges_exactly(e, &r)) {
            let e = self.rects.swap_remove(i);
            r = e.union(&r);
            self.rects.retain(|x| !r.contains_rect(x));
        }
        self.rects.push(r);

        if self.should_collapse() {
            tracing::debug!(
                fragments = self.rects.len(),
                "damage collapsed to whole area"
            );
            self.mark_all();
        }
    }

    /// Mark the whole area as damaged.
    pub fn mark_all(&mut self) {
        self.full = true;
        self.rects.clear();
    }

    /// Return the pending regions and clear them. Regions are returned in the
    /// order they were first recorded, except that a collapsed tracker returns
    /// the single bounding area.
    pub fn take_pending(&mut self) -> Vec<Rect> {
        let out = if self.full {
            if self.bounds.is_zero() {
                vec![]
            } else {
                vec![self.bounds]
            }
        } else {
            std::mem::take(&mut self.rects)
        };
        self.full = false;
        self.rects.clear();
        out
    }

    /// Decide whether to trade fragment precision for a single region.
    fn should_collapse(&self) -> bool {
        if self.rects.len() > self.config.max_fragments {
            return true;
        }
        let total = self.bounds.area() as f64;
        if total == 0.0 {
            return false;
        }
        let limit = total * self.config.collapse_ratio;
        let sum: u64 = self.rects.iter().map(Rect::area).sum();
        // The fragment sum bounds the covered area from above, so the exact
        // count is only needed when the sum crosses the limit.
        if sum as f64 <= limit {
            return false;
        }
        let mut cov = Coverage::new(self.bounds.expanse());
        for r in &self.rects {
            if let Some(local) = self.bounds.rebase_rect(r) {
                cov.add(local);
            }
        }
        cov.count() as f64 > limit
    }
}

/// Two rects merge when their bounding box is covered exactly by the pair.
fn merges_exactly(a: &Rect, b: &Rect) -> bool {
    let overlap = a.intersect(b).map_or(0, |i| i.area());
    a.union(b).area() == a.area() + b.area() - overlap
}

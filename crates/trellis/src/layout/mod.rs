//! Layout strategies.
//!
//! A container node owns one [`Layout`]. Layout runs in two passes driven by
//! the core: a bottom-up measure pass, where each child reports its preferred
//! size given the width the strategy offers it, and a top-down arrange pass,
//! where the strategy partitions the container's space into one rect per
//! child. Strategies are pure functions of their inputs, so identical inputs
//! always produce identical rects.

mod aligned;
mod compass;
mod grid;
mod inset;
mod linear;
mod viewport;

use std::fmt::Debug;

pub use aligned::Aligned;
pub use compass::Compass;
pub use grid::Grid;
pub use inset::Inset;
pub use linear::{Linear, Policy};
pub use viewport::Viewport;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geom::{Expanse, Rect};

/// Main axis for linear layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Children are placed left to right.
    Row,
    /// Children are placed top to bottom.
    Column,
}

/// Placement of a child within its slot along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    /// Left or top.
    Start,
    /// Centered, with any odd cell going after the child.
    #[default]
    Center,
    /// Right or bottom.
    End,
    /// Stretch to the full slot.
    Fill,
}

/// Compass positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heading {
    /// Along the top edge.
    North,
    /// Along the bottom edge.
    South,
    /// Along the right edge.
    East,
    /// Along the left edge.
    West,
    /// Whatever space the edges leave.
    #[default]
    Centre,
}

/// Per-child information a container's layout may consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Hint {
    /// No hint; each strategy picks its default.
    #[default]
    None,
    /// Placement for [`Compass`].
    Compass(Heading),
    /// Horizontal and vertical alignment for [`Aligned`].
    Align(Align, Align),
}

/// A layout strategy.
pub trait Layout: Debug {
    /// The width offered to child `index` of `count` during the measure pass.
    /// The default assumes children are measured independently and offers
    /// each one the full available width.
    fn measure_width(&self, index: usize, count: usize, available_width: u32) -> u32 {
        let _ = (index, count);
        available_width
    }

    /// The container's preferred size, given its children's preferences.
    fn preferred_size(&self, prefs: &[Expanse], hints: &[Hint]) -> Expanse;

    /// Assign one rect per child, in child order, relative to the container
    /// origin.
    fn arrange(&self, prefs: &[Expanse], hints: &[Hint], available: Expanse) -> Vec<Rect>;

    /// Does this strategy lay content out beyond the container's bounds?
    /// Rects from a scrolling strategy are not clipped to the available
    /// space, and the container's scroll offset decides which part shows.
    fn scrolls(&self) -> bool {
        false
    }

    /// A JSON description of the strategy.
    fn to_json(&self) -> Value;
}

/// Allocate `total` cells proportionally across weights. Shares sum exactly
/// to `total`; rounding leftovers go to the largest remainders, ties broken by
/// index. A zero weight counts as one.
pub(crate) fn allocate_shares(total: u32, weights: &[u32]) -> Vec<u32> {
    if total == 0 || weights.is_empty() {
        return vec![0; weights.len()];
    }
    let sum: u64 = weights.iter().map(|w| (*w).max(1) as u64).sum();

    let mut base = Vec::with_capacity(weights.len());
    let mut rem = Vec::with_capacity(weights.len());
    for w in weights {
        let prod = total as u64 * (*w).max(1) as u64;
        base.push((prod / sum) as u32);
        rem.push(prod % sum);
    }

    let used: u32 = base.iter().sum();
    let extra = total.saturating_sub(used);
    let mut idx: Vec<usize> = (0..weights.len()).collect();
    idx.sort_by(|a, b| rem[*b].cmp(&rem[*a]).then_with(|| a.cmp(b)));
    for target in idx.into_iter().take(extra as usize) {
        base[target] = base[target].saturating_add(1);
    }
    base
}

/// Offset and size of a child of `size` aligned within `available`.
pub(crate) fn align_span(size: u32, available: u32, align: Align) -> (u32, u32) {
    let size = size.min(available);
    match align {
        Align::Start => (0, size),
        Align::Center => ((available - size) / 2, size),
        Align::End => (available - size, size),
        Align::Fill => (0, available),
    }
}

/// Bring a strategy's output into shape: exactly `count` rects, each clipped
/// to the available area. Returns the rects and whether anything had to be
/// corrected.
pub(crate) fn normalize(rects: Vec<Rect>, count: usize, available: Expanse) -> (Vec<Rect>, bool) {
    let area = available.rect();
    let mut fixed = rects.len() != count;
    let mut out: Vec<Rect> = rects
        .into_iter()
        .take(count)
        .map(|r| {
            if r.is_zero() {
                return Rect::zero();
            }
            match r.intersect(&area) {
                Some(c) => {
                    fixed |= c != r;
                    c
                }
                None => {
                    fixed = true;
                    Rect::zero()
                }
            }
        })
        .collect();
    out.resize(count, Rect::zero());
    (out, fixed)
}

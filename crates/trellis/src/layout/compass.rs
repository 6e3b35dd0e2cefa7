use serde_json::{Value, json};

use super::{Heading, Hint, Layout};
use crate::geom::{Expanse, Rect};

/// Edge-docked children around a centre.
///
/// Children are taken in order. North and south children span the width
/// left between any west and east children placed so far and take their
/// preferred height; west and east do the same vertically. Centre children,
/// and children without a compass hint, all share whatever space remains
/// once every edge child is placed. Children are measured independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Compass;

/// Space already claimed along each edge.
#[derive(Default)]
struct Used {
    /// Rows claimed at the top.
    north: u32,
    /// Rows claimed at the bottom.
    south: u32,
    /// Columns claimed on the right.
    east: u32,
    /// Columns claimed on the left.
    west: u32,
}

impl Used {
    /// Width not yet claimed by west and east children.
    fn width(&self, size: Expanse) -> u32 {
        size.w.saturating_sub(self.west).saturating_sub(self.east)
    }

    /// Height not yet claimed by north and south children.
    fn height(&self, size: Expanse) -> u32 {
        size.h.saturating_sub(self.north).saturating_sub(self.south)
    }
}

/// The heading for a child.
fn heading(hints: &[Hint], i: usize) -> Heading {
    match hints.get(i) {
        Some(Hint::Compass(h)) => *h,
        _ => Heading::Centre,
    }
}

impl Layout for Compass {
    fn preferred_size(&self, prefs: &[Expanse], hints: &[Hint]) -> Expanse {
        // Edge children stack outwards; `unused` tracks space alongside an
        // edge child that a later perpendicular child can fill for free.
        let mut unused = Expanse::zero();
        let mut centre = Expanse::zero();
        let mut out = Expanse::zero();
        for (i, p) in prefs.iter().enumerate() {
            match heading(hints, i) {
                Heading::Centre => centre = centre.max(*p),
                Heading::North | Heading::South => {
                    let dw = p.w.saturating_sub(unused.w);
                    out.w = out.w.saturating_add(dw);
                    unused.w = unused.w.saturating_add(dw);
                    out.h = out.h.saturating_add(p.h.saturating_sub(unused.h));
                    unused.h -= unused.h.min(p.h);
                }
                Heading::West | Heading::East => {
                    let dh = p.h.saturating_sub(unused.h);
                    out.h = out.h.saturating_add(dh);
                    unused.h = unused.h.saturating_add(dh);
                    out.w = out.w.saturating_add(p.w.saturating_sub(unused.w));
                    unused.w -= unused.w.min(p.w);
                }
            }
        }
        Expanse::new(
            out.w.saturating_add(centre.w.saturating_sub(unused.w)),
            out.h.saturating_add(centre.h.saturating_sub(unused.h)),
        )
    }

    fn arrange(&self, prefs: &[Expanse], hints: &[Hint], available: Expanse) -> Vec<Rect> {
        let mut used = Used::default();
        let mut out = vec![Rect::zero(); prefs.len()];
        let mut centre = Vec::new();
        for (i, p) in prefs.iter().enumerate() {
            let (w, h) = (used.width(available), used.height(available));
            match heading(hints, i) {
                Heading::Centre => centre.push(i),
                Heading::North => {
                    let ch = p.h.min(h);
                    out[i] = slot(used.west, used.north, w, ch);
                    used.north += ch;
                }
                Heading::South => {
                    let ch = p.h.min(h);
                    out[i] = slot(used.west, used.north + h - ch, w, ch);
                    used.south += ch;
                }
                Heading::West => {
                    let cw = p.w.min(w);
                    out[i] = slot(used.west, used.north, cw, h);
                    used.west += cw;
                }
                Heading::East => {
                    let cw = p.w.min(w);
                    out[i] = slot(used.west + w - cw, used.north, cw, h);
                    used.east += cw;
                }
            }
        }
        let rest = slot(
            used.west,
            used.north,
            used.width(available),
            used.height(available),
        );
        for i in centre {
            out[i] = rest;
        }
        out
    }

    fn to_json(&self) -> Value {
        json!({ "type": "compass" })
    }
}

/// A child's rect, or the zero rect once the edges have used up either axis.
fn slot(x: u32, y: u32, w: u32, h: u32) -> Rect {
    if w == 0 || h == 0 {
        Rect::zero()
    } else {
        Rect::new(x, y, w, h)
    }
}

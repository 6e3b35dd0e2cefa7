use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{Direction, Hint, Layout, allocate_shares};
use crate::geom::{Expanse, Rect};

/// How a [`Linear`] layout divides its main axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Split by fixed weights, ignoring preferences. Children without a
    /// weight count as weight one.
    Ratio(Vec<u32>),
    /// Children get their preferred size, then leftover space is spread
    /// evenly with earlier children taking the rounding remainder. If
    /// preferences overflow, earlier children win.
    Greedy,
    /// Children get their preferred size and the last child absorbs
    /// whatever is left, positive or negative.
    Remainder,
    /// Children get their preferred size, truncated at the far edge.
    Clip,
}

/// Children in a single row or column. Every child spans the full cross
/// axis.
///
/// Measurement: a `Row` with a `Ratio` policy offers each child its share of
/// the width, since the split doesn't depend on preferences. Every other
/// combination measures children independently against the full width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linear {
    /// Main axis.
    pub direction: Direction,
    /// Main axis allocation policy.
    pub policy: Policy,
}

impl Linear {
    /// A linear layout.
    pub fn new(direction: Direction, policy: Policy) -> Self {
        Self { direction, policy }
    }

    /// A left-to-right layout.
    pub fn row(policy: Policy) -> Self {
        Self::new(Direction::Row, policy)
    }

    /// A top-to-bottom layout.
    pub fn column(policy: Policy) -> Self {
        Self::new(Direction::Column, policy)
    }

    /// Main and cross components of an expanse.
    fn axes(&self, e: Expanse) -> (u32, u32) {
        match self.direction {
            Direction::Row => (e.w, e.h),
            Direction::Column => (e.h, e.w),
        }
    }

    /// Build a rect from main and cross axis spans.
    fn rect(&self, main_off: u32, main_len: u32, cross_len: u32) -> Rect {
        match self.direction {
            Direction::Row => Rect::new(main_off, 0, main_len, cross_len),
            Direction::Column => Rect::new(0, main_off, cross_len, main_len),
        }
    }

    /// Main axis sizes for each child.
    fn sizes(&self, prefs: &[u32], main: u32) -> Vec<u32> {
        if prefs.is_empty() {
            return vec![];
        }
        match &self.policy {
            Policy::Ratio(weights) => {
                let w: Vec<u32> = (0..prefs.len())
                    .map(|i| weights.get(i).copied().unwrap_or(1))
                    .collect();
                allocate_shares(main, &w)
            }
            Policy::Greedy => {
                let wanted = prefs.iter().fold(0u64, |a, p| a + *p as u64);
                if wanted <= main as u64 {
                    let n = prefs.len() as u32;
                    let leftover = main - wanted as u32;
                    let (each, extra) = (leftover / n, leftover % n);
                    prefs
                        .iter()
                        .enumerate()
                        .map(|(i, p)| p + each + u32::from((i as u32) < extra))
                        .collect()
                } else {
                    clip_in_order(prefs, main)
                }
            }
            Policy::Remainder => {
                let mut out = clip_in_order(&prefs[..prefs.len() - 1], main);
                let used: u32 = out.iter().sum();
                out.push(main - used);
                out
            }
            Policy::Clip => clip_in_order(prefs, main),
        }
    }
}

/// Take preferred sizes in order until the space runs out.
fn clip_in_order(prefs: &[u32], mut remaining: u32) -> Vec<u32> {
    prefs
        .iter()
        .map(|p| {
            let s = (*p).min(remaining);
            remaining -= s;
            s
        })
        .collect()
}

impl Layout for Linear {
    fn measure_width(&self, index: usize, count: usize, available_width: u32) -> u32 {
        match (&self.direction, &self.policy) {
            (Direction::Row, Policy::Ratio(_)) => {
                let prefs = vec![0; count];
                self.sizes(&prefs, available_width)
                    .get(index)
                    .copied()
                    .unwrap_or(0)
            }
            _ => available_width,
        }
    }

    fn preferred_size(&self, prefs: &[Expanse], _hints: &[Hint]) -> Expanse {
        let (main, cross) = prefs.iter().fold((0u32, 0u32), |(m, c), p| {
            let (pm, pc) = self.axes(*p);
            (m.saturating_add(pm), c.max(pc))
        });
        match self.direction {
            Direction::Row => Expanse::new(main, cross),
            Direction::Column => Expanse::new(cross, main),
        }
    }

    fn arrange(&self, prefs: &[Expanse], _hints: &[Hint], available: Expanse) -> Vec<Rect> {
        if prefs.is_empty() {
            return vec![];
        }
        if available.is_empty() {
            return vec![Rect::zero(); prefs.len()];
        }
        let (main, cross) = self.axes(available);
        let mains: Vec<u32> = prefs.iter().map(|p| self.axes(*p).0).collect();
        let mut off = 0;
        self.sizes(&mains, main)
            .into_iter()
            .map(|len| {
                let r = if len == 0 {
                    Rect::zero()
                } else {
                    self.rect(off, len, cross)
                };
                off += len;
                r
            })
            .collect()
    }

    fn to_json(&self) -> Value {
        json!({
            "type": "linear",
            "direction": self.direction,
            "policy": self.policy,
        })
    }
}

use serde_json::{Value, json};

use super::{Hint, Layout};
use crate::geom::{Expanse, Rect};

/// Every child fills the container less a fixed border on all four sides.
/// Used by framed containers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inset {
    /// Border width in cells.
    pub border: u32,
}

impl Inset {
    /// An inset layout with the given border width.
    pub fn new(border: u32) -> Self {
        Self { border }
    }
}

impl Layout for Inset {
    fn measure_width(&self, _index: usize, _count: usize, available_width: u32) -> u32 {
        available_width.saturating_sub(self.border.saturating_mul(2))
    }

    fn preferred_size(&self, prefs: &[Expanse], _hints: &[Hint]) -> Expanse {
        if prefs.is_empty() {
            return Expanse::zero();
        }
        let inner = prefs.iter().fold(Expanse::zero(), |a, p| a.max(*p));
        let b = self.border.saturating_mul(2);
        Expanse::new(inner.w.saturating_add(b), inner.h.saturating_add(b))
    }

    fn arrange(&self, prefs: &[Expanse], _hints: &[Hint], available: Expanse) -> Vec<Rect> {
        let b = self.border.saturating_mul(2);
        let inner = if available.w > b && available.h > b {
            Rect::new(self.border, self.border, available.w - b, available.h - b)
        } else {
            Rect::zero()
        };
        vec![inner; prefs.len()]
    }

    fn to_json(&self) -> Value {
        json!({ "type": "inset", "border": self.border })
    }
}

use serde_json::{Value, json};

use super::{Hint, Layout};
use crate::geom::{Expanse, Rect};

/// Content larger than the container, seen through a window.
///
/// Each child is placed at the content origin with its preferred size, grown
/// to at least the container's size. The container's scroll offset picks the
/// visible part; see [`Core::scroll_to`](crate::Core::scroll_to).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport;

impl Viewport {
    /// A viewport layout.
    pub fn new() -> Self {
        Self
    }
}

impl Layout for Viewport {
    fn preferred_size(&self, prefs: &[Expanse], _hints: &[Hint]) -> Expanse {
        prefs.iter().fold(Expanse::zero(), |a, p| a.max(*p))
    }

    fn arrange(&self, prefs: &[Expanse], _hints: &[Hint], available: Expanse) -> Vec<Rect> {
        prefs
            .iter()
            .map(|p| Rect::new(0, 0, p.w.max(available.w), p.h.max(available.h)))
            .collect()
    }

    fn scrolls(&self) -> bool {
        true
    }

    fn to_json(&self) -> Value {
        json!({ "type": "viewport" })
    }
}

//! The layout pass: measure bottom-up, then arrange top-down.

use std::collections::HashMap;

use super::{id::NodeId, world::Core};
use crate::{
    error::Result,
    geom::{Expanse, Point, Rect},
    layout::{Hint, normalize},
};

/// Counters from one layout pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    /// Preferred sizes computed. Cache hits aren't counted.
    pub measured: usize,
    /// Containers arranged.
    pub arranged: usize,
}

/// Per-pass measurement cache, keyed by node and offered width.
type MeasureCache = HashMap<(NodeId, u32), Expanse>;

/// Preferred size of a node at a width. Containers ask their layout, leaves
/// ask their component.
fn measure(
    core: &Core,
    cache: &mut MeasureCache,
    stats: &mut LayoutStats,
    node_id: NodeId,
    width: u32,
) -> Expanse {
    if let Some(e) = cache.get(&(node_id, width)) {
        return *e;
    }
    let Some(node) = core.nodes.get(node_id) else {
        return Expanse::zero();
    };
    let pref = match &node.layout {
        Some(layout) => {
            let count = node.children.len();
            let prefs: Vec<Expanse> = node
                .children
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let w = layout.measure_width(i, count, width);
                    measure(core, cache, stats, *c, w)
                })
                .collect();
            layout.preferred_size(&prefs, &hints(core, &node.children))
        }
        None => node
            .component
            .as_ref()
            .map_or_else(Expanse::zero, |c| c.preferred_size(width)),
    };
    stats.measured += 1;
    cache.insert((node_id, width), pref);
    pref
}

fn hints(core: &Core, children: &[NodeId]) -> Vec<Hint> {
    children
        .iter()
        .map(|c| core.nodes.get(*c).map(|n| n.hint).unwrap_or_default())
        .collect()
}

impl Core {
    /// Run a full layout pass from the root over the current screen size.
    /// Every container is arranged exactly once. Geometry changes are
    /// recorded as damage.
    pub fn layout(&mut self) -> Result<LayoutStats> {
        let mut cache = MeasureCache::new();
        let mut stats = LayoutStats::default();
        let root = self.root;
        self.set_geometry(root, self.size.rect())?;

        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            let children = node.children.clone();
            if let Some(layout) = &node.layout {
                let available = node.rect.expanse();
                let count = children.len();
                let prefs: Vec<Expanse> = children
                    .iter()
                    .enumerate()
                    .map(|(i, c)| {
                        let w = layout.measure_width(i, count, available.w);
                        measure(self, &mut cache, &mut stats, *c, w)
                    })
                    .collect();
                let hints = hints(self, &children);
                let raw = if available.is_empty() {
                    vec![Rect::zero(); count]
                } else {
                    layout.arrange(&prefs, &hints, available)
                };
                let scrolls = layout.scrolls();
                // Scrolling content may extend past the container.
                let bounds = if scrolls {
                    raw.iter().fold(available, |e, r| {
                        Expanse::new(e.w.max(r.right()), e.h.max(r.bottom()))
                    })
                } else {
                    available
                };
                let (rects, fixed) = normalize(raw, count, bounds);
                if fixed {
                    tracing::warn!(
                        node = %node.name,
                        layout = %layout.to_json(),
                        "layout output corrected to fit the container"
                    );
                }
                stats.arranged += 1;
                for (child, rect) in children.iter().zip(rects) {
                    self.set_geometry(*child, rect)?;
                }
                if scrolls {
                    self.clamp_scroll(id)?;
                }
            }
            for child in children.iter().rev() {
                stack.push(*child);
            }
        }
        self.follow_cursor()?;
        self.layout_dirty = false;
        tracing::debug!(
            measured = stats.measured,
            arranged = stats.arranged,
            "layout"
        );
        Ok(stats)
    }

    /// Scroll each scrolling ancestor of the focused cursor, innermost
    /// first, so that the cursor is visible. A container only follows when
    /// the cursor has moved within its content since it last followed, so an
    /// explicit scroll stays put until the cursor moves again.
    pub(crate) fn follow_cursor(&mut self) -> Result<()> {
        let Some((id, _, _)) = self.focus_cursor() else {
            return Ok(());
        };
        let mut current = self.nodes.get(id).and_then(|n| n.parent);
        while let Some(vp) = current {
            let Some((_, at, _)) = self.focus_cursor() else {
                break;
            };
            let node = &self.nodes[vp];
            current = node.parent;
            if !node.layout.as_ref().is_some_and(|l| l.scrolls()) {
                continue;
            }
            let content = at - node.screen.tl + node.scroll.into();
            if node.followed == Some(content) {
                continue;
            }
            let view = node.rect.expanse();
            let target = Point {
                x: follow_axis(node.scroll.x, content.x, view.w),
                y: follow_axis(node.scroll.y, content.y, view.h),
            };
            self.nodes[vp].followed = Some(content);
            self.scroll_to(vp, target)?;
        }
        Ok(())
    }
}

/// The smallest change to a scroll offset that brings `cursor` into a view
/// of length `view`.
fn follow_axis(offset: u32, cursor: i32, view: u32) -> u32 {
    let Ok(cursor) = u32::try_from(cursor) else {
        return offset;
    };
    if view == 0 {
        return offset;
    }
    offset.clamp(cursor.saturating_add(1).saturating_sub(view), cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        component::Component,
        geom::RectI32,
        layout::{Linear, Policy},
    };

    struct Fixed(u32, u32);

    impl Component for Fixed {
        fn preferred_size(&self, _w: u32) -> Expanse {
            Expanse::new(self.0, self.1)
        }
    }

    struct Plain;
    impl Component for Plain {}

    #[test]
    fn remainder_scenario() -> Result<()> {
        let mut c = Core::new(Plain)?;
        c.resize(Expanse::new(35, 3));
        let root = c.root_id();
        c.set_layout(root, Linear::row(Policy::Remainder))?;
        let kids: Vec<NodeId> = (0..3)
            .map(|_| c.add_child(root, Fixed(10, 1)))
            .collect::<Result<_>>()?;
        c.layout()?;
        let widths: Vec<u32> = kids
            .iter()
            .filter_map(|k| c.node(*k).map(|n| n.rect().w))
            .collect();
        assert_eq!(widths, vec![10, 10, 15]);
        Ok(())
    }

    #[test]
    fn nested_containers_arranged_once() -> Result<()> {
        let mut c = Core::new(Plain)?;
        c.resize(Expanse::new(20, 10));
        let root = c.root_id();
        c.set_layout(root, Linear::column(Policy::Greedy))?;
        let inner = c.add_child(root, Plain)?;
        c.set_layout(inner, Linear::row(Policy::Greedy))?;
        let a = c.add_child(inner, Fixed(3, 2))?;
        let b = c.add_child(inner, Fixed(4, 1))?;
        let empty = c.add_child(root, Plain)?;
        c.set_layout(empty, Linear::row(Policy::Clip))?;

        let stats = c.layout()?;
        assert_eq!(stats.arranged, 3);

        // inner prefers 7x2 and the empty container 0x0; greedy spreads the
        // remaining 8 rows evenly.
        assert_eq!(c.node(inner).map(|n| n.rect()), Some(Rect::new(0, 0, 20, 6)));
        assert_eq!(c.node(empty).map(|n| n.rect()), Some(Rect::new(0, 6, 20, 4)));
        assert_eq!(c.node(a).map(|n| n.screen_rect()), Some(RectI32::new(0, 0, 10, 6)));
        assert_eq!(c.node(b).map(|n| n.screen_rect()), Some(RectI32::new(10, 0, 10, 6)));
        Ok(())
    }

    #[test]
    fn layout_is_deterministic() -> Result<()> {
        let mut c = Core::new(Plain)?;
        c.resize(Expanse::new(37, 5));
        let root = c.root_id();
        c.set_layout(root, Linear::row(Policy::Greedy))?;
        for w in [3, 0, 12, 7] {
            c.add_child(root, Fixed(w, 1))?;
        }
        c.layout()?;
        let rects = |c: &Core| -> Vec<Rect> {
            c.subtree_pre_order(root)
                .iter()
                .filter_map(|n| c.node(*n).map(|n| n.rect()))
                .collect()
        };
        let first = rects(&c);
        c.layout()?;
        let second = rects(&c);
        assert_eq!(first, second);
        let sum: u32 = first[1..].iter().map(|r| r.w).sum();
        assert_eq!(sum, 37);
        Ok(())
    }

    #[test]
    fn zero_space() -> Result<()> {
        let mut c = Core::new(Plain)?;
        let root = c.root_id();
        c.set_layout(root, Linear::row(Policy::Greedy))?;
        let a = c.add_child(root, Fixed(5, 5))?;
        c.layout()?;
        assert_eq!(c.node(a).map(|n| n.rect()), Some(Rect::zero()));
        Ok(())
    }
}

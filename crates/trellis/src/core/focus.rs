//! The focus cursor and tab-order traversal.
//!
//! Tab order is a pre-order walk from the root over attached nodes whose
//! components accept focus. Traversal wraps at both ends.

use super::{context::CoreViewContext, id::NodeId, world::Core};
use crate::{
    cursor::Cursor,
    error::{Error, Result},
    event::Event,
    geom::PointI32,
};

impl Core {
    /// Every focusable attached node, in tab order.
    pub fn focusable_nodes(&self) -> Vec<NodeId> {
        self.subtree_pre_order(self.root)
            .into_iter()
            .filter(|id| self.accepts_focus(*id))
            .collect()
    }

    /// Move the focus cursor to `node`. The previous holder gets
    /// [`Event::FocusLost`] and then the new holder gets
    /// [`Event::FocusGained`]. Focusing the current holder again does
    /// nothing.
    pub fn set_focus(&mut self, node: impl Into<NodeId>) -> Result<()> {
        let node = node.into();
        if !self.nodes.contains_key(node) {
            return Err(Error::NodeNotFound(node));
        }
        if !self.is_attached_to_root(node) {
            return Err(Error::Focus(format!("{node:?} is detached")));
        }
        if !self.accepts_focus(node) {
            return Err(Error::Focus(format!("{node:?} does not accept focus")));
        }
        if self.focus == Some(node) {
            return Ok(());
        }
        let prev = self.focus.replace(node);
        tracing::debug!(?prev, ?node, "focus moved");
        if let Some(prev) = prev {
            self.queue_focus_event(prev, Event::FocusLost)?;
        }
        self.queue_focus_event(node, Event::FocusGained)
    }

    /// Empty the focus cursor, notifying the previous holder.
    pub fn clear_focus(&mut self) -> Result<()> {
        if let Some(prev) = self.focus.take() {
            self.queue_focus_event(prev, Event::FocusLost)?;
        }
        Ok(())
    }

    /// Focus the first focusable node in tab order.
    pub fn focus_first(&mut self) -> Result<()> {
        match self.focusable_nodes().first() {
            Some(id) => self.set_focus(*id),
            None => Ok(()),
        }
    }

    /// Focus the next node in tab order, wrapping at the end. With nothing
    /// focused this is the first focusable node.
    pub fn focus_next(&mut self) -> Result<()> {
        self.focus_step(true)
    }

    /// Focus the previous node in tab order, wrapping at the start. With
    /// nothing focused this is the last focusable node.
    pub fn focus_prev(&mut self) -> Result<()> {
        self.focus_step(false)
    }

    /// The cursor requested by the focused node, or by its nearest ancestor
    /// that requests one. Returns the requesting node and the cursor's
    /// location in screen coordinates.
    pub(crate) fn focus_cursor(&self) -> Option<(NodeId, PointI32, Cursor)> {
        let mut current = self.focus;
        while let Some(id) = current {
            let node = self.nodes.get(id)?;
            let ctx = CoreViewContext::new(self, id);
            if let Some(c) = node.component.as_deref().and_then(|w| w.cursor(&ctx)) {
                return Some((id, node.screen.tl + c.location.into(), c));
            }
            current = node.parent;
        }
        None
    }

    /// The terminal cursor for the current tree, in screen coordinates. It
    /// is hidden when the requested location isn't visible.
    pub fn screen_cursor(&self) -> Option<Cursor> {
        let (id, at, c) = self.focus_cursor()?;
        let p = at.to_point()?;
        self.nodes
            .get(id)?
            .clip?
            .contains_point(p)
            .then_some(Cursor { location: p, ..c })
    }

    fn focus_step(&mut self, forward: bool) -> Result<()> {
        let order = self.focusable_nodes();
        if order.is_empty() {
            return Ok(());
        }
        let current = self
            .focus
            .and_then(|f| order.iter().position(|id| *id == f));
        let n = order.len();
        let target = match (current, forward) {
            (Some(i), true) => (i + 1) % n,
            (Some(i), false) => (i + n - 1) % n,
            (None, true) => 0,
            (None, false) => n - 1,
        };
        self.set_focus(order[target])
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{
        component::{Component, EventOutcome},
        core::context::Context,
        geom::Expanse,
    };

    type Log = Rc<RefCell<Vec<String>>>;

    /// Records focus notifications into a shared log.
    struct Focusable {
        name: &'static str,
        log: Log,
    }

    impl Component for Focusable {
        fn accept_focus(&self) -> bool {
            true
        }

        fn on_event(&mut self, event: &Event, _ctx: &mut dyn Context) -> Result<EventOutcome> {
            let what = match event {
                Event::FocusGained => "gained",
                Event::FocusLost => "lost",
                _ => return Ok(EventOutcome::Bubble),
            };
            self.log.borrow_mut().push(format!("{} {what}", self.name));
            Ok(EventOutcome::Handled)
        }
    }

    struct Plain;
    impl Component for Plain {}

    #[test]
    fn traversal_wraps() -> Result<()> {
        let log: Log = Default::default();
        let mut c = Core::new(Plain)?;
        c.resize(Expanse::new(10, 10));
        let root = c.root_id();
        let p = c.add_child(root, Plain)?;
        let a = c.add_child(p, Focusable { name: "a", log: Rc::clone(&log) })?;
        let b = c.add_child(root, Focusable { name: "b", log: Rc::clone(&log) })?;
        assert_eq!(c.focusable_nodes(), vec![a, b]);

        c.focus_next()?;
        assert_eq!(c.focus_id(), Some(a));
        c.focus_next()?;
        assert_eq!(c.focus_id(), Some(b));
        c.focus_next()?;
        assert_eq!(c.focus_id(), Some(a));
        c.focus_prev()?;
        assert_eq!(c.focus_id(), Some(b));
        assert_eq!(
            *log.borrow(),
            vec!["a gained", "a lost", "b gained", "b lost", "a gained", "a lost", "b gained"]
        );
        Ok(())
    }

    #[test]
    fn focus_preconditions() -> Result<()> {
        let log: Log = Default::default();
        let mut c = Core::new(Plain)?;
        let plain = c.add_child(c.root_id(), Plain)?;
        let loose = c.add(Focusable { name: "x", log });
        assert!(matches!(c.set_focus(plain), Err(Error::Focus(_))));
        assert!(matches!(c.set_focus(loose), Err(Error::Focus(_))));
        assert_eq!(c.focus_id(), None);
        c.focus_prev()?;
        assert_eq!(c.focus_id(), None);
        Ok(())
    }

    #[test]
    fn detach_clears_focus() -> Result<()> {
        let log: Log = Default::default();
        let mut c = Core::new(Plain)?;
        let root = c.root_id();
        let p = c.add_child(root, Plain)?;
        let a = c.add_child(root, Focusable { name: "a", log: Rc::clone(&log) })?;
        let b = c.add_child(p, Focusable { name: "b", log })?;
        c.set_focus(b)?;
        c.detach(p)?;
        assert_eq!(c.focus_id(), None);
        c.focus_next()?;
        assert_eq!(c.focus_id(), Some(a));
        c.remove_subtree(a)?;
        assert_eq!(c.focus_id(), None);
        Ok(())
    }
}

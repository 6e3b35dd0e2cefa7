//! The node arena: tree structure, geometry, damage and event dispatch.

use std::{
    any::{Any, type_name},
    collections::{HashSet, VecDeque},
};

use slotmap::SlotMap;

use super::{
    context::CoreContext,
    id::{NodeId, TypedId},
    node::Node,
};
use crate::{
    component::{Component, EventOutcome},
    damage::{DamageConfig, DamageTracker},
    error::{Error, Result},
    event::Event,
    geom::{Expanse, Point, PointI32, Rect, RectI32},
    layout::{Hint, Layout},
};

/// The component tree and the state that hangs off it: the focus cursor and
/// pending damage.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. Parents own their
/// children through the `children` list; the `parent` link is a back
/// reference used for bubbling and coordinate translation only. Nodes can
/// exist detached from the root, in which case they are never laid out,
/// drawn, or hit-tested.
pub struct Core {
    /// Node storage.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Root of the tree.
    pub(crate) root: NodeId,
    /// The focus cursor. Always empty or an attached, focusable node.
    pub(crate) focus: Option<NodeId>,
    /// Damage in screen coordinates.
    pub(crate) damage: DamageTracker,
    /// Screen size, which is also the root's available space.
    pub(crate) size: Expanse,
    /// Layout must run before the next draw.
    pub(crate) layout_dirty: bool,
    /// Bumped on every damage report, so callers can tell whether a mutation
    /// reported anything.
    damage_epoch: u64,
    /// Focus notifications waiting for the current dispatch to unwind.
    focus_events: VecDeque<(NodeId, Event)>,
    /// Number of event handlers currently on the stack.
    dispatch_depth: usize,
    /// Components currently borrowed out of their slots, with their focus
    /// acceptance captured at the time.
    borrowed: Vec<(NodeId, bool)>,
    /// Exit code requested by a component.
    exit_requested: Option<i32>,
}

impl Core {
    /// Construct a tree with `root` at the top and default damage thresholds.
    pub fn new(root: impl Component) -> Result<Self> {
        Self::with_config(Box::new(root), DamageConfig::default())
    }

    /// Construct a tree from a boxed root component and damage thresholds.
    pub fn with_config(root: Box<dyn Component>, config: DamageConfig) -> Result<Self> {
        let damage = DamageTracker::new(Rect::zero(), config)?;
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(root));
        Ok(Self {
            nodes,
            root,
            focus: None,
            damage,
            size: Expanse::zero(),
            layout_dirty: true,
            damage_epoch: 0,
            focus_events: VecDeque::new(),
            dispatch_depth: 0,
            borrowed: Vec::new(),
            exit_requested: None,
        })
    }

    /// Return the root node ID.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Return the focused node, if any.
    pub fn focus_id(&self) -> Option<NodeId> {
        self.focus
    }

    /// Return the screen size.
    pub fn size(&self) -> Expanse {
        self.size
    }

    /// Return a node by ID.
    pub fn node(&self, node_id: impl Into<NodeId>) -> Option<&Node> {
        self.nodes.get(node_id.into())
    }

    /// Return the damage tracker.
    pub fn damage(&self) -> &DamageTracker {
        &self.damage
    }

    /// Does the next repaint have anything to do?
    pub fn needs_repaint(&self) -> bool {
        self.layout_dirty || !self.damage.is_empty()
    }

    /// Ask the run loop to exit with a code.
    pub fn request_exit(&mut self, code: i32) {
        self.exit_requested = Some(code);
    }

    /// Take a pending exit request.
    pub fn take_exit_request(&mut self) -> Option<i32> {
        self.exit_requested.take()
    }

    /// Create a detached node.
    pub fn add(&mut self, component: impl Component) -> NodeId {
        self.add_boxed(Box::new(component))
    }

    /// Create a detached node and return a typed ID for it.
    pub fn add_typed<C: Component>(&mut self, component: C) -> TypedId<C> {
        TypedId::new(self.add(component))
    }

    /// Create a detached node from a boxed component.
    pub fn add_boxed(&mut self, component: Box<dyn Component>) -> NodeId {
        self.nodes.insert(Node::new(component))
    }

    /// Create a node and attach it as the last child of `parent`.
    pub fn add_child(
        &mut self,
        parent: impl Into<NodeId>,
        component: impl Component,
    ) -> Result<NodeId> {
        let parent = parent.into();
        let child = self.add(component);
        if let Err(e) = self.attach(parent, child) {
            self.nodes.remove(child);
            return Err(e);
        }
        Ok(child)
    }

    /// Set the layout strategy for a node's children.
    pub fn set_layout(&mut self, node: impl Into<NodeId>, layout: impl Layout + 'static) -> Result<()> {
        let node = node.into();
        self.nodes
            .get_mut(node)
            .ok_or(Error::NodeNotFound(node))?
            .layout = Some(Box::new(layout));
        self.invalidate(node);
        Ok(())
    }

    /// Set the hint a node offers its parent's layout.
    pub fn set_hint(&mut self, node: impl Into<NodeId>, hint: Hint) -> Result<()> {
        let node = node.into();
        let n = self.nodes.get_mut(node).ok_or(Error::NodeNotFound(node))?;
        if n.hint != hint {
            n.hint = hint;
            self.layout_dirty = true;
        }
        Ok(())
    }

    /// Return true if `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Return true if `node` is the root or reaches it through its parents.
    pub fn is_attached_to_root(&self, node_id: impl Into<NodeId>) -> bool {
        let node_id = node_id.into();
        self.nodes.contains_key(node_id)
            && (node_id == self.root || self.is_ancestor(self.root, node_id))
    }

    /// Attach a detached child as the last child of `parent`.
    pub fn attach(&mut self, parent: impl Into<NodeId>, child: impl Into<NodeId>) -> Result<()> {
        let parent = parent.into();
        let child = child.into();
        if !self.nodes.contains_key(parent) {
            return Err(Error::NodeNotFound(parent));
        }
        let Some(c) = self.nodes.get(child) else {
            return Err(Error::NodeNotFound(child));
        };
        if c.parent.is_some() || child == self.root {
            return Err(Error::AlreadyAttached(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }

        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        self.refresh_screen(child);
        self.invalidate(child);
        Ok(())
    }

    /// Detach a node from its parent. The subtree stays in the arena and can
    /// be attached again. If the focus cursor is inside the subtree it is
    /// cleared.
    pub fn detach(&mut self, child: impl Into<NodeId>) -> Result<()> {
        let child = child.into();
        let Some(parent) = self
            .nodes
            .get(child)
            .ok_or(Error::NodeNotFound(child))?
            .parent
        else {
            return Ok(());
        };
        self.damage_visible(child);
        self.nodes[parent].children.retain(|id| *id != child);
        self.nodes[child].parent = None;
        self.release_focus_within(child);
        self.refresh_screen(child);
        self.layout_dirty = true;
        Ok(())
    }

    /// Replace a node's children. Nodes in the new list are taken from any
    /// previous parent; old children not in the list are left detached.
    pub fn set_children(&mut self, parent: impl Into<NodeId>, children: Vec<NodeId>) -> Result<()> {
        let parent = parent.into();
        if !self.nodes.contains_key(parent) {
            return Err(Error::NodeNotFound(parent));
        }
        let mut seen = HashSet::with_capacity(children.len());
        for child in &children {
            if !self.nodes.contains_key(*child) {
                return Err(Error::NodeNotFound(*child));
            }
            if *child == self.root {
                return Err(Error::AlreadyAttached(*child));
            }
            if *child == parent || self.is_ancestor(*child, parent) {
                return Err(Error::WouldCreateCycle {
                    parent,
                    child: *child,
                });
            }
            if !seen.insert(*child) {
                return Err(Error::InvalidOperation(format!(
                    "duplicate child {child:?}"
                )));
            }
        }

        for child in &children {
            if let Some(old) = self.nodes[*child].parent
                && old != parent
            {
                self.damage_visible(*child);
                self.nodes[old].children.retain(|id| id != child);
                self.nodes[*child].parent = None;
            }
        }
        let old_children = std::mem::take(&mut self.nodes[parent].children);
        for child in old_children {
            if !seen.contains(&child) {
                self.damage_visible(child);
                self.nodes[child].parent = None;
                self.release_focus_within(child);
                self.refresh_screen(child);
            }
        }
        for child in &children {
            self.nodes[*child].parent = Some(parent);
        }
        self.nodes[parent].children = children;
        self.refresh_screen(parent);
        // Focus may have been moved out from under the root by re-parenting.
        if let Some(f) = self.focus
            && !self.is_attached_to_root(f)
        {
            self.focus = None;
        }
        self.invalidate(parent);
        Ok(())
    }

    /// Remove a node and all its descendants from the arena.
    pub fn remove_subtree(&mut self, node: impl Into<NodeId>) -> Result<()> {
        let node = node.into();
        if node == self.root {
            return Err(Error::InvalidOperation("cannot remove root".into()));
        }
        if !self.nodes.contains_key(node) {
            return Err(Error::NodeNotFound(node));
        }
        self.detach(node)?;
        for id in self.subtree_post_order(node) {
            self.nodes.remove(id);
        }
        Ok(())
    }

    /// Clear the focus cursor if it lies within a subtree.
    fn release_focus_within(&mut self, top: NodeId) {
        if let Some(f) = self.focus
            && (f == top || self.is_ancestor(top, f))
        {
            tracing::debug!(?f, "focused node detached, focus cleared");
            self.focus = None;
        }
    }

    /// Collect a subtree in pre-order, including the root.
    pub(crate) fn subtree_pre_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(node_id) = stack.pop() {
            let Some(node) = self.nodes.get(node_id) else {
                continue;
            };
            out.push(node_id);
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// Collect a subtree in post-order, including the root.
    fn subtree_post_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![(root, false)];
        while let Some((node_id, visited)) = stack.pop() {
            let Some(node) = self.nodes.get(node_id) else {
                continue;
            };
            if visited {
                out.push(node_id);
                continue;
            }
            stack.push((node_id, true));
            for child in node.children.iter().rev() {
                stack.push((*child, false));
            }
        }
        out
    }

    /// Recompute screen rects and clips for a subtree from its parent.
    fn refresh_screen(&mut self, top: NodeId) {
        let Some(node) = self.nodes.get(top) else {
            return;
        };
        let (origin, clip) = match node.parent {
            Some(p) => (self.content_origin(p), self.nodes[p].clip),
            None if top == self.root => (PointI32::zero(), Some(self.size.rect())),
            None => (PointI32::zero(), None),
        };
        let mut stack = vec![(top, origin, clip)];
        while let Some((id, origin, parent_clip)) = stack.pop() {
            let node = &mut self.nodes[id];
            node.screen = RectI32::from(node.rect).shift(origin);
            node.clip = parent_clip.and_then(|c| node.screen.intersect_rect(c));
            let (tl, clip) = (node.screen.tl - node.scroll.into(), node.clip);
            for child in &node.children {
                stack.push((*child, tl, clip));
            }
        }
    }

    /// Screen position of a node's content origin: where a child with a
    /// rect at (0, 0) lands.
    fn content_origin(&self, node: NodeId) -> PointI32 {
        let n = &self.nodes[node];
        n.screen.tl - n.scroll.into()
    }

    /// Assign a node's rect, relative to its parent. Unchanged geometry is a
    /// no-op. A change damages both the area the node used to cover and the
    /// area it covers now.
    pub fn set_geometry(&mut self, node: impl Into<NodeId>, rect: Rect) -> Result<()> {
        let node = node.into();
        let n = self.nodes.get_mut(node).ok_or(Error::NodeNotFound(node))?;
        if n.rect == rect {
            return Ok(());
        }
        n.rect = rect;
        let old = n.clip;
        self.refresh_screen(node);
        if self.is_attached_to_root(node) {
            if let Some(r) = old {
                self.mark_screen(r);
            }
            if let Some(r) = self.nodes[node].clip {
                self.mark_screen(r);
            }
        }
        Ok(())
    }

    /// Record damage to part of a node. `rect` is local to the node and is
    /// clipped to the node's visible area. Fails for detached nodes.
    pub fn mark_damaged(&mut self, node: impl Into<NodeId>, rect: Rect) -> Result<()> {
        let node = node.into();
        let n = self.nodes.get(node).ok_or(Error::NodeNotFound(node))?;
        if !self.is_attached_to_root(node) {
            return Err(Error::Detached(node));
        }
        let visible = rect
            .intersect(&n.rect.expanse().rect())
            .map(|r| RectI32::from(r).shift(n.screen.tl))
            .zip(n.clip)
            .and_then(|(r, clip)| r.intersect_rect(clip));
        if let Some(r) = visible {
            self.mark_screen(r);
        }
        self.damage_epoch += 1;
        // Content changes can change preferred sizes.
        self.layout_dirty = true;
        Ok(())
    }

    /// Record damage to the whole of a node.
    pub fn damage_node(&mut self, node: impl Into<NodeId>) -> Result<()> {
        let node = node.into();
        let r = self
            .nodes
            .get(node)
            .ok_or(Error::NodeNotFound(node))?
            .rect
            .expanse()
            .rect();
        self.mark_damaged(node, r)
    }

    /// Damage a node's visible area, if it has one.
    fn damage_visible(&mut self, node: NodeId) {
        if self.is_attached_to_root(node)
            && let Some(r) = self.nodes[node].clip
        {
            self.mark_screen(r);
        }
    }

    /// Damage a node if it is attached and mark layout dirty.
    fn invalidate(&mut self, node: NodeId) {
        self.damage_visible(node);
        self.layout_dirty = true;
    }

    fn mark_screen(&mut self, r: Rect) {
        self.damage.mark(r);
    }

    /// Extent of a node's content: the bottom-right corner of its furthest
    /// child, and never less than the node itself.
    fn content_extent(&self, node: NodeId) -> Expanse {
        let n = &self.nodes[node];
        n.children
            .iter()
            .filter_map(|c| self.nodes.get(*c))
            .fold(n.rect.expanse(), |e, c| {
                Expanse::new(e.w.max(c.rect.right()), e.h.max(c.rect.bottom()))
            })
    }

    /// Scroll a node's content so that `offset` sits at its top-left corner.
    /// The offset is clamped so the content never scrolls past its far
    /// edge. A change damages the node's visible area.
    pub fn scroll_to(&mut self, node: impl Into<NodeId>, offset: Point) -> Result<()> {
        let node = node.into();
        let n = self.nodes.get(node).ok_or(Error::NodeNotFound(node))?;
        let view = n.rect.expanse();
        let content = self.content_extent(node);
        let clamped = Point {
            x: offset.x.min(content.w - view.w),
            y: offset.y.min(content.h - view.h),
        };
        if clamped == self.nodes[node].scroll {
            return Ok(());
        }
        self.nodes[node].scroll = clamped;
        self.refresh_screen(node);
        self.damage_visible(node);
        Ok(())
    }

    /// Scroll a node's content by a signed amount.
    pub fn scroll_by(&mut self, node: impl Into<NodeId>, dx: i32, dy: i32) -> Result<()> {
        let node = node.into();
        let current = self
            .nodes
            .get(node)
            .ok_or(Error::NodeNotFound(node))?
            .scroll;
        self.scroll_to(node, current.scroll(dx, dy))
    }

    /// Re-apply the scroll clamp after a node's content changed size.
    pub(crate) fn clamp_scroll(&mut self, node: NodeId) -> Result<()> {
        let offset = self.nodes.get(node).ok_or(Error::NodeNotFound(node))?.scroll;
        self.scroll_to(node, offset)
    }

    /// The terminal changed size. The next repaint lays out the whole tree
    /// and redraws everything.
    pub fn resize(&mut self, size: Expanse) {
        tracing::debug!(w = size.w, h = size.h, "resize");
        self.size = size;
        self.damage.set_bounds(size.rect());
        self.damage.mark_all();
        self.layout_dirty = true;
        self.refresh_screen(self.root);
    }

    /// Borrow a component by type.
    pub fn get<C: Component>(&self, node: impl Into<NodeId>) -> Result<&C> {
        let node = node.into();
        let c = self
            .nodes
            .get(node)
            .ok_or(Error::NodeNotFound(node))?
            .component
            .as_deref()
            .ok_or(Error::ReentrantComponentBorrow(node))?;
        (c as &dyn Any)
            .downcast_ref::<C>()
            .ok_or_else(|| Error::InvalidOperation(format!("expected component {}", type_name::<C>())))
    }

    /// Mutate a component. The closure gets a [`Context`] bound to the node
    /// and should report what it changed; if it reports nothing and the node
    /// is attached, the whole node is damaged.
    ///
    /// [`Context`]: super::context::Context
    pub fn update<C, R>(
        &mut self,
        node: impl Into<NodeId>,
        f: impl FnOnce(&mut C, &mut dyn super::context::Context) -> Result<R>,
    ) -> Result<R>
    where
        C: Component,
    {
        let node = node.into();
        let epoch = self.damage_epoch;
        let out = self.with_component_mut(node, |c, core| {
            let c = (c as &mut dyn Any).downcast_mut::<C>().ok_or_else(|| {
                Error::InvalidOperation(format!("expected component {}", type_name::<C>()))
            })?;
            let mut ctx = CoreContext::new(core, node);
            f(c, &mut ctx)
        })??;
        self.ensure_damage(node, epoch)?;
        if self.dispatch_depth == 0 {
            self.flush_focus_events()?;
        }
        Ok(out)
    }

    /// If nothing was reported since `epoch`, damage all of an attached node.
    fn ensure_damage(&mut self, node: NodeId, epoch: u64) -> Result<()> {
        if self.damage_epoch == epoch && self.is_attached_to_root(node) {
            self.damage_node(node)?;
        }
        Ok(())
    }

    /// Take a component out of its slot for a single call, then put it back.
    pub(crate) fn with_component_mut<R>(
        &mut self,
        node_id: NodeId,
        f: impl FnOnce(&mut dyn Component, &mut Self) -> R,
    ) -> Result<R> {
        let mut component = self
            .nodes
            .get_mut(node_id)
            .ok_or(Error::NodeNotFound(node_id))?
            .component
            .take()
            .ok_or(Error::ReentrantComponentBorrow(node_id))?;
        self.borrowed.push((node_id, component.accept_focus()));
        let out = f(component.as_mut(), self);
        self.borrowed.pop();
        // The node may have been removed by the call.
        if let Some(node) = self.nodes.get_mut(node_id) {
            node.component = Some(component);
        }
        Ok(out)
    }

    /// Does a node's component accept focus?
    pub(crate) fn accepts_focus(&self, node: NodeId) -> bool {
        match self.nodes.get(node).and_then(|n| n.component.as_ref()) {
            Some(c) => c.accept_focus(),
            None => self
                .borrowed
                .iter()
                .rev()
                .find(|(id, _)| *id == node)
                .is_some_and(|(_, f)| *f),
        }
    }

    /// Route an input event.
    ///
    /// Keys, paste and terminal focus changes go to the focused node, or the
    /// root if nothing is focused. Mouse events go to the innermost node
    /// under the pointer. Either way the event then bubbles up through the
    /// ancestors until a handler returns [`EventOutcome::Handled`]. Resize
    /// events update the screen size and are not delivered to components.
    pub fn dispatch(&mut self, event: &Event) -> Result<EventOutcome> {
        match event {
            Event::Resize(size) => {
                self.resize(*size);
                Ok(EventOutcome::Handled)
            }
            Event::Mouse(m) => match self.locate(m.location) {
                Some(target) => self.dispatch_from(target, event, true),
                None => Ok(EventOutcome::Bubble),
            },
            _ => {
                let target = self.focus.unwrap_or(self.root);
                self.dispatch_from(target, event, true)
            }
        }
    }

    /// Deliver an event starting at a node, optionally bubbling. Mouse
    /// locations are in screen coordinates and are localised for each
    /// handler.
    pub fn dispatch_from(
        &mut self,
        start: impl Into<NodeId>,
        event: &Event,
        bubble: bool,
    ) -> Result<EventOutcome> {
        let start = start.into();
        self.dispatch_depth += 1;
        let outcome = self.dispatch_inner(start, event, bubble);
        self.dispatch_depth -= 1;
        let outcome = outcome?;
        if self.dispatch_depth == 0 {
            self.flush_focus_events()?;
        }
        Ok(outcome)
    }

    fn dispatch_inner(&mut self, start: NodeId, event: &Event, bubble: bool) -> Result<EventOutcome> {
        let mut target = Some(start);
        while let Some(id) = target {
            let local = match event.location() {
                Some(p) => {
                    let screen = self.nodes.get(id).ok_or(Error::NodeNotFound(id))?.screen;
                    event.with_location(screen.rebase(p).unwrap_or_default())
                }
                None => event.clone(),
            };
            let epoch = self.damage_epoch;
            let outcome = self.with_component_mut(id, |c, core| {
                let mut ctx = CoreContext::new(core, id);
                c.on_event(&local, &mut ctx)
            })??;
            if outcome == EventOutcome::Handled {
                self.ensure_damage(id, epoch)?;
                return Ok(outcome);
            }
            if !bubble {
                break;
            }
            target = self.nodes.get(id).and_then(|n| n.parent);
        }
        Ok(EventOutcome::Bubble)
    }

    /// Queue a focus notification, delivering immediately if no handler is
    /// running.
    pub(crate) fn queue_focus_event(&mut self, node: NodeId, event: Event) -> Result<()> {
        self.focus_events.push_back((node, event));
        if self.dispatch_depth == 0 {
            self.flush_focus_events()?;
        }
        Ok(())
    }

    /// Deliver queued focus notifications in order.
    fn flush_focus_events(&mut self) -> Result<()> {
        while let Some((node, event)) = self.focus_events.pop_front() {
            if self.nodes.contains_key(node) {
                self.dispatch_from(node, &event, false)?;
            }
        }
        Ok(())
    }

    /// Locate the innermost attached node whose visible area contains a
    /// screen point. Later siblings are drawn over earlier ones, so they win.
    pub fn locate(&self, point: Point) -> Option<NodeId> {
        let mut result = None;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            if !node.clip.is_some_and(|c| c.contains_point(point)) {
                continue;
            }
            result = Some(id);
            // Only descend into the top-most child that contains the point.
            if let Some(child) = node.children.iter().rev().find(|c| {
                self.nodes
                    .get(**c)
                    .and_then(|n| n.clip)
                    .is_some_and(|clip| clip.contains_point(point))
            }) {
                stack.push(*child);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::Context;

    #[derive(Default)]
    struct Leaf {
        value: u32,
        focusable: bool,
        events: Vec<Event>,
        handle: bool,
    }

    impl Component for Leaf {
        fn preferred_size(&self, _w: u32) -> Expanse {
            Expanse::new(2, 1)
        }

        fn accept_focus(&self) -> bool {
            self.focusable
        }

        fn on_event(&mut self, event: &Event, _ctx: &mut dyn Context) -> Result<EventOutcome> {
            self.events.push(event.clone());
            Ok(if self.handle {
                EventOutcome::Handled
            } else {
                EventOutcome::Bubble
            })
        }
    }

    fn tree() -> Result<(Core, NodeId, NodeId, NodeId)> {
        let mut c = Core::new(Leaf::default())?;
        c.resize(Expanse::new(20, 10));
        c.set_geometry(c.root_id(), Rect::new(0, 0, 20, 10))?;
        let a = c.add_child(c.root_id(), Leaf::default())?;
        let b = c.add_child(a, Leaf::default())?;
        let d = c.add(Leaf::default());
        Ok((c, a, b, d))
    }

    #[test]
    fn tree_invariants() -> Result<()> {
        let (mut c, a, b, d) = tree()?;
        assert!(c.is_attached_to_root(b));
        assert!(!c.is_attached_to_root(d));
        assert!(c.is_ancestor(a, b));
        assert_eq!(c.attach(b, a), Err(Error::AlreadyAttached(a)));
        c.detach(a)?;
        assert_eq!(c.attach(b, a), Err(Error::WouldCreateCycle { parent: b, child: a }));
        assert!(!c.is_attached_to_root(b));
        c.attach(c.root_id(), a)?;
        assert!(c.is_attached_to_root(b));
        assert!(matches!(c.remove_subtree(c.root_id()), Err(Error::InvalidOperation(_))));
        c.remove_subtree(a)?;
        assert!(c.node(b).is_none());
        assert!(c.node(c.root_id()).is_some_and(|n| n.children().is_empty()));
        Ok(())
    }

    #[test]
    fn set_children_reparents() -> Result<()> {
        let (mut c, a, b, d) = tree()?;
        let root = c.root_id();
        c.set_children(root, vec![b, d])?;
        assert_eq!(c.node(root).map(|n| n.children().to_vec()), Some(vec![b, d]));
        assert!(c.node(a).is_some_and(|n| n.children().is_empty() && n.parent().is_none()));
        assert!(matches!(c.set_children(root, vec![b, b]), Err(Error::InvalidOperation(_))));
        Ok(())
    }

    #[test]
    fn geometry_is_idempotent() -> Result<()> {
        let (mut c, a, b, _) = tree()?;
        c.damage.take_pending();
        c.set_geometry(a, Rect::new(2, 2, 5, 5))?;
        c.set_geometry(b, Rect::new(1, 1, 2, 2))?;
        assert_eq!(c.node(b).map(|n| n.screen_rect()), Some(RectI32::new(3, 3, 2, 2)));
        assert!(!c.damage.is_empty());
        c.damage.take_pending();
        c.set_geometry(a, Rect::new(2, 2, 5, 5))?;
        assert!(c.damage.is_empty());

        c.set_geometry(a, Rect::new(3, 2, 5, 5))?;
        let pending = c.damage.take_pending();
        assert_eq!(pending, vec![Rect::new(2, 2, 6, 5)]);
        Ok(())
    }

    #[test]
    fn damage_is_local_and_clipped() -> Result<()> {
        let (mut c, a, b, d) = tree()?;
        c.set_geometry(a, Rect::new(10, 5, 5, 5))?;
        c.set_geometry(b, Rect::new(3, 3, 5, 5))?;
        c.damage.take_pending();
        c.mark_damaged(b, Rect::new(0, 0, 10, 10))?;
        assert_eq!(c.damage.take_pending(), vec![Rect::new(13, 8, 2, 2)]);
        assert_eq!(c.mark_damaged(d, Rect::new(0, 0, 1, 1)), Err(Error::Detached(d)));
        Ok(())
    }

    #[test]
    fn update_damages_whole_node_by_default() -> Result<()> {
        let (mut c, a, _, d) = tree()?;
        c.set_geometry(a, Rect::new(1, 1, 4, 2))?;
        c.damage.take_pending();
        c.update::<Leaf, _>(a, |l, _| {
            l.value = 3;
            Ok(())
        })?;
        assert_eq!(c.damage.take_pending(), vec![Rect::new(1, 1, 4, 2)]);

        c.update::<Leaf, _>(a, |_, ctx| ctx.damage(Rect::new(0, 0, 1, 1)))?;
        assert_eq!(c.damage.take_pending(), vec![Rect::new(1, 1, 1, 1)]);

        // Detached nodes can be mutated; there is nothing visible to damage.
        c.update::<Leaf, _>(d, |l, _| {
            l.value = 1;
            Ok(())
        })?;
        assert_eq!(c.get::<Leaf>(d)?.value, 1);
        assert!(c.damage.is_empty());
        Ok(())
    }

    #[test]
    fn events_bubble_and_localise() -> Result<()> {
        let (mut c, a, b, _) = tree()?;
        c.set_geometry(a, Rect::new(10, 5, 10, 5))?;
        c.set_geometry(b, Rect::new(2, 1, 4, 2))?;
        c.update::<Leaf, _>(a, |l, _| {
            l.handle = true;
            Ok(())
        })?;

        let ev = Event::Mouse(crate::event::mouse::MouseEvent::click((13, 6)));
        assert_eq!(c.locate(Point::new(13, 6)), Some(b));
        assert_eq!(c.dispatch(&ev)?, EventOutcome::Handled);
        assert_eq!(
            c.get::<Leaf>(b)?.events,
            vec![ev.with_location(Point::new(1, 0))]
        );
        assert_eq!(
            c.get::<Leaf>(a)?.events,
            vec![ev.with_location(Point::new(3, 1))]
        );
        assert!(c.get::<Leaf>(c.root_id())?.events.is_empty());

        assert_eq!(c.locate(Point::new(0, 0)), Some(c.root_id()));
        assert_eq!(c.locate(Point::new(30, 0)), None);
        Ok(())
    }

    #[test]
    fn locate_prefers_later_siblings() -> Result<()> {
        let (mut c, a, _, _) = tree()?;
        let e = c.add_child(c.root_id(), Leaf::default())?;
        c.set_geometry(a, Rect::new(0, 0, 5, 5))?;
        c.set_geometry(e, Rect::new(2, 2, 5, 5))?;
        assert_eq!(c.locate(Point::new(3, 3)), Some(e));
        assert_eq!(c.locate(Point::new(1, 1)), Some(a));
        Ok(())
    }
}

use super::{id::NodeId, world::Core};
use crate::{
    component::Component,
    error::Result,
    geom::{Expanse, Point, Rect, RectI32},
    layout::Hint,
};

/// Read-only context available to components while drawing.
pub trait ViewContext {
    /// The node currently being drawn.
    fn node_id(&self) -> NodeId;

    /// The root node of the tree.
    fn root_id(&self) -> NodeId;

    /// Assigned rect for a node, relative to its parent.
    fn rect_of(&self, node: NodeId) -> Option<Rect>;

    /// Assigned rect for the current node, relative to its parent.
    fn rect(&self) -> Rect {
        self.rect_of(self.node_id()).unwrap_or_default()
    }

    /// Size of the current node.
    fn size(&self) -> Expanse {
        self.rect().expanse()
    }

    /// Screen rect for the current node. The origin is negative when the
    /// node is scrolled partly off the top or left of the screen.
    fn screen_rect(&self) -> RectI32;

    /// Children of a node.
    fn children_of(&self, node: NodeId) -> Vec<NodeId>;

    /// Children of the current node.
    fn children(&self) -> Vec<NodeId> {
        self.children_of(self.node_id())
    }

    /// Parent of a node.
    fn parent_of(&self, node: NodeId) -> Option<NodeId>;

    /// Is a specific node focused?
    fn node_is_focused(&self, node: NodeId) -> bool;

    /// Is the current node focused?
    fn is_focused(&self) -> bool {
        self.node_is_focused(self.node_id())
    }
}

/// Mutable context handed to event handlers and to [`Core::update`]
/// closures. It is bound to one node, and damage reported through it is
/// local to that node.
pub trait Context: ViewContext {
    /// Report that part of the current node, in local coordinates, no longer
    /// shows its current state.
    fn damage(&mut self, rect: Rect) -> Result<()>;

    /// Report that the whole of the current node is stale.
    fn damage_all(&mut self) -> Result<()> {
        let r = self.size().rect();
        self.damage(r)
    }

    /// Move focus to a node.
    fn set_focus(&mut self, node: NodeId) -> Result<()>;

    /// Focus the current node.
    fn focus_self(&mut self) -> Result<()> {
        let id = self.node_id();
        self.set_focus(id)
    }

    /// Focus the next node in tab order.
    fn focus_next(&mut self) -> Result<()>;

    /// Focus the previous node in tab order.
    fn focus_prev(&mut self) -> Result<()>;

    /// Focus the first node in tab order.
    fn focus_first(&mut self) -> Result<()>;

    /// Ask the run loop to exit.
    fn request_exit(&mut self, code: i32);

    /// Create a detached node.
    fn add(&mut self, component: Box<dyn Component>) -> NodeId;

    /// Attach a detached node under a parent.
    fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()>;

    /// Detach a node from its parent.
    fn detach(&mut self, node: NodeId) -> Result<()>;

    /// Replace a node's children.
    fn set_children_of(&mut self, parent: NodeId, children: Vec<NodeId>) -> Result<()>;

    /// Remove a node and its descendants.
    fn remove_subtree(&mut self, node: NodeId) -> Result<()>;

    /// Set a node's layout hint.
    fn set_hint(&mut self, node: NodeId, hint: Hint) -> Result<()>;

    /// Scroll a node's content to an offset, clamped to the content.
    fn scroll_to(&mut self, node: NodeId, offset: Point) -> Result<()>;

    /// Scroll a node's content by a signed amount.
    fn scroll_by(&mut self, node: NodeId, dx: i32, dy: i32) -> Result<()>;
}

impl dyn Context + '_ {
    /// Create a node and attach it under the current node.
    pub fn add_child<C: Component>(&mut self, component: C) -> Result<NodeId> {
        let id = self.add(Box::new(component));
        let parent = self.node_id();
        self.attach(parent, id)?;
        Ok(id)
    }
}

/// Context implementation bound to a specific node.
pub struct CoreContext<'a> {
    /// Core being operated on.
    core: &'a mut Core,
    /// Node the context is bound to.
    node_id: NodeId,
}

impl<'a> CoreContext<'a> {
    /// Construct a context for a node.
    pub fn new(core: &'a mut Core, node_id: NodeId) -> Self {
        Self { core, node_id }
    }
}

/// Read-only context bound to a node, used while drawing.
pub struct CoreViewContext<'a> {
    /// Core being drawn.
    core: &'a Core,
    /// Node being drawn.
    node_id: NodeId,
}

impl<'a> CoreViewContext<'a> {
    /// Construct a view context for a node.
    pub fn new(core: &'a Core, node_id: NodeId) -> Self {
        Self { core, node_id }
    }
}

/// Shared [`ViewContext`] queries over a core.
macro_rules! view_context_impl {
    ($t:ty) => {
        impl ViewContext for $t {
            fn node_id(&self) -> NodeId {
                self.node_id
            }

            fn root_id(&self) -> NodeId {
                self.core.root
            }

            fn rect_of(&self, node: NodeId) -> Option<Rect> {
                self.core.nodes.get(node).map(|n| n.rect)
            }

            fn screen_rect(&self) -> RectI32 {
                self.core
                    .nodes
                    .get(self.node_id)
                    .map(|n| n.screen)
                    .unwrap_or_default()
            }

            fn children_of(&self, node: NodeId) -> Vec<NodeId> {
                self.core
                    .nodes
                    .get(node)
                    .map(|n| n.children.clone())
                    .unwrap_or_default()
            }

            fn parent_of(&self, node: NodeId) -> Option<NodeId> {
                self.core.nodes.get(node).and_then(|n| n.parent)
            }

            fn node_is_focused(&self, node: NodeId) -> bool {
                self.core.focus == Some(node)
            }
        }
    };
}

view_context_impl!(CoreContext<'_>);
view_context_impl!(CoreViewContext<'_>);

impl Context for CoreContext<'_> {
    fn damage(&mut self, rect: Rect) -> Result<()> {
        self.core.mark_damaged(self.node_id, rect)
    }

    fn set_focus(&mut self, node: NodeId) -> Result<()> {
        self.core.set_focus(node)
    }

    fn focus_next(&mut self) -> Result<()> {
        self.core.focus_next()
    }

    fn focus_prev(&mut self) -> Result<()> {
        self.core.focus_prev()
    }

    fn focus_first(&mut self) -> Result<()> {
        self.core.focus_first()
    }

    fn request_exit(&mut self, code: i32) {
        self.core.request_exit(code);
    }

    fn add(&mut self, component: Box<dyn Component>) -> NodeId {
        self.core.add_boxed(component)
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.core.attach(parent, child)
    }

    fn detach(&mut self, node: NodeId) -> Result<()> {
        self.core.detach(node)
    }

    fn set_children_of(&mut self, parent: NodeId, children: Vec<NodeId>) -> Result<()> {
        self.core.set_children(parent, children)
    }

    fn remove_subtree(&mut self, node: NodeId) -> Result<()> {
        self.core.remove_subtree(node)
    }

    fn set_hint(&mut self, node: NodeId, hint: Hint) -> Result<()> {
        self.core.set_hint(node, hint)
    }

    fn scroll_to(&mut self, node: NodeId, offset: Point) -> Result<()> {
        self.core.scroll_to(node, offset)
    }

    fn scroll_by(&mut self, node: NodeId, dx: i32, dy: i32) -> Result<()> {
        self.core.scroll_by(node, dx, dy)
    }
}

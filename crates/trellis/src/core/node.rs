use crate::{
    component::Component,
    core::id::NodeId,
    geom::{Point, PointI32, Rect, RectI32},
    layout::{Hint, Layout},
    state::NodeName,
};

/// Core node data stored in the arena.
pub struct Node {
    /// Component behavior and state. Empty only while the component is
    /// borrowed out for a call.
    pub(crate) component: Option<Box<dyn Component>>,

    /// Parent in the arena tree. Non-owning: the parent's `children` list is
    /// the owning direction.
    pub(crate) parent: Option<NodeId>,
    /// Children in the arena tree, in layout and draw order.
    pub(crate) children: Vec<NodeId>,

    /// Layout strategy for the children. Nodes without one are leaves for
    /// layout purposes; their children keep whatever rects they had.
    pub(crate) layout: Option<Box<dyn Layout>>,
    /// Per-child information for the parent's layout.
    pub(crate) hint: Hint,

    /// Assigned rect relative to the parent origin.
    pub(crate) rect: Rect,
    /// Assigned rect in screen coordinates. The origin is negative when a
    /// scrolled ancestor has moved the node above or left of the screen.
    pub(crate) screen: RectI32,
    /// Visible part of `screen`, after clipping by every ancestor.
    pub(crate) clip: Option<Rect>,
    /// Offset of the content under this node. Children are placed at their
    /// rect minus this offset.
    pub(crate) scroll: Point,
    /// Content position of the focused cursor the last time this node
    /// scrolled to follow it.
    pub(crate) followed: Option<PointI32>,

    /// Node name for dumps.
    pub(crate) name: NodeName,
}

impl Node {
    pub(crate) fn new(component: Box<dyn Component>) -> Self {
        let name = component.name();
        Self {
            component: Some(component),
            parent: None,
            children: Vec::new(),
            layout: None,
            hint: Hint::None,
            rect: Rect::zero(),
            screen: RectI32::default(),
            clip: None,
            scroll: Point::zero(),
            followed: None,
            name,
        }
    }

    /// Return the node's name.
    pub fn name(&self) -> &NodeName {
        &self.name
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Return the layout hint.
    pub fn hint(&self) -> Hint {
        self.hint
    }

    /// Return the assigned rect relative to the parent origin.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Return the assigned rect in screen coordinates.
    pub fn screen_rect(&self) -> RectI32 {
        self.screen
    }

    /// Return the scroll offset applied to the node's children.
    pub fn scroll(&self) -> Point {
        self.scroll
    }

    /// Return the visible part of the node in screen coordinates.
    pub fn clip(&self) -> Option<Rect> {
        self.clip
    }

    /// Does this node have a layout strategy?
    pub fn is_container(&self) -> bool {
        self.layout.is_some()
    }
}

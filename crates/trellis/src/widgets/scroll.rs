use serde_json::{Value, json};

use crate::{
    Context, Core, NodeId,
    component::{Component, EventOutcome},
    error::Result,
    event::{Event, key::KeyCode, mouse::Action},
    geom::Rect,
    layout::Viewport,
};

/// A window onto a child that may be larger than the window itself.
///
/// The child is placed by a [`Viewport`] layout. Arrow and page keys that
/// bubble up from the child scroll the view, as does the mouse wheel over it.
/// Whenever a focused descendant shows a cursor, the view follows it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollView {
    /// Lines moved per wheel notch.
    wheel: u32,
}

impl ScrollView {
    /// A scroll view moving one line per wheel notch.
    pub fn new() -> Self {
        Self { wheel: 1 }
    }

    /// Build a scroll view moving `lines` per wheel notch.
    pub fn with_wheel(mut self, lines: u32) -> Self {
        self.wheel = lines.max(1);
        self
    }

    /// Create the scroll view node with a [`Viewport`] layout and attach
    /// `child` inside it. The scroll view node itself is left detached.
    pub fn build(self, core: &mut Core, child: impl Into<NodeId>) -> Result<NodeId> {
        let id = core.add(self);
        core.set_layout(id, Viewport::new())?;
        core.attach(id, child)?;
        Ok(id)
    }
}

impl Component for ScrollView {
    fn on_event(&mut self, event: &Event, ctx: &mut dyn Context) -> Result<EventOutcome> {
        let page = ctx.size().h.max(1) as i32;
        let wheel = self.wheel as i32;
        let (dx, dy) = match event {
            Event::Key(k) if *k == KeyCode::Up => (0, -1),
            Event::Key(k) if *k == KeyCode::Down => (0, 1),
            Event::Key(k) if *k == KeyCode::PageUp => (0, -page),
            Event::Key(k) if *k == KeyCode::PageDown => (0, page),
            Event::Mouse(m) => match m.action {
                Action::ScrollUp => (0, -wheel),
                Action::ScrollDown => (0, wheel),
                Action::ScrollLeft => (-wheel, 0),
                Action::ScrollRight => (wheel, 0),
                _ => return Ok(EventOutcome::Bubble),
            },
            _ => return Ok(EventOutcome::Bubble),
        };
        let id = ctx.node_id();
        ctx.scroll_by(id, dx, dy)?;
        // Scrolling damages the visible area itself.
        ctx.damage(Rect::zero())?;
        Ok(EventOutcome::Handled)
    }

    fn to_json(&self) -> Value {
        json!({ "wheel": self.wheel })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        App, buf,
        event::{
            key::Key,
            mouse::{Button, MouseEvent},
        },
        geom::{Expanse, Point, RectI32},
        layout::{Inset, Linear, Policy},
        testing::{buf::BufTest, render::TestRender},
        widgets::{Container, Edit, Label},
    };

    /// A column of numbered labels inside a scroll view filling the screen.
    fn numbered(rows: u32, size: Expanse) -> Result<(App, NodeId, Vec<NodeId>)> {
        let mut core = Core::new(Container::new())?;
        let root = core.root_id();
        core.set_layout(root, Inset::new(0))?;
        let list = core.add(Container::new());
        core.set_layout(list, Linear::column(Policy::Clip))?;
        let mut labels = Vec::new();
        for i in 0..rows {
            labels.push(core.add_child(list, Label::new(&format!("row{i}")))?);
        }
        let view = ScrollView::new().build(&mut core, list)?;
        core.attach(root, view)?;
        let mut app = App::new(core, size);
        app.repaint(&mut TestRender::new())?;
        Ok((app, view, labels))
    }

    /// Deliver a key as if it had bubbled up from inside the view.
    fn key(app: &mut App, view: NodeId, k: KeyCode) -> Result<()> {
        app.core.dispatch_from(view, &Event::Key(Key::from(k)), true)?;
        app.repaint(&mut TestRender::new())?;
        Ok(())
    }

    #[test]
    fn scrolled_content_draws_offset() -> Result<()> {
        let (mut app, view, labels) = numbered(6, Expanse::new(4, 2))?;
        BufTest::new(app.frame()).assert_matches(buf!("row0" "row1"));

        app.core.scroll_to(view, Point::new(0, 3))?;
        app.repaint(&mut TestRender::new())?;
        BufTest::new(app.frame()).assert_matches(buf!("row3" "row4"));
        assert_eq!(
            app.core.node(labels[0]).map(|n| n.screen_rect()),
            Some(RectI32::new(0, -3, 4, 1))
        );
        assert_eq!(app.core.node(labels[0]).and_then(|n| n.clip()), None);
        Ok(())
    }

    #[test]
    fn offsets_clamp_to_content() -> Result<()> {
        let (mut app, view, _) = numbered(6, Expanse::new(4, 2))?;
        app.core.scroll_to(view, Point::new(9, 100))?;
        assert_eq!(app.core.node(view).map(|n| n.scroll()), Some(Point::new(0, 4)));
        app.repaint(&mut TestRender::new())?;
        BufTest::new(app.frame()).assert_matches(buf!("row4" "row5"));

        app.core.scroll_by(view, 0, -10)?;
        assert_eq!(app.core.node(view).map(|n| n.scroll()), Some(Point::zero()));
        Ok(())
    }

    #[test]
    fn page_keys_and_wheel_scroll() -> Result<()> {
        let (mut app, view, _) = numbered(7, Expanse::new(4, 2))?;
        key(&mut app, view, KeyCode::PageDown)?;
        assert_eq!(app.core.node(view).map(|n| n.scroll()), Some(Point::new(0, 2)));
        key(&mut app, view, KeyCode::PageDown)?;
        key(&mut app, view, KeyCode::PageDown)?;
        key(&mut app, view, KeyCode::PageDown)?;
        assert_eq!(app.core.node(view).map(|n| n.scroll()), Some(Point::new(0, 5)));
        key(&mut app, view, KeyCode::Up)?;
        BufTest::new(app.frame()).assert_matches(buf!("row4" "row5"));

        let wheel = MouseEvent {
            action: Action::ScrollUp,
            button: Button::None,
            ..MouseEvent::click((1, 1))
        };
        assert_eq!(app.core.dispatch(&Event::Mouse(wheel))?, EventOutcome::Handled);
        assert_eq!(app.core.node(view).map(|n| n.scroll()), Some(Point::new(0, 3)));
        Ok(())
    }

    #[test]
    fn mouse_lands_on_scrolled_child() -> Result<()> {
        let (mut app, view, labels) = numbered(6, Expanse::new(4, 2))?;
        app.core.scroll_to(view, Point::new(0, 2))?;
        app.repaint(&mut TestRender::new())?;
        assert_eq!(app.core.locate(Point::new(1, 1)), Some(labels[3]));
        Ok(())
    }

    #[test]
    fn view_follows_focused_cursor() -> Result<()> {
        let mut core = Core::new(Container::new())?;
        let root = core.root_id();
        core.set_layout(root, Inset::new(0))?;
        let list = core.add(Container::new());
        core.set_layout(list, Linear::column(Policy::Clip))?;
        for i in 0..5 {
            core.add_child(list, Label::new(&format!("row{i}")))?;
        }
        let edit = core.add_child(list, Edit::new("ab"))?;
        let view = ScrollView::new().build(&mut core, list)?;
        core.attach(root, view)?;
        let mut app = App::new(core, Expanse::new(4, 2));
        app.repaint(&mut TestRender::new())?;
        assert_eq!(app.core.node(view).map(|n| n.scroll()), Some(Point::zero()));

        app.core.set_focus(edit)?;
        app.repaint(&mut TestRender::new())?;
        assert_eq!(app.core.node(view).map(|n| n.scroll()), Some(Point::new(0, 4)));
        BufTest::new(app.frame()).assert_matches(buf!("row4" "ab  "));
        assert_eq!(app.cursor().map(|c| c.location), Some(Point::new(2, 1)));

        // Scrolling away by hand sticks until the cursor moves.
        app.core.scroll_to(view, Point::zero())?;
        app.repaint(&mut TestRender::new())?;
        assert_eq!(app.core.node(view).map(|n| n.scroll()), Some(Point::zero()));
        assert_eq!(app.cursor(), None);
        Ok(())
    }
}

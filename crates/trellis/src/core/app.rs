//! The repaint cycle.

use super::{context::CoreViewContext, id::NodeId, world::Core};
use crate::{
    backend::RenderBackend,
    canvas::Canvas,
    component::EventOutcome,
    cursor::Cursor,
    diff::{self, WriteRun},
    error::Result,
    event::{
        Event,
        key::{self, KeyCode},
    },
    geom::{Expanse, Rect},
    style::Style,
    termbuf::{NULL, TermBuf},
};

/// Application state: the component tree plus the last frame sent to the
/// terminal.
///
/// Each repaint cycle lays out the tree, draws the damaged regions into a
/// copy of the previous frame, diffs the two and sends the difference to the
/// backend. A cycle with nothing pending writes nothing.
pub struct App {
    /// The component tree.
    pub core: Core,
    /// The frame currently on the terminal.
    prev: TermBuf,
    /// The cursor currently shown on the terminal.
    cursor: Option<Cursor>,
    /// A write failed, so the terminal's contents are unknown. The next
    /// cycle redraws everything.
    stale: bool,
}

impl App {
    /// Construct an app for a tree and an initial screen size.
    pub fn new(mut core: Core, size: Expanse) -> Self {
        core.resize(size);
        Self {
            core,
            prev: TermBuf::empty(Expanse::zero()),
            cursor: None,
            stale: false,
        }
    }

    /// The frame as of the last repaint.
    pub fn frame(&self) -> &TermBuf {
        &self.prev
    }

    /// The current screen size.
    pub fn size(&self) -> Expanse {
        self.core.size()
    }

    /// Change the screen size. The next repaint lays out and redraws
    /// everything.
    pub fn resize(&mut self, size: Expanse) {
        self.core.resize(size);
    }

    /// Route an input event. Tab and BackTab that no component handles move
    /// the focus cursor.
    pub fn event(&mut self, event: Event) -> Result<EventOutcome> {
        let outcome = self.core.dispatch(&event)?;
        if outcome == EventOutcome::Handled {
            return Ok(outcome);
        }
        match event {
            Event::Key(k) if k == KeyCode::Tab => {
                self.core.focus_next()?;
                Ok(EventOutcome::Handled)
            }
            Event::Key(k) if k.key == KeyCode::BackTab || k == key::Shift + KeyCode::Tab => {
                self.core.focus_prev()?;
                Ok(EventOutcome::Handled)
            }
            _ => Ok(outcome),
        }
    }

    /// The terminal cursor as of the last repaint.
    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    /// Run a repaint cycle if anything is pending, sending the minimal set of
    /// writes to `backend`. Returns whether a cycle ran.
    ///
    /// If writing to the backend fails, the error is returned and the next
    /// cycle redraws the whole screen.
    pub fn repaint(&mut self, backend: &mut dyn RenderBackend) -> Result<bool> {
        if self.stale {
            self.redraw(backend)?;
            return Ok(true);
        }
        if !self.core.needs_repaint() {
            // Focus can move without any damage; the view and the cursor
            // still follow it.
            self.core.follow_cursor()?;
        }
        if !self.core.needs_repaint() {
            if self.core.screen_cursor() == self.cursor {
                return Ok(false);
            }
            self.write(backend, &[], false)?;
            return Ok(true);
        }
        let stats = self.core.layout()?;
        let regions = self.core.damage.take_pending();
        let mut next = self.prev.resized(self.core.size());
        for r in &regions {
            next.fill(Style::default(), *r, NULL);
        }
        self.draw(&mut next, &regions);
        let runs = diff::diff(&self.prev, &next, &regions);
        tracing::debug!(
            regions = regions.len(),
            runs = runs.len(),
            measured = stats.measured,
            arranged = stats.arranged,
            "repaint"
        );
        self.prev = next;
        self.write(backend, &runs, false)?;
        Ok(true)
    }

    /// Lay out and draw the whole screen from scratch and write every cell,
    /// regardless of what the terminal is believed to show.
    pub fn redraw(&mut self, backend: &mut dyn RenderBackend) -> Result<()> {
        self.core.layout()?;
        self.core.damage.take_pending();
        let size = self.core.size();
        let mut next = TermBuf::empty(size);
        let all = [size.rect()];
        self.draw(&mut next, &all);
        let runs: Vec<WriteRun> = diff::diff(&TermBuf::empty(Expanse::zero()), &next, &all);
        self.prev = next;
        self.stale = false;
        self.write(backend, &runs, true)
    }

    /// Send runs to the backend and place the cursor. A full write clears
    /// the terminal first and always sets the cursor state. On failure the
    /// terminal is marked stale.
    fn write(
        &mut self,
        backend: &mut dyn RenderBackend,
        runs: &[WriteRun],
        full: bool,
    ) -> Result<()> {
        let result = self.try_write(backend, runs, full);
        if let Err(e) = &result {
            tracing::warn!(error = %e, "terminal write failed, redrawing next cycle");
            self.stale = true;
        }
        result
    }

    fn try_write(
        &mut self,
        backend: &mut dyn RenderBackend,
        runs: &[WriteRun],
        full: bool,
    ) -> Result<()> {
        if full {
            backend.reset()?;
        }
        diff::emit(runs, backend)?;
        // Writing moves the terminal's cursor, so a visible one is put back.
        let moved = !runs.is_empty() && self.cursor.is_some();
        let want = self.core.screen_cursor();
        if want == self.cursor && !moved && !full {
            return Ok(());
        }
        match &want {
            Some(c) => backend.show_cursor(c)?,
            None => backend.hide_cursor()?,
        }
        backend.flush()?;
        self.cursor = want;
        Ok(())
    }

    /// Draw every attached node that intersects a region. Parents draw before
    /// their children, so children paint over them.
    fn draw(&self, next: &mut TermBuf, regions: &[Rect]) {
        for id in self.core.subtree_pre_order(self.core.root) {
            for r in regions {
                self.draw_node(next, id, *r);
            }
        }
    }

    /// Draw one node clipped to one damaged region. A failed draw leaves the
    /// previous frame's content in place.
    fn draw_node(&self, next: &mut TermBuf, id: NodeId, region: Rect) {
        let Some(node) = self.core.nodes.get(id) else {
            return;
        };
        let Some(visible) = node.clip.and_then(|c| c.intersect(&region)) else {
            return;
        };
        let Some(component) = node.component.as_deref() else {
            return;
        };
        let Some(local) = node.screen.rebase_rect(&visible) else {
            return;
        };
        let ctx = CoreViewContext::new(&self.core, id);
        let mut root = Canvas::new(next);
        let mut view = root.sub_signed(node.screen);
        let mut canvas = view.restrict(local);
        if let Err(e) = component.draw(&mut canvas, local, &ctx) {
            tracing::warn!(node = %node.name, error = %e, "draw failed");
            next.copy_rect(&self.prev, visible);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        component::Component,
        core::context::ViewContext,
        error::Error,
        geom::Point,
        layout::{Linear, Policy},
        testing::{buf::BufTest, render::TestRender},
    };

    /// Fills itself with a glyph.
    struct Fill(char);

    impl Component for Fill {
        fn preferred_size(&self, _w: u32) -> Expanse {
            Expanse::new(1, 1)
        }

        fn draw(&self, c: &mut Canvas, _r: Rect, _ctx: &dyn ViewContext) -> Result<()> {
            let r = c.rect();
            c.fill(Style::default(), r, self.0);
            Ok(())
        }
    }

    /// Draws partway, then fails.
    struct Broken;

    impl Component for Broken {
        fn draw(&self, c: &mut Canvas, _r: Rect, _ctx: &dyn ViewContext) -> Result<()> {
            c.put((0, 0).into(), '!', Style::default());
            Err(Error::Render("boom".into()))
        }
    }

    /// A focusable cell that asks for the cursor in its second column.
    struct Caret;

    impl Component for Caret {
        fn preferred_size(&self, _w: u32) -> Expanse {
            Expanse::new(2, 1)
        }

        fn accept_focus(&self) -> bool {
            true
        }

        fn cursor(&self, _ctx: &dyn ViewContext) -> Option<Cursor> {
            Some(Cursor::at((1, 0)))
        }
    }

    /// A backend whose glyph writes fail while `fail` is set.
    #[derive(Default)]
    struct Flaky {
        inner: TestRender,
        fail: bool,
    }

    impl RenderBackend for Flaky {
        fn move_cursor(&mut self, p: Point) -> Result<()> {
            self.inner.move_cursor(p)
        }

        fn set_attributes(&mut self, style: &Style) -> Result<()> {
            self.inner.set_attributes(style)
        }

        fn write_glyphs(&mut self, txt: &str) -> Result<()> {
            if self.fail {
                return Err(Error::Render("io".into()));
            }
            self.inner.write_glyphs(txt)
        }

        fn flush(&mut self) -> Result<()> {
            self.inner.flush()
        }

        fn show_cursor(&mut self, c: &Cursor) -> Result<()> {
            self.inner.show_cursor(c)
        }

        fn hide_cursor(&mut self) -> Result<()> {
            self.inner.hide_cursor()
        }

        fn reset(&mut self) -> Result<()> {
            self.inner.reset()
        }
    }

    #[test]
    fn failed_write_redraws_next_cycle() -> Result<()> {
        let mut app = App::new(Core::new(Fill('x'))?, Expanse::new(3, 1));
        let mut broken = Flaky {
            fail: true,
            ..Default::default()
        };
        assert!(matches!(app.repaint(&mut broken), Err(Error::Render(_))));

        let mut r = TestRender::new();
        assert!(app.repaint(&mut r)?);
        assert_eq!(r.ops.first().map(String::as_str), Some("reset"));
        assert!(r.contains_text("xxx"));

        r.clear();
        assert!(!app.repaint(&mut r)?);
        assert!(r.is_empty());
        Ok(())
    }

    #[test]
    fn cursor_follows_focus() -> Result<()> {
        let mut core = Core::new(Fill('.'))?;
        let root = core.root_id();
        core.set_layout(root, Linear::row(Policy::Ratio(vec![1, 1])))?;
        core.add_child(root, Fill('a'))?;
        let caret = core.add_child(root, Caret)?;
        let mut app = App::new(core, Expanse::new(4, 1));
        let mut r = TestRender::new();
        app.repaint(&mut r)?;
        assert_eq!(r.shown, None);

        r.clear();
        app.core.set_focus(caret)?;
        assert!(app.repaint(&mut r)?);
        assert_eq!(r.ops, vec!["show 3,0".to_string(), "flush".to_string()]);
        assert_eq!(app.cursor().map(|c| c.location), Some(Point::new(3, 0)));

        r.clear();
        app.core.clear_focus()?;
        assert!(app.repaint(&mut r)?);
        assert_eq!(r.ops, vec!["hide".to_string(), "flush".to_string()]);
        assert_eq!(r.shown, None);
        Ok(())
    }

    #[test]
    fn idle_repaint_is_noop() -> Result<()> {
        let mut app = App::new(Core::new(Fill('.'))?, Expanse::new(4, 2));
        let mut r = TestRender::new();
        assert!(app.repaint(&mut r)?);
        BufTest::new(app.frame()).assert_matches(crate::buf!("...." "...."));
        r.clear();
        assert!(!app.repaint(&mut r)?);
        assert!(r.is_empty());
        Ok(())
    }

    #[test]
    fn resize_writes_only_new_rows() -> Result<()> {
        let mut app = App::new(Core::new(Fill('.'))?, Expanse::new(80, 24));
        let mut r = TestRender::new();
        app.repaint(&mut r)?;
        r.clear();
        app.event(Event::Resize(Expanse::new(80, 30)))?;
        app.repaint(&mut r)?;
        assert_eq!(r.rows_written(), (24..30).collect::<Vec<u32>>());
        Ok(())
    }

    #[test]
    fn failed_draw_keeps_previous_content() -> Result<()> {
        let mut core = Core::new(Fill('.'))?;
        let root = core.root_id();
        core.set_layout(root, Linear::row(Policy::Ratio(vec![1, 1, 1])))?;
        core.add_child(root, Fill('a'))?;
        core.add_child(root, Fill('b'))?;
        let mut app = App::new(core, Expanse::new(6, 1));
        let mut r = TestRender::new();
        app.repaint(&mut r)?;
        BufTest::new(app.frame()).assert_matches(crate::buf!("aaabbb"));

        app.core.add_child(root, Broken)?;
        app.repaint(&mut r)?;
        // Siblings still draw; the broken component's area keeps the old
        // frame's content.
        BufTest::new(app.frame()).assert_matches(crate::buf!("aabbbb"));
        Ok(())
    }

    #[test]
    fn redraw_writes_everything() -> Result<()> {
        let mut app = App::new(Core::new(Fill('x'))?, Expanse::new(3, 2));
        let mut r = TestRender::new();
        app.repaint(&mut r)?;
        r.clear();
        app.redraw(&mut r)?;
        assert_eq!(r.ops.first().map(String::as_str), Some("reset"));
        assert_eq!(r.rows_written(), vec![0, 1]);
        assert!(r.contains_text("xxx"));
        Ok(())
    }
}

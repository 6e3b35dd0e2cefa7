use super::{buf::BufTest, render::TestRender};
use crate::{
    App, Context, Core, NodeId,
    component::{Component, EventOutcome},
    error::Result,
    event::{Event, key, mouse},
    geom::Expanse,
    termbuf::TermBuf,
};

/// A simple harness that holds an [`App`] and a [`TestRender`] backend.
/// Tests drive the UI by sending events, which repaint after each one, and
/// can then inspect the frame and what was written to the backend.
pub struct Harness {
    /// The app under test.
    pub app: App,
    /// Records every write the repaint cycle makes.
    pub backend: TestRender,
    /// The root node.
    pub root: NodeId,
}

impl Harness {
    /// Create a harness for a tree, using `size` for the screen.
    pub fn with_size(core: Core, size: Expanse) -> Result<Self> {
        let root = core.root_id();
        let mut h = Self {
            app: App::new(core, size),
            backend: TestRender::new(),
            root,
        };
        h.render()?;
        Ok(h)
    }

    /// Create a harness for a tree on an 80x24 screen.
    pub fn new(core: Core) -> Result<Self> {
        Self::with_size(core, Expanse::new(80, 24))
    }

    /// Create a harness for a tree with a single component as the root.
    pub fn for_component(root: impl Component, size: Expanse) -> Result<Self> {
        Self::with_size(Core::new(root)?, size)
    }

    /// The core under test.
    pub fn core(&mut self) -> &mut Core {
        &mut self.app.core
    }

    /// The current frame.
    pub fn buf(&self) -> &TermBuf {
        self.app.frame()
    }

    /// A matcher over the current frame.
    pub fn tbuf(&self) -> BufTest<'_> {
        BufTest::new(self.buf())
    }

    /// Run a repaint cycle into the recording backend.
    pub fn render(&mut self) -> Result<bool> {
        self.app.repaint(&mut self.backend)
    }

    /// Route an event and repaint.
    pub fn event(&mut self, event: Event) -> Result<EventOutcome> {
        let outcome = self.app.event(event)?;
        self.render()?;
        Ok(outcome)
    }

    /// Send a key event and repaint.
    pub fn key(&mut self, k: impl Into<key::Key>) -> Result<EventOutcome> {
        self.event(Event::Key(k.into()))
    }

    /// Send a sequence of key events, repainting after each.
    pub fn keys<I, K>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: Into<key::Key>,
    {
        for k in keys {
            self.key(k)?;
        }
        Ok(())
    }

    /// Type a string as a sequence of key events.
    pub fn type_text(&mut self, text: &str) -> Result<()> {
        self.keys(text.chars())
    }

    /// Send a mouse event and repaint.
    pub fn mouse(&mut self, m: mouse::MouseEvent) -> Result<EventOutcome> {
        self.event(Event::Mouse(m))
    }

    /// Left-click at a screen position and repaint.
    pub fn click(&mut self, x: u32, y: u32) -> Result<EventOutcome> {
        self.mouse(mouse::MouseEvent::click((x, y)))
    }

    /// Resize the screen and repaint.
    pub fn resize(&mut self, w: u32, h: u32) -> Result<()> {
        self.event(Event::Resize(Expanse::new(w, h)))?;
        Ok(())
    }

    /// Read a component by node id.
    pub fn get<C: Component>(&self, node: impl Into<NodeId>) -> Result<&C> {
        self.app.core.get(node)
    }

    /// Mutate a component with a context, then repaint.
    pub fn update<C: Component, R>(
        &mut self,
        node: impl Into<NodeId>,
        f: impl FnOnce(&mut C, &mut dyn Context) -> Result<R>,
    ) -> Result<R> {
        let r = self.app.core.update(node, f)?;
        self.render()?;
        Ok(r)
    }
}

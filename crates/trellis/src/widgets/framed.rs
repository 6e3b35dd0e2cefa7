use pad::PadStr;
use serde_json::{Value, json};

use crate::{
    Canvas, Core, NodeId, ViewContext,
    component::Component,
    error::Result,
    geom::{Frame, Rect},
    layout::Inset,
    style::Style,
};

/// The glyphs used to draw a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGlyphs {
    /// Top left corner.
    pub topleft: char,
    /// Top right corner.
    pub topright: char,
    /// Bottom left corner.
    pub bottomleft: char,
    /// Bottom right corner.
    pub bottomright: char,
    /// Top and bottom edges.
    pub horizontal: char,
    /// Left and right edges.
    pub vertical: char,
}

/// Single line thin Unicode box drawing frame set
pub const SINGLE: FrameGlyphs = FrameGlyphs {
    topleft: '┌',
    topright: '┐',
    bottomleft: '└',
    bottomright: '┘',
    horizontal: '─',
    vertical: '│',
};

/// Double line Unicode box drawing frame set
pub const DOUBLE: FrameGlyphs = FrameGlyphs {
    topleft: '╔',
    topright: '╗',
    bottomleft: '╚',
    bottomright: '╝',
    horizontal: '═',
    vertical: '║',
};

/// A one-cell border around a single child, with an optional title set into
/// the top edge. The child is placed by an [`Inset`] layout.
#[derive(Debug, Clone)]
pub struct Framed {
    /// Glyph set.
    glyphs: FrameGlyphs,
    /// Title, drawn left-aligned in the top edge.
    title: Option<String>,
    /// Border style.
    style: Style,
}

impl Default for Framed {
    fn default() -> Self {
        Self {
            glyphs: SINGLE,
            title: None,
            style: Style::default(),
        }
    }
}

impl Framed {
    /// A frame using [`SINGLE`] glyphs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame with a specified glyph set.
    pub fn with_glyphs(mut self, glyphs: FrameGlyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Build a frame with a title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Build a frame with a border style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Create the frame node with an [`Inset`] layout and attach `child`
    /// inside it. The frame node itself is left detached.
    pub fn build(self, core: &mut Core, child: impl Into<NodeId>) -> Result<NodeId> {
        let id = core.add(self);
        core.set_layout(id, Inset::new(1))?;
        core.attach(id, child)?;
        Ok(id)
    }
}

impl Component for Framed {
    fn draw(&self, canvas: &mut Canvas, _region: Rect, _ctx: &dyn ViewContext) -> Result<()> {
        let f = Frame::new(canvas.rect(), 1);
        let g = &self.glyphs;
        let s = self.style;
        canvas.fill(s, f.topleft, g.topleft);
        canvas.fill(s, f.topright, g.topright);
        canvas.fill(s, f.bottomleft, g.bottomleft);
        canvas.fill(s, f.bottomright, g.bottomright);
        canvas.fill(s, f.left, g.vertical);
        canvas.fill(s, f.right, g.vertical);
        canvas.fill(s, f.bottom, g.horizontal);
        match &self.title {
            Some(title) => {
                let top = title.pad(f.top.w as usize, g.horizontal, pad::Alignment::Left, true);
                canvas.text(s, f.top.tl, &top);
            }
            None => canvas.fill(s, f.top, g.horizontal),
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({ "title": self.title })
    }
}

use serde_json::{Value, json};

use crate::{
    Canvas, ViewContext,
    component::Component,
    error::Result,
    geom::{Expanse, Rect},
    style::Style,
};

/// Fills its whole area with one glyph.
#[derive(Debug, Clone)]
pub struct FilledBox {
    /// Fill glyph.
    glyph: char,
    /// Fill style.
    style: Style,
    /// Preferred size.
    size: Expanse,
}

impl FilledBox {
    /// A box filled with `glyph`, preferring a single cell.
    pub fn new(glyph: char) -> Self {
        Self {
            glyph,
            style: Style::default(),
            size: Expanse::new(1, 1),
        }
    }

    /// Set the preferred size.
    pub fn with_size(mut self, size: impl Into<Expanse>) -> Self {
        self.size = size.into();
        self
    }

    /// Set the fill style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Change the fill glyph. Callers mutating through [`Core::update`]
    /// get the whole box damaged automatically.
    ///
    /// [`Core::update`]: crate::Core::update
    pub fn set_glyph(&mut self, glyph: char) {
        self.glyph = glyph;
    }
}

impl Component for FilledBox {
    fn preferred_size(&self, _available_width: u32) -> Expanse {
        self.size
    }

    fn draw(&self, canvas: &mut Canvas, region: Rect, _ctx: &dyn ViewContext) -> Result<()> {
        canvas.fill(self.style, region, self.glyph);
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({
            "glyph": self.glyph.to_string(),
            "size": [self.size.w, self.size.h],
        })
    }
}

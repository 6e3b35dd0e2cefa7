use serde_json::{Value, json};

use crate::{
    Canvas, ViewContext, component::Component, error::Result, geom::Rect, style::Style,
};

/// A plain container body. Children are placed by the node's layout; the
/// container itself draws an optional background.
#[derive(Debug, Default, Clone)]
pub struct Container {
    /// Background style, if the container paints one.
    background: Option<Style>,
}

impl Container {
    /// Construct a transparent container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a container that fills its area with blanks in a style.
    pub fn with_background(mut self, style: Style) -> Self {
        self.background = Some(style);
        self
    }
}

impl Component for Container {
    fn draw(&self, canvas: &mut Canvas, region: Rect, _ctx: &dyn ViewContext) -> Result<()> {
        if let Some(style) = self.background {
            canvas.fill(style, region, ' ');
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({ "background": self.background.is_some() })
    }
}

use pad::PadStr;
use serde_json::{Value, json};

use crate::{
    Canvas, Context, ViewContext,
    component::{Component, EventOutcome},
    error::Result,
    event::{Event, key::KeyCode},
    geom::{Expanse, Point, Rect},
    style::{Attr, Style},
    text,
};

/// A single-row push button. It activates on a left click, or on Enter or
/// space while focused, and counts how often it was pressed.
#[derive(Debug, Clone, Default)]
pub struct Button {
    /// Button label.
    label: String,
    /// Number of activations so far.
    presses: u32,
    /// Base style.
    style: Style,
}

impl Button {
    /// Construct a button with a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Set the base style. Focus is shown by reversing it.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Return the button label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// How many times the button has been activated.
    pub fn presses(&self) -> u32 {
        self.presses
    }

    /// Activate the button.
    pub fn press(&mut self, ctx: &mut dyn Context) -> Result<()> {
        self.presses += 1;
        ctx.damage_all()
    }
}

impl Component for Button {
    fn preferred_size(&self, _available_width: u32) -> Expanse {
        let w = u32::try_from(text::display_width(&self.label)).unwrap_or(u32::MAX);
        Expanse::new(w.saturating_add(4), 1)
    }

    fn draw(&self, canvas: &mut Canvas, _region: Rect, ctx: &dyn ViewContext) -> Result<()> {
        let style = if ctx.is_focused() {
            self.style.with_attr(Attr::Reverse)
        } else {
            self.style
        };
        let size = canvas.size();
        canvas.clear(style);
        if size.w < 2 || size.h == 0 {
            return Ok(());
        }
        let inner = (size.w - 2) as usize;
        let label = self.label.pad(inner, ' ', pad::Alignment::Middle, true);
        let y = size.h / 2;
        canvas.put(Point::new(0, y), '[', style);
        canvas.text(style, Point::new(1, y), &label);
        canvas.put(Point::new(size.w - 1, y), ']', style);
        Ok(())
    }

    fn on_event(&mut self, event: &Event, ctx: &mut dyn Context) -> Result<EventOutcome> {
        match event {
            Event::Mouse(m) if m.is_left_down() => {
                self.press(ctx)?;
                Ok(EventOutcome::Handled)
            }
            Event::Key(k) if *k == KeyCode::Enter || *k == ' ' => {
                self.press(ctx)?;
                Ok(EventOutcome::Handled)
            }
            // Focus changes alter the style; the whole button is redrawn.
            Event::FocusGained | Event::FocusLost => Ok(EventOutcome::Handled),
            _ => Ok(EventOutcome::Bubble),
        }
    }

    fn accept_focus(&self) -> bool {
        true
    }

    fn to_json(&self) -> Value {
        json!({ "label": self.label, "presses": self.presses })
    }
}

use serde_json::{Value, json};

use crate::{
    Canvas, Context, ViewContext,
    component::{Component, EventOutcome},
    cursor::{Cursor, CursorShape},
    error::Result,
    event::{Event, key::KeyCode},
    geom::{Expanse, Point, Rect},
    style::Style,
};

/// A single-line text entry with a cursor. The view scrolls horizontally so
/// the cursor stays visible.
#[derive(Debug, Clone, Default)]
pub struct Edit {
    /// Current value.
    value: Vec<char>,
    /// Cursor position, in characters. May equal the value length.
    cursor: usize,
    /// Text style.
    style: Style,
}

impl Edit {
    /// Construct an entry with initial content and the cursor at the end.
    pub fn new(start: &str) -> Self {
        let value: Vec<char> = start.chars().collect();
        Self {
            cursor: value.len(),
            value,
            style: Style::default(),
        }
    }

    /// Set the text style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The current value.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// The cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the value, moving the cursor to the end.
    pub fn set_value(&mut self, ctx: &mut dyn Context, value: &str) -> Result<()> {
        self.value = value.chars().collect();
        self.cursor = self.value.len();
        ctx.damage_all()
    }

    /// Insert text at the cursor.
    fn insert(&mut self, s: &str) -> bool {
        for c in s.chars().filter(|c| !c.is_control()) {
            self.value.insert(self.cursor, c);
            self.cursor += 1;
        }
        true
    }

    /// Delete the character before the cursor.
    fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.value.remove(self.cursor);
        true
    }

    /// Delete the character under the cursor.
    fn delete(&mut self) -> bool {
        if self.cursor >= self.value.len() {
            return false;
        }
        self.value.remove(self.cursor);
        true
    }

    /// Move the cursor, clamped to the value.
    fn goto(&mut self, pos: usize) -> bool {
        let pos = pos.min(self.value.len());
        let changed = pos != self.cursor;
        self.cursor = pos;
        changed
    }

    /// First visible character for a view width. The last column is kept
    /// for the cursor when it sits past the end of the value.
    fn window_start(&self, width: usize) -> usize {
        if width == 0 {
            return self.cursor;
        }
        (self.cursor + 1).saturating_sub(width)
    }
}

impl Component for Edit {
    fn preferred_size(&self, available_width: u32) -> Expanse {
        let want = u32::try_from(self.value.len() + 1).unwrap_or(u32::MAX);
        Expanse::new(want.min(available_width.max(1)), 1)
    }

    fn draw(&self, canvas: &mut Canvas, _region: Rect, _ctx: &dyn ViewContext) -> Result<()> {
        let width = canvas.size().w as usize;
        canvas.clear(self.style);
        let start = self.window_start(width);
        let visible: String = self.value.iter().skip(start).take(width).collect();
        canvas.text(self.style, Point::zero(), &visible);
        Ok(())
    }

    fn cursor(&self, ctx: &dyn ViewContext) -> Option<Cursor> {
        let width = ctx.size().w as usize;
        if width == 0 {
            return None;
        }
        let x = u32::try_from(self.cursor - self.window_start(width)).ok()?;
        Some(Cursor {
            location: Point::new(x, 0),
            shape: CursorShape::Line,
            blink: true,
        })
    }

    fn on_event(&mut self, event: &Event, ctx: &mut dyn Context) -> Result<EventOutcome> {
        let changed = match event {
            Event::Key(k) => {
                if let Some(c) = k.printable() {
                    self.insert(&c.to_string())
                } else if *k == KeyCode::Backspace {
                    self.backspace()
                } else if *k == KeyCode::Delete {
                    self.delete()
                } else if *k == KeyCode::Left {
                    self.goto(self.cursor.saturating_sub(1))
                } else if *k == KeyCode::Right {
                    self.goto(self.cursor + 1)
                } else if *k == KeyCode::Home {
                    self.goto(0)
                } else if *k == KeyCode::End {
                    self.goto(self.value.len())
                } else {
                    return Ok(EventOutcome::Bubble);
                }
            }
            Event::Paste(s) => self.insert(s),
            Event::Mouse(m) if m.is_left_down() => {
                ctx.focus_self()?;
                return Ok(EventOutcome::Handled);
            }
            Event::FocusGained | Event::FocusLost => return Ok(EventOutcome::Handled),
            _ => return Ok(EventOutcome::Bubble),
        };
        if changed {
            // Text shifts right of the cursor and the window may scroll.
            ctx.damage_all()?;
        } else {
            // Nothing changed; report an empty damage so no redraw is forced.
            ctx.damage(Rect::zero())?;
        }
        Ok(EventOutcome::Handled)
    }

    fn accept_focus(&self) -> bool {
        true
    }

    fn to_json(&self) -> Value {
        json!({ "value": self.value(), "cursor": self.cursor })
    }
}

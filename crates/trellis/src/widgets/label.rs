use pad::PadStr;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    Canvas, Context, ViewContext,
    component::Component,
    error::Result,
    geom::{Expanse, Point, Rect},
    style::Style,
    text,
};

/// Horizontal alignment of each line of a [`Label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Flush left.
    #[default]
    Left,
    /// Centered, with any odd column going on the right.
    Center,
    /// Flush right.
    Right,
}

impl From<TextAlign> for pad::Alignment {
    fn from(a: TextAlign) -> Self {
        match a {
            TextAlign::Left => Self::Left,
            TextAlign::Center => Self::Middle,
            TextAlign::Right => Self::Right,
        }
    }
}

/// Display options for text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TextOptions {
    /// Wrap lines at word boundaries to the available width. Without
    /// wrapping, long lines are truncated.
    pub wrap: bool,
    /// Alignment of each line.
    pub align: TextAlign,
}

impl TextOptions {
    /// Parse options from a JSON document. Unknown fields and alignment
    /// values are rejected with [`Error::Config`](crate::error::Error::Config).
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Like [`from_json`](Self::from_json), from an already-parsed value.
    pub fn from_value(v: Value) -> Result<Self> {
        Ok(serde_json::from_value(v)?)
    }
}

/// A block of static text.
#[derive(Debug, Clone, Default)]
pub struct Label {
    /// The text, possibly containing newlines.
    text: String,
    /// Display options.
    options: TextOptions,
    /// Text style.
    style: Style,
}

impl Label {
    /// A left-aligned, unwrapped label.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set display options.
    pub fn with_options(mut self, options: TextOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the text style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text, damaging the label.
    pub fn set_text(&mut self, ctx: &mut dyn Context, text: impl Into<String>) -> Result<()> {
        self.text = text.into();
        ctx.damage_all()
    }

    /// The display lines at a given width.
    fn lines(&self, width: u32) -> Vec<String> {
        if self.options.wrap {
            let width = (width as usize).max(1);
            self.text
                .lines()
                .flat_map(|l| {
                    if l.is_empty() {
                        vec![String::new()]
                    } else {
                        textwrap::wrap(l, width)
                            .into_iter()
                            .map(|c| c.into_owned())
                            .collect()
                    }
                })
                .collect()
        } else {
            self.text.lines().map(str::to_string).collect()
        }
    }
}

impl Component for Label {
    fn preferred_size(&self, available_width: u32) -> Expanse {
        let lines = self.lines(available_width);
        let w = lines
            .iter()
            .map(|l| text::display_width(l))
            .max()
            .unwrap_or(0);
        Expanse::new(
            u32::try_from(w).unwrap_or(u32::MAX),
            u32::try_from(lines.len()).unwrap_or(u32::MAX),
        )
    }

    fn draw(&self, canvas: &mut Canvas, _region: Rect, _ctx: &dyn ViewContext) -> Result<()> {
        let size = canvas.size();
        let align = self.options.align.into();
        for (y, line) in self.lines(size.w).iter().enumerate().take(size.h as usize) {
            let padded = line.pad(size.w as usize, ' ', align, true);
            canvas.text(self.style, Point::new(0, y as u32), &padded);
        }
        Ok(())
    }

    fn to_json(&self) -> Value {
        json!({ "text": self.text, "options": self.options })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn options_validation() -> Result<()> {
        let o = TextOptions::from_json(r#"{"wrap": true, "align": "center"}"#)?;
        assert_eq!(
            o,
            TextOptions {
                wrap: true,
                align: TextAlign::Center
            }
        );
        assert_eq!(TextOptions::from_json("{}")?, TextOptions::default());
        assert!(matches!(
            TextOptions::from_json(r#"{"align": "justify"}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            TextOptions::from_json(r#"{"wrap": true, "colour": "red"}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            TextOptions::from_value(json!({"wrap": "yes"})),
            Err(Error::Config(_))
        ));
        Ok(())
    }

    #[test]
    fn wrapping() {
        let l = Label::new("the quick brown fox").with_options(TextOptions {
            wrap: true,
            align: TextAlign::Left,
        });
        assert_eq!(l.lines(10), vec!["the quick", "brown fox"]);
        assert_eq!(l.preferred_size(10), Expanse::new(9, 2));
        assert_eq!(l.preferred_size(100), Expanse::new(19, 1));

        let plain = Label::new("one\nthree");
        assert_eq!(plain.preferred_size(2), Expanse::new(5, 2));
    }
}

use crate::{backend::RenderBackend, cursor::Cursor, error::Result, geom::Point, style::Style};

/// A render backend that records every call, for asserting on exactly what
/// reaches the terminal.
#[derive(Debug, Default)]
pub struct TestRender {
    /// Calls in order: `move x,y`, `attr <style>`, `write <text>`, `flush`,
    /// `reset`, `show x,y`, `hide`.
    pub ops: Vec<String>,
    /// Each write with the cursor position it was made at.
    pub writes: Vec<(Point, String)>,
    /// Current cursor position.
    cursor: Point,
    /// The visible terminal cursor, if any.
    pub shown: Option<Cursor>,
}

impl TestRender {
    /// Construct an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.ops.clear();
        self.writes.clear();
    }

    /// Were no calls made?
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Rows that received any write, sorted and deduplicated.
    pub fn rows_written(&self) -> Vec<u32> {
        let mut rows: Vec<u32> = self.writes.iter().map(|(p, _)| p.y).collect();
        rows.sort_unstable();
        rows.dedup();
        rows
    }

    /// Does any write contain the substring?
    pub fn contains_text(&self, txt: &str) -> bool {
        self.writes.iter().any(|(_, t)| t.contains(txt))
    }
}

impl RenderBackend for TestRender {
    fn move_cursor(&mut self, p: Point) -> Result<()> {
        self.cursor = p;
        self.ops.push(format!("move {},{}", p.x, p.y));
        Ok(())
    }

    fn set_attributes(&mut self, style: &Style) -> Result<()> {
        self.ops.push(format!("attr {style:?}"));
        Ok(())
    }

    fn write_glyphs(&mut self, txt: &str) -> Result<()> {
        self.ops.push(format!("write {txt}"));
        self.writes.push((self.cursor, txt.to_string()));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.ops.push("flush".into());
        Ok(())
    }

    fn show_cursor(&mut self, c: &Cursor) -> Result<()> {
        self.ops.push(format!("show {},{}", c.location.x, c.location.y));
        self.shown = Some(*c);
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.ops.push("hide".into());
        self.shown = None;
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.ops.push("reset".into());
        Ok(())
    }
}

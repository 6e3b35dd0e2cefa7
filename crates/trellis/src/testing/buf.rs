//! Utilities for checking `TermBuf` contents in tests.
use crate::{
    geom::Point,
    style::{Color, Style},
    termbuf::{NULL, TermBuf},
};

/// A helper macro to create expected line sets for buffer match assertions.
#[macro_export]
macro_rules! buf {
    ($($line:literal)*) => {
        &[$($line),*]
    };
}

/// Buffer matcher. By default 'X' stands for cells nothing has drawn into,
/// which lets tests check partial paints.
pub struct BufTest<'a> {
    /// Buffer under test.
    buf: &'a TermBuf,
    /// Character shown for never-drawn cells.
    null_char: char,
    /// Optional wildcard character.
    any_char: Option<char>,
}

impl<'a> BufTest<'a> {
    /// Create a matcher over a buffer.
    pub fn new(buf: &'a TermBuf) -> Self {
        Self {
            buf,
            null_char: 'X',
            any_char: None,
        }
    }

    /// Set the character used to match never-drawn cells. Default is 'X'.
    pub fn with_null(mut self, null_char: char) -> Self {
        self.null_char = null_char;
        self
    }

    /// Set a character that matches any cell.
    pub fn with_any(mut self, any_char: char) -> Self {
        self.any_char = Some(any_char);
        self
    }

    /// Render one row, substituting the null marker. Continuation cells of
    /// wide glyphs are skipped.
    fn row_text(&self, y: u32) -> Option<String> {
        let row = self.buf.row(y)?;
        Some(
            row.iter()
                .filter(|c| !c.continuation)
                .map(|c| if c.ch == NULL { self.null_char } else { c.ch })
                .collect(),
        )
    }

    /// Returns true if the buffer content matches the expected lines.
    pub fn matches(&self, expected: &[&str]) -> bool {
        if expected.len() != self.buf.size().h as usize {
            return false;
        }
        for (y, expected_line) in expected.iter().enumerate() {
            let Some(actual) = self.row_text(y as u32) else {
                return false;
            };
            let want: Vec<char> = expected_line.trim_end().chars().collect();
            let got: Vec<char> = actual.trim_end().chars().collect();
            if want.len() != got.len() {
                return false;
            }
            for (w, g) in want.iter().zip(got.iter()) {
                if Some(*w) == self.any_char {
                    continue;
                }
                if w != g {
                    return false;
                }
            }
        }
        true
    }

    /// Assert that the buffer matches, printing both versions on failure.
    pub fn assert_matches(&self, expected: &[&str]) {
        self.assert_matches_with_context(expected, None);
    }

    /// Assert that the buffer matches, with extra context printed on failure.
    pub fn assert_matches_with_context(&self, expected: &[&str], context: Option<&str>) {
        if !self.matches(expected) {
            let width = expected.first().map(|l| l.len()).unwrap_or(10).max(10);
            if let Some(ctx) = context {
                println!("\n{ctx}");
            }
            println!("\nExpected:");
            println!("┌{}┐", "─".repeat(width));
            for line in expected {
                println!("│{line:width$}│");
            }
            println!("└{}┘", "─".repeat(width));
            println!("\nActual:");
            println!("┌{}┐", "─".repeat(width));
            for line in self.lines() {
                println!("│{line:width$}│");
            }
            println!("└{}┘", "─".repeat(width));
            panic!("Buffer contents did not match expected pattern");
        }
    }

    /// Does the buffer contain the supplied substring?
    pub fn contains_text(&self, txt: &str) -> bool {
        self.lines().iter().any(|l| l.contains(txt))
    }

    /// Does the buffer contain the supplied substring in the given foreground
    /// colour?
    pub fn contains_text_fg(&self, txt: &str, fg: Color) -> bool {
        self.find_text(txt, |s| s.fg == fg)
    }

    /// Does the buffer contain the supplied substring with exactly this style?
    pub fn contains_text_style(&self, txt: &str, style: Style) -> bool {
        self.find_text(txt, |s| *s == style)
    }

    /// Search for single-width text where every cell satisfies `pred`.
    fn find_text(&self, txt: &str, pred: impl Fn(&Style) -> bool) -> bool {
        let tl = txt.chars().count() as u32;
        let size = self.buf.size();
        if tl == 0 || tl > size.w {
            return false;
        }
        for y in 0..size.h {
            for x in 0..=size.w - tl {
                let hit = txt.chars().enumerate().all(|(i, ch)| {
                    self.buf
                        .get(Point::new(x + i as u32, y))
                        .is_some_and(|c| c.ch == ch && pred(&c.style))
                });
                if hit {
                    return true;
                }
            }
        }
        false
    }

    /// Return the contents of a line, or `None` past the last row.
    pub fn line_text(&self, y: u32) -> Option<String> {
        self.row_text(y)
    }

    /// Return the buffer contents as lines of text.
    pub fn lines(&self) -> Vec<String> {
        (0..self.buf.size().h)
            .filter_map(|y| self.row_text(y))
            .collect()
    }

    /// Print the buffer with a ruler, for debugging.
    pub fn dump(&self) {
        let size = self.buf.size();
        let width = size.w as usize;
        println!("\nTermBuf dump ({}x{}):", size.w, size.h);
        println!("┌{}┐", "─".repeat(width));
        for (y, line) in self.lines().iter().enumerate() {
            println!("│{line}│{}", y % 10);
        }
        println!("└{}┘", "─".repeat(width));
        print!(" ");
        for x in 0..width {
            print!("{}", x % 10);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Expanse;

    #[test]
    fn null_and_wildcards() {
        let mut tb = TermBuf::empty(Expanse::new(5, 2));
        for (i, ch) in "foo".chars().enumerate() {
            tb.put(Point::new(i as u32, 0), ch, Style::default());
        }
        let bt = BufTest::new(&tb);
        assert!(bt.matches(buf!("fooXX" "XXXXX")));
        assert!(!bt.matches(buf!("barXX" "XXXXX")));
        assert!(!bt.matches(buf!("fooXX")));

        let bt = BufTest::new(&tb).with_null('_').with_any('*');
        assert!(bt.matches(buf!("f**__" "_____")));
        assert_eq!(bt.line_text(0).as_deref(), Some("foo__"));
        assert_eq!(bt.line_text(2), None);
    }

    #[test]
    fn styled_search() {
        let mut tb = TermBuf::new(Expanse::new(10, 1), ' ', Style::default());
        let red = Style::new(Color::Red, Color::Black);
        for (i, ch) in "hello".chars().enumerate() {
            tb.put(Point::new(i as u32, 0), ch, Style::default());
        }
        for (i, ch) in "world".chars().enumerate() {
            tb.put(Point::new(5 + i as u32, 0), ch, red);
        }
        let bt = BufTest::new(&tb);
        assert!(bt.contains_text("lowo"));
        assert!(!bt.contains_text("goodbye"));
        assert!(bt.contains_text_fg("world", Color::Red));
        assert!(!bt.contains_text_fg("hello", Color::Red));
        assert!(bt.contains_text_style("hello", Style::default()));
        bt.dump();
    }
}

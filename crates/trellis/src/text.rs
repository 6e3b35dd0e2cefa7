//! Display-width helpers for grapheme-aware text placement.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Return the display width of a grapheme cluster, clamped to terminal cell
/// widths.
pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_empty() {
        return 0;
    }
    UnicodeWidthStr::width(grapheme).clamp(1, 2)
}

/// Return the display width of a string in terminal cells.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_width).sum()
}

/// Slice a string by display columns, returning the substring and its width.
/// A wide grapheme that straddles `start` is skipped rather than split.
pub fn slice_by_columns(s: &str, start: usize, max: usize) -> (&str, usize) {
    if max == 0 || s.is_empty() {
        return ("", 0);
    }

    let mut col = 0usize;
    let mut width = 0usize;
    let mut range: Option<(usize, usize)> = None;

    for (idx, grapheme) in s.grapheme_indices(true) {
        let g_width = grapheme_width(grapheme);
        if col < start {
            col += g_width;
            continue;
        }
        if width + g_width > max {
            break;
        }
        let begin = range.map_or(idx, |(b, _)| b);
        range = Some((begin, idx + grapheme.len()));
        width += g_width;
        col += g_width;
    }

    match range {
        Some((b, e)) => (&s[b..e], width),
        None => ("", 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_by_columns_handles_wide_chars() {
        let s = "a界b";
        let (out, width) = slice_by_columns(s, 0, 3);
        assert_eq!(out, "a界");
        assert_eq!(width, display_width(out));

        let (out, width) = slice_by_columns(s, 1, 2);
        assert_eq!(out, "界");
        assert_eq!(width, 2);

        let (out, width) = slice_by_columns(s, 2, 2);
        assert_eq!(out, "b");
        assert_eq!(width, 1);

        let (out, width) = slice_by_columns(s, 0, 1);
        assert_eq!(out, "a");
        assert_eq!(width, 1);
    }

    #[test]
    fn widths() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width("界界"), 4);
        assert_eq!(display_width(""), 0);
    }
}

//! Terminal geometry for the prompter
//!
//! The scroll engine counts in layout points. A terminal cell is mapped to
//! points from the font size: one row is `font_size + LINE_SPACING_PT` points
//! tall and one column is `CHAR_WIDTH_RATIO * font_size` points wide, so a
//! larger font fits fewer characters into the same prompter and scrolls fewer
//! rows per second at the same speed.

use prompter_core::PrompterState;
use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Extra space between wrapped lines
pub const LINE_SPACING_PT: f64 = 6.0;
/// Average glyph advance relative to the font size
pub const CHAR_WIDTH_RATIO: f64 = 0.6;
/// Padding around the text block
pub const PADDING_PT: f64 = 24.0;
/// Gap between the two stacked copies of the text
pub const COPY_GAP_PT: f64 = 8.0;

/// Cell metrics derived from a font size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Typography {
    pub font_size: f64,
}

impl Typography {
    pub fn new(font_size: f64) -> Self {
        Self { font_size }
    }

    /// Points per terminal row
    #[inline]
    pub fn row_height(&self) -> f64 {
        self.font_size + LINE_SPACING_PT
    }

    /// Points per terminal column
    #[inline]
    pub fn char_width(&self) -> f64 {
        self.font_size * CHAR_WIDTH_RATIO
    }

    pub fn px_to_cols(&self, px: f64) -> u16 {
        to_cells(px / self.char_width()).max(1)
    }

    pub fn px_to_rows(&self, px: f64) -> u16 {
        to_cells(px / self.row_height()).max(1)
    }

    /// Rows covering `pt` vertical points, rounded to the nearest row
    pub fn pt_to_rows(&self, pt: f64) -> u16 {
        to_cells((pt / self.row_height()).round())
    }

    /// Columns covering `pt` horizontal points, rounded to the nearest column
    pub fn pt_to_cols(&self, pt: f64) -> u16 {
        to_cells((pt / self.char_width()).round())
    }
}

fn to_cells(value: f64) -> u16 {
    if value.is_finite() && value > 0.0 {
        value.floor().min(u16::MAX as f64) as u16
    } else {
        0
    }
}

/// Rectangle of `width` x `height` centred horizontally, `top_margin` rows below
/// the top of `area`, clipped to `area`
pub fn notch_rect(area: Rect, width: u16, height: u16, top_margin: u16) -> Rect {
    let width = width.min(area.width);
    let top_margin = top_margin.min(area.height);
    let height = height.min(area.height - top_margin);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + top_margin;
    Rect::new(x, y, width, height)
}

/// Prompter rectangle for the current settings
pub fn prompter_rect(state: &PrompterState, area: Rect, top_margin: u16) -> Rect {
    let typography = Typography::new(state.font_size());
    notch_rect(
        area,
        typography.px_to_cols(state.width()),
        typography.px_to_rows(state.height()),
        top_margin,
    )
}

/// Word-wrap `text` to `max_cols` display columns.
///
/// Explicit newlines are kept, blank lines stay blank, and words wider than
/// the line are broken between characters.
pub fn wrap_text(text: &str, max_cols: u16) -> Vec<String> {
    let max_cols = max_cols.max(1) as usize;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0usize;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();

            if current_width > 0 && current_width + 1 + word_width <= max_cols {
                current.push(' ');
                current.push_str(word);
                current_width += 1 + word_width;
                continue;
            }

            if current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width <= max_cols {
                current.push_str(word);
                current_width = word_width;
            } else {
                // Break an over-long word across lines
                for ch in word.chars() {
                    let w = ch.width().unwrap_or(0);
                    if current_width + w > max_cols && current_width > 0 {
                        lines.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current.push(ch);
                    current_width += w;
                }
            }
        }

        lines.push(current);
    }

    lines
}

/// Wrapped text plus the row structure of the two stacked copies
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    /// Wrapped lines of one copy
    pub lines: Vec<String>,
    /// Empty rows above the first copy and below the second
    pub padding_rows: u16,
    /// Empty rows between the copies
    pub gap_rows: u16,
    /// Columns of horizontal padding on each side
    pub padding_cols: u16,
    pub typography: Typography,
}

impl TextLayout {
    /// Lay out `text` for a prompter `cols` columns wide
    pub fn measure(text: &str, typography: Typography, cols: u16) -> Self {
        let padding_cols = typography
            .pt_to_cols(PADDING_PT)
            .min(cols.saturating_sub(1) / 2);
        let inner = cols.saturating_sub(padding_cols * 2).max(1);
        Self {
            lines: wrap_text(text, inner),
            padding_rows: typography.pt_to_rows(PADDING_PT),
            gap_rows: typography.pt_to_rows(COPY_GAP_PT),
            padding_cols,
            typography,
        }
    }

    pub fn block_rows(&self) -> usize {
        self.lines.len()
    }

    /// Distance from the start of the first copy to the start of the second, in points.
    ///
    /// This is the height reported to the engine: wrapping the offset at this
    /// stride puts the second copy exactly where the first one was.
    pub fn content_height(&self) -> f64 {
        (self.block_rows() + self.gap_rows as usize) as f64 * self.typography.row_height()
    }

    /// Rows scrolled past for a given offset in points
    pub fn scroll_rows(&self, offset: f64) -> u16 {
        to_cells(offset / self.typography.row_height())
    }

    /// All rows to render: padding, copy, gap, copy, padding
    pub fn rendered_lines(&self) -> Vec<&str> {
        let pad = self.padding_rows as usize;
        let gap = self.gap_rows as usize;
        let mut out = Vec::with_capacity(pad * 2 + gap + self.lines.len() * 2);
        out.extend(std::iter::repeat("").take(pad));
        out.extend(self.lines.iter().map(String::as_str));
        out.extend(std::iter::repeat("").take(gap));
        out.extend(self.lines.iter().map(String::as_str));
        out.extend(std::iter::repeat("").take(pad));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typography_metrics() {
        let t = Typography::new(16.0);
        assert_eq!(t.row_height(), 22.0);
        assert!((t.char_width() - 9.6).abs() < 1e-9);
        assert_eq!(t.px_to_cols(400.0), 41);
        assert_eq!(t.px_to_rows(150.0), 6);
        assert_eq!(t.pt_to_rows(24.0), 1);
        assert_eq!(t.pt_to_rows(8.0), 0);
    }

    #[test]
    fn test_notch_rect_centered_at_top() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(notch_rect(area, 40, 6, 1), Rect::new(30, 1, 40, 6));
    }

    #[test]
    fn test_notch_rect_clipped_to_area() {
        let area = Rect::new(0, 0, 20, 5);
        assert_eq!(notch_rect(area, 40, 10, 1), Rect::new(0, 1, 20, 4));
        assert_eq!(notch_rect(area, 10, 10, 9), Rect::new(5, 5, 10, 0));
    }

    #[test]
    fn test_wrap_words() {
        assert_eq!(
            wrap_text("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn test_wrap_keeps_newlines_and_blank_lines() {
        assert_eq!(wrap_text("one\n\ntwo", 10), vec!["one", "", "two"]);
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_wrap_counts_wide_chars() {
        // each CJK character is two columns wide
        assert_eq!(wrap_text("日本語です", 4), vec!["日本", "語で", "す"]);
    }

    #[test]
    fn test_content_height_is_copy_stride() {
        let t = Typography::new(16.0);
        let layout = TextLayout::measure("a\nb\nc", t, 41);
        assert_eq!(layout.block_rows(), 3);
        assert_eq!(layout.gap_rows, 0);
        assert_eq!(layout.content_height(), 66.0);
    }

    #[test]
    fn test_wrap_point_shows_second_copy_at_first_copy_position() {
        let t = Typography::new(8.0); // 14pt rows, gap rounds to 1 row
        let layout = TextLayout::measure("first\nsecond", t, 40);
        assert_eq!(layout.gap_rows, 1);
        let rows = layout.rendered_lines();
        let skip = layout.scroll_rows(layout.content_height()) as usize;
        let pad = layout.padding_rows as usize;
        let block = layout.block_rows();
        // the second copy now sits on the rows the first copy occupied at offset 0
        assert_eq!(&rows[skip + pad..skip + pad + block], &rows[pad..pad + block]);
        assert_eq!(rows[skip + pad], "first");
    }

    #[test]
    fn test_rendered_lines_structure() {
        let t = Typography::new(16.0);
        let layout = TextLayout::measure("x", t, 41);
        assert_eq!(layout.rendered_lines(), vec!["", "x", "x", ""]);
    }
}

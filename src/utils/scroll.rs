//! Display-width-aware scroll math for the transcript view.

use ratatui::text::Line;
use unicode_width::UnicodeWidthStr;

pub struct ScrollCalculator;

impl ScrollCalculator {
    /// Total rows the lines occupy at the given width, counting word wrap
    /// the way the transcript paragraph wraps.
    pub fn wrapped_line_count(lines: &[Line], width: u16) -> u16 {
        if width == 0 {
            return lines.len() as u16;
        }
        lines
            .iter()
            .map(|line| {
                let text: String = line
                    .spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect();
                Self::rows_for_text(&text, width as usize)
            })
            .sum()
    }

    fn rows_for_text(text: &str, width: usize) -> u16 {
        if text.is_empty() {
            return 1;
        }

        let mut rows: u16 = 1;
        let mut used = 0usize;
        for word in text.split_whitespace() {
            let word_width = UnicodeWidthStr::width(word);

            // Overlong words wrap mid-word across as many rows as needed.
            if word_width > width {
                let remaining = width.saturating_sub(used);
                let overflow = word_width - remaining;
                rows += overflow.div_ceil(width) as u16;
                used = word_width % width;
                if used == 0 {
                    used = width;
                }
                continue;
            }

            let needed = if used == 0 { word_width } else { word_width + 1 };
            if used + needed > width {
                rows += 1;
                used = word_width;
            } else {
                used += needed;
            }
        }
        rows
    }

    pub fn max_scroll_offset(total_rows: u16, viewport_height: u16) -> u16 {
        total_rows.saturating_sub(viewport_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<Line<'static>> {
        texts.iter().map(|t| Line::from(t.to_string())).collect()
    }

    #[test]
    fn short_lines_take_one_row_each() {
        let lines = lines(&["hello", "", "world"]);
        assert_eq!(ScrollCalculator::wrapped_line_count(&lines, 20), 3);
    }

    #[test]
    fn long_lines_wrap_at_word_boundaries() {
        let lines = lines(&["one two three four five"]);
        // Width 9 fits "one two" / "three" / "four five".
        assert_eq!(ScrollCalculator::wrapped_line_count(&lines, 9), 3);
    }

    #[test]
    fn overlong_word_wraps_mid_word() {
        let lines = lines(&["abcdefghijklmnop"]);
        assert_eq!(ScrollCalculator::wrapped_line_count(&lines, 5), 4);
    }

    #[test]
    fn wide_characters_count_display_width() {
        let lines = lines(&["ああああ"]);
        // Four double-width characters need two rows at width 4.
        assert_eq!(ScrollCalculator::wrapped_line_count(&lines, 4), 2);
    }

    #[test]
    fn max_offset_saturates_at_zero() {
        assert_eq!(ScrollCalculator::max_scroll_offset(10, 4), 6);
        assert_eq!(ScrollCalculator::max_scroll_offset(3, 10), 0);
    }
}

use std::time::Instant;

use ratatui::prelude::Size;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};
use tui_textarea::{Input, TextArea};

use crate::ui::theme::Theme;

const PULSE_FRAMES: [char; 4] = ['○', '◐', '●', '◑'];
const PULSE_FRAME_MS: u128 = 180;

/// Everything the renderer needs besides the transcript: the input editor,
/// scroll state, the activity pulse, and the status line.
pub struct UiState {
    pub textarea: TextArea<'static>,
    pub theme: Theme,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    pub pulse_start: Instant,
    pub activity: bool,
    pub status: Option<String>,
    pub exit_requested: bool,
    pub last_term_size: Size,
}

impl UiState {
    pub fn new(theme: Theme) -> Self {
        let mut textarea = TextArea::default();
        textarea.set_cursor_line_style(Style::default());
        textarea.set_style(theme.input_text_style);
        textarea.set_block(Block::default().borders(Borders::ALL));

        Self {
            textarea,
            theme,
            scroll_offset: 0,
            auto_scroll: true,
            pulse_start: Instant::now(),
            activity: false,
            status: None,
            exit_requested: false,
            last_term_size: Size::default(),
        }
    }

    pub fn input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn clear_input(&mut self) {
        self.textarea.select_all();
        self.textarea.cut();
    }

    pub fn apply_input(&mut self, input: Input) {
        self.textarea.input(input);
    }

    pub fn insert_newline(&mut self) {
        self.textarea.insert_newline();
    }

    pub fn insert_text(&mut self, text: &str) {
        self.textarea.insert_str(text);
    }

    /// Rows the input block occupies, borders included.
    pub fn input_area_height(&self) -> u16 {
        (self.textarea.lines().len() as u16).clamp(1, 6) + 2
    }

    pub fn set_status<S: Into<String>>(&mut self, status: S) {
        self.status = Some(status.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn begin_activity(&mut self) {
        self.activity = true;
        self.pulse_start = Instant::now();
    }

    pub fn end_activity(&mut self) {
        self.activity = false;
    }

    pub fn pulse_frame(&self) -> char {
        let elapsed = self.pulse_start.elapsed().as_millis() / PULSE_FRAME_MS;
        PULSE_FRAMES[(elapsed % PULSE_FRAMES.len() as u128) as usize]
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    /// The renderer clamps against the real maximum and re-enables
    /// auto-follow once the view reaches the bottom.
    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn scroll_to_top(&mut self) {
        self.auto_scroll = false;
        self.scroll_offset = 0;
    }

    pub fn sticky_to_bottom(&mut self) {
        self.auto_scroll = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_round_trip() {
        let mut ui = UiState::new(Theme::dark_default());
        ui.insert_text("hello");
        ui.insert_newline();
        ui.insert_text("world");
        assert_eq!(ui.input_text(), "hello\nworld");

        ui.clear_input();
        assert_eq!(ui.input_text(), "");
    }

    #[test]
    fn input_area_height_tracks_lines_with_a_cap() {
        let mut ui = UiState::new(Theme::dark_default());
        assert_eq!(ui.input_area_height(), 3);

        for _ in 0..10 {
            ui.insert_newline();
        }
        assert_eq!(ui.input_area_height(), 8);
    }

    #[test]
    fn scrolling_up_disables_auto_follow() {
        let mut ui = UiState::new(Theme::dark_default());
        ui.scroll_offset = 5;
        ui.scroll_up(2);
        assert_eq!(ui.scroll_offset, 3);
        assert!(!ui.auto_scroll);

        ui.sticky_to_bottom();
        assert!(ui.auto_scroll);
    }
}

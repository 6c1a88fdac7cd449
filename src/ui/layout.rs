use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Splits the frame into the transcript area and the input block.
pub fn chat_layout(area: Rect, input_height: u16) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(input_height)])
        .split(area);
    (chunks[0], chunks[1])
}

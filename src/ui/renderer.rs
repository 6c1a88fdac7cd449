//! Frame rendering: transcript paragraph on top, input editor below.

use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::core::app::App;
use crate::core::conversation::ConversationState;
use crate::core::message::TranscriptRole;
use crate::ui::layout::chat_layout;
use crate::ui::theme::Theme;
use crate::utils::scroll::ScrollCalculator;

pub fn ui(f: &mut Frame, app: &mut App) {
    let App {
        conversation, ui, ..
    } = app;

    let input_height = ui.input_area_height();
    let (transcript_area, input_area) = chat_layout(f.area(), input_height);

    f.render_widget(
        Block::default().style(Style::default().bg(ui.theme.background_color)),
        f.area(),
    );

    // Transcript, pinned to the bottom while auto-follow is on.
    let lines = build_transcript_lines(conversation, &ui.theme);
    let available_height = transcript_area.height.saturating_sub(1);
    let total_rows = ScrollCalculator::wrapped_line_count(&lines, transcript_area.width);
    let max_offset = ScrollCalculator::max_scroll_offset(total_rows, available_height);
    if ui.auto_scroll || ui.scroll_offset >= max_offset {
        ui.scroll_offset = max_offset;
        ui.auto_scroll = true;
    }

    let title = Line::from(Span::styled(" ponder ", ui.theme.title_style));
    let transcript = Paragraph::new(lines)
        .block(Block::default().title(title))
        .wrap(Wrap { trim: false })
        .scroll((ui.scroll_offset, 0));
    f.render_widget(transcript, transcript_area);

    // Input block; the border and title flip to the busy look mid-turn.
    let (border_style, hint) = if ui.activity {
        (
            ui.theme.activity_indicator_style,
            format!(" {} thinking — Esc to cancel ", ui.pulse_frame()),
        )
    } else {
        (
            ui.theme.input_border_style,
            " Enter to send · Ctrl+T thoughts · Ctrl+C quit ".to_string(),
        )
    };
    let title = match &ui.status {
        Some(status) => format!(" {status} "),
        None => hint,
    };
    ui.textarea.set_style(ui.theme.input_text_style);
    ui.textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Span::styled(title, ui.theme.input_title_style)),
    );
    f.render_widget(&ui.textarea, input_area);
}

/// Builds the visible transcript, honoring the thought toggle. Thought rows
/// carry a distinct accent style so reasoning reads apart from answers.
pub fn build_transcript_lines<'a>(
    conversation: &'a ConversationState,
    theme: &Theme,
) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    for msg in conversation.visible_messages() {
        match msg.role {
            TranscriptRole::User => {
                let mut first = true;
                for content_line in msg.content.lines() {
                    if first {
                        lines.push(Line::from(vec![
                            Span::styled("You: ", theme.user_prefix_style),
                            Span::styled(content_line, theme.user_text_style),
                        ]));
                        first = false;
                    } else {
                        lines.push(Line::from(Span::styled(
                            content_line,
                            theme.user_text_style,
                        )));
                    }
                }
                if first {
                    lines.push(Line::from(Span::styled("You: ", theme.user_prefix_style)));
                }
            }
            TranscriptRole::Thought => {
                for content_line in msg.content.lines() {
                    lines.push(Line::from(Span::styled(
                        content_line,
                        theme.thought_text_style,
                    )));
                }
            }
            TranscriptRole::Response => {
                for content_line in msg.content.lines() {
                    if content_line.trim().is_empty() {
                        lines.push(Line::from(""));
                    } else {
                        lines.push(Line::from(Span::styled(
                            content_line,
                            theme.response_text_style,
                        )));
                    }
                }
            }
            TranscriptRole::System => {
                for content_line in msg.content.lines() {
                    lines.push(Line::from(Span::styled(
                        content_line,
                        theme.system_text_style,
                    )));
                }
            }
        }
        lines.push(Line::from("")); // Spacing between entries
    }

    lines
}

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,
    // Transcript styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub thought_text_style: Style,
    pub response_text_style: Style,
    pub system_text_style: Style,

    // Chrome
    pub title_style: Style,
    pub activity_indicator_style: Style,
    pub input_border_style: Style,
    pub input_title_style: Style,

    // Input area
    pub input_text_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            background_color: Color::Black,
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            thought_text_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            response_text_style: Style::default().fg(Color::White),
            system_text_style: Style::default().fg(Color::Yellow),

            title_style: Style::default().fg(Color::Gray),
            activity_indicator_style: Style::default().fg(Color::White),
            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),

            input_text_style: Style::default().fg(Color::White),
        }
    }

    pub fn light() -> Self {
        Theme {
            background_color: Color::White,
            user_prefix_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Blue),
            thought_text_style: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
            response_text_style: Style::default().fg(Color::Black),
            system_text_style: Style::default().fg(Color::Magenta),

            title_style: Style::default().fg(Color::DarkGray),
            activity_indicator_style: Style::default().fg(Color::Black),
            input_border_style: Style::default().fg(Color::Black),
            input_title_style: Style::default().fg(Color::DarkGray),

            input_text_style: Style::default().fg(Color::Black),
        }
    }

    pub fn dracula() -> Self {
        Theme {
            background_color: Color::Black,
            user_prefix_style: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Magenta),
            thought_text_style: Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::ITALIC),
            response_text_style: Style::default().fg(Color::Gray),
            system_text_style: Style::default().fg(Color::LightYellow),

            title_style: Style::default().fg(Color::LightMagenta),
            activity_indicator_style: Style::default().fg(Color::LightMagenta),
            input_border_style: Style::default().fg(Color::LightMagenta),
            input_title_style: Style::default().fg(Color::LightMagenta),

            input_text_style: Style::default().fg(Color::White),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            "dracula" => Self::dracula(),
            // Fallback
            _ => Self::dark_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_falls_back_to_dark() {
        let unknown = Theme::from_name("no-such-theme");
        assert_eq!(unknown.background_color, Color::Black);

        let light = Theme::from_name("LIGHT");
        assert_eq!(light.background_color, Color::White);
    }
}

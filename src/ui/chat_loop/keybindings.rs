//! Maps terminal events to reducer actions.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tui_textarea::Input;

use crate::core::app::AppAction;

pub fn actions_for_event(event: Event) -> Vec<AppAction> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => actions_for_key(key),
        Event::Paste(text) => {
            // Bracketed paste can carry carriage returns; the editor wants
            // bare newlines.
            let text = text.replace('\r', "\n");
            vec![AppAction::InsertText { text }]
        }
        _ => Vec::new(),
    }
}

pub fn actions_for_key(key: KeyEvent) -> Vec<AppAction> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => vec![AppAction::Quit],
        (KeyCode::Char('t'), KeyModifiers::CONTROL) => vec![AppAction::ToggleThoughts],
        (KeyCode::Esc, _) => vec![AppAction::CancelTurn],
        (KeyCode::Enter, KeyModifiers::ALT) => vec![AppAction::InsertNewline],
        (KeyCode::Enter, KeyModifiers::NONE) => vec![AppAction::Submit],
        (KeyCode::Up, _) => vec![AppAction::ScrollUp { lines: 1 }],
        (KeyCode::Down, _) => vec![AppAction::ScrollDown { lines: 1 }],
        (KeyCode::PageUp, _) => vec![AppAction::ScrollPageUp],
        (KeyCode::PageDown, _) => vec![AppAction::ScrollPageDown],
        (KeyCode::Home, _) => vec![AppAction::ScrollToTop],
        (KeyCode::End, _) => vec![AppAction::ScrollToBottom],
        _ => vec![AppAction::EditInput {
            input: Input::from(key),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn control_chords_map_to_app_actions() {
        assert!(matches!(
            actions_for_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL))[..],
            [AppAction::Quit]
        ));
        assert!(matches!(
            actions_for_key(key(KeyCode::Char('t'), KeyModifiers::CONTROL))[..],
            [AppAction::ToggleThoughts]
        ));
        assert!(matches!(
            actions_for_key(key(KeyCode::Esc, KeyModifiers::NONE))[..],
            [AppAction::CancelTurn]
        ));
    }

    #[test]
    fn enter_submits_and_alt_enter_inserts_newline() {
        assert!(matches!(
            actions_for_key(key(KeyCode::Enter, KeyModifiers::NONE))[..],
            [AppAction::Submit]
        ));
        assert!(matches!(
            actions_for_key(key(KeyCode::Enter, KeyModifiers::ALT))[..],
            [AppAction::InsertNewline]
        ));
    }

    #[test]
    fn plain_characters_go_to_the_editor() {
        let actions = actions_for_key(key(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(matches!(actions[..], [AppAction::EditInput { .. }]));
    }

    #[test]
    fn paste_normalizes_carriage_returns() {
        let actions = actions_for_event(Event::Paste("a\r\nb".to_string()));
        match &actions[..] {
            [AppAction::InsertText { text }] => assert_eq!(text, "a\n\nb"),
            other => panic!("unexpected actions: {}", other.len()),
        }
    }

    #[test]
    fn key_release_events_are_ignored() {
        let mut release = key(KeyCode::Char('x'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(actions_for_event(Event::Key(release)).is_empty());
    }
}

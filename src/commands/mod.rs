//! Slash-command parsing and execution for the chat loop.

use crate::core::app::App;

pub enum CommandResult {
    Continue,
    ProcessAsMessage(String),
}

const HELP_TEXT: &str = "\
Commands:
  /help              Show this reference
  /clear             Clear the transcript
  /stats             Message counts and session length
  /thoughts [on|off] Set or toggle thought visibility
  /quit              Exit

Keys:
  Enter              Send the message
  Alt+Enter          Insert a newline
  Ctrl+T             Toggle thought visibility
  Esc                Cancel the in-flight turn
  Ctrl+C             Quit
  Up/Down/PgUp/PgDn  Scroll the transcript
  Home/End           Jump to top / bottom";

pub fn process_input(app: &mut App, input: &str) -> CommandResult {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return CommandResult::ProcessAsMessage(input.to_string());
    }

    let mut parts = trimmed.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let argument = parts.next();

    match command {
        "/help" => {
            app.controller().add_system_message(HELP_TEXT);
        }
        "/clear" => {
            if app.conversation.turn_in_flight() {
                app.ui
                    .set_status("Cannot clear while a turn is in flight — Esc to cancel first");
            } else {
                app.controller().clear();
            }
        }
        "/stats" => {
            let report = app.conversation.stats().report();
            app.controller().add_system_message(report);
        }
        "/thoughts" => {
            let shown = match argument {
                Some("on") => {
                    app.controller().set_show_thoughts(true);
                    true
                }
                Some("off") => {
                    app.controller().set_show_thoughts(false);
                    false
                }
                _ => app.controller().toggle_thoughts(),
            };
            app.ui.set_status(if shown {
                "Thoughts shown"
            } else {
                "Thoughts hidden"
            });
        }
        "/quit" | "/exit" => {
            app.controller().cancel_current_turn();
            app.ui.exit_requested = true;
        }
        other => {
            app.controller()
                .add_system_message(format!("Unknown command: {other} — try /help"));
        }
    }

    CommandResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::TranscriptRole;
    use crate::utils::test_utils::create_test_app;

    #[test]
    fn plain_text_passes_through() {
        let mut app = create_test_app();
        match process_input(&mut app, "hello world") {
            CommandResult::ProcessAsMessage(msg) => assert_eq!(msg, "hello world"),
            CommandResult::Continue => panic!("expected pass-through"),
        }
        assert!(app.conversation.is_empty());
    }

    #[test]
    fn help_appends_a_system_message() {
        let mut app = create_test_app();
        assert!(matches!(
            process_input(&mut app, "/help"),
            CommandResult::Continue
        ));
        let msg = app.conversation.messages().last().unwrap();
        assert_eq!(msg.role, TranscriptRole::System);
        assert!(msg.content.contains("/thoughts"));
    }

    #[test]
    fn clear_is_rejected_while_in_flight() {
        let mut app = create_test_app();
        app.controller().add_user_message("hi".to_string());
        app.controller().begin_turn();

        process_input(&mut app, "/clear");
        assert_eq!(app.conversation.len(), 1);
        assert!(app.ui.status.is_some());

        app.controller().complete_turn();
        process_input(&mut app, "/clear");
        assert!(app.conversation.is_empty());
    }

    #[test]
    fn thoughts_accepts_explicit_and_toggle_forms() {
        let mut app = create_test_app();
        process_input(&mut app, "/thoughts off");
        assert!(!app.conversation.show_thoughts);
        process_input(&mut app, "/thoughts on");
        assert!(app.conversation.show_thoughts);
        process_input(&mut app, "/thoughts");
        assert!(!app.conversation.show_thoughts);
    }

    #[test]
    fn stats_reports_counts() {
        let mut app = create_test_app();
        app.controller().add_user_message("q".to_string());
        process_input(&mut app, "/stats");
        let msg = app.conversation.messages().last().unwrap();
        assert!(msg.content.contains("total messages: 1"));
    }

    #[test]
    fn quit_requests_exit() {
        let mut app = create_test_app();
        process_input(&mut app, "/quit");
        assert!(app.ui.exit_requested);
    }

    #[test]
    fn unknown_command_is_reported() {
        let mut app = create_test_app();
        process_input(&mut app, "/frobnicate now");
        let msg = app.conversation.messages().last().unwrap();
        assert!(msg.content.contains("Unknown command: /frobnicate"));
    }
}

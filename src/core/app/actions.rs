use tokio::sync::mpsc;
use tracing::debug;
use tui_textarea::Input;

use super::App;
use crate::commands::{process_input, CommandResult};
use crate::core::turn::TurnParams;

/// Every state mutation flows through here; the event loop translates input
/// and turn events into actions and applies them in arrival order.
pub enum AppAction {
    Submit,
    EditInput { input: Input },
    InsertText { text: String },
    InsertNewline,
    ToggleThoughts,
    CancelTurn,
    Quit,
    ScrollUp { lines: u16 },
    ScrollDown { lines: u16 },
    ScrollPageUp,
    ScrollPageDown,
    ScrollToTop,
    ScrollToBottom,
    SetStatus { message: String },
    ClearStatus,
    TurnThought { text: String, turn_id: u64 },
    TurnFinal { text: String, turn_id: u64 },
    TurnErrored { message: String, turn_id: u64 },
    TurnCancelled { turn_id: u64 },
    TurnCompleted { turn_id: u64 },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AppActionContext {
    pub term_width: u16,
    pub term_height: u16,
}

pub struct AppActionEnvelope {
    pub action: AppAction,
    pub context: AppActionContext,
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppActionEnvelope>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppActionEnvelope>) -> Self {
        Self { tx }
    }

    pub fn dispatch_many<I>(&self, actions: I, ctx: AppActionContext)
    where
        I: IntoIterator<Item = AppAction>,
    {
        for action in actions.into_iter() {
            let _ = self.tx.send(AppActionEnvelope {
                action,
                context: ctx,
            });
        }
    }
}

/// Side effects the reducer cannot perform itself; the event loop executes
/// them after applying a batch.
pub enum AppCommand {
    SpawnTurn(TurnParams),
}

pub fn apply_actions(
    app: &mut App,
    envelopes: impl IntoIterator<Item = AppActionEnvelope>,
) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for envelope in envelopes {
        if let Some(cmd) = apply_action(app, envelope.action, envelope.context) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction, ctx: AppActionContext) -> Option<AppCommand> {
    match action {
        AppAction::Submit => handle_submit(app),
        AppAction::EditInput { input } => {
            app.ui.apply_input(input);
            None
        }
        AppAction::InsertText { text } => {
            if !text.is_empty() {
                app.ui.insert_text(&text);
            }
            None
        }
        AppAction::InsertNewline => {
            app.ui.insert_newline();
            None
        }
        AppAction::ToggleThoughts => {
            let shown = app.controller().toggle_thoughts();
            app.ui.set_status(if shown {
                "Thoughts shown"
            } else {
                "Thoughts hidden"
            });
            None
        }
        AppAction::CancelTurn => {
            // A cancel landing after natural completion is a harmless race.
            if app.conversation.turn_in_flight() {
                app.controller().cancel_current_turn();
            }
            None
        }
        AppAction::Quit => {
            app.controller().cancel_current_turn();
            app.ui.exit_requested = true;
            None
        }
        AppAction::ScrollUp { lines } => {
            app.ui.scroll_up(lines);
            None
        }
        AppAction::ScrollDown { lines } => {
            app.ui.scroll_down(lines);
            None
        }
        AppAction::ScrollPageUp => {
            app.ui.scroll_up(page_size(app, ctx));
            None
        }
        AppAction::ScrollPageDown => {
            app.ui.scroll_down(page_size(app, ctx));
            None
        }
        AppAction::ScrollToTop => {
            app.ui.scroll_to_top();
            None
        }
        AppAction::ScrollToBottom => {
            app.ui.sticky_to_bottom();
            None
        }
        AppAction::SetStatus { message } => {
            app.ui.set_status(message);
            None
        }
        AppAction::ClearStatus => {
            app.ui.clear_status();
            None
        }
        AppAction::TurnThought { text, turn_id } => {
            if is_current_turn(app, turn_id) {
                app.controller().append_thought(text);
            }
            None
        }
        AppAction::TurnFinal { text, turn_id } => {
            if is_current_turn(app, turn_id) {
                app.controller().append_response(text);
            }
            None
        }
        AppAction::TurnErrored { message, turn_id } => {
            if is_current_turn(app, turn_id) {
                app.controller()
                    .add_system_message(format!("Error processing request: {}", message.trim()));
                app.conversation.mark_completing();
            }
            None
        }
        AppAction::TurnCancelled { turn_id } => {
            if is_current_turn(app, turn_id) {
                app.controller().add_system_message("Request cancelled.");
                app.conversation.mark_completing();
            }
            None
        }
        AppAction::TurnCompleted { turn_id } => {
            if turn_id == app.session.current_turn_id && app.conversation.turn_in_flight() {
                app.controller().complete_turn();
            }
            None
        }
    }
}

/// Terminal events from a superseded turn, or arriving when nothing is in
/// flight, are discarded.
fn is_current_turn(app: &App, turn_id: u64) -> bool {
    turn_id == app.session.current_turn_id && app.conversation.turn_in_flight()
}

fn page_size(app: &App, ctx: AppActionContext) -> u16 {
    ctx.term_height
        .saturating_sub(app.ui.input_area_height())
        .max(1)
}

fn handle_submit(app: &mut App) -> Option<AppCommand> {
    let text = app.ui.input_text();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with('/') {
        app.ui.clear_input();
        return match process_input(app, trimmed) {
            CommandResult::Continue => None,
            CommandResult::ProcessAsMessage(message) => submit_message(app, message),
        };
    }

    if app.conversation.turn_in_flight() {
        // Defends against the race between a submit keypress and the busy
        // state; the draft stays in the editor.
        debug!("submission rejected, turn in flight");
        app.ui.set_status("Still thinking — press Esc to cancel");
        return None;
    }

    app.ui.clear_input();
    submit_message(app, text)
}

fn submit_message(app: &mut App, message: String) -> Option<AppCommand> {
    if app.conversation.turn_in_flight() {
        return None;
    }

    let mut controller = app.controller();
    controller.add_user_message(message.clone());
    let (cancel_token, turn_id) = controller.begin_turn();

    Some(AppCommand::SpawnTurn(TurnParams {
        supervisor: app.session.supervisor.clone(),
        input: message,
        cancel_token,
        turn_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversation::TurnPhase;
    use crate::core::message::TranscriptRole;
    use crate::utils::test_utils::create_test_app;

    fn ctx() -> AppActionContext {
        AppActionContext {
            term_width: 80,
            term_height: 24,
        }
    }

    fn submit(app: &mut App, text: &str) -> Option<AppCommand> {
        app.ui.insert_text(text);
        apply_action(app, AppAction::Submit, ctx())
    }

    fn roles(app: &App) -> Vec<TranscriptRole> {
        app.conversation.messages().map(|m| m.role).collect()
    }

    #[test]
    fn submit_appends_user_message_and_spawns_turn() {
        let mut app = create_test_app();
        let command = submit(&mut app, "hello there");

        assert!(matches!(command, Some(AppCommand::SpawnTurn(_))));
        assert_eq!(roles(&app), vec![TranscriptRole::User]);
        assert!(app.conversation.turn_in_flight());
        assert_eq!(app.session.current_turn_id, 1);
        assert!(app.session.turn_cancel_token.is_some());
        assert_eq!(app.ui.input_text(), "");
    }

    #[test]
    fn blank_submit_is_a_no_op() {
        let mut app = create_test_app();
        assert!(submit(&mut app, "   ").is_none());
        assert!(app.conversation.is_empty());
        assert!(!app.conversation.turn_in_flight());
    }

    #[test]
    fn second_submit_during_flight_is_rejected() {
        let mut app = create_test_app();
        submit(&mut app, "first");

        app.ui.insert_text("second");
        let command = apply_action(&mut app, AppAction::Submit, ctx());

        assert!(command.is_none());
        assert_eq!(roles(&app), vec![TranscriptRole::User]);
        assert_eq!(app.session.current_turn_id, 1);
        // The rejected draft is kept for after the turn.
        assert_eq!(app.ui.input_text(), "second");
    }

    #[test]
    fn turn_events_append_in_order_and_complete() {
        let mut app = create_test_app();
        submit(&mut app, "what is six times seven");
        let id = app.session.current_turn_id;

        for action in [
            AppAction::TurnThought {
                text: "Analyzing...".to_string(),
                turn_id: id,
            },
            AppAction::TurnThought {
                text: "Searching...".to_string(),
                turn_id: id,
            },
            AppAction::TurnFinal {
                text: "42".to_string(),
                turn_id: id,
            },
            AppAction::TurnCompleted { turn_id: id },
        ] {
            assert!(apply_action(&mut app, action, ctx()).is_none());
        }

        assert_eq!(
            roles(&app),
            vec![
                TranscriptRole::User,
                TranscriptRole::Thought,
                TranscriptRole::Thought,
                TranscriptRole::Response,
            ]
        );
        assert!(!app.conversation.turn_in_flight());
        assert!(app.session.turn_cancel_token.is_none());
    }

    #[test]
    fn error_renders_as_system_message_and_turn_still_completes() {
        let mut app = create_test_app();
        submit(&mut app, "hello");
        let id = app.session.current_turn_id;

        apply_action(
            &mut app,
            AppAction::TurnThought {
                text: "partway".to_string(),
                turn_id: id,
            },
            ctx(),
        );
        apply_action(
            &mut app,
            AppAction::TurnErrored {
                message: " backend exploded ".to_string(),
                turn_id: id,
            },
            ctx(),
        );
        assert_eq!(app.conversation.phase(), TurnPhase::Completing);

        apply_action(&mut app, AppAction::TurnCompleted { turn_id: id }, ctx());

        let last = app.conversation.messages().last().unwrap();
        assert_eq!(last.role, TranscriptRole::System);
        assert_eq!(last.content, "Error processing request: backend exploded");
        assert!(!app.conversation.turn_in_flight());
    }

    #[test]
    fn stale_turn_events_are_discarded() {
        let mut app = create_test_app();
        submit(&mut app, "hello");
        let stale_id = app.session.current_turn_id;

        // A second turn supersedes the first.
        apply_action(
            &mut app,
            AppAction::TurnCompleted { turn_id: stale_id },
            ctx(),
        );
        submit(&mut app, "again");
        let before = app.conversation.len();

        apply_action(
            &mut app,
            AppAction::TurnThought {
                text: "late".to_string(),
                turn_id: stale_id,
            },
            ctx(),
        );
        apply_action(
            &mut app,
            AppAction::TurnErrored {
                message: "late error".to_string(),
                turn_id: stale_id,
            },
            ctx(),
        );

        assert_eq!(app.conversation.len(), before);
        assert!(app.conversation.turn_in_flight());
    }

    #[test]
    fn terminal_events_with_no_turn_in_flight_are_ignored() {
        let mut app = create_test_app();
        apply_action(&mut app, AppAction::TurnCancelled { turn_id: 0 }, ctx());
        apply_action(&mut app, AppAction::TurnCompleted { turn_id: 0 }, ctx());
        assert!(app.conversation.is_empty());
    }

    #[test]
    fn cancel_then_cancelled_event_notes_the_cancellation() {
        let mut app = create_test_app();
        submit(&mut app, "slow question");
        let id = app.session.current_turn_id;

        apply_action(&mut app, AppAction::CancelTurn, ctx());
        apply_action(&mut app, AppAction::TurnCancelled { turn_id: id }, ctx());
        apply_action(&mut app, AppAction::TurnCompleted { turn_id: id }, ctx());

        let last = app.conversation.messages().last().unwrap();
        assert_eq!(last.role, TranscriptRole::System);
        assert_eq!(last.content, "Request cancelled.");
        assert!(!app.conversation.turn_in_flight());
    }

    #[test]
    fn toggle_thoughts_flips_visibility_without_touching_messages() {
        let mut app = create_test_app();
        submit(&mut app, "q");
        let id = app.session.current_turn_id;
        apply_action(
            &mut app,
            AppAction::TurnThought {
                text: "hmm".to_string(),
                turn_id: id,
            },
            ctx(),
        );

        let before = app.conversation.len();
        assert!(app.conversation.show_thoughts);
        apply_action(&mut app, AppAction::ToggleThoughts, ctx());
        assert!(!app.conversation.show_thoughts);
        apply_action(&mut app, AppAction::ToggleThoughts, ctx());
        assert!(app.conversation.show_thoughts);
        assert_eq!(app.conversation.len(), before);
    }

    #[test]
    fn quit_cancels_the_active_turn() {
        let mut app = create_test_app();
        submit(&mut app, "hello");
        let token = app.session.turn_cancel_token.clone().unwrap();

        apply_action(&mut app, AppAction::Quit, ctx());

        assert!(app.ui.exit_requested);
        assert!(token.is_cancelled());
    }

    #[test]
    fn slash_commands_work_while_a_turn_is_in_flight() {
        let mut app = create_test_app();
        submit(&mut app, "hello");

        let command = submit(&mut app, "/thoughts off");
        assert!(command.is_none());
        assert!(!app.conversation.show_thoughts);
        assert!(app.conversation.turn_in_flight());
    }

    #[test]
    fn apply_actions_collects_commands_in_order() {
        let mut app = create_test_app();
        app.ui.insert_text("hello");
        let envelopes = vec![
            AppActionEnvelope {
                action: AppAction::Submit,
                context: ctx(),
            },
            AppActionEnvelope {
                action: AppAction::ClearStatus,
                context: ctx(),
            },
        ];

        let commands = apply_actions(&mut app, envelopes);
        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], AppCommand::SpawnTurn(_)));
    }
}

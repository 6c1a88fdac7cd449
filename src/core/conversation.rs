//! The transcript and the per-turn state machine, plus the controller the
//! action reducer uses to mutate them together with session and UI state.

use std::collections::VecDeque;

use chrono::Local;
use tokio_util::sync::CancellationToken;

use super::app::{SessionContext, UiState};
use super::message::{ChatMessage, TranscriptRole};

/// Where the active turn is in its lifecycle.
///
/// `Idle -> Submitting -> Streaming -> Completing -> Idle`; a turn is in
/// flight in every phase except `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Idle,
    Submitting,
    Streaming,
    Completing,
}

/// Append-only transcript owned by the display context.
///
/// Entries are never reordered or mutated after insertion; thought visibility
/// is a render-time filter over the stored sequence, so toggling never
/// touches the messages themselves.
pub struct ConversationState {
    messages: VecDeque<ChatMessage>,
    next_message_id: u64,
    phase: TurnPhase,
    pub show_thoughts: bool,
}

impl ConversationState {
    pub fn new(show_thoughts: bool) -> Self {
        Self {
            messages: VecDeque::new(),
            next_message_id: 1,
            phase: TurnPhase::Idle,
            show_thoughts,
        }
    }

    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    pub fn visible_messages(&self) -> impl Iterator<Item = &ChatMessage> {
        let show_thoughts = self.show_thoughts;
        self.messages
            .iter()
            .filter(move |msg| msg.is_visible(show_thoughts))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn append(&mut self, role: TranscriptRole, content: impl Into<String>) -> u64 {
        let id = self.next_message_id;
        self.next_message_id += 1;
        self.messages.push_back(ChatMessage::new(id, role, content));
        id
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn turn_in_flight(&self) -> bool {
        self.phase != TurnPhase::Idle
    }

    pub fn begin_turn(&mut self) {
        self.phase = TurnPhase::Submitting;
    }

    /// First event of the turn has arrived.
    pub fn mark_streaming(&mut self) {
        if self.phase == TurnPhase::Submitting {
            self.phase = TurnPhase::Streaming;
        }
    }

    /// A terminal event (error or cancellation) was appended; only the
    /// trailing `TurnComplete` remains.
    pub fn mark_completing(&mut self) {
        if self.turn_in_flight() {
            self.phase = TurnPhase::Completing;
        }
    }

    pub fn finish_turn(&mut self) {
        self.phase = TurnPhase::Idle;
    }

    pub fn toggle_thoughts(&mut self) -> bool {
        self.show_thoughts = !self.show_thoughts;
        self.show_thoughts
    }

    /// Resets the transcript wholesale. Ids restart too; they only need to be
    /// unique within a transcript lifetime.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.next_message_id = 1;
    }

    pub fn stats(&self) -> ChatStats {
        let mut stats = ChatStats {
            total: self.messages.len(),
            ..Default::default()
        };
        for msg in &self.messages {
            match msg.role {
                TranscriptRole::User => stats.user += 1,
                TranscriptRole::Thought => stats.thoughts += 1,
                TranscriptRole::Response => stats.responses += 1,
                TranscriptRole::System => {}
            }
        }
        stats.session_seconds = self.messages.front().map(|first| {
            Local::now()
                .signed_duration_since(first.timestamp())
                .num_seconds()
                .max(0)
        });
        stats
    }
}

/// Message counts by role plus the session span, reported by `/stats`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChatStats {
    pub total: usize,
    pub user: usize,
    pub thoughts: usize,
    pub responses: usize,
    pub session_seconds: Option<i64>,
}

impl ChatStats {
    pub fn report(&self) -> String {
        let session = match self.session_seconds {
            Some(secs) if secs >= 60 => format!("{}m {}s", secs / 60, secs % 60),
            Some(secs) => format!("{secs}s"),
            None => "empty".to_string(),
        };
        format!(
            "Chat statistics:\n  total messages: {}\n  yours: {}\n  thoughts: {}\n  responses: {}\n  session: {}",
            self.total, self.user, self.thoughts, self.responses, session
        )
    }
}

/// Short-lived view over the pieces of [`App`](super::app::App) that turn and
/// command handling mutate together.
pub struct ConversationController<'a> {
    session: &'a mut SessionContext,
    conversation: &'a mut ConversationState,
    ui: &'a mut UiState,
}

impl<'a> ConversationController<'a> {
    pub fn new(
        session: &'a mut SessionContext,
        conversation: &'a mut ConversationState,
        ui: &'a mut UiState,
    ) -> Self {
        Self {
            session,
            conversation,
            ui,
        }
    }

    pub fn add_user_message(&mut self, content: String) {
        self.clear_status();
        self.conversation.append(TranscriptRole::User, content);
        self.ui.sticky_to_bottom();
    }

    pub fn add_system_message(&mut self, content: impl Into<String>) {
        self.conversation.append(TranscriptRole::System, content);
        self.ui.sticky_to_bottom();
    }

    pub fn append_thought(&mut self, text: String) {
        self.conversation.mark_streaming();
        self.conversation.append(TranscriptRole::Thought, text);
    }

    pub fn append_response(&mut self, text: String) {
        self.conversation.mark_streaming();
        self.conversation.append(TranscriptRole::Response, text);
    }

    /// Cancels any previous turn, bumps the turn id, and hands back the fresh
    /// token the producer task will watch.
    pub fn begin_turn(&mut self) -> (CancellationToken, u64) {
        self.cancel_current_turn();

        self.session.current_turn_id += 1;
        let token = CancellationToken::new();
        self.session.turn_cancel_token = Some(token.clone());
        self.conversation.begin_turn();
        self.ui.begin_activity();

        (token, self.session.current_turn_id)
    }

    pub fn complete_turn(&mut self) {
        self.session.turn_cancel_token = None;
        self.conversation.finish_turn();
        self.ui.end_activity();
    }

    pub fn cancel_current_turn(&mut self) {
        if let Some(token) = &self.session.turn_cancel_token {
            token.cancel();
        }
        self.session.turn_cancel_token = None;
    }

    pub fn toggle_thoughts(&mut self) -> bool {
        self.conversation.toggle_thoughts()
    }

    pub fn set_show_thoughts(&mut self, on: bool) {
        self.conversation.show_thoughts = on;
    }

    pub fn clear(&mut self) {
        self.conversation.clear();
        self.ui.scroll_to_top();
        self.ui.sticky_to_bottom();
    }

    pub fn set_status<S: Into<String>>(&mut self, status: S) {
        self.ui.set_status(status);
    }

    pub fn clear_status(&mut self) {
        self.ui.clear_status();
    }
}

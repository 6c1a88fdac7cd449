//! Runtime application state and the action reducer that owns every mutation
//! of it.

mod actions;
mod session;
mod ui_state;

use std::sync::Arc;

pub use actions::{
    apply_action, apply_actions, AppAction, AppActionContext, AppActionDispatcher,
    AppActionEnvelope, AppCommand,
};
pub use session::SessionContext;
pub use ui_state::UiState;

use crate::core::conversation::{ConversationController, ConversationState};
use crate::supervisor::Supervisor;
use crate::ui::theme::Theme;

pub struct App {
    pub session: SessionContext,
    pub conversation: ConversationState,
    pub ui: UiState,
}

impl App {
    pub fn new(supervisor: Arc<dyn Supervisor>, theme: Theme, show_thoughts: bool) -> Self {
        Self {
            session: SessionContext::new(supervisor),
            conversation: ConversationState::new(show_thoughts),
            ui: UiState::new(theme),
        }
    }

    pub fn controller(&mut self) -> ConversationController<'_> {
        ConversationController::new(&mut self.session, &mut self.conversation, &mut self.ui)
    }
}

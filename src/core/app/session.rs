use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::supervisor::Supervisor;

/// Session-scoped handles: the supervisor plugged into this session and the
/// bookkeeping for the turn currently in flight.
///
/// `current_turn_id` tags every event the producer task pushes; the display
/// loop discards events carrying a superseded id.
pub struct SessionContext {
    pub supervisor: Arc<dyn Supervisor>,
    pub turn_cancel_token: Option<CancellationToken>,
    pub current_turn_id: u64,
}

impl SessionContext {
    pub fn new(supervisor: Arc<dyn Supervisor>) -> Self {
        Self {
            supervisor,
            turn_cancel_token: None,
            current_turn_id: 0,
        }
    }
}

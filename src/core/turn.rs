//! The producer side of the streaming pipeline.
//!
//! A [`TurnDispatcher`] spawns one task per turn. The task pulls the
//! supervisor's step stream to completion and forwards each element as a
//! [`TurnEvent`] over an unbounded channel; the display loop drains the other
//! end without ever blocking. Supervisor faults are converted to data at this
//! boundary, so nothing that happens inside a supervisor can crash the
//! session.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::supervisor::Supervisor;

/// Wire format between the producer task and the display loop.
///
/// Per turn, exactly one of `Error`/`Cancelled` may appear (or a `Final` in
/// the well-behaved case), and `TurnComplete` is always the last event.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnEvent {
    Thought(String),
    Final(String),
    Error(String),
    Cancelled,
    TurnComplete,
}

pub struct TurnParams {
    pub supervisor: Arc<dyn Supervisor>,
    pub input: String,
    pub cancel_token: CancellationToken,
    pub turn_id: u64,
}

/// Producer handle over the turn-event channel. Cloneable; events are tagged
/// with the turn id so the consumer can discard stale ones.
#[derive(Clone)]
pub struct TurnDispatcher {
    tx: mpsc::UnboundedSender<(TurnEvent, u64)>,
}

fn payload(slot: Option<String>) -> Option<String> {
    slot.filter(|text| !text.is_empty())
}

impl TurnDispatcher {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(TurnEvent, u64)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn spawn_turn(&self, params: TurnParams) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let TurnParams {
                supervisor,
                input,
                cancel_token,
                turn_id,
            } = params;

            debug!(turn_id, "turn spawned");

            tokio::select! {
                _ = async {
                    let mut steps = supervisor.process_query(&input).await;
                    while let Some(step) = steps.next().await {
                        match step {
                            Ok(step) => {
                                // Thought before final when a step carries both.
                                if let Some(text) = payload(step.thought) {
                                    let _ = tx.send((TurnEvent::Thought(text), turn_id));
                                }
                                if let Some(text) = payload(step.response) {
                                    let _ = tx.send((TurnEvent::Final(text), turn_id));
                                }
                            }
                            Err(e) => {
                                debug!(turn_id, error = %e, "supervisor fault");
                                let _ = tx.send((TurnEvent::Error(e.to_string()), turn_id));
                                break;
                            }
                        }
                    }
                    let _ = tx.send((TurnEvent::TurnComplete, turn_id));
                } => {}
                _ = cancel_token.cancelled() => {
                    debug!(turn_id, "turn cancelled");
                    let _ = tx.send((TurnEvent::Cancelled, turn_id));
                    let _ = tx.send((TurnEvent::TurnComplete, turn_id));
                }
            }
        });
    }

    #[cfg(test)]
    pub fn send_for_test(&self, event: TurnEvent, turn_id: u64) {
        let _ = self.tx.send((event, turn_id));
    }
}

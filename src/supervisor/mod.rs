//! The producer contract and the supervisors that ship with the binary.
//!
//! A supervisor maps one user query to a finite stream of [`SupervisorStep`]s.
//! Each step may carry an intermediate thought, a final response, both, or
//! neither; a faulting supervisor surfaces the fault as an `Err` item and the
//! turn pipeline converts it to transcript data at that boundary.

mod mock;
mod script;

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

pub use mock::MockSupervisor;
pub use script::{ScriptedSupervisor, StepScript};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Finite, ordered stream of steps for one query.
pub type StepStream = BoxStream<'static, Result<SupervisorStep, BoxError>>;

/// One yielded element of a supervisor's output.
///
/// The common case populates exactly one slot. Both-empty steps are legal
/// no-ops; both-populated steps are legal and the pipeline emits the thought
/// before the final response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupervisorStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

impl SupervisorStep {
    pub fn thought(text: impl Into<String>) -> Self {
        Self {
            thought: Some(text.into()),
            response: None,
        }
    }

    pub fn response(text: impl Into<String>) -> Self {
        Self {
            thought: None,
            response: Some(text.into()),
        }
    }
}

/// The external producer contract.
///
/// The returned stream is pulled element-by-element inside a spawned task, so
/// implementations may take arbitrarily long between items without freezing
/// the interface.
#[async_trait]
pub trait Supervisor: Send + Sync {
    async fn process_query(&self, input: &str) -> StepStream;
}

/// Blocking-iterator flavor of the contract for embedders whose producers
/// are not async. Bridge into the async shape with [`SyncBridge`].
pub trait SyncSupervisor: Send + Sync {
    fn process_query(
        &self,
        input: &str,
    ) -> Box<dyn Iterator<Item = Result<SupervisorStep, BoxError>> + Send>;
}

/// Runs a [`SyncSupervisor`] on the blocking thread pool, forwarding its
/// steps through an unbounded channel into a [`StepStream`].
pub struct SyncBridge<S> {
    inner: Arc<S>,
}

impl<S> SyncBridge<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }
}

#[async_trait]
impl<S> Supervisor for SyncBridge<S>
where
    S: SyncSupervisor + 'static,
{
    async fn process_query(&self, input: &str) -> StepStream {
        let (tx, rx) = mpsc::unbounded_channel();
        let inner = Arc::clone(&self.inner);
        let input = input.to_string();

        tokio::task::spawn_blocking(move || {
            for step in inner.process_query(&input) {
                // Receiver dropped means the turn was superseded; stop pulling.
                if tx.send(step).is_err() {
                    break;
                }
            }
        });

        stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|item| (item, rx))
        })
        .boxed()
    }
}

//! Replays supervisor steps from a JSON script file.
//!
//! Scripts drive demos and exercise the turn pipeline without a live
//! supervisor:
//!
//! ```json
//! {
//!   "steps": [
//!     { "thought": "Analyzing..." },
//!     { "response": "42" }
//!   ],
//!   "fault": null,
//!   "step_delay_ms": 250
//! }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use super::{BoxError, StepStream, Supervisor, SupervisorStep};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepScript {
    #[serde(default)]
    pub steps: Vec<SupervisorStep>,
    /// Fault raised after the last step, if any.
    #[serde(default)]
    pub fault: Option<String>,
    #[serde(default)]
    pub step_delay_ms: Option<u64>,
}

impl StepScript {
    pub fn load(path: &Path) -> Result<Self, BoxError> {
        let contents = fs::read_to_string(path)?;
        let script = serde_json::from_str(&contents)?;
        Ok(script)
    }
}

pub struct ScriptedSupervisor {
    script: StepScript,
}

impl ScriptedSupervisor {
    pub fn new(script: StepScript) -> Self {
        Self { script }
    }

    pub fn from_file(path: &Path) -> Result<Self, BoxError> {
        Ok(Self::new(StepScript::load(path)?))
    }

    fn items(&self) -> Vec<Result<SupervisorStep, BoxError>> {
        let mut items: Vec<Result<SupervisorStep, BoxError>> =
            self.script.steps.iter().cloned().map(Ok).collect();
        if let Some(fault) = &self.script.fault {
            items.push(Err(fault.clone().into()));
        }
        items
    }
}

#[async_trait]
impl Supervisor for ScriptedSupervisor {
    async fn process_query(&self, _input: &str) -> StepStream {
        let delay = Duration::from_millis(self.script.step_delay_ms.unwrap_or(0));
        let items = self.items();

        if delay.is_zero() {
            return stream::iter(items).boxed();
        }

        stream::iter(items)
            .then(move |item| async move {
                sleep(delay).await;
                item
            })
            .boxed()
    }
}

//! The demonstration supervisor that powers the binary out of the box.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use tokio::time::sleep;

use super::{StepStream, Supervisor, SupervisorStep};

/// Classifies queries by keyword and replays an intent-specific sequence of
/// thought steps, paced by a configurable delay, before a canned answer.
pub struct MockSupervisor {
    thinking_delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Question,
    Help,
    Creation,
    General,
}

impl Intent {
    fn classify(input: &str) -> Self {
        let lower = input.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        if has(&["question", "what", "how", "why", "when", "where"]) {
            Intent::Question
        } else if has(&["help", "assist", "support"]) {
            Intent::Help
        } else if has(&["create", "generate", "make", "build"]) {
            Intent::Creation
        } else {
            Intent::General
        }
    }

    fn label(self) -> &'static str {
        match self {
            Intent::Question => "question",
            Intent::Help => "help request",
            Intent::Creation => "creation",
            Intent::General => "general",
        }
    }
}

impl MockSupervisor {
    pub fn new(thinking_delay: Duration) -> Self {
        Self { thinking_delay }
    }

    fn steps_for(input: &str) -> Vec<SupervisorStep> {
        let intent = Intent::classify(input);
        let mut steps = vec![
            SupervisorStep::thought("Analyzing input and parsing intent..."),
            SupervisorStep::thought(format!("Detected intent: {}", intent.label())),
            SupervisorStep::thought("Gathering relevant context from the conversation..."),
        ];

        match intent {
            Intent::Question | Intent::Help => {
                steps.push(SupervisorStep::thought(
                    "Searching the knowledge base for relevant entries...",
                ));
                steps.push(SupervisorStep::thought("Found 3 relevant knowledge entries"));
            }
            Intent::Creation => {
                steps.push(SupervisorStep::thought(
                    "Sketching a structure for the requested artifact...",
                ));
            }
            Intent::General => {}
        }

        steps.push(SupervisorStep::thought(
            "Evaluating response strategies and selecting an approach...",
        ));
        steps.push(SupervisorStep::response(Self::answer_for(input, intent)));
        steps
    }

    fn answer_for(input: &str, intent: Intent) -> String {
        format!(
            "Based on your input (\"{}\", read as a {}): this is the built-in \
demonstration supervisor, so there is no model behind this answer. A real \
supervisor plugged into the same contract would stream its reasoning the \
same way and put its actual response here.",
            input.trim(),
            intent.label()
        )
    }
}

#[async_trait]
impl Supervisor for MockSupervisor {
    async fn process_query(&self, input: &str) -> StepStream {
        let delay = self.thinking_delay;
        stream::iter(Self::steps_for(input))
            .then(move |step| async move {
                if !delay.is_zero() {
                    sleep(delay).await;
                }
                Ok(step)
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_keyword() {
        assert_eq!(Intent::classify("What is Rust?"), Intent::Question);
        assert_eq!(Intent::classify("please help me out"), Intent::Help);
        assert_eq!(Intent::classify("generate a poem"), Intent::Creation);
        assert_eq!(Intent::classify("nice weather today"), Intent::General);
    }

    #[test]
    fn steps_end_with_a_single_final_response() {
        let steps = MockSupervisor::steps_for("how does this work");
        let finals: Vec<_> = steps.iter().filter(|s| s.response.is_some()).collect();
        assert_eq!(finals.len(), 1);
        assert!(steps.last().unwrap().response.is_some());
        assert!(steps[..steps.len() - 1].iter().all(|s| s.thought.is_some()));
    }

    #[tokio::test]
    async fn stream_yields_every_step_in_order() {
        use futures_util::StreamExt;

        let supervisor = MockSupervisor::new(Duration::ZERO);
        let expected = MockSupervisor::steps_for("hello");
        let streamed: Vec<_> = supervisor
            .process_query("hello")
            .await
            .map(|step| step.expect("mock never faults"))
            .collect()
            .await;

        assert_eq!(streamed, expected);
    }
}

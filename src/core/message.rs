use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Role of a transcript entry.
///
/// Stored (and serialized) as lowercase strings so transcripts stay readable
/// when dumped for debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TranscriptRole {
    /// Text the user submitted.
    User,
    /// An intermediate reasoning step from the supervisor.
    Thought,
    /// The supervisor's final answer for a turn.
    Response,
    /// Interface notices: command output, errors, cancellations.
    System,
}

impl TranscriptRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptRole::User => "user",
            TranscriptRole::Thought => "thought",
            TranscriptRole::Response => "response",
            TranscriptRole::System => "system",
        }
    }
}

impl std::fmt::Display for TranscriptRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TranscriptRole {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(TranscriptRole::User),
            "thought" => Ok(TranscriptRole::Thought),
            "response" => Ok(TranscriptRole::Response),
            "system" => Ok(TranscriptRole::System),
            other => Err(format!("unknown transcript role: {other}")),
        }
    }
}

impl TryFrom<String> for TranscriptRole {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TranscriptRole::try_from(value.as_str())
    }
}

impl From<TranscriptRole> for String {
    fn from(role: TranscriptRole) -> Self {
        role.as_str().to_string()
    }
}

impl PartialEq<&str> for TranscriptRole {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// One immutable transcript entry.
///
/// Ids are assigned by the conversation in creation order; the timestamp is
/// captured once at construction and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub role: TranscriptRole,
    pub content: String,
    timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(id: u64, role: TranscriptRole, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            timestamp: Local::now(),
        }
    }

    pub fn user(id: u64, content: impl Into<String>) -> Self {
        Self::new(id, TranscriptRole::User, content)
    }

    pub fn thought(id: u64, content: impl Into<String>) -> Self {
        Self::new(id, TranscriptRole::Thought, content)
    }

    pub fn response(id: u64, content: impl Into<String>) -> Self {
        Self::new(id, TranscriptRole::Response, content)
    }

    pub fn system(id: u64, content: impl Into<String>) -> Self {
        Self::new(id, TranscriptRole::System, content)
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Whether this entry should be rendered given the current thought
    /// visibility toggle. Only Thought-role entries are ever filtered.
    pub fn is_visible(&self, show_thoughts: bool) -> bool {
        self.role != TranscriptRole::Thought || show_thoughts
    }
}

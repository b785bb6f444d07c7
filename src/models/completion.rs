// file: src/models/completion.rs
// description: typed completion result distinguishing generated text from failure
// reference: tagged result replacing a string-sniffed sentinel value

use serde::{Deserialize, Serialize};

/// Display form of an exhausted completion call. Kept verbatim from the
/// legacy contract so downstream text consumers see the familiar marker.
pub const COMPLETION_FAILED_SENTINEL: &str = "[LLM call failed after retries]";

/// Outcome of one completion call. The caller never sees an error: after
/// retries are exhausted the failure reason is carried here, and
/// `into_text` renders the fixed sentinel for plain-text paths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CompletionOutcome {
    Success(String),
    Failed(String),
}

impl CompletionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CompletionOutcome::Success(_))
    }

    pub fn as_success(&self) -> Option<&str> {
        match self {
            CompletionOutcome::Success(text) => Some(text),
            CompletionOutcome::Failed(_) => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            CompletionOutcome::Success(_) => None,
            CompletionOutcome::Failed(reason) => Some(reason),
        }
    }

    /// Generated text, or the sentinel string when the call failed.
    pub fn into_text(self) -> String {
        match self {
            CompletionOutcome::Success(text) => text,
            CompletionOutcome::Failed(_) => COMPLETION_FAILED_SENTINEL.to_string(),
        }
    }
}

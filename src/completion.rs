//! Chat completion backend and its decoded outcome.

mod client;

use async_trait::async_trait;

use crate::error::{BotError, FailureKind};
use crate::history::History;
use crate::types::Turn;

pub use client::ChatCompletionsClient;

/// Result of one completion round trip, decoded once at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The model produced non-empty text
    Reply(String),
    /// The API answered but carried no usable text
    Empty,
    /// The request failed
    Failure { kind: FailureKind, detail: String },
}

impl From<BotError> for CompletionOutcome {
    fn from(err: BotError) -> Self {
        CompletionOutcome::Failure {
            kind: err.failure_kind(),
            detail: err.to_string(),
        }
    }
}

impl From<Option<String>> for CompletionOutcome {
    fn from(content: Option<String>) -> Self {
        match content {
            Some(text) if !text.is_empty() => CompletionOutcome::Reply(text),
            _ => CompletionOutcome::Empty,
        }
    }
}

/// Something that turns a prompt into generated text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Submit the prompt (system turn first, then history) and decode the answer.
    async fn complete(&self, prompt: &[Turn]) -> CompletionOutcome;

    /// Build the prompt for a user's history, system instruction first.
    fn build_prompt(&self, history: &History) -> Vec<Turn> {
        build_prompt(self.system_prompt(), history)
    }

    fn system_prompt(&self) -> &str;
}

/// One fixed system turn followed by the history in insertion order.
#[must_use]
pub fn build_prompt(system_prompt: &str, history: &History) -> Vec<Turn> {
    std::iter::once(Turn::system(system_prompt))
        .chain(history.iter().cloned())
        .collect()
}

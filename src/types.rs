//! Common types used throughout the relay bot.

use serde::{Deserialize, Serialize};

/// Role of a message in the conversation.
///
/// Maps to chat completion API message roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message from the human user
    User,
    /// Message from the AI assistant
    Assistant,
    /// System prompt or instructions
    System,
}

/// One role-tagged message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: MessageRole,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn turn_serializes_with_lowercase_role() {
        let value = serde_json::to_value(Turn::assistant("hi")).expect("serializable");
        assert_eq!(value, json!({"role": "assistant", "content": "hi"}));
    }
}
